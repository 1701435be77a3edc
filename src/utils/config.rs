use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::algorithms::ellipsoid::Ellipsoid;
use crate::algorithms::local_frame::LocalFrame;
use crate::core::{AngleUnit, Geodetic};
use crate::validation::error::{ConversionError, GeodesyError};

/// Converter-wide settings persisted as JSON
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Unit of every angle passed to or returned by the converter
    #[serde(default)]
    pub angle_unit: AngleUnit,
    /// Reference ellipsoid
    #[serde(default)]
    pub ellipsoid: EllipsoidConfig,
    /// Default observer, in `angle_unit`
    #[serde(default)]
    pub observer: Option<Geodetic>,
}

/// Reference ellipsoid, either a named model or explicit axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EllipsoidConfig {
    Named { name: String },
    Custom { semimajor_axis: f64, semiminor_axis: f64 },
}

impl Default for EllipsoidConfig {
    fn default() -> Self {
        Self::Named {
            name: "wgs84".to_string(),
        }
    }
}

impl EllipsoidConfig {
    pub fn resolve(&self) -> Result<Ellipsoid, GeodesyError> {
        match self {
            Self::Named { name } => Ellipsoid::from_name(name),
            Self::Custom {
                semimajor_axis,
                semiminor_axis,
            } => Ellipsoid::new(*semimajor_axis, *semiminor_axis),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("configuration I/O failed: {message}")]
    Io { message: String },

    #[error("configuration (de)serialization failed: {message}")]
    Serialization { message: String },

    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("no observer configured")]
    MissingObserver,

    #[error(transparent)]
    Geodesy(#[from] GeodesyError),
}

/// Outcome of checking a configuration
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn into_result(self) -> Result<(), ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub struct ConfigurationManager {
    config: ConverterConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self {
            config: ConverterConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create a manager and load its configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Replace the whole configuration; rejected configurations leave the
    /// current one untouched
    pub fn update_config(&mut self, config: ConverterConfig) -> Result<(), ConfigError> {
        Self::check(&config)?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Switch the angle unit, returning the previous one.
    ///
    /// A configured observer is converted so it keeps describing the same place.
    pub fn set_angle_unit(&mut self, unit: AngleUnit) -> AngleUnit {
        let old = self.config.angle_unit;
        if old != unit {
            if let Some(observer) = self.config.observer.as_mut() {
                observer.lat = unit.from_radians(old.to_radians(observer.lat));
                observer.lon = unit.from_radians(old.to_radians(observer.lon));
            }
            self.config.angle_unit = unit;
            self.is_modified = true;
        }
        old
    }

    /// Set the default observer, returning the previous one
    pub fn set_observer(&mut self, observer: Geodetic) -> Result<Option<Geodetic>, ConfigError> {
        let mut candidate = self.config.clone();
        candidate.observer = Some(observer);
        Self::check(&candidate)?;

        self.is_modified = true;
        Ok(self.config.observer.replace(observer))
    }

    pub fn set_ellipsoid(&mut self, ellipsoid: EllipsoidConfig) -> Result<Ellipsoid, ConfigError> {
        let resolved = ellipsoid.resolve()?;
        self.config.ellipsoid = ellipsoid;
        self.is_modified = true;
        Ok(resolved)
    }

    pub fn ellipsoid(&self) -> Result<Ellipsoid, ConfigError> {
        Ok(self.config.ellipsoid.resolve()?)
    }

    /// Frame of the configured observer on the configured ellipsoid
    pub fn local_frame(&self) -> Result<LocalFrame, ConfigError> {
        let observer = self.config.observer.ok_or(ConfigError::MissingObserver)?;
        let ellipsoid = self.ellipsoid()?;

        LocalFrame::new(observer, Some(&ellipsoid), self.config.angle_unit).map_err(|err| match err {
            ConversionError::Geodesy(inner) => ConfigError::Geodesy(inner),
            other => ConfigError::InvalidParameter {
                parameter: "observer".to_string(),
                value: format!("{:?}", observer),
                reason: other.to_string(),
            },
        })
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            message: format!("failed to read config file '{}': {}", path_str, e),
        })?;

        let config: ConverterConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: format!("failed to parse config file '{}': {}", path_str, e),
        })?;

        Self::check(&config)?;

        debug!(path = %path_str, unit = ?config.angle_unit, "loaded converter configuration");
        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Serialization {
            message: format!("failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::Io {
            message: format!("failed to write config file '{}': {}", path_str, e),
        })?;

        debug!(path = %path_str, "saved converter configuration");
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the file the configuration was last loaded from or saved to
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::Io {
                message: "no file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Whether the configuration changed since it was last loaded or saved
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn validate(&self) -> ValidationResult {
        Self::validate_config(&self.config)
    }

    pub fn validate_config(config: &ConverterConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(err) = config.ellipsoid.resolve() {
            errors.push(ConfigError::Geodesy(err));
        }

        match config.observer {
            Some(observer) => {
                let unit = config.angle_unit;
                for (parameter, value) in [
                    ("observer.lat", observer.lat),
                    ("observer.lon", observer.lon),
                    ("observer.alt", observer.alt),
                ] {
                    if !value.is_finite() {
                        errors.push(ConfigError::InvalidParameter {
                            parameter: parameter.to_string(),
                            value: value.to_string(),
                            reason: "must be finite".to_string(),
                        });
                    }
                }

                if observer.lat.abs() > unit.quarter_turn() {
                    errors.push(ConfigError::Geodesy(GeodesyError::LatitudeOutOfRange {
                        lat: observer.lat,
                        limit: unit.quarter_turn(),
                    }));
                }

                if observer.lon.abs() > unit.full_turn() / 2.0 {
                    warnings.push(format!(
                        "observer longitude {} is outside the usual half-turn range",
                        observer.lon
                    ));
                }
            }
            None => warnings.push("no observer configured; local_frame() will fail".to_string()),
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn check(config: &ConverterConfig) -> Result<(), ConfigError> {
        let validation = Self::validate_config(config);
        if !validation.is_valid {
            warn!(errors = ?validation.errors, "rejected converter configuration");
        }
        validation.into_result()
    }
}
