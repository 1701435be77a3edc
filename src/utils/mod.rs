//! Persisted converter configuration

pub mod config;

pub use config::{ConfigError, ConfigurationManager, ConverterConfig, EllipsoidConfig};
