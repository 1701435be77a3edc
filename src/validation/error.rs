use thiserror::Error;

/// Failures raised by the ellipsoid model and the ECEF conversions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeodesyError {
    #[error("latitude {lat} is outside [-{limit}, {limit}]")]
    LatitudeOutOfRange { lat: f64, limit: f64 },

    #[error("invalid ellipsoid (a = {semimajor_axis}, b = {semiminor_axis}): {reason}")]
    InvalidEllipsoid {
        semimajor_axis: f64,
        semiminor_axis: f64,
        reason: &'static str,
    },

    #[error("unknown ellipsoid model: {0}")]
    UnknownEllipsoid(String),
}

/// Failures of the ENU / AER / geodetic conversions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("slant range must be in [0, inf), got {range}")]
    NegativeRange { range: f64 },

    /// Collaborator failure, surfaced with its own message
    #[error(transparent)]
    Geodesy(#[from] GeodesyError),

    #[error("inputs cannot be broadcast together: {0}")]
    Shape(String),
}

pub type ConversionResult<T> = Result<T, ConversionError>;
