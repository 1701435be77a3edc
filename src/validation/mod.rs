//! Error taxonomy for the conversion graph

pub mod error;

pub use error::{ConversionError, ConversionResult, GeodesyError};
