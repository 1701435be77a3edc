//! ENU / AER / geodetic coordinate conversions
//!
//! Converts between an observer's local East-North-Up frame, look angles
//! (azimuth, elevation, slant range), Earth-centred Earth-fixed Cartesian
//! coordinates and geodetic latitude / longitude / altitude on any reference
//! ellipsoid. Angles are degrees unless [`AngleUnit::Radians`] is passed.
//!
//! The point functions take plain `f64`s. [`algorithms::elementwise`] lifts the
//! ENU conversions to arrays with NumPy-style broadcasting (cargo feature
//! `ndarray`), and [`LocalFrame`] caches an observer for repeated use.

pub mod algorithms;
pub mod core;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use algorithms::aer::{aer2enu, enu2aer};
pub use algorithms::ecef::{ecef2enu, ecef2geodetic, enu2ecef, enu2uvw, geodetic2ecef, uvw2enu};
pub use algorithms::ellipsoid::Ellipsoid;
pub use algorithms::enu::{aer2ecef, aer2geodetic, ecef2aer, enu2geodetic, geodetic2aer, geodetic2enu};
pub use algorithms::local_frame::LocalFrame;
pub use core::{Aer, AngleUnit, Ecef, Enu, Geodetic};
pub use utils::config::{ConfigError, ConfigurationManager, ConverterConfig, EllipsoidConfig};
pub use validation::error::{ConversionError, ConversionResult, GeodesyError};
