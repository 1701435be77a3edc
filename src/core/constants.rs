//! Numerical constants for the conversion graph

use std::f64::consts::{FRAC_PI_2, TAU};

/// Components closer to zero than this (meters) are treated as exactly zero
/// before azimuth and elevation are computed.
pub const SNAP_THRESHOLD_M: f64 = 1e-3;

/// One full turn in radians, the azimuth wrap-around period
pub const FULL_TURN_RAD: f64 = TAU;

/// Largest valid absolute latitude in radians
pub const MAX_LATITUDE_RAD: f64 = FRAC_PI_2;
