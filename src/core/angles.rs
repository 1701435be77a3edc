//! Angle primitives: unit conversion, azimuth wrapping and the zero snap

use crate::core::constants::{FULL_TURN_RAD, MAX_LATITUDE_RAD, SNAP_THRESHOLD_M};
use crate::core::types::AngleUnit;

impl AngleUnit {
    /// Convert an angle expressed in this unit to radians
    #[inline]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }

    /// Convert an angle in radians to this unit
    #[inline]
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_degrees(),
            AngleUnit::Radians => angle,
        }
    }

    /// One full turn in this unit (360 or 2π)
    #[inline]
    pub fn full_turn(self) -> f64 {
        match self {
            AngleUnit::Degrees => 360.0,
            AngleUnit::Radians => FULL_TURN_RAD,
        }
    }

    /// Quarter turn in this unit, the largest valid absolute latitude
    #[inline]
    pub fn quarter_turn(self) -> f64 {
        match self {
            AngleUnit::Degrees => 90.0,
            AngleUnit::Radians => MAX_LATITUDE_RAD,
        }
    }
}

/// Wrap an azimuth in radians into `[0, 2π)`.
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 2π, so that value is
/// folded back to north.
#[inline]
pub fn wrap_azimuth(azimuth_rad: f64) -> f64 {
    let wrapped = azimuth_rad.rem_euclid(FULL_TURN_RAD);
    if wrapped >= FULL_TURN_RAD {
        0.0
    } else {
        wrapped
    }
}

/// Express a radian azimuth in `unit`, keeping it strictly below a full turn
#[inline]
pub fn azimuth_in_unit(azimuth_rad: f64, unit: AngleUnit) -> f64 {
    let azimuth = unit.from_radians(wrap_azimuth(azimuth_rad));
    if azimuth >= unit.full_turn() {
        0.0
    } else {
        azimuth
    }
}

/// Replace a component with exactly zero when it lies inside the 1 mm band
#[inline]
pub fn snap_to_zero(value: f64) -> f64 {
    if value.abs() < SNAP_THRESHOLD_M {
        0.0
    } else {
        value
    }
}
