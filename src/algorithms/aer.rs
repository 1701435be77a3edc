//! East-North-Up <-> Azimuth-Elevation-Range in the observer's local frame
//!
//! No ellipsoid is involved: both representations describe the same offset
//! from the observer, one as Cartesian components and one as a pointing
//! direction plus slant distance. Azimuth is clockwise from north and always
//! lies in `[0, 360)` degrees or `[0, 2π)` radians.

use tracing::trace;

use crate::core::{azimuth_in_unit, snap_to_zero, Aer, AngleUnit, Enu};
use crate::validation::error::{ConversionError, ConversionResult};

/// Convert an ENU offset (meters) to azimuth, elevation and slant range.
///
/// Components within 1 mm of zero are snapped to exactly zero first, so a
/// target straight above or below the observer gets azimuth 0 (north) and
/// elevation ±90° instead of noise-driven angles.
pub fn enu2aer(east: f64, north: f64, up: f64, unit: AngleUnit) -> Aer {
    let (e, n, u) = (snap_to_zero(east), snap_to_zero(north), snap_to_zero(up));
    if was_snapped(east, e) || was_snapped(north, n) || was_snapped(up, u) {
        trace!(east, north, up, "snapped near-zero ENU components");
    }

    let horizontal = e.hypot(n);
    let range = horizontal.hypot(u);
    let elevation = u.atan2(horizontal);
    let azimuth = e.atan2(n);

    Aer::new(azimuth_in_unit(azimuth, unit), unit.from_radians(elevation), range)
}

fn was_snapped(raw: f64, snapped: f64) -> bool {
    snapped == 0.0 && raw != 0.0
}

/// Convert azimuth, elevation and slant range to an ENU offset (meters).
///
/// A negative range is rejected before anything is computed.
pub fn aer2enu(azimuth: f64, elevation: f64, range: f64, unit: AngleUnit) -> ConversionResult<Enu> {
    if range < 0.0 {
        return Err(ConversionError::NegativeRange { range });
    }

    let (sin_az, cos_az) = unit.to_radians(azimuth).sin_cos();
    let (sin_el, cos_el) = unit.to_radians(elevation).sin_cos();

    let horizontal = range * cos_el;
    Ok(Enu::new(horizontal * sin_az, horizontal * cos_az, range * sin_el))
}
