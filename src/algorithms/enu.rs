//! ENU <-> geodetic bridge through ECEF
//!
//! Every function here is a composition of [`crate::algorithms::ecef`] and
//! [`crate::algorithms::aer`]. The ellipsoid and the angle unit are threaded
//! unchanged through each stage, and collaborator errors are passed through
//! as they are.

use crate::algorithms::aer::{aer2enu, enu2aer};
use crate::algorithms::ecef::{ecef2enu, ecef2geodetic, enu2ecef, geodetic2ecef, uvw2enu};
use crate::algorithms::ellipsoid::Ellipsoid;
use crate::core::{Aer, AngleUnit, Ecef, Enu, Geodetic};
use crate::validation::error::ConversionResult;

/// ENU offset from the observer (`lat0`, `lon0`, `h0`) to the target's
/// geodetic position
#[allow(clippy::too_many_arguments)]
pub fn enu2geodetic(
    east: f64,
    north: f64,
    up: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<Geodetic> {
    let ecef = enu2ecef(east, north, up, lat0, lon0, h0, ell, unit)?;
    Ok(ecef2geodetic(ecef.x, ecef.y, ecef.z, ell, unit))
}

/// Target geodetic position to its ENU offset from the observer.
///
/// Both positions go through ECEF on the same ellipsoid; the difference is
/// then rotated into the observer's frame, which depends on `lat0` and `lon0`
/// only.
#[allow(clippy::too_many_arguments)]
pub fn geodetic2enu(
    lat: f64,
    lon: f64,
    h: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<Enu> {
    let target = geodetic2ecef(lat, lon, h, ell, unit)?;
    let observer = geodetic2ecef(lat0, lon0, h0, ell, unit)?;

    Ok(uvw2enu(
        target.x - observer.x,
        target.y - observer.y,
        target.z - observer.z,
        lat0,
        lon0,
        unit,
    ))
}

/// Look angles and slant range from the observer to a geodetic target
#[allow(clippy::too_many_arguments)]
pub fn geodetic2aer(
    lat: f64,
    lon: f64,
    h: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<Aer> {
    let enu = geodetic2enu(lat, lon, h, lat0, lon0, h0, ell, unit)?;
    Ok(enu2aer(enu.east, enu.north, enu.up, unit))
}

/// Geodetic position of the target seen at (`azimuth`, `elevation`, `range`)
#[allow(clippy::too_many_arguments)]
pub fn aer2geodetic(
    azimuth: f64,
    elevation: f64,
    range: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<Geodetic> {
    let ecef = aer2ecef(azimuth, elevation, range, lat0, lon0, h0, ell, unit)?;
    Ok(ecef2geodetic(ecef.x, ecef.y, ecef.z, ell, unit))
}

#[allow(clippy::too_many_arguments)]
pub fn aer2ecef(
    azimuth: f64,
    elevation: f64,
    range: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<Ecef> {
    let enu = aer2enu(azimuth, elevation, range, unit)?;
    Ok(enu2ecef(enu.east, enu.north, enu.up, lat0, lon0, h0, ell, unit)?)
}

#[allow(clippy::too_many_arguments)]
pub fn ecef2aer(
    x: f64,
    y: f64,
    z: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<Aer> {
    let enu = ecef2enu(x, y, z, lat0, lon0, h0, ell, unit)?;
    Ok(enu2aer(enu.east, enu.north, enu.up, unit))
}
