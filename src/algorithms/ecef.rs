//! Geodetic <-> ECEF conversions and the ECEF <-> ENU rotation
//!
//! These are the building blocks the ENU bridge composes:
//! - `geodetic2ecef` / `ecef2geodetic` on any [`Ellipsoid`]
//! - `uvw2enu` / `enu2uvw`, the pure rotation between an ECEF difference
//!   vector and the local frame of an observer
//! - `ecef2enu` / `enu2ecef`, rotation plus translation to the observer

use nalgebra::{Matrix3, Vector3};
use std::f64::consts::FRAC_PI_2;

use crate::algorithms::ellipsoid::{or_default, Ellipsoid};
use crate::core::{AngleUnit, Ecef, Enu, Geodetic};
use crate::validation::error::GeodesyError;

const MAX_LATITUDE_STEPS: usize = 10;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-15;

/// Rotation taking an ECEF difference vector into the ENU frame of an
/// observer at (`lat0_rad`, `lon0_rad`). Rows are east, north, up.
#[rustfmt::skip]
pub fn enu_rotation(lat0_rad: f64, lon0_rad: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat0_rad.sin_cos();
    let (sin_lon, cos_lon) = lon0_rad.sin_cos();

    Matrix3::new(
        -sin_lon,           cos_lon,            0.0,
        -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
        cos_lat * cos_lon,  cos_lat * sin_lon,  sin_lat,
    )
}

/// Convert a geodetic position to ECEF.
///
/// Fails when `|lat|` exceeds a quarter turn in `unit`.
pub fn geodetic2ecef(
    lat: f64,
    lon: f64,
    alt: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> Result<Ecef, GeodesyError> {
    let ell = or_default(ell);

    let limit = unit.quarter_turn();
    if lat.abs() > limit {
        return Err(GeodesyError::LatitudeOutOfRange { lat, limit });
    }

    let lat_rad = unit.to_radians(lat);
    let lon_rad = unit.to_radians(lon);
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    let n = ell.radius_normal(lat_rad);
    let axis_ratio_sq = (ell.semiminor_axis / ell.semimajor_axis).powi(2);

    Ok(Ecef::new(
        (n + alt) * cos_lat * cos_lon,
        (n + alt) * cos_lat * sin_lon,
        (n * axis_ratio_sq + alt) * sin_lat,
    ))
}

/// Convert an ECEF position to geodetic coordinates.
///
/// Starts from the closed-form reduced latitude of You (2000), "Transformation
/// of Cartesian to Geodetic Coordinates without Iterations", then refines the
/// geodetic latitude with the fixed-point step
/// `lat = atan2(z + e² N sin(lat), p)` until it stops moving. Points on the
/// polar axis and at the Earth's center give finite results; points inside the
/// ellipsoid get a negative altitude.
pub fn ecef2geodetic(x: f64, y: f64, z: f64, ell: Option<&Ellipsoid>, unit: AngleUnit) -> Geodetic {
    let ell = or_default(ell);
    let a = ell.semimajor_axis;
    let b = ell.semiminor_axis;
    let e2 = ell.eccentricity_squared;

    let r_sq = x * x + y * y + z * z;
    let e = ell.linear_eccentricity();
    let e_sq = e * e;

    let u = (0.5 * (r_sq - e_sq) + 0.5 * ((r_sq - e_sq).powi(2) + 4.0 * e_sq * z * z).sqrt()).sqrt();
    let q = x.hypot(y);
    let hue = u.hypot(e);

    // reduced latitude
    let mut beta = if u > 0.0 && q > 0.0 {
        (hue / u * z / q).atan()
    } else if z == 0.0 {
        0.0
    } else {
        FRAC_PI_2.copysign(z)
    };

    let (sin_beta, cos_beta) = beta.sin_cos();
    let correction = ((b * u - a * hue + e_sq) * sin_beta) / (a * hue / cos_beta - e_sq * cos_beta);
    if correction.is_finite() {
        beta += correction;
    }

    let mut lat = (a * beta.sin()).atan2(b * beta.cos());
    for _ in 0..MAX_LATITUDE_STEPS {
        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * n * sin_lat).atan2(q);
        let step = next - lat;
        lat = next;
        if step.abs() < LATITUDE_TOLERANCE_RAD {
            break;
        }
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let alt = q * cos_lat + z * sin_lat - a * (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let lon = y.atan2(x);

    Geodetic::new(unit.from_radians(lat), unit.from_radians(lon), alt)
}

/// Rotate an ECEF difference vector (u, v, w) into the observer's ENU frame.
///
/// Only the observer latitude and longitude matter; this is a pure rotation.
pub fn uvw2enu(u: f64, v: f64, w: f64, lat0: f64, lon0: f64, unit: AngleUnit) -> Enu {
    let rotation = enu_rotation(unit.to_radians(lat0), unit.to_radians(lon0));
    Enu::from(rotation * Vector3::new(u, v, w))
}

/// Rotate an ENU vector back into an ECEF difference vector
pub fn enu2uvw(east: f64, north: f64, up: f64, lat0: f64, lon0: f64, unit: AngleUnit) -> Ecef {
    let rotation = enu_rotation(unit.to_radians(lat0), unit.to_radians(lon0));
    Ecef::from(rotation.transpose() * Vector3::new(east, north, up))
}

/// ENU offset from an observer to an absolute ECEF position
#[allow(clippy::too_many_arguments)]
pub fn enu2ecef(
    east: f64,
    north: f64,
    up: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> Result<Ecef, GeodesyError> {
    let origin: Vector3<f64> = geodetic2ecef(lat0, lon0, h0, ell, unit)?.into();
    let delta: Vector3<f64> = enu2uvw(east, north, up, lat0, lon0, unit).into();
    Ok(Ecef::from(origin + delta))
}

/// Absolute ECEF position to an ENU offset from an observer
#[allow(clippy::too_many_arguments)]
pub fn ecef2enu(
    x: f64,
    y: f64,
    z: f64,
    lat0: f64,
    lon0: f64,
    h0: f64,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> Result<Enu, GeodesyError> {
    let origin = geodetic2ecef(lat0, lon0, h0, ell, unit)?;
    Ok(uvw2enu(x - origin.x, y - origin.y, z - origin.z, lat0, lon0, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const LLA0: (f64, f64, f64) = (42.0, -82.0, 200.0);
    const XYZ0: (f64, f64, f64) = (660_675.251_824_7, -4_700_948.683_16, 4_245_737.662_22);

    #[test]
    fn test_geodetic_to_ecef_known_point() {
        let ecef = geodetic2ecef(LLA0.0, LLA0.1, LLA0.2, None, AngleUnit::Degrees).unwrap();
        assert_abs_diff_eq!(ecef.x, XYZ0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(ecef.y, XYZ0.1, epsilon = 1e-3);
        assert_abs_diff_eq!(ecef.z, XYZ0.2, epsilon = 1e-3);
    }

    #[test]
    fn test_geodetic_to_ecef_radians() {
        let deg = geodetic2ecef(LLA0.0, LLA0.1, LLA0.2, None, AngleUnit::Degrees).unwrap();
        let rad = geodetic2ecef(
            LLA0.0.to_radians(),
            LLA0.1.to_radians(),
            LLA0.2,
            None,
            AngleUnit::Radians,
        )
        .unwrap();
        assert_relative_eq!(deg.x, rad.x, max_relative = 1e-12);
        assert_relative_eq!(deg.y, rad.y, max_relative = 1e-12);
        assert_relative_eq!(deg.z, rad.z, max_relative = 1e-12);
    }

    #[test]
    fn test_equator_and_pole() {
        let wgs84 = Ellipsoid::WGS84;
        let equator = geodetic2ecef(0.0, 0.0, 0.0, None, AngleUnit::Degrees).unwrap();
        assert_abs_diff_eq!(equator.x, wgs84.semimajor_axis, epsilon = 1e-6);
        assert_abs_diff_eq!(equator.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(equator.z, 0.0, epsilon = 1e-6);

        let pole = geodetic2ecef(90.0, 0.0, 0.0, None, AngleUnit::Degrees).unwrap();
        assert_abs_diff_eq!(pole.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pole.z, wgs84.semiminor_axis, epsilon = 1e-6);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = geodetic2ecef(90.5, 0.0, 0.0, None, AngleUnit::Degrees).unwrap_err();
        assert_eq!(err, GeodesyError::LatitudeOutOfRange { lat: 90.5, limit: 90.0 });
        assert!(geodetic2ecef(-2.0, 0.0, 0.0, None, AngleUnit::Radians).is_err());
    }

    #[test]
    fn test_ecef_to_geodetic_known_point() {
        let lla = ecef2geodetic(XYZ0.0, XYZ0.1, XYZ0.2, None, AngleUnit::Degrees);
        assert_abs_diff_eq!(lla.lat, LLA0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lla.lon, LLA0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(lla.alt, LLA0.2, epsilon = 1e-3);
    }

    #[test]
    fn test_geodetic_round_trip_grid() {
        for ell in [Ellipsoid::WGS84, Ellipsoid::CLARKE1866, Ellipsoid::MARS, Ellipsoid::MOON] {
            for lat in [-90.0, -60.0, -1.0, 0.0, 33.3, 89.0, 90.0] {
                for lon in [-180.0, -45.0, 0.0, 120.0] {
                    for alt in [-1000.0, 0.0, 10_000.0] {
                        let ecef = geodetic2ecef(lat, lon, alt, Some(&ell), AngleUnit::Degrees).unwrap();
                        let back = ecef2geodetic(ecef.x, ecef.y, ecef.z, Some(&ell), AngleUnit::Degrees);
                        assert_abs_diff_eq!(back.lat, lat, epsilon = 1e-8);
                        assert_abs_diff_eq!(back.alt, alt, epsilon = 1e-3);
                        if lat.abs() < 90.0 {
                            let dlon = (back.lon - lon).rem_euclid(360.0);
                            assert!(dlon < 1e-8 || dlon > 360.0 - 1e-8, "lon {lon} -> {}", back.lon);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_geodetic_round_trip_at_orbital_altitudes() {
        // low orbit, GPS, geostationary and beyond
        for alt in [2.0e6, 2.02e7, 3.5786e7, 4.0e7] {
            for step in -179..=179 {
                let lat = f64::from(step) * 0.5;
                let ecef = geodetic2ecef(lat, -30.0, alt, None, AngleUnit::Degrees).unwrap();
                let back = ecef2geodetic(ecef.x, ecef.y, ecef.z, None, AngleUnit::Degrees);
                assert_abs_diff_eq!(back.lat, lat, epsilon = 1e-9);
                assert_abs_diff_eq!(back.lon, -30.0, epsilon = 1e-9);
                assert_abs_diff_eq!(back.alt, alt, epsilon = 1e-5);
            }
        }

        let mars = Ellipsoid::MARS;
        let ecef = geodetic2ecef(-47.5, 10.0, 1.7e7, Some(&mars), AngleUnit::Degrees).unwrap();
        let back = ecef2geodetic(ecef.x, ecef.y, ecef.z, Some(&mars), AngleUnit::Degrees);
        assert_abs_diff_eq!(back.lat, -47.5, epsilon = 1e-9);
        assert_abs_diff_eq!(back.alt, 1.7e7, epsilon = 1e-5);
    }

    #[test]
    fn test_polar_axis_and_center_are_finite() {
        let wgs84 = Ellipsoid::WGS84;

        let north = ecef2geodetic(0.0, 0.0, wgs84.semiminor_axis + 1000.0, None, AngleUnit::Degrees);
        assert_abs_diff_eq!(north.lat, 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(north.alt, 1000.0, epsilon = 1e-6);

        let south = ecef2geodetic(0.0, 0.0, -wgs84.semiminor_axis, None, AngleUnit::Degrees);
        assert_abs_diff_eq!(south.lat, -90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(south.alt, 0.0, epsilon = 1e-6);

        let center = ecef2geodetic(0.0, 0.0, 0.0, None, AngleUnit::Degrees);
        assert_eq!(center.lat, 0.0);
        assert_abs_diff_eq!(center.alt, -wgs84.semimajor_axis, epsilon = 1e-6);
    }

    #[test]
    fn test_inside_ellipsoid_has_negative_altitude() {
        let lla = ecef2geodetic(1000.0, 0.0, 0.0, None, AngleUnit::Degrees);
        assert!(lla.alt < 0.0);
        assert_abs_diff_eq!(lla.alt, -(Ellipsoid::WGS84.semimajor_axis - 1000.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let rotation = enu_rotation(0.6, -1.4);
        let identity = rotation * rotation.transpose();
        assert_abs_diff_eq!(identity, Matrix3::identity(), epsilon = 1e-14);
    }

    #[test]
    fn test_uvw_round_trip() {
        let enu = uvw2enu(120.0, -33.0, 7.5, 42.0, -82.0, AngleUnit::Degrees);
        let uvw = enu2uvw(enu.east, enu.north, enu.up, 42.0, -82.0, AngleUnit::Degrees);
        assert_abs_diff_eq!(uvw.x, 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(uvw.y, -33.0, epsilon = 1e-9);
        assert_abs_diff_eq!(uvw.z, 7.5, epsilon = 1e-9);
    }

    #[test]
    fn test_up_points_away_from_center_at_origin() {
        // at (0, 0) the up axis is ECEF x, east is y, north is z
        let enu = uvw2enu(1.0, 2.0, 3.0, 0.0, 0.0, AngleUnit::Degrees);
        assert_abs_diff_eq!(enu.east, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(enu.north, 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(enu.up, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_ecef_enu_round_trip() {
        let enu = ecef2enu(
            XYZ0.0 + 500.0,
            XYZ0.1 - 250.0,
            XYZ0.2 + 80.0,
            LLA0.0,
            LLA0.1,
            LLA0.2,
            None,
            AngleUnit::Degrees,
        )
        .unwrap();
        let ecef = enu2ecef(enu.east, enu.north, enu.up, LLA0.0, LLA0.1, LLA0.2, None, AngleUnit::Degrees)
            .unwrap();
        assert_abs_diff_eq!(ecef.x, XYZ0.0 + 500.0, epsilon = 1e-3);
        assert_abs_diff_eq!(ecef.y, XYZ0.1 - 250.0, epsilon = 1e-3);
        assert_abs_diff_eq!(ecef.z, XYZ0.2 + 80.0, epsilon = 1e-3);
    }

    #[test]
    fn test_observer_latitude_error_propagates() {
        let err = ecef2enu(0.0, 0.0, 0.0, 100.0, 0.0, 0.0, None, AngleUnit::Degrees).unwrap_err();
        assert!(matches!(err, GeodesyError::LatitudeOutOfRange { .. }));
    }
}
