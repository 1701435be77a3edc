//! Reference ellipsoids for geodetic conversions
//!
//! An ellipsoid is an immutable value built from its two semi-axes. The named
//! models are `const` items so they can be shared freely between threads.

use crate::validation::error::GeodesyError;

/// Reference ellipsoid parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major (equatorial) axis (meters)
    pub semimajor_axis: f64,
    /// Semi-minor (polar) axis (meters)
    pub semiminor_axis: f64,
    /// Flattening: (a - b) / a
    pub flattening: f64,
    /// Third flattening: (a - b) / (a + b)
    pub third_flattening: f64,
    /// First eccentricity squared: 2f - f^2
    pub eccentricity_squared: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid::from_axes(6_378_137.0, 6_356_752.314_245_18);
    pub const WGS72: Ellipsoid = Ellipsoid::from_axes(6_378_135.0, 6_356_750.520_016_09);
    pub const GRS80: Ellipsoid = Ellipsoid::from_axes(6_378_137.0, 6_356_752.314_140_36);
    pub const CLARKE1866: Ellipsoid = Ellipsoid::from_axes(6_378_206.4, 6_356_583.8);
    pub const MARS: Ellipsoid = Ellipsoid::from_axes(3_396_900.0, 3_376_097.805_859_52);
    pub const MOON: Ellipsoid = Ellipsoid::from_axes(1_738_000.0, 1_738_000.0);
    pub const VENUS: Ellipsoid = Ellipsoid::from_axes(6_051_000.0, 6_051_000.0);
    pub const JUPITER: Ellipsoid = Ellipsoid::from_axes(71_492_000.0, 66_770_054.347_592_2);
    pub const IO: Ellipsoid = Ellipsoid::from_axes(1_829_700.0, 1_815_800.0);
    pub const PLUTO: Ellipsoid = Ellipsoid::from_axes(1_187_000.0, 1_187_000.0);

    /// Names accepted by [`Ellipsoid::from_name`]
    pub const MODEL_NAMES: [&'static str; 10] = [
        "wgs84",
        "wgs72",
        "grs80",
        "clarke1866",
        "mars",
        "moon",
        "venus",
        "jupiter",
        "io",
        "pluto",
    ];

    const fn from_axes(a: f64, b: f64) -> Self {
        let f = (a - b) / a;
        Self {
            semimajor_axis: a,
            semiminor_axis: b,
            flattening: f,
            third_flattening: (a - b) / (a + b),
            eccentricity_squared: 2.0 * f - f * f,
        }
    }

    /// Build an ellipsoid from its semi-major and semi-minor axes (meters)
    pub fn new(semimajor_axis: f64, semiminor_axis: f64) -> Result<Self, GeodesyError> {
        let invalid = |reason| GeodesyError::InvalidEllipsoid {
            semimajor_axis,
            semiminor_axis,
            reason,
        };

        if !semimajor_axis.is_finite() || !semiminor_axis.is_finite() {
            return Err(invalid("axes must be finite"));
        }
        if semimajor_axis <= 0.0 || semiminor_axis <= 0.0 {
            return Err(invalid("axes must be positive"));
        }
        if semiminor_axis > semimajor_axis {
            return Err(invalid("semi-minor axis exceeds semi-major axis"));
        }

        Ok(Self::from_axes(semimajor_axis, semiminor_axis))
    }

    /// Look up a named model (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self, GeodesyError> {
        match name.to_ascii_lowercase().as_str() {
            "wgs84" => Ok(Self::WGS84),
            "wgs72" => Ok(Self::WGS72),
            "grs80" => Ok(Self::GRS80),
            "clarke1866" => Ok(Self::CLARKE1866),
            "mars" => Ok(Self::MARS),
            "moon" => Ok(Self::MOON),
            "venus" => Ok(Self::VENUS),
            "jupiter" => Ok(Self::JUPITER),
            "io" => Ok(Self::IO),
            "pluto" => Ok(Self::PLUTO),
            _ => Err(GeodesyError::UnknownEllipsoid(name.to_string())),
        }
    }

    /// First eccentricity
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared.sqrt()
    }

    /// Linear eccentricity sqrt(a^2 - b^2)
    pub fn linear_eccentricity(&self) -> f64 {
        (self.semimajor_axis.powi(2) - self.semiminor_axis.powi(2)).sqrt()
    }

    /// Radius of curvature in the prime vertical at a latitude in radians
    pub fn radius_normal(&self, lat_rad: f64) -> f64 {
        let a = self.semimajor_axis;
        let b = self.semiminor_axis;
        a * a / (a * a * lat_rad.cos().powi(2) + b * b * lat_rad.sin().powi(2)).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Resolve an optional ellipsoid argument, falling back to WGS84
#[inline]
pub fn or_default(ell: Option<&Ellipsoid>) -> &Ellipsoid {
    ell.unwrap_or(&Ellipsoid::WGS84)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        let wgs84 = Ellipsoid::WGS84;
        assert_relative_eq!(wgs84.flattening, 1.0 / 298.257_223_563, epsilon = 1e-12);
        assert_relative_eq!(wgs84.eccentricity(), 0.081_819_190_842_622, epsilon = 1e-12);
        assert_relative_eq!(wgs84.eccentricity_squared, 0.006_694_379_990_14, epsilon = 1e-12);
    }

    #[test]
    fn test_grs80_close_to_wgs84() {
        assert_eq!(Ellipsoid::WGS84.semimajor_axis, Ellipsoid::GRS80.semimajor_axis);
        assert!((Ellipsoid::WGS84.flattening - Ellipsoid::GRS80.flattening).abs() < 1e-8);
    }

    #[test]
    fn test_sphere_has_no_flattening() {
        let moon = Ellipsoid::MOON;
        assert_eq!(moon.flattening, 0.0);
        assert_eq!(moon.eccentricity(), 0.0);
        assert_relative_eq!(moon.radius_normal(0.7), moon.semimajor_axis, max_relative = 1e-12);
    }

    #[test]
    fn test_radius_normal_at_equator_and_pole() {
        let wgs84 = Ellipsoid::WGS84;
        assert_relative_eq!(wgs84.radius_normal(0.0), wgs84.semimajor_axis, max_relative = 1e-12);
        let polar = wgs84.semimajor_axis.powi(2) / wgs84.semiminor_axis;
        assert_relative_eq!(
            wgs84.radius_normal(std::f64::consts::FRAC_PI_2),
            polar,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_from_name() {
        for name in Ellipsoid::MODEL_NAMES {
            assert!(Ellipsoid::from_name(name).is_ok(), "{name}");
        }
        assert_eq!(Ellipsoid::from_name("WGS84").unwrap(), Ellipsoid::WGS84);
        assert_eq!(
            Ellipsoid::from_name("krassowsky"),
            Err(GeodesyError::UnknownEllipsoid("krassowsky".to_string()))
        );
    }

    #[test]
    fn test_invalid_axes_rejected() {
        assert!(Ellipsoid::new(6_378_137.0, 6_356_752.0).is_ok());
        assert!(Ellipsoid::new(-1.0, 1.0).is_err());
        assert!(Ellipsoid::new(f64::NAN, 1.0).is_err());
        assert!(matches!(
            Ellipsoid::new(1.0, 2.0),
            Err(GeodesyError::InvalidEllipsoid { .. })
        ));
    }

    #[test]
    fn test_default_is_wgs84() {
        assert_eq!(Ellipsoid::default(), Ellipsoid::WGS84);
        assert_eq!(*or_default(None), Ellipsoid::WGS84);
        assert_eq!(*or_default(Some(&Ellipsoid::MARS)), Ellipsoid::MARS);
    }
}
