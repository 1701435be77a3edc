//! Observer-centred ENU frame with the expensive parts precomputed
//!
//! Converting many targets against one observer repeats the same work: the
//! observer's ECEF position and the ECEF -> ENU rotation. `LocalFrame` does
//! that once and is immutable afterwards, so one frame can be shared across
//! threads. Results are identical to the free functions in
//! [`crate::algorithms::enu`].

use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use crate::algorithms::aer::{aer2enu, enu2aer};
use crate::algorithms::ecef::{ecef2geodetic, enu_rotation, geodetic2ecef};
use crate::algorithms::ellipsoid::{or_default, Ellipsoid};
use crate::core::{Aer, AngleUnit, Ecef, Enu, Geodetic};
use crate::validation::error::ConversionResult;

#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    observer: Geodetic,
    ellipsoid: Ellipsoid,
    unit: AngleUnit,
    /// Observer position in ECEF
    origin: Vector3<f64>,
    /// ECEF difference -> ENU
    rotation: Matrix3<f64>,
}

impl LocalFrame {
    /// Build the frame of `observer`, whose angles are expressed in `unit`.
    ///
    /// Every method of the frame uses the same unit for its inputs and outputs.
    pub fn new(observer: Geodetic, ell: Option<&Ellipsoid>, unit: AngleUnit) -> ConversionResult<Self> {
        let ellipsoid = *or_default(ell);
        let origin = geodetic2ecef(observer.lat, observer.lon, observer.alt, Some(&ellipsoid), unit)?;
        let rotation = enu_rotation(unit.to_radians(observer.lat), unit.to_radians(observer.lon));

        debug!(
            lat = observer.lat,
            lon = observer.lon,
            alt = observer.alt,
            ?unit,
            semimajor_axis = ellipsoid.semimajor_axis,
            "built local ENU frame"
        );

        Ok(Self {
            observer,
            ellipsoid,
            unit,
            origin: origin.into(),
            rotation,
        })
    }

    pub fn observer(&self) -> Geodetic {
        self.observer
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Observer position in ECEF
    pub fn origin(&self) -> Ecef {
        Ecef::from(self.origin)
    }

    pub fn ecef_to_enu(&self, ecef: Ecef) -> Enu {
        let delta = Vector3::from(ecef) - self.origin;
        Enu::from(self.rotation * delta)
    }

    pub fn enu_to_ecef(&self, enu: Enu) -> Ecef {
        Ecef::from(self.origin + self.rotation.transpose() * Vector3::from(enu))
    }

    /// Fails only if the target latitude is out of range
    pub fn geodetic_to_enu(&self, target: Geodetic) -> ConversionResult<Enu> {
        let ecef = geodetic2ecef(target.lat, target.lon, target.alt, Some(&self.ellipsoid), self.unit)?;
        Ok(self.ecef_to_enu(ecef))
    }

    pub fn enu_to_geodetic(&self, enu: Enu) -> Geodetic {
        let ecef = self.enu_to_ecef(enu);
        ecef2geodetic(ecef.x, ecef.y, ecef.z, Some(&self.ellipsoid), self.unit)
    }

    pub fn enu_to_aer(&self, enu: Enu) -> Aer {
        enu2aer(enu.east, enu.north, enu.up, self.unit)
    }

    pub fn aer_to_enu(&self, aer: Aer) -> ConversionResult<Enu> {
        aer2enu(aer.azimuth, aer.elevation, aer.range, self.unit)
    }

    pub fn geodetic_to_aer(&self, target: Geodetic) -> ConversionResult<Aer> {
        Ok(self.enu_to_aer(self.geodetic_to_enu(target)?))
    }

    pub fn aer_to_geodetic(&self, aer: Aer) -> ConversionResult<Geodetic> {
        Ok(self.enu_to_geodetic(self.aer_to_enu(aer)?))
    }
}
