//! Coordinate triples exchanged by the conversion functions

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Unit used for every angular input and output of a call.
///
/// Ranges, altitudes and Cartesian components are always meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// Local tangent-plane offset from an observer (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.east, self.north, self.up)
    }
}

impl From<Vector3<f64>> for Enu {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Enu> for Vector3<f64> {
    fn from(enu: Enu) -> Self {
        Vector3::new(enu.east, enu.north, enu.up)
    }
}

/// Pointing direction plus distance from an observer.
///
/// Azimuth is clockwise from north, elevation is measured from the local
/// horizontal plane, range is the slant distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aer {
    pub azimuth: f64,
    pub elevation: f64,
    pub range: f64,
}

impl Aer {
    pub fn new(azimuth: f64, elevation: f64, range: f64) -> Self {
        Self {
            azimuth,
            elevation,
            range,
        }
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.azimuth, self.elevation, self.range)
    }
}

/// Geodetic position: latitude and longitude in the caller's angle unit,
/// altitude in meters above the reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl Geodetic {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.lat, self.lon, self.alt)
    }
}

/// Earth-centered, Earth-fixed Cartesian position (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ecef {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Ecef {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Ecef> for Vector3<f64> {
    fn from(ecef: Ecef) -> Self {
        Vector3::new(ecef.x, ecef.y, ecef.z)
    }
}
