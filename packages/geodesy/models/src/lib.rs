#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point types for the three coordinate frames used by the trail report.
//!
//! Coordinates arrive as geodetic latitude/longitude/altitude, are lifted
//! into Earth-Centered-Earth-Fixed (ECEF) metres, and finally expressed in
//! a local East-North-Up (ENU) tangent plane anchored at one reference
//! point per run.

use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A position on the reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Height above the ellipsoid in metres.
    #[serde(default)]
    pub altitude: f64,
}

impl GeodeticPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns `true` if every component is finite and latitude/longitude
    /// fall inside their valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.altitude.is_finite()
            && LATITUDE_RANGE.contains(&self.latitude)
            && LONGITUDE_RANGE.contains(&self.longitude)
    }
}

/// Earth-Centered-Earth-Fixed cartesian position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcefPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EcefPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// East-North-Up position in metres, relative to a run's reference point.
///
/// Two ENU points are only comparable when they were produced by the same
/// local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnuPoint {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl EnuPoint {
    #[must_use]
    pub const fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    /// Straight-line distance to `other` in the horizontal (east/north)
    /// plane.
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.east - other.east).hypot(self.north - other.north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_latitude_and_longitude_ranges() {
        assert!(GeodeticPoint::new(90.0, 180.0, 0.0).is_valid());
        assert!(GeodeticPoint::new(-90.0, -180.0, -12.5).is_valid());
        assert!(!GeodeticPoint::new(90.5, 0.0, 0.0).is_valid());
        assert!(!GeodeticPoint::new(0.0, -180.1, 0.0).is_valid());
        assert!(!GeodeticPoint::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(!GeodeticPoint::new(0.0, 0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn planar_distance_ignores_up() {
        let a = EnuPoint::new(0.0, 0.0, 0.0);
        let b = EnuPoint::new(3.0, 4.0, 100.0);
        assert!((a.planar_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn altitude_defaults_to_zero_when_deserialized() {
        let point: GeodeticPoint =
            serde_json::from_str(r#"{"latitude": 39.1, "longitude": -84.5}"#).unwrap();
        assert!(point.altitude.abs() < f64::EPSILON);
    }
}
