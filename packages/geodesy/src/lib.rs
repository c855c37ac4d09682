#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate transforms from geodetic coordinates to a local metric frame.
//!
//! Geodetic points are converted to ECEF on a fixed reference ellipsoid and
//! then rotated into an East-North-Up tangent plane centred on a single
//! reference point. The tangent plane is what every length and area in the
//! trail report is measured in.
//!
//! The reference point is not global state: build one [`LocalFrame`] per
//! run and pass it to every consumer. Changing the reference means
//! building a new frame and recomputing everything derived from it.

pub mod ellipsoid;
pub mod frame;

pub use ellipsoid::{Ellipsoid, geodetic_to_ecef};
pub use frame::{DEFAULT_REFERENCE, LocalFrame};
pub use trail_report_geodesy_models::{EcefPoint, EnuPoint, GeodeticPoint};

use thiserror::Error;

/// Errors that can occur while transforming coordinates.
#[derive(Debug, Error)]
pub enum GeodesyError {
    /// A coordinate sequence was empty or otherwise unusable.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of what went wrong.
        message: String,
    },

    /// The reference point of a local frame is unusable.
    #[error("Invalid reference point: {message}")]
    InvalidReference {
        /// Description of what went wrong.
        message: String,
    },

    /// A geodetic coordinate fell outside latitude [-90, 90] or
    /// longitude [-180, 180], or was not finite.
    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
    CoordinateOutOfRange {
        /// Offending latitude in degrees.
        latitude: f64,
        /// Offending longitude in degrees.
        longitude: f64,
    },
}
