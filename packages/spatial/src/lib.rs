#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planar geometry for the trail report.
//!
//! Turns parsed features into shapes in the local East-North-Up plane,
//! measures them in miles and square miles, clips trails to region
//! boundaries, and keeps an R-tree of trail envelopes so per-region
//! clipping only visits trails that can overlap the region.
//!
//! All geometry is carried as [`geo`] types over the east/north
//! components; the up component does not contribute to any metric.

pub mod index;
pub mod metrics;
pub mod shape;

pub use index::TrailIndex;
pub use metrics::{
    ClippedPath, METERS_PER_MILE, SQUARE_METERS_PER_SQUARE_MILE, area_square_miles, clip,
    length_miles, overlap_perimeter_miles,
};
pub use shape::{ClosedRegion, OpenPath, Shape, ShapeKind, build_shape, shape_kind};

use thiserror::Error;
use trail_report_geodesy::GeodesyError;

/// Errors that can occur while building or measuring shapes.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Coordinate transform failed.
    #[error("Coordinate transform error: {0}")]
    Geodesy(#[from] GeodesyError),

    /// Too few points, or a geometry kind that has no shape.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of what went wrong.
        message: String,
    },
}
