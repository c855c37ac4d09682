//! Length, area and clipping in real-world units.

use geo::{Area, BooleanOps, Euclidean, Length, MultiLineString, Polygon};

use crate::{ClosedRegion, OpenPath, SpatialError};

/// Metres per mile, as used by every historical trail report.
pub const METERS_PER_MILE: f64 = 1609.0;

/// Square metres per square mile.
pub const SQUARE_METERS_PER_SQUARE_MILE: f64 = 2_589_988.110_336;

/// Length of `path` in the east/north plane, in miles.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGeometry`] for fewer than two points.
pub fn length_miles(path: &OpenPath) -> Result<f64, SpatialError> {
    path.validate()?;
    Ok(Euclidean.length(path.line_string()) / METERS_PER_MILE)
}

/// Area enclosed by `region` in square miles. Independent of winding.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGeometry`] for fewer than three
/// distinct vertices.
pub fn area_square_miles(region: &ClosedRegion) -> Result<f64, SpatialError> {
    region.validate()?;
    Ok(region.polygon().unsigned_area() / SQUARE_METERS_PER_SQUARE_MILE)
}

/// The pieces of a path that lie inside a region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippedPath {
    components: Vec<OpenPath>,
}

impl ClippedPath {
    #[must_use]
    pub fn components(&self) -> &[OpenPath] {
        &self.components
    }

    /// Total length of all components in miles.
    #[must_use]
    pub fn length_miles(&self) -> f64 {
        self.components
            .iter()
            .map(|c| Euclidean.length(c.line_string()))
            .sum::<f64>()
            / METERS_PER_MILE
    }

    /// `true` when nothing of the path lies inside the region.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Restricts `path` to the interior of `region`.
///
/// A path that crosses the boundary several times yields several
/// components. Degenerate pieces (single points where the path only
/// touches the boundary) are dropped.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGeometry`] if either shape is below its
/// minimum point count.
pub fn clip(path: &OpenPath, region: &ClosedRegion) -> Result<ClippedPath, SpatialError> {
    path.validate()?;
    region.validate()?;

    let lines = MultiLineString::new(vec![path.line_string().clone()]);
    let inside = region.polygon().clip(&lines, false);

    let components = inside
        .0
        .into_iter()
        .filter(|line| Euclidean.length(line) > 0.0)
        .filter_map(|line| OpenPath::from_line_string(line).ok())
        .collect();

    Ok(ClippedPath { components })
}

/// Perimeter of the part of `shape` that overlaps `region`, in miles.
///
/// This is how a polygon drawn among the trails is measured inside a
/// report region: the outline of the overlap, holes included. Zero when
/// the two do not overlap.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGeometry`] if either region has fewer
/// than three distinct vertices.
pub fn overlap_perimeter_miles(
    shape: &ClosedRegion,
    region: &ClosedRegion,
) -> Result<f64, SpatialError> {
    shape.validate()?;
    region.validate()?;

    let overlap = shape.polygon().intersection(region.polygon());
    let meters: f64 = overlap.iter().map(polygon_perimeter).sum();
    Ok(meters / METERS_PER_MILE)
}

fn polygon_perimeter(polygon: &Polygon<f64>) -> f64 {
    Euclidean.length(polygon.exterior())
        + polygon
            .interiors()
            .iter()
            .map(|ring| Euclidean.length(ring))
            .sum::<f64>()
}
