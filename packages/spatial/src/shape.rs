//! Shape construction from parsed features.
//!
//! Paths become [`OpenPath`]s and polygons become [`ClosedRegion`]s built
//! from their outer boundary. Inner boundaries (holes) are never carried
//! through: a region always covers everything inside its outer ring.

use geo::{Coord, LineString, Polygon};
use trail_report_feature_models::{Feature, GeometryKind};
use trail_report_geodesy::LocalFrame;
use trail_report_geodesy_models::EnuPoint;

use crate::SpatialError;

/// Minimum number of points in an open path.
pub const MIN_PATH_POINTS: usize = 2;

/// Minimum number of distinct vertices in a closed region.
pub const MIN_REGION_POINTS: usize = 3;

/// The shape a geometry kind maps to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    OpenPath,
    ClosedRegion,
}

/// Returns the shape built for `kind`, or `None` when the kind cannot be
/// measured (markers).
#[must_use]
pub const fn shape_kind(kind: GeometryKind) -> Option<ShapeKind> {
    match kind {
        GeometryKind::Path => Some(ShapeKind::OpenPath),
        GeometryKind::Polygon => Some(ShapeKind::ClosedRegion),
        GeometryKind::Point => None,
    }
}

fn to_coord(point: &EnuPoint) -> Coord<f64> {
    Coord {
        x: point.east,
        y: point.north,
    }
}

/// An ordered polyline of at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPath {
    line: LineString<f64>,
}

impl OpenPath {
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGeometry`] for fewer than two points.
    pub fn new(points: &[EnuPoint]) -> Result<Self, SpatialError> {
        Self::from_line_string(points.iter().map(to_coord).collect())
    }

    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGeometry`] for fewer than two points.
    pub fn from_line_string(line: LineString<f64>) -> Result<Self, SpatialError> {
        let path = Self { line };
        path.validate()?;
        Ok(path)
    }

    /// Re-checks the minimum point count.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGeometry`] for fewer than two points.
    pub fn validate(&self) -> Result<(), SpatialError> {
        if self.line.0.len() < MIN_PATH_POINTS {
            return Err(SpatialError::InvalidGeometry {
                message: format!(
                    "path needs at least {MIN_PATH_POINTS} points, got {}",
                    self.line.0.len()
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn line_string(&self) -> &LineString<f64> {
        &self.line
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.line.0.len()
    }
}

/// A simple polygon boundary with at least three distinct vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedRegion {
    polygon: Polygon<f64>,
}

impl ClosedRegion {
    /// Builds a region from its outer boundary. The ring is closed
    /// automatically if the last point does not repeat the first.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGeometry`] for fewer than three
    /// distinct vertices.
    pub fn new(points: &[EnuPoint]) -> Result<Self, SpatialError> {
        let exterior: LineString<f64> = points.iter().map(to_coord).collect();
        let region = Self {
            polygon: Polygon::new(exterior, vec![]),
        };
        region.validate()?;
        Ok(region)
    }

    /// Re-checks the minimum vertex count.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidGeometry`] for fewer than three
    /// distinct vertices.
    pub fn validate(&self) -> Result<(), SpatialError> {
        let ring = &self.polygon.exterior().0;
        // `Polygon::new` repeats the first vertex at the end.
        let open = &ring[..ring.len().saturating_sub(1)];
        let mut distinct: Vec<&Coord<f64>> = Vec::with_capacity(open.len());
        for coord in open {
            if !distinct.contains(&coord) {
                distinct.push(coord);
            }
        }
        let vertices = distinct.len();
        if vertices < MIN_REGION_POINTS {
            return Err(SpatialError::InvalidGeometry {
                message: format!(
                    "region needs at least {MIN_REGION_POINTS} distinct points, got {vertices}"
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// The closed outer ring as a path.
    #[must_use]
    pub fn boundary_path(&self) -> OpenPath {
        OpenPath {
            line: self.polygon.exterior().clone(),
        }
    }
}

/// A measured feature in the local plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    OpenPath(OpenPath),
    ClosedRegion(ClosedRegion),
}

impl Shape {
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::OpenPath(_) => ShapeKind::OpenPath,
            Self::ClosedRegion(_) => ShapeKind::ClosedRegion,
        }
    }

    /// The path measured for this shape: the path itself, or the outer
    /// ring of a region (so a region's length is its perimeter).
    #[must_use]
    pub fn into_path(self) -> OpenPath {
        match self {
            Self::OpenPath(path) => path,
            Self::ClosedRegion(region) => region.boundary_path(),
        }
    }

    #[must_use]
    pub const fn as_region(&self) -> Option<&ClosedRegion> {
        match self {
            Self::ClosedRegion(region) => Some(region),
            Self::OpenPath(_) => None,
        }
    }
}

/// Builds the shape for `feature` in `frame`.
///
/// Fails fast: any bad coordinate rejects the whole feature.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGeometry`] if the geometry kind has no
/// shape or the feature has too few points, and [`SpatialError::Geodesy`]
/// if a coordinate cannot be transformed.
pub fn build_shape(feature: &Feature, frame: &LocalFrame) -> Result<Shape, SpatialError> {
    let Some(kind) = shape_kind(feature.geometry_kind) else {
        return Err(SpatialError::InvalidGeometry {
            message: format!(
                "'{}' has unsupported geometry kind {}",
                feature.name, feature.geometry_kind
            ),
        });
    };

    let minimum = match kind {
        ShapeKind::OpenPath => MIN_PATH_POINTS,
        ShapeKind::ClosedRegion => MIN_REGION_POINTS,
    };
    if feature.ordinates.len() < minimum {
        return Err(SpatialError::InvalidGeometry {
            message: format!(
                "'{}' has {} point(s), {kind:?} needs at least {minimum}",
                feature.name,
                feature.ordinates.len()
            ),
        });
    }

    let points = frame.transform_all(&feature.ordinates)?;
    log::debug!("Built {kind:?} for '{}' ({} points)", feature.name, points.len());

    match kind {
        ShapeKind::OpenPath => OpenPath::new(&points).map(Shape::OpenPath),
        ShapeKind::ClosedRegion => ClosedRegion::new(&points).map(Shape::ClosedRegion),
    }
}
