//! Local East-North-Up tangent frame anchored at one reference point.

use trail_report_geodesy_models::{EcefPoint, EnuPoint, GeodeticPoint};

use crate::{Ellipsoid, GeodesyError, geodetic_to_ecef};

/// Reference point used when no other is configured.
pub const DEFAULT_REFERENCE: GeodeticPoint =
    GeodeticPoint::new(39.090_296_674_683_14, -84.492_609_715_796_35, 156.058);

/// A tangent-plane frame centred on a fixed reference point.
///
/// The reference ECEF position and the ECEF to ENU rotation are computed
/// once at construction. A frame is immutable; every ENU point it produces
/// is relative to the same origin.
#[derive(Debug, Clone)]
pub struct LocalFrame {
    reference: GeodeticPoint,
    ellipsoid: Ellipsoid,
    origin: EcefPoint,
    /// Rows are the local East, North and Up unit vectors in the ECEF basis.
    rotation: [[f64; 3]; 3],
}

impl LocalFrame {
    /// Builds a frame centred on `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::InvalidReference`] if the reference is out
    /// of range or produces a non-finite ECEF position.
    pub fn new(reference: GeodeticPoint, ellipsoid: Ellipsoid) -> Result<Self, GeodesyError> {
        let origin = geodetic_to_ecef(&reference, &ellipsoid).map_err(|e| {
            GeodesyError::InvalidReference {
                message: e.to_string(),
            }
        })?;

        if !origin.is_finite() {
            return Err(GeodesyError::InvalidReference {
                message: format!(
                    "reference ({}, {}, {}) has a non-finite ECEF position",
                    reference.latitude, reference.longitude, reference.altitude
                ),
            });
        }

        let (sin_lat, cos_lat) = reference.latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = reference.longitude.to_radians().sin_cos();

        let rotation = [
            [-sin_lon, cos_lon, 0.0],
            [-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat],
            [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat],
        ];

        log::debug!(
            "Local frame at ({}, {}, {}) -> ECEF ({:.3}, {:.3}, {:.3})",
            reference.latitude,
            reference.longitude,
            reference.altitude,
            origin.x,
            origin.y,
            origin.z
        );

        Ok(Self {
            reference,
            ellipsoid,
            origin,
            rotation,
        })
    }

    /// Builds a frame on the WGS84 ellipsoid.
    ///
    /// # Errors
    ///
    /// See [`LocalFrame::new`].
    pub fn wgs84(reference: GeodeticPoint) -> Result<Self, GeodesyError> {
        Self::new(reference, Ellipsoid::WGS84)
    }

    #[must_use]
    pub const fn reference(&self) -> &GeodeticPoint {
        &self.reference
    }

    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// ECEF position of the reference point.
    #[must_use]
    pub const fn origin(&self) -> &EcefPoint {
        &self.origin
    }

    /// Rotates an ECEF position into this frame.
    #[must_use]
    pub fn ecef_to_enu(&self, point: &EcefPoint) -> EnuPoint {
        let d = [
            point.x - self.origin.x,
            point.y - self.origin.y,
            point.z - self.origin.z,
        ];
        let [e, n, u] = self
            .rotation
            .map(|row| row[0].mul_add(d[0], row[1].mul_add(d[1], row[2] * d[2])));

        EnuPoint::new(e, n, u)
    }

    /// Converts a geodetic point straight into this frame.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::CoordinateOutOfRange`] for invalid input.
    pub fn geodetic_to_enu(&self, point: &GeodeticPoint) -> Result<EnuPoint, GeodesyError> {
        Ok(self.ecef_to_enu(&geodetic_to_ecef(point, &self.ellipsoid)?))
    }

    /// Converts an ordered coordinate sequence, failing on the first bad
    /// point.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::InvalidGeometry`] for an empty sequence and
    /// [`GeodesyError::CoordinateOutOfRange`] for any invalid point.
    pub fn transform_all(&self, points: &[GeodeticPoint]) -> Result<Vec<EnuPoint>, GeodesyError> {
        if points.is_empty() {
            return Err(GeodesyError::InvalidGeometry {
                message: "coordinate sequence has no points".to_string(),
            });
        }

        points.iter().map(|p| self.geodetic_to_enu(p)).collect()
    }
}
