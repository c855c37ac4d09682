//! Reference ellipsoid and the geodetic to ECEF conversion.

use trail_report_geodesy_models::{EcefPoint, GeodeticPoint};

use crate::GeodesyError;

/// An oblate ellipsoid of revolution described by its two semi-axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Equatorial radius in metres.
    pub semi_major_m: f64,
    /// Polar radius in metres.
    pub semi_minor_m: f64,
}

impl Ellipsoid {
    /// WGS84 axes, with the polar radius rounded to 0.1 m.
    pub const WGS84: Self = Self {
        semi_major_m: 6_378_137.0,
        semi_minor_m: 6_356_752.3,
    };

    /// First eccentricity squared, `1 - b²/a²`.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        1.0 - self.axis_ratio_squared()
    }

    /// `b²/a²`.
    #[must_use]
    pub fn axis_ratio_squared(&self) -> f64 {
        (self.semi_minor_m * self.semi_minor_m) / (self.semi_major_m * self.semi_major_m)
    }

    /// Radius of curvature in the prime vertical at `latitude_deg`.
    #[must_use]
    pub fn prime_vertical_radius(&self, latitude_deg: f64) -> f64 {
        let sin_lat = latitude_deg.to_radians().sin();
        self.semi_major_m / self.eccentricity_squared().mul_add(-(sin_lat * sin_lat), 1.0).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Converts a geodetic point to ECEF metres on `ellipsoid`.
///
/// # Errors
///
/// Returns [`GeodesyError::CoordinateOutOfRange`] if the point is not
/// finite or lies outside the valid latitude/longitude ranges. Inputs are
/// never clamped.
pub fn geodetic_to_ecef(
    point: &GeodeticPoint,
    ellipsoid: &Ellipsoid,
) -> Result<EcefPoint, GeodesyError> {
    if !point.is_valid() {
        return Err(GeodesyError::CoordinateOutOfRange {
            latitude: point.latitude,
            longitude: point.longitude,
        });
    }

    let (sin_lat, cos_lat) = point.latitude.to_radians().sin_cos();
    let (sin_lon, cos_lon) = point.longitude.to_radians().sin_cos();
    let n = ellipsoid.prime_vertical_radius(point.latitude);
    let h = point.altitude;

    Ok(EcefPoint::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        ellipsoid.axis_ratio_squared().mul_add(n, h) * sin_lat,
    ))
}
