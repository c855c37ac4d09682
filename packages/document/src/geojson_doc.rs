//! `GeoJSON` feature extraction.
//!
//! The `name` property becomes the feature name; every other property
//! becomes an attribute. `GeoJSON` positions are `[longitude, latitude,
//! altitude?]`.

use geojson::{GeoJson, Value};
use serde_json::Value as JsonValue;
use trail_report_feature_models::{Attributes, Document, Feature, GeometryKind};
use trail_report_geodesy_models::GeodeticPoint;

use crate::{DocumentError, sanitize_attribute_value};

const NAME_PROPERTY: &str = "name";

/// Parses a `GeoJSON` `FeatureCollection` (or single `Feature`) into a
/// [`Document`].
///
/// Features whose geometry is missing or not a `LineString`, `Polygon`
/// or `Point` are logged and left out.
///
/// # Errors
///
/// Returns [`DocumentError::GeoJson`] for malformed input,
/// [`DocumentError::Structure`] for a bare geometry and
/// [`DocumentError::InvalidCoordinate`] for positions with fewer than two
/// values.
pub fn parse_geojson_str(content: &str) -> Result<Document, DocumentError> {
    let features = match content.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(DocumentError::Structure {
                message: "expected a Feature or FeatureCollection, found a bare geometry"
                    .to_string(),
            });
        }
    };

    let mut parsed = Vec::with_capacity(features.len());
    for feature in &features {
        if let Some(feature) = convert_feature(feature)? {
            parsed.push(feature);
        }
    }

    Ok(Document::new(parsed))
}

fn convert_feature(feature: &geojson::Feature) -> Result<Option<Feature>, DocumentError> {
    let name = feature
        .property(NAME_PROPERTY)
        .and_then(JsonValue::as_str)
        .unwrap_or_default();

    let Some(geometry) = &feature.geometry else {
        log::warn!("Ignoring feature '{}': no geometry", name.trim());
        return Ok(None);
    };

    let (kind, ordinates) = match &geometry.value {
        Value::LineString(line) => (GeometryKind::Path, positions(name, line)?),
        Value::Polygon(rings) => {
            let outer = rings.first().map(Vec::as_slice).unwrap_or_default();
            (GeometryKind::Polygon, positions(name, outer)?)
        }
        Value::Point(point) => (GeometryKind::Point, vec![position(name, point)?]),
        _ => {
            log::warn!("Ignoring feature '{}': unsupported geometry", name.trim());
            return Ok(None);
        }
    };

    let attributes: Attributes = feature
        .properties
        .iter()
        .flatten()
        .filter(|(key, _)| key.as_str() != NAME_PROPERTY)
        .map(|(key, value)| (key.clone(), property_text(value)))
        .collect();

    Ok(Some(Feature::new(name, kind, ordinates, attributes)))
}

fn positions(name: &str, points: &[Vec<f64>]) -> Result<Vec<GeodeticPoint>, DocumentError> {
    points.iter().map(|p| position(name, p)).collect()
}

fn position(name: &str, point: &[f64]) -> Result<GeodeticPoint, DocumentError> {
    match point {
        [longitude, latitude] => Ok(GeodeticPoint::new(*latitude, *longitude, 0.0)),
        [longitude, latitude, altitude, ..] => {
            Ok(GeodeticPoint::new(*latitude, *longitude, *altitude))
        }
        _ => Err(DocumentError::InvalidCoordinate {
            feature: name.trim().to_string(),
            message: format!("position has {} value(s), expected 2 or 3", point.len()),
        }),
    }
}

fn property_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => sanitize_attribute_value(s),
        other => sanitize_attribute_value(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAILS_GEOJSON: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": {"name": "Creek Spur", "type": "Spur", "status": "Open", "official": true, "width": 1.5},
          "geometry": {"type": "LineString", "coordinates": [[-84.49, 39.09, 150.0], [-84.48, 39.095]]}
        },
        {
          "type": "Feature",
          "properties": {"name": "Preserve", "type": null, "status": "Open", "official": "REPORT", "width": 0},
          "geometry": {"type": "Polygon", "coordinates": [
            [[-84.50, 39.08], [-84.47, 39.08], [-84.47, 39.10], [-84.50, 39.10], [-84.50, 39.08]],
            [[-84.49, 39.09], [-84.48, 39.09], [-84.48, 39.095], [-84.49, 39.09]]
          ]}
        },
        {
          "type": "Feature",
          "properties": {"name": "Area", "type": "", "status": "", "official": "", "width": 0},
          "geometry": {"type": "MultiPoint", "coordinates": [[-84.49, 39.09]]}
        }
      ]
    }"#;

    #[test]
    fn converts_supported_features() {
        let doc = parse_geojson_str(TRAILS_GEOJSON).unwrap();
        assert_eq!(doc.features.len(), 2);
        assert_eq!(doc.features[0].name, "Creek Spur");
        assert_eq!(doc.features[0].geometry_kind, GeometryKind::Path);
        assert_eq!(doc.features[1].geometry_kind, GeometryKind::Polygon);
    }

    #[test]
    fn keeps_only_the_outer_ring() {
        let doc = parse_geojson_str(TRAILS_GEOJSON).unwrap();
        assert_eq!(doc.features[1].ordinates.len(), 5);
    }

    #[test]
    fn positions_are_longitude_first() {
        let doc = parse_geojson_str(TRAILS_GEOJSON).unwrap();
        let points = &doc.features[0].ordinates;
        assert!((points[0].latitude - 39.09).abs() < 1e-12);
        assert!((points[0].longitude - -84.49).abs() < 1e-12);
        assert!((points[0].altitude - 150.0).abs() < 1e-12);
        assert!(points[1].altitude.abs() < f64::EPSILON);
    }

    #[test]
    fn properties_become_text_attributes() {
        let doc = parse_geojson_str(TRAILS_GEOJSON).unwrap();
        let trail = &doc.features[0].attributes;
        assert_eq!(trail.get("name"), None);
        assert_eq!(trail.get("official"), Some("true"));
        assert_eq!(trail.get("width"), Some("1.5"));
        assert_eq!(doc.features[1].attributes.get("type"), Some(""));
        assert!(doc.schema.contains("status"));
        assert!(!doc.schema.contains("name"));
    }

    #[test]
    fn bare_geometry_is_rejected() {
        let result = parse_geojson_str(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#);
        assert!(matches!(result, Err(DocumentError::Structure { .. })));
    }

    #[test]
    fn short_position_is_invalid() {
        let result = parse_geojson_str(
            r#"{"type": "Feature", "properties": {"name": "x"},
                "geometry": {"type": "LineString", "coordinates": [[1.0], [2.0, 3.0]]}}"#,
        );
        assert!(
            matches!(result, Err(DocumentError::InvalidCoordinate { .. }))
                || matches!(result, Err(DocumentError::GeoJson(_)))
        );
    }
}
