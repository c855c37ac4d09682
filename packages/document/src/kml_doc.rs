//! KML placemark extraction.
//!
//! Every `Placemark` in the document tree (including those nested in
//! folders) becomes one feature. Attributes come from the placemark's
//! `ExtendedData`, either as `<Data name="..."><value>...</value></Data>`
//! pairs or as `<SchemaData><SimpleData name="...">...</SimpleData>`.

use std::str::FromStr as _;

use kml::Kml;
use kml::types::{Coord, Element, Geometry, Placemark};
use trail_report_feature_models::{Attributes, Document, Feature, GeometryKind};
use trail_report_geodesy_models::GeodeticPoint;

use crate::{DocumentError, sanitize_attribute_value};

/// Parses a KML string into a [`Document`].
///
/// Placemarks without a supported geometry (`LineString`, `Polygon`,
/// `LinearRing`, `Point`) are logged and left out.
///
/// # Errors
///
/// Returns [`DocumentError::Kml`] if the XML is not valid KML.
pub fn parse_kml_str(content: &str) -> Result<Document, DocumentError> {
    let kml = Kml::<f64>::from_str(content).map_err(|e| DocumentError::Kml {
        message: e.to_string(),
    })?;

    let mut features = Vec::new();
    collect_placemarks(&kml, &mut features);

    Ok(Document::new(features))
}

fn collect_placemarks(kml: &Kml<f64>, features: &mut Vec<Feature>) {
    match kml {
        Kml::KmlDocument(doc) => {
            for element in &doc.elements {
                collect_placemarks(element, features);
            }
        }
        Kml::Document { elements, .. } => {
            for element in elements {
                collect_placemarks(element, features);
            }
        }
        Kml::Folder(folder) => {
            for element in &folder.elements {
                collect_placemarks(element, features);
            }
        }
        Kml::Placemark(placemark) => {
            if let Some(feature) = placemark_to_feature(placemark) {
                features.push(feature);
            }
        }
        _ => {}
    }
}

fn placemark_to_feature(placemark: &Placemark<f64>) -> Option<Feature> {
    let name = placemark.name.as_deref().unwrap_or_default();

    let (kind, coords): (GeometryKind, &[Coord<f64>]) = match &placemark.geometry {
        Some(Geometry::LineString(line)) => (GeometryKind::Path, line.coords.as_slice()),
        Some(Geometry::Polygon(polygon)) => (GeometryKind::Polygon, polygon.outer.coords.as_slice()),
        Some(Geometry::LinearRing(ring)) => (GeometryKind::Polygon, ring.coords.as_slice()),
        Some(Geometry::Point(point)) => (GeometryKind::Point, std::slice::from_ref(&point.coord)),
        Some(_) => {
            log::warn!("Ignoring placemark '{}': unsupported geometry", name.trim());
            return None;
        }
        None => {
            log::warn!("Ignoring placemark '{}': no geometry", name.trim());
            return None;
        }
    };

    let ordinates = coords
        .iter()
        .map(|c| GeodeticPoint::new(c.y, c.x, c.z.unwrap_or(0.0)))
        .collect();

    Some(Feature::new(
        name,
        kind,
        ordinates,
        extended_data(&placemark.children),
    ))
}

fn extended_data(children: &[Element]) -> Attributes {
    let mut attributes = Attributes::new();

    for data in children
        .iter()
        .filter(|e| e.name == "ExtendedData")
        .flat_map(|e| e.children.iter())
    {
        match data.name.as_str() {
            "Data" => {
                let Some(key) = data.attrs.get("name") else {
                    continue;
                };
                let value = data
                    .children
                    .iter()
                    .find(|e| e.name == "value")
                    .and_then(|e| e.content.as_deref())
                    .unwrap_or_default();
                attributes.insert(key.as_str(), sanitize_attribute_value(value));
            }
            "SchemaData" => {
                for simple in data.children.iter().filter(|e| e.name == "SimpleData") {
                    if let Some(key) = simple.attrs.get("name") {
                        let value = simple.content.as_deref().unwrap_or_default();
                        attributes.insert(key.as_str(), sanitize_attribute_value(value));
                    }
                }
            }
            _ => {}
        }
    }

    attributes
}
