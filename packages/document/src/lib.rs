#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input document parsing for the trail report.
//!
//! Reads KML (Google Earth / `My Maps` exports) and `GeoJSON` documents
//! into [`Document`]s of explicit [`Feature`](trail_report_feature_models::Feature)
//! records so that the geometry engine never touches a format-specific
//! tree. Only the outer boundary of a polygon is kept.

pub mod geojson_doc;
pub mod kml_doc;

use std::path::Path;

pub use geojson_doc::parse_geojson_str;
pub use kml_doc::parse_kml_str;
use thiserror::Error;
pub use trail_report_feature_models::Document;

/// Errors that can occur while reading an input document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Reading the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The KML could not be parsed.
    #[error("KML error: {message}")]
    Kml {
        /// Description of what went wrong.
        message: String,
    },

    /// The `GeoJSON` could not be parsed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document parsed but is not a feature collection.
    #[error("Unexpected document structure: {message}")]
    Structure {
        /// Description of what went wrong.
        message: String,
    },

    /// A coordinate could not be read.
    #[error("Invalid coordinate in '{feature}': {message}")]
    InvalidCoordinate {
        /// Name of the feature holding the coordinate.
        feature: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The file extension is not a supported document format.
    #[error("Unsupported document format: '{extension}'")]
    UnsupportedFormat {
        /// The offending extension (lowercased, may be empty).
        extension: String,
    },
}

/// Reads and parses the document at `path`, choosing the parser from the
/// file extension (`kml`, `geojson` or `json`).
///
/// # Errors
///
/// Returns [`DocumentError`] if the file cannot be read, has an unknown
/// extension, or fails to parse.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let parse: fn(&str) -> Result<Document, DocumentError> = match extension.as_str() {
        "kml" => parse_kml_str,
        "geojson" | "json" => parse_geojson_str,
        _ => return Err(DocumentError::UnsupportedFormat { extension }),
    };

    let content = std::fs::read_to_string(path)?;
    let document = parse(&content)?;

    log::info!(
        "Loaded {} feature(s) from {} (schema: {})",
        document.features.len(),
        path.display(),
        document.schema.keys().join(", ")
    );

    Ok(document)
}

/// Normalises an attribute value the way report tables expect it: outer
/// whitespace trimmed, line and page breaks turned into spaces, commas
/// removed.
#[must_use]
pub fn sanitize_attribute_value(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != ',')
        .map(|c| if matches!(c, '\n' | '\r' | '\x0c') { ' ' } else { c })
        .collect()
}
