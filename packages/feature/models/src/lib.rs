#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map feature records shared between the document parsers and the
//! report engine.
//!
//! A [`Feature`] is one named entity from an input document: a trail
//! drawn as a path, a region drawn as a polygon, or a marker the engine
//! does not measure. Features are produced once by a parser and never
//! mutated afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use trail_report_geodesy_models::GeodeticPoint;

/// The geometry a feature was drawn with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeometryKind {
    /// An open polyline (trails).
    Path,
    /// A closed boundary (regions, footprints).
    Polygon,
    /// A single marker. Parsed but never measured.
    Point,
}

/// Attribute name/value pairs in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Looks up a value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Looks up a value by key, ignoring ASCII case.
    ///
    /// An exact match wins over a case-insensitive one.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.get(key).or_else(|| {
            self.0
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

/// The attribute keys every feature of a document is expected to carry,
/// in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    keys: Vec<String>,
}

impl AttributeSchema {
    #[must_use]
    pub fn from_attributes(attributes: &Attributes) -> Self {
        Self {
            keys: attributes.keys().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Returns `true` if `attributes` has exactly this schema's key set.
    /// Key order is not significant.
    #[must_use]
    pub fn matches(&self, attributes: &Attributes) -> bool {
        if attributes.len() != self.keys.len() {
            return false;
        }
        let expected: BTreeSet<&str> = self.keys.iter().map(String::as_str).collect();
        attributes.keys().all(|k| expected.contains(k))
    }
}

/// One named entity from an input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Display name, trimmed of surrounding whitespace.
    pub name: String,
    /// Geometry the feature was drawn with.
    pub geometry_kind: GeometryKind,
    /// Ordered coordinates. For polygons this is the outer boundary only.
    pub ordinates: Vec<GeodeticPoint>,
    /// Non-geometry attributes.
    pub attributes: Attributes,
}

impl Feature {
    #[must_use]
    pub fn new(
        name: &str,
        geometry_kind: GeometryKind,
        ordinates: Vec<GeodeticPoint>,
        attributes: Attributes,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            geometry_kind,
            ordinates,
            attributes,
        }
    }
}

/// A parsed input document: its features in document order and the
/// attribute schema taken from the first feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub features: Vec<Feature>,
    pub schema: AttributeSchema,
}

impl Document {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        let schema = features
            .first()
            .map(|f| AttributeSchema::from_attributes(&f.attributes))
            .unwrap_or_default();
        Self { features, schema }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
