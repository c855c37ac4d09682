#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output tables of the trail report engine.
//!
//! Everything here is plain data: the engine fills these in and the CLI
//! renders them as text or JSON.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use trail_report_feature_models::Attributes;

/// Name column header for trail tables.
pub const TRAIL_NAME_COLUMN: &str = "Trail Name";

/// Name column header for region tables.
pub const REGION_NAME_COLUMN: &str = "Region Name";

/// Group label used when a row's grouping attribute is empty.
pub const BLANK_GROUP_LABEL: &str = "[BLANK]";

/// The quantity a table's primary value column holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Planar path length in miles.
    #[strum(serialize = "Length [mile]")]
    LengthMiles,
    /// Planar enclosed area in square miles.
    #[strum(serialize = "Area [mi^2]")]
    AreaSquareMiles,
}

/// One measured feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    /// Miles or square miles, depending on the owning table's
    /// [`MetricKind`].
    pub value: f64,
    /// Copied verbatim from the source feature.
    pub attributes: Attributes,
}

/// An ordered table of [`MetricRow`]s sharing one attribute schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTable {
    pub name_column: String,
    pub metric: MetricKind,
    pub attribute_columns: Vec<String>,
    pub rows: Vec<MetricRow>,
}

impl MetricTable {
    #[must_use]
    pub fn new(
        name_column: impl Into<String>,
        metric: MetricKind,
        attribute_columns: Vec<String>,
    ) -> Self {
        Self {
            name_column: name_column.into(),
            metric,
            attribute_columns,
            rows: Vec::new(),
        }
    }

    /// Header of the primary value column, e.g. `Length [mile]`.
    #[must_use]
    pub fn metric_column(&self) -> &str {
        self.metric.as_ref()
    }

    /// All column headers in display order: name, metric, attributes.
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        let mut headers = vec![self.name_column.as_str(), self.metric_column()];
        headers.extend(self.attribute_columns.iter().map(String::as_str));
        headers
    }

    /// Sum of the primary value column.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One group of a [`SummaryTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryGroup {
    pub label: String,
    pub total: f64,
    /// Number of rows that fell into the group.
    pub count: usize,
}

/// Totals of one metric column grouped by one attribute, sorted by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub group_column: String,
    pub metric_column: String,
    pub groups: Vec<SummaryGroup>,
}

impl SummaryTable {
    /// Looks up a group by its label.
    #[must_use]
    pub fn group(&self, label: &str) -> Option<&SummaryGroup> {
        self.groups.iter().find(|g| g.label == label)
    }

    /// Sum over all groups.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.groups.iter().map(|g| g.total).sum()
    }
}

/// Area of one report region together with the trails clipped to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub area: MetricRow,
    pub trails: MetricTable,
    pub summaries: Vec<SummaryTable>,
}

/// Why a feature was left out of the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// Drawn as something other than a path or polygon.
    UnsupportedGeometry,
    /// Too few points, or coordinates out of range.
    InvalidGeometry,
    /// Measured to zero length before any clipping.
    ZeroLength,
    /// Attribute keys differ from the document schema.
    AmbiguousAttributeSchema,
}

/// A feature the engine did not report on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFeature {
    pub name: String,
    pub reason: SkipReason,
    pub message: String,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Trails followed by plain regions, measured by length.
    pub features: MetricTable,
    /// One summary of `features` per configured summary column.
    pub summaries: Vec<SummaryTable>,
    /// Areas of the report regions, in document order. Plain regions are
    /// not listed.
    pub region_areas: MetricTable,
    /// One entry per report region, in document order.
    pub regions: Vec<RegionReport>,
    pub skipped: Vec<SkippedFeature>,
}
