#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trail report engine.
//!
//! Sorts a parsed document into trails, plain regions and report regions,
//! measures everything in a local frame built from [`ReportConfig`], clips
//! trails to each report region, and groups the results into summary
//! tables. [`build_report`] runs the whole pipeline.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod progress;

pub use aggregate::{
    Measured, MetricColumn, RegionReports, RowBuild, build_metric_rows, build_report,
    measure_features, per_region_reports, region_area_table, summarize,
};
pub use classify::{Classification, classify};
pub use config::{ClassifierConfig, DEFAULT_SUMMARY_COLUMNS, ReportConfig};
pub use progress::{NullProgress, ProgressCallback};

use thiserror::Error;
use trail_report_geodesy::GeodesyError;
use trail_report_spatial::SpatialError;

/// Errors that can occur while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Shape construction or measurement failed.
    #[error("Spatial error: {0}")]
    Spatial(#[from] SpatialError),

    /// The configured reference point is unusable.
    #[error("Coordinate transform error: {0}")]
    Geodesy(#[from] GeodesyError),

    /// The document has no features at all.
    #[error("Document contains no features")]
    EmptyDocument,

    /// A summary was requested on an attribute the rows do not share.
    #[error("Ambiguous attribute schema for '{attribute}': {message}")]
    AmbiguousAttributeSchema {
        /// The requested attribute.
        attribute: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A summary was requested on an attribute column that is not numeric.
    #[error("Non-numeric value '{value}' in column '{column}' of row '{row}'")]
    NonNumericMetric {
        /// Name of the offending row.
        row: String,
        /// The metric column.
        column: String,
        /// The value that failed to parse.
        value: String,
    },

    /// The configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },

    /// The configuration file is not valid TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading the configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
