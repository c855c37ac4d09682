#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line entry point for trail reports.
//!
//! Reads a KML or `GeoJSON` map export, measures every trail and region
//! in a local frame, and prints the length tables, summaries and
//! per-region reports as text or JSON.
//!
//! Uses `indicatif-log-bridge` (via [`trail_report_cli_utils::init_logger`])
//! so that log lines and the region progress bar share the terminal.

mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use trail_report_cli_utils::{IndicatifProgress, MultiProgress};
use trail_report_document::load_document;
use trail_report_geodesy::GeodeticPoint;
use trail_report_report::{ReportConfig, build_report, classify};

/// Measure trails and report regions in a map export.
#[derive(Parser)]
#[command(name = "trail_report")]
#[command(about = "Measure trails and report regions in a KML or GeoJSON map export")]
struct Cli {
    /// TOML configuration file (summary columns, reference point,
    /// report-region flag).
    #[arg(long, global = true, env = "TRAIL_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure every trail, summarise, and clip to each report region.
    Report {
        /// Input document (`.kml`, `.geojson` or `.json`).
        input: PathBuf,

        /// Attribute to summarise by. Repeat for several; replaces the
        /// configured list.
        #[arg(long = "summary")]
        summary: Vec<String>,

        /// Print the report as JSON instead of text tables.
        #[arg(long)]
        json: bool,
    },

    /// List parsed features and how they would be classified.
    Features {
        /// Input document (`.kml`, `.geojson` or `.json`).
        input: PathBuf,
    },

    /// Print the local East-North-Up position of a geodetic point.
    Frame {
        /// Latitude in degrees.
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees.
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Height above the ellipsoid in metres.
        #[arg(allow_negative_numbers = true, default_value_t = 0.0)]
        altitude: f64,
    },
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ReportConfig::load(path)?),
        None => {
            log::debug!("No configuration file given, using defaults");
            Ok(ReportConfig::default())
        }
    }
}

fn run_report(
    multi: &MultiProgress,
    mut config: ReportConfig,
    input: &Path,
    summary: Vec<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !summary.is_empty() {
        config.summary_columns = summary;
    }

    let document = load_document(input)?;

    let progress = if json {
        IndicatifProgress::hidden()
    } else {
        IndicatifProgress::regions_bar(multi, "Clipping report regions")
    };
    let report = build_report(&document, &config, &progress)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render::print_report(&report);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = trail_report_cli_utils::init_logger();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Report {
            input,
            summary,
            json,
        } => run_report(&multi, config, &input, summary, json)?,
        Commands::Features { input } => {
            let document = load_document(&input)?;
            let classification = classify(&document.features, &config.classifier);
            render::print_features(&document, &classification);
        }
        Commands::Frame {
            latitude,
            longitude,
            altitude,
        } => {
            let frame = config.frame()?;
            let enu = frame.geodetic_to_enu(&GeodeticPoint::new(latitude, longitude, altitude))?;
            println!(
                "east {:.3} m, north {:.3} m, up {:.3} m (reference {}, {})",
                enu.east, enu.north, enu.up, config.reference.latitude, config.reference.longitude
            );
        }
    }

    Ok(())
}
