//! Measuring features, clipping them to report regions, and grouping the
//! results.
//!
//! Every drawable feature is measured once ([`measure_features`]); the
//! main table, each region's clipped table and the summaries are all
//! derived from those measurements. A feature with zero length before
//! clipping is left out everywhere. A feature with zero length inside a
//! region is left out of that region's table only.

use std::collections::BTreeMap;

use trail_report_feature_models::{AttributeSchema, Attributes, Document, Feature};
use trail_report_geodesy::LocalFrame;
use trail_report_report_models::{
    BLANK_GROUP_LABEL, MetricKind, MetricRow, MetricTable, REGION_NAME_COLUMN, RegionReport,
    Report, SkipReason, SkippedFeature, SummaryGroup, SummaryTable, TRAIL_NAME_COLUMN,
};
use trail_report_spatial::{
    ClosedRegion, OpenPath, Shape, SpatialError, TrailIndex, area_square_miles, build_shape, clip,
    length_miles, overlap_perimeter_miles,
};

use crate::{ProgressCallback, ReportConfig, ReportError, classify};

/// A drawable feature with its shape and unclipped length.
#[derive(Debug, Clone)]
pub struct Measured<'a> {
    pub feature: &'a Feature,
    pub shape: Shape,
    /// The path itself, or a region's outer ring.
    outline: OpenPath,
    /// Unclipped length in miles (perimeter for regions).
    pub length_miles: f64,
}

impl Measured<'_> {
    /// Length in miles of the part inside `region`.
    fn length_inside(&self, region: &ClosedRegion) -> Result<f64, SpatialError> {
        match &self.shape {
            Shape::OpenPath(path) => Ok(clip(path, region)?.length_miles()),
            Shape::ClosedRegion(shape) => overlap_perimeter_miles(shape, region),
        }
    }

    fn row(&self, value: f64) -> MetricRow {
        MetricRow {
            name: self.feature.name.clone(),
            value,
            attributes: self.feature.attributes.clone(),
        }
    }
}

/// Which column of a [`MetricTable`] a summary adds up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricColumn {
    /// The table's length or area column.
    Primary,
    /// A numeric attribute column.
    Attribute(String),
}

/// Result of [`build_metric_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowBuild {
    pub table: MetricTable,
    pub skipped: Vec<SkippedFeature>,
}

/// Per-region output of [`per_region_reports`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionReports {
    pub reports: Vec<RegionReport>,
    /// Report regions whose boundary could not be built, and features
    /// that failed to clip to a region.
    pub skipped: Vec<SkippedFeature>,
}

fn skip(feature: &Feature, reason: SkipReason, message: String) -> SkippedFeature {
    log::warn!("Skipping '{}': {message}", feature.name);
    SkippedFeature {
        name: feature.name.clone(),
        reason,
        message,
    }
}

/// A feature whose length inside a region could not be measured.
fn clip_failure(feature: &Feature, error: &SpatialError) -> SkippedFeature {
    skip(
        feature,
        SkipReason::InvalidGeometry,
        format!("could not clip: {error}"),
    )
}

/// Builds the shape of every feature and measures its unclipped length.
///
/// Features whose shape cannot be built, or whose length is zero, are
/// returned as skipped instead.
#[must_use]
pub fn measure_features<'a>(
    features: &[&'a Feature],
    frame: &LocalFrame,
) -> (Vec<Measured<'a>>, Vec<SkippedFeature>) {
    let mut measured = Vec::with_capacity(features.len());
    let mut skipped = Vec::new();

    for &feature in features {
        let shape = match build_shape(feature, frame) {
            Ok(shape) => shape,
            Err(e) => {
                skipped.push(skip(feature, SkipReason::InvalidGeometry, e.to_string()));
                continue;
            }
        };
        let outline = shape.clone().into_path();
        let length = match length_miles(&outline) {
            Ok(length) => length,
            Err(e) => {
                skipped.push(skip(feature, SkipReason::InvalidGeometry, e.to_string()));
                continue;
            }
        };
        if length <= 0.0 {
            skipped.push(skip(
                feature,
                SkipReason::ZeroLength,
                "length is zero".to_string(),
            ));
            continue;
        }

        log::info!("Trail: {} ({length:.4} mi)", feature.name);
        measured.push(Measured {
            feature,
            shape,
            outline,
            length_miles: length,
        });
    }

    (measured, skipped)
}

/// Length table over already-measured features, optionally restricted to
/// the inside of `clip_region`, plus the features that failed to clip.
fn length_table<'m, 'a: 'm>(
    measured: impl IntoIterator<Item = &'m Measured<'a>>,
    clip_region: Option<&ClosedRegion>,
    schema: &AttributeSchema,
) -> (MetricTable, Vec<SkippedFeature>) {
    let mut skipped = Vec::new();
    let mut table = MetricTable::new(
        TRAIL_NAME_COLUMN,
        MetricKind::LengthMiles,
        schema.keys().to_vec(),
    );

    for item in measured {
        let value = match clip_region {
            None => item.length_miles,
            Some(region) => match item.length_inside(region) {
                Ok(value) => value,
                Err(e) => {
                    skipped.push(clip_failure(item.feature, &e));
                    continue;
                }
            },
        };
        if value <= 0.0 {
            continue;
        }
        table.rows.push(item.row(value));
    }

    (table, skipped)
}

/// Measures `features` into a length table, in input order.
///
/// With `clip_region`, each value is the length inside the region and
/// features with nothing inside are dropped silently. Features whose
/// unclipped length is zero, or that fail to clip, are dropped and
/// reported as skipped.
#[must_use]
pub fn build_metric_rows(
    features: &[&Feature],
    frame: &LocalFrame,
    clip_region: Option<&ClosedRegion>,
    schema: &AttributeSchema,
) -> RowBuild {
    let (measured, mut skipped) = measure_features(features, frame);
    let (table, clip_skipped) = length_table(&measured, clip_region, schema);
    skipped.extend(clip_skipped);
    RowBuild { table, skipped }
}

/// Groups `table` by `attribute` and adds up `column` per group.
///
/// Groups are ordered by their raw attribute value; an empty value is
/// labelled [`BLANK_GROUP_LABEL`]. Blank cells of a numeric attribute
/// column count as zero.
///
/// # Errors
///
/// Returns [`ReportError::AmbiguousAttributeSchema`] if `attribute` or
/// the summed attribute column is not one of the table's columns, and
/// [`ReportError::NonNumericMetric`] if a summed attribute cell does not
/// parse as a number.
pub fn summarize(
    table: &MetricTable,
    attribute: &str,
    column: &MetricColumn,
) -> Result<SummaryTable, ReportError> {
    let has_column = |name: &str| table.attribute_columns.iter().any(|c| c == name);

    if !has_column(attribute) {
        return Err(ReportError::AmbiguousAttributeSchema {
            attribute: attribute.to_string(),
            message: format!(
                "not one of the table's attribute columns [{}]",
                table.attribute_columns.join(", ")
            ),
        });
    }
    let metric_column = match column {
        MetricColumn::Primary => table.metric_column().to_string(),
        MetricColumn::Attribute(name) if has_column(name) => name.clone(),
        MetricColumn::Attribute(name) => {
            return Err(ReportError::AmbiguousAttributeSchema {
                attribute: name.clone(),
                message: "cannot sum a column the table does not have".to_string(),
            });
        }
    };

    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        let value = match column {
            MetricColumn::Primary => row.value,
            MetricColumn::Attribute(name) => numeric_cell(row, name)?,
        };
        let key = row.attributes.get(attribute).unwrap_or_default();
        let entry = groups.entry(key).or_default();
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(SummaryTable {
        group_column: attribute.to_string(),
        metric_column,
        groups: groups
            .into_iter()
            .map(|(key, (total, count))| SummaryGroup {
                label: if key.is_empty() {
                    BLANK_GROUP_LABEL.to_string()
                } else {
                    key.to_string()
                },
                total,
                count,
            })
            .collect(),
    })
}

fn numeric_cell(row: &MetricRow, column: &str) -> Result<f64, ReportError> {
    let raw = row.attributes.get(column).unwrap_or_default().trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>().map_err(|_| ReportError::NonNumericMetric {
        row: row.name.clone(),
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn summarize_all(
    table: &MetricTable,
    summary_columns: &[String],
) -> Result<Vec<SummaryTable>, ReportError> {
    summary_columns
        .iter()
        .map(|attribute| summarize(table, attribute, &MetricColumn::Primary))
        .collect()
}

/// Computes each report region's area and the table of drawable
/// features clipped to it, plus one summary per `summary_columns` entry.
///
/// Only features whose envelope meets the region's envelope are clipped.
/// `progress` advances once per region and is cleared when there are no
/// report regions.
///
/// # Errors
///
/// Returns [`ReportError::AmbiguousAttributeSchema`] if a summary column
/// is not part of `schema`.
pub fn per_region_reports(
    measured: &[Measured<'_>],
    report_regions: &[&Feature],
    frame: &LocalFrame,
    schema: &AttributeSchema,
    summary_columns: &[String],
    progress: &dyn ProgressCallback,
) -> Result<RegionReports, ReportError> {
    let mut result = RegionReports::default();
    if report_regions.is_empty() {
        log::debug!("No report regions to clip");
        progress.finish_and_clear();
        return Ok(result);
    }

    let index = TrailIndex::build(measured.iter().map(|m| &m.outline).enumerate());

    progress.set_total(report_regions.len() as u64);

    for &feature in report_regions {
        progress.set_message(feature.name.clone());

        let region = match build_shape(feature, frame).map(|s| s.as_region().cloned()) {
            Ok(Some(region)) => region,
            Ok(None) => {
                result.skipped.push(skip(
                    feature,
                    SkipReason::InvalidGeometry,
                    "report region is not a closed boundary".to_string(),
                ));
                progress.inc(1);
                continue;
            }
            Err(e) => {
                result
                    .skipped
                    .push(skip(feature, SkipReason::InvalidGeometry, e.to_string()));
                progress.inc(1);
                continue;
            }
        };
        let area = area_square_miles(&region)?;
        log::info!("Polygon: {} ({area:.4} mi^2)", feature.name);

        let candidates = index.candidates(&region);
        log::debug!(
            "{} of {} feature(s) may overlap '{}'",
            candidates.len(),
            measured.len(),
            feature.name
        );
        let (trails, clip_skipped) = length_table(
            candidates.iter().filter_map(|&i| measured.get(i)),
            Some(&region),
            schema,
        );
        result.skipped.extend(clip_skipped);
        let summaries = summarize_all(&trails, summary_columns)?;

        result.reports.push(RegionReport {
            area: MetricRow {
                name: feature.name.clone(),
                value: area,
                attributes: Attributes::new(),
            },
            trails,
            summaries,
        });
        progress.inc(1);
    }

    progress.finish(format!("Clipped {} report region(s)", result.reports.len()));

    Ok(result)
}

/// The `Region Name / Area [mi^2]` table of all reported regions.
#[must_use]
pub fn region_area_table(reports: &[RegionReport]) -> MetricTable {
    let mut table = MetricTable::new(REGION_NAME_COLUMN, MetricKind::AreaSquareMiles, Vec::new());
    table.rows = reports.iter().map(|r| r.area.clone()).collect();
    table
}

/// Runs the whole pipeline over `document`.
///
/// Per-feature problems end up in [`Report::skipped`]; only problems
/// that affect the whole run are errors.
///
/// # Errors
///
/// Returns [`ReportError::EmptyDocument`] for a document without
/// features, [`ReportError::Config`] for blank configuration fields,
/// [`ReportError::Geodesy`] wrapping
/// [`GeodesyError::InvalidReference`](trail_report_geodesy::GeodesyError::InvalidReference)
/// for an out-of-range or non-finite reference point, and [`ReportError::AmbiguousAttributeSchema`]
/// if a summary column is not in the document schema.
pub fn build_report(
    document: &Document,
    config: &ReportConfig,
    progress: &dyn ProgressCallback,
) -> Result<Report, ReportError> {
    if document.is_empty() {
        return Err(ReportError::EmptyDocument);
    }
    config.validate()?;
    let frame = config.frame()?;

    let classification = classify(&document.features, &config.classifier);
    let mut skipped = classification.skipped.clone();

    let (measured, measure_skipped) = measure_features(&classification.drawable(), &frame);
    skipped.extend(measure_skipped);

    let (features, clip_skipped) = length_table(&measured, None, &document.schema);
    skipped.extend(clip_skipped);
    let summaries = summarize_all(&features, &config.summary_columns)?;

    let regions = per_region_reports(
        &measured,
        &classification.report_regions,
        &frame,
        &document.schema,
        &config.summary_columns,
        progress,
    )?;
    skipped.extend(regions.skipped);

    let region_areas = region_area_table(&regions.reports);

    log::info!(
        "Measured {} feature(s) totalling {:.4} mi; {} report region(s); {} skipped",
        features.len(),
        features.total(),
        regions.reports.len(),
        skipped.len()
    );

    Ok(Report {
        features,
        summaries,
        region_areas,
        regions: regions.reports,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use trail_report_feature_models::GeometryKind;
    use trail_report_geodesy::{DEFAULT_REFERENCE, GeodesyError, GeodeticPoint};
    use trail_report_spatial::METERS_PER_MILE;

    use crate::NullProgress;

    const METERS_PER_DEGREE_LATITUDE: f64 = 111_000.0;

    /// Records every progress call as a string.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressCallback for RecordingProgress {
        fn set_total(&self, total: u64) {
            self.push(format!("total {total}"));
        }
        fn inc(&self, delta: u64) {
            self.push(format!("inc {delta}"));
        }
        fn set_message(&self, msg: String) {
            self.push(format!("message {msg}"));
        }
        fn finish(&self, msg: String) {
            self.push(format!("finish {msg}"));
        }
        fn finish_and_clear(&self) {
            self.push("clear".to_string());
        }
    }

    /// Approximate geodetic position `east_m`/`north_m` metres from the
    /// default reference.
    fn at(east_m: f64, north_m: f64) -> GeodeticPoint {
        let latitude = DEFAULT_REFERENCE.latitude + north_m / METERS_PER_DEGREE_LATITUDE;
        let longitude = DEFAULT_REFERENCE.longitude
            + east_m / (METERS_PER_DEGREE_LATITUDE * DEFAULT_REFERENCE.latitude.to_radians().cos());
        GeodeticPoint::new(latitude, longitude, DEFAULT_REFERENCE.altitude)
    }

    fn attrs(kind: &str, official: &str) -> Attributes {
        [("type", kind), ("status", "Open"), ("official", official)]
            .into_iter()
            .collect()
    }

    fn trail(name: &str, kind: &str, points: &[(f64, f64)]) -> Feature {
        Feature::new(
            name,
            GeometryKind::Path,
            points.iter().map(|&(e, n)| at(e, n)).collect(),
            attrs(kind, "yes"),
        )
    }

    fn polygon(name: &str, official: &str, points: &[(f64, f64)]) -> Feature {
        Feature::new(
            name,
            GeometryKind::Polygon,
            points.iter().map(|&(e, n)| at(e, n)).collect(),
            attrs("", official),
        )
    }

    const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (1000.0, 0.0), (1000.0, 1000.0), (0.0, 1000.0)];

    fn frame() -> LocalFrame {
        LocalFrame::wgs84(DEFAULT_REFERENCE).unwrap()
    }

    fn region(points: &[(f64, f64)]) -> ClosedRegion {
        match build_shape(&polygon("clip", "REPORT", points), &frame()).unwrap() {
            Shape::ClosedRegion(region) => region,
            Shape::OpenPath(_) => unreachable!(),
        }
    }

    fn schema() -> AttributeSchema {
        AttributeSchema::from_attributes(&attrs("", ""))
    }

    fn row(name: &str, value: f64, kind: &str) -> MetricRow {
        MetricRow {
            name: name.to_string(),
            value,
            attributes: [("type", kind)].into_iter().collect(),
        }
    }

    fn loop_table() -> MetricTable {
        let mut table = MetricTable::new(
            TRAIL_NAME_COLUMN,
            MetricKind::LengthMiles,
            vec!["type".to_string()],
        );
        table.rows = vec![
            row("A", 2.0, "Loop"),
            row("B", 3.0, "Loop"),
            row("C", 1.0, ""),
        ];
        table
    }

    #[test]
    fn rows_keep_input_order_and_copy_attributes() {
        let features = [
            trail("Ridge", "Loop", &[(0.0, 0.0), (500.0, 0.0)]),
            trail("Creek", "Spur", &[(0.0, 100.0), (0.0, 300.0)]),
        ];
        let refs: Vec<&Feature> = features.iter().collect();
        let build = build_metric_rows(&refs, &frame(), None, &schema());

        assert!(build.skipped.is_empty());
        let names: Vec<&str> = build.table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ridge", "Creek"]);
        assert_eq!(build.table.rows[1].attributes.get("type"), Some("Spur"));
        assert_eq!(build.table.headers(), vec!["Trail Name", "Length [mile]", "type", "status", "official"]);
        let expected = 500.0 / METERS_PER_MILE;
        assert!((build.table.rows[0].value - expected).abs() / expected < 0.01);
    }

    #[test]
    fn building_rows_twice_gives_identical_tables() {
        let features = [
            trail("Ridge", "Loop", &[(-500.0, 500.0), (1500.0, 500.0)]),
            polygon("Barn", "no", &[(100.0, 100.0), (200.0, 100.0), (200.0, 200.0)]),
        ];
        let refs: Vec<&Feature> = features.iter().collect();
        let clip_region = region(&SQUARE);
        let first = build_metric_rows(&refs, &frame(), Some(&clip_region), &schema());
        let second = build_metric_rows(&refs, &frame(), Some(&clip_region), &schema());
        assert_eq!(first, second);
    }

    #[test]
    fn zero_length_trail_is_skipped_everywhere() {
        let features = [
            trail("Stub", "Loop", &[(10.0, 10.0), (10.0, 10.0)]),
            trail("Ridge", "Loop", &[(10.0, 10.0), (20.0, 10.0)]),
        ];
        let refs: Vec<&Feature> = features.iter().collect();

        let full = build_metric_rows(&refs, &frame(), None, &schema());
        assert_eq!(full.table.len(), 1);
        assert_eq!(full.skipped[0].name, "Stub");
        assert_eq!(full.skipped[0].reason, SkipReason::ZeroLength);

        let clipped = build_metric_rows(&refs, &frame(), Some(&region(&SQUARE)), &schema());
        assert_eq!(clipped.table.len(), 1);
    }

    #[test]
    fn clipping_keeps_only_the_inside_and_drops_outside_trails() {
        let features = [
            trail("Crossing", "Loop", &[(-500.0, 500.0), (1500.0, 500.0)]),
            trail("Far", "Loop", &[(5000.0, 5000.0), (6000.0, 5000.0)]),
        ];
        let refs: Vec<&Feature> = features.iter().collect();
        let full = build_metric_rows(&refs, &frame(), None, &schema());
        let clipped = build_metric_rows(&refs, &frame(), Some(&region(&SQUARE)), &schema());

        assert_eq!(full.table.len(), 2);
        assert_eq!(clipped.table.len(), 1);
        assert!(clipped.skipped.is_empty());
        let ratio = clipped.table.rows[0].value / full.table.rows[0].value;
        assert!((ratio - 0.5).abs() < 0.01, "ratio {ratio}");
    }

    #[test]
    fn plain_polygon_is_measured_by_perimeter() {
        let features = [polygon("Barn", "no", &SQUARE)];
        let refs: Vec<&Feature> = features.iter().collect();
        let build = build_metric_rows(&refs, &frame(), None, &schema());
        let expected = 4000.0 / METERS_PER_MILE;
        assert!((build.table.rows[0].value - expected).abs() / expected < 0.01);
    }

    #[test]
    fn point_feature_is_invalid_geometry() {
        let marker = Feature::new("Trailhead", GeometryKind::Point, vec![at(0.0, 0.0)], attrs("", ""));
        let build = build_metric_rows(&[&marker], &frame(), None, &schema());
        assert!(build.table.is_empty());
        assert_eq!(build.skipped[0].reason, SkipReason::InvalidGeometry);
    }

    #[test]
    fn summary_sums_per_group_with_blank_first() {
        let summary = summarize(&loop_table(), "type", &MetricColumn::Primary).unwrap();
        assert_eq!(summary.group_column, "type");
        assert_eq!(summary.metric_column, "Length [mile]");

        let labels: Vec<&str> = summary.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec![BLANK_GROUP_LABEL, "Loop"]);

        let looped = summary.group("Loop").unwrap();
        assert!((looped.total - 5.0).abs() < 1e-12);
        assert_eq!(looped.count, 2);
        assert!((summary.group("[BLANK]").unwrap().total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn summary_on_unknown_attribute_is_an_error() {
        let result = summarize(&loop_table(), "surface", &MetricColumn::Primary);
        assert!(matches!(
            result,
            Err(ReportError::AmbiguousAttributeSchema { attribute, .. }) if attribute == "surface"
        ));
    }

    #[test]
    fn summary_can_sum_a_numeric_attribute() {
        let mut table = MetricTable::new(
            TRAIL_NAME_COLUMN,
            MetricKind::LengthMiles,
            vec!["type".to_string(), "width".to_string()],
        );
        for (name, kind, width) in [("A", "Loop", "1.5"), ("B", "Loop", " 2 "), ("C", "Spur", "")] {
            table.rows.push(MetricRow {
                name: name.to_string(),
                value: 1.0,
                attributes: [("type", kind), ("width", width)].into_iter().collect(),
            });
        }

        let summary =
            summarize(&table, "type", &MetricColumn::Attribute("width".to_string())).unwrap();
        assert_eq!(summary.metric_column, "width");
        assert!((summary.group("Loop").unwrap().total - 3.5).abs() < 1e-12);
        assert!(summary.group("Spur").unwrap().total.abs() < 1e-12);

        table.rows[0].attributes.insert("width", "wide");
        let result = summarize(&table, "type", &MetricColumn::Attribute("width".to_string()));
        assert!(matches!(result, Err(ReportError::NonNumericMetric { row, .. }) if row == "A"));
    }

    #[test]
    fn region_reports_match_unindexed_clipping() {
        let features = [
            trail("Crossing", "Loop", &[(-500.0, 500.0), (1500.0, 500.0)]),
            trail("Inside", "Spur", &[(100.0, 100.0), (100.0, 900.0)]),
            trail("Far", "Loop", &[(5000.0, 5000.0), (6000.0, 5000.0)]),
        ];
        let park = polygon("Park", "REPORT", &SQUARE);
        let refs: Vec<&Feature> = features.iter().collect();
        let frame = frame();
        let (measured, _) = measure_features(&refs, &frame);

        let reports = per_region_reports(
            &measured,
            &[&park],
            &frame,
            &schema(),
            &["type".to_string()],
            &NullProgress,
        )
        .unwrap();

        assert_eq!(reports.reports.len(), 1);
        let report = &reports.reports[0];
        let unindexed = build_metric_rows(&refs, &frame, Some(&region(&SQUARE)), &schema());
        assert_eq!(report.trails, unindexed.table);
        assert_eq!(report.summaries.len(), 1);
        assert!((report.area.value - 0.3861).abs() < 0.01);

        let areas = region_area_table(&reports.reports);
        assert_eq!(areas.headers(), vec!["Region Name", "Area [mi^2]"]);
        assert_eq!(areas.rows[0].name, "Park");
    }

    #[test]
    fn degenerate_report_region_is_skipped() {
        let sliver = polygon("Sliver", "REPORT", &[(0.0, 0.0), (10.0, 0.0)]);
        let reports =
            per_region_reports(&[], &[&sliver], &frame(), &schema(), &[], &NullProgress).unwrap();
        assert!(reports.reports.is_empty());
        assert_eq!(reports.skipped[0].reason, SkipReason::InvalidGeometry);
    }

    #[test]
    fn full_report_over_a_document() {
        let document = Document::new(vec![
            trail("Ridge", "Loop", &[(-500.0, 500.0), (1500.0, 500.0)]),
            polygon("Park", "Report", &SQUARE),
            polygon("Barn", "no", &[(100.0, 100.0), (200.0, 100.0), (200.0, 200.0), (100.0, 200.0)]),
            trail("Creek", "", &[(5000.0, 0.0), (5000.0, 800.0)]),
            Feature::new("Trailhead", GeometryKind::Point, vec![at(0.0, 0.0)], attrs("", "")),
        ]);

        let report = build_report(&document, &ReportConfig::default(), &NullProgress).unwrap();

        let names: Vec<&str> = report.features.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ridge", "Creek", "Barn"]);
        assert_eq!(report.summaries.len(), 3);
        assert_eq!(report.summaries[0].group_column, "type");
        assert_eq!(report.summaries[0].groups[0].label, BLANK_GROUP_LABEL);

        assert_eq!(report.regions.len(), 1);
        let in_park: Vec<&str> = report.regions[0]
            .trails
            .rows
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(in_park, vec!["Ridge", "Barn"]);
        assert_eq!(report.region_areas.len(), 1);
        assert_eq!(report.region_areas.rows[0].name, "Park");

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "Trailhead");
    }

    #[test]
    fn empty_document_is_an_error() {
        let result = build_report(&Document::default(), &ReportConfig::default(), &NullProgress);
        assert!(matches!(result, Err(ReportError::EmptyDocument)));
    }

    #[test]
    fn missing_summary_column_fails_the_report() {
        let document = Document::new(vec![trail("Ridge", "Loop", &[(0.0, 0.0), (100.0, 0.0)])]);
        let config = ReportConfig {
            summary_columns: vec!["surface".to_string()],
            ..ReportConfig::default()
        };
        let result = build_report(&document, &config, &NullProgress);
        assert!(matches!(result, Err(ReportError::AmbiguousAttributeSchema { .. })));
    }

    #[test]
    fn invalid_reference_fails_the_report_as_invalid_reference() {
        let document = Document::new(vec![trail("Ridge", "Loop", &[(0.0, 0.0), (100.0, 0.0)])]);
        for reference in [
            GeodeticPoint::new(91.0, 0.0, 0.0),
            GeodeticPoint::new(0.0, 0.0, f64::NAN),
        ] {
            let config = ReportConfig {
                reference,
                ..ReportConfig::default()
            };
            let result = build_report(&document, &config, &NullProgress);
            assert!(
                matches!(
                    result,
                    Err(ReportError::Geodesy(GeodesyError::InvalidReference { .. }))
                ),
                "reference {reference:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn clip_failure_is_reported_as_invalid_geometry() {
        let feature = trail("Ridge", "Loop", &[(0.0, 0.0), (100.0, 0.0)]);
        let error = SpatialError::InvalidGeometry {
            message: "boolean operation failed".to_string(),
        };
        let skipped = clip_failure(&feature, &error);
        assert_eq!(skipped.name, "Ridge");
        assert_eq!(skipped.reason, SkipReason::InvalidGeometry);
        assert!(skipped.message.contains("boolean operation failed"));
    }

    #[test]
    fn progress_counts_each_report_region() {
        let park = polygon("Park", "REPORT", &SQUARE);
        let sliver = polygon("Sliver", "REPORT", &[(0.0, 0.0), (10.0, 0.0)]);
        let progress = RecordingProgress::default();
        per_region_reports(&[], &[&park, &sliver], &frame(), &schema(), &[], &progress).unwrap();

        assert_eq!(
            progress.events(),
            vec![
                "total 2",
                "message Park",
                "inc 1",
                "message Sliver",
                "inc 1",
                "finish Clipped 1 report region(s)",
            ]
        );
    }

    #[test]
    fn progress_is_cleared_without_report_regions() {
        let progress = RecordingProgress::default();
        let reports = per_region_reports(&[], &[], &frame(), &schema(), &[], &progress).unwrap();
        assert_eq!(reports, RegionReports::default());
        assert_eq!(progress.events(), vec!["clear"]);
    }
}
