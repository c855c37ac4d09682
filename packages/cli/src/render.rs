//! Plain-text rendering of report tables.

use std::fmt::Write as _;

use trail_report_feature_models::{Document, Feature};
use trail_report_report::Classification;
use trail_report_report_models::{MetricTable, Report, SkippedFeature, SummaryTable};

/// Lays out `rows` under `headers` with every column padded to its widest
/// cell. Numeric-looking cells are right-aligned.
pub fn format_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    push_line(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            if cell.parse::<f64>().is_ok() {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn format_metric_table(table: &MetricTable) -> String {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.name.clone(), format!("{:.4}", row.value)];
            cells.extend(
                table
                    .attribute_columns
                    .iter()
                    .map(|c| row.attributes.get(c).unwrap_or_default().to_string()),
            );
            cells
        })
        .collect();
    format_grid(&table.headers(), &rows)
}

pub fn format_summary(summary: &SummaryTable) -> String {
    let rows: Vec<Vec<String>> = summary
        .groups
        .iter()
        .map(|g| vec![g.label.clone(), format!("{:.4}", g.total), g.count.to_string()])
        .collect();
    format_grid(
        &[
            summary.group_column.as_str(),
            summary.metric_column.as_str(),
            "Count",
        ],
        &rows,
    )
}

fn format_skipped(skipped: &[SkippedFeature]) -> String {
    let rows: Vec<Vec<String>> = skipped
        .iter()
        .map(|s| vec![s.name.clone(), s.reason.to_string(), s.message.clone()])
        .collect();
    format_grid(&["Feature", "Reason", "Detail"], &rows)
}

pub fn print_report(report: &Report) {
    println!("{}", format_metric_table(&report.features));

    for summary in &report.summaries {
        println!("Summary by {}", summary.group_column);
        println!("{}", format_summary(summary));
    }

    if !report.region_areas.is_empty() {
        println!("Report regions");
        println!("{}", format_metric_table(&report.region_areas));
    }

    for region in &report.regions {
        println!("{} ({:.4} mi^2)", region.area.name, region.area.value);
        println!("{}", format_metric_table(&region.trails));
        for summary in &region.summaries {
            println!("{}: summary by {}", region.area.name, summary.group_column);
            println!("{}", format_summary(summary));
        }
    }

    if !report.skipped.is_empty() {
        println!("Skipped features");
        print!("{}", format_skipped(&report.skipped));
    }
}

pub fn print_features(document: &Document, classification: &Classification<'_>) {
    let role = |feature: &Feature| {
        let holds = |bucket: &[&Feature]| bucket.iter().any(|f| std::ptr::eq(*f, feature));
        if holds(classification.trails.as_slice()) {
            "trail"
        } else if holds(classification.report_regions.as_slice()) {
            "report region"
        } else if holds(classification.plain_regions.as_slice()) {
            "plain region"
        } else {
            "skipped"
        }
    };

    let rows: Vec<Vec<String>> = document
        .features
        .iter()
        .map(|f| {
            vec![
                f.name.clone(),
                f.geometry_kind.to_string(),
                f.ordinates.len().to_string(),
                role(f).to_string(),
            ]
        })
        .collect();
    print!("{}", format_grid(&["Name", "Geometry", "Points", "Role"], &rows));
}
