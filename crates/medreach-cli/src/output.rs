//! Output adapters: JSON documents on disk and the console report.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use medreach_core::{AnalysisSettings, FacilityCensus};
use medreach_grid::{
    AnalysisReport, BoundingBox, CoverageSummary, SubsetOutcome, SubsetReport, UnderservedPoint,
    ALL_FACILITIES,
};
use serde::Serialize;
use serde_json::{Map, Value};

pub(crate) const GRID_FILE: &str = "accessibility_grid.json";
pub(crate) const SUMMARY_FILE: &str = "accessibility_summary.json";

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    run_id: String,
    generated_at: DateTime<Utc>,
    bbox: BoundingBox,
    resolution: usize,
    grid_points: usize,
    settings: &'a AnalysisSettings,
    census: &'a FacilityCensus,
    subsets: Vec<SubsetDocument<'a>>,
    underserved: UnderservedDocument<'a>,
}

#[derive(Debug, Serialize)]
struct SubsetDocument<'a> {
    label: &'a str,
    facility_count: usize,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a CoverageSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct UnderservedDocument<'a> {
    threshold_km: f64,
    percent_of_grid: f64,
    count: usize,
    points: &'a [UnderservedPoint],
}

/// Column holding the nearest facility's name for `subset`.
fn nearest_column(subset: &SubsetReport) -> String {
    if subset.label == ALL_FACILITIES {
        "nearest_facility".to_string()
    } else {
        format!("nearest_{}", subset.slug)
    }
}

/// One flat row per grid point, in grid order.
///
/// Subsets without coverage data contribute `null` columns so every row has
/// the same shape.
pub(crate) fn grid_rows(report: &AnalysisReport) -> Vec<Map<String, Value>> {
    report
        .grid
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let mut row = Map::new();
            row.insert("latitude".to_string(), Value::from(point.lat));
            row.insert("longitude".to_string(), Value::from(point.lon));
            for subset in &report.subsets {
                let record = subset.series().and_then(|s| s.records.get(i));
                row.insert(
                    format!("distance_to_{}_km", subset.slug),
                    record.map_or(Value::Null, |r| Value::from(r.distance_km)),
                );
                row.insert(
                    nearest_column(subset),
                    record.map_or(Value::Null, |r| Value::from(r.nearest_name.clone())),
                );
            }
            row
        })
        .collect()
}

fn summary_document(report: &AnalysisReport) -> SummaryDocument<'_> {
    let subsets = report
        .subsets
        .iter()
        .map(|s| match &s.outcome {
            SubsetOutcome::Evaluated { summary, .. } => SubsetDocument {
                label: &s.label,
                facility_count: s.facility_count,
                status: "evaluated",
                summary: Some(summary),
                reason: None,
            },
            SubsetOutcome::NoData { reason } => SubsetDocument {
                label: &s.label,
                facility_count: s.facility_count,
                status: "no_data",
                summary: None,
                reason: Some(reason.as_str()),
            },
        })
        .collect();

    SummaryDocument {
        run_id: report.run_id.to_string(),
        generated_at: report.generated_at,
        bbox: report.grid.bbox,
        resolution: report.grid.resolution,
        grid_points: report.grid.len(),
        settings: &report.settings,
        census: &report.census,
        subsets,
        underserved: UnderservedDocument {
            threshold_km: report.underserved.threshold_km,
            percent_of_grid: report.underserved.percent_of_grid,
            count: report.underserved.len(),
            points: &report.underserved.points,
        },
    }
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Write the grid and summary documents into `out_dir`.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub(crate) fn write_outputs(
    report: &AnalysisReport,
    out_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let grid_path = out_dir.join(GRID_FILE);
    write_json(&grid_path, &grid_rows(report))?;

    let summary_path = out_dir.join(SUMMARY_FILE);
    write_json(&summary_path, &summary_document(report))?;

    tracing::info!(
        run_id = %report.run_id,
        out_dir = %out_dir.display(),
        "analysis outputs written"
    );

    Ok(vec![grid_path, summary_path])
}

pub(crate) fn print_report(report: &AnalysisReport) {
    let bbox = report.grid.bbox;
    println!("run {}", report.run_id);
    println!(
        "study area: lat [{:.4}, {:.4}]  lon [{:.4}, {:.4}]",
        bbox.lat_min, bbox.lat_max, bbox.lon_min, bbox.lon_max
    );
    println!(
        "grid: {0}x{0} = {1} points",
        report.grid.resolution,
        report.grid.len()
    );
    println!();
    crate::clean::print_census(&report.census);

    for subset in &report.subsets {
        println!();
        println!("{} ({} facilities)", subset.label, subset.facility_count);
        match &subset.outcome {
            SubsetOutcome::Evaluated { summary, .. } => {
                let stats = summary.stats;
                println!(
                    "  mean {:.2} km  median {:.2} km  min {:.2} km  max {:.2} km  std {:.2} km",
                    stats.mean, stats.median, stats.min, stats.max, stats.std_dev
                );
                for c in &summary.coverage {
                    println!("  within {:>5.1} km: {:>6.1}%", c.threshold_km, c.percent);
                }
            }
            SubsetOutcome::NoData { reason } => println!("  no coverage data: {reason}"),
        }
    }

    let underserved = &report.underserved;
    println!();
    println!(
        "underserved (> {} km): {} points, {:.1}% of grid",
        underserved.threshold_km,
        underserved.len(),
        underserved.percent_of_grid
    );
    if underserved.is_empty() {
        return;
    }

    println!("{:<12}{:<12}DISTANCE", "LATITUDE", "LONGITUDE");
    for p in underserved
        .points
        .iter()
        .take(report.settings.underserved_report_limit)
    {
        println!(
            "{:<12.5}{:<12.5}{:.2} km",
            p.point.lat, p.point.lon, p.distance_km
        );
    }
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
