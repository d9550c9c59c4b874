//! End-to-end accessibility analysis.
//!
//! Structural failures (bad coordinates, degenerate bounds, bad resolution)
//! abort before any subset is evaluated. An empty category subset only
//! marks that subset as having no coverage data.

use chrono::{DateTime, Utc};
use medreach_core::{census, AnalysisSettings, Facility, FacilityCensus};
use uuid::Uuid;

use crate::bbox::BoundingBox;
use crate::coverage::{summarize, underserved, CoverageSummary, UnderservedSet};
use crate::error::GridError;
use crate::evaluate::{build_subsets, evaluate_subsets, DistanceSeries, ALL_FACILITIES};
use crate::geo::GeoPoint;
use crate::grid::{generate_grid, Grid};

#[derive(Debug, Clone)]
pub enum SubsetOutcome {
    Evaluated {
        series: DistanceSeries,
        summary: CoverageSummary,
    },
    NoData {
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct SubsetReport {
    pub label: String,
    pub slug: String,
    pub facility_count: usize,
    pub outcome: SubsetOutcome,
}

impl SubsetReport {
    #[must_use]
    pub fn series(&self) -> Option<&DistanceSeries> {
        match &self.outcome {
            SubsetOutcome::Evaluated { series, .. } => Some(series),
            SubsetOutcome::NoData { .. } => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&CoverageSummary> {
        match &self.outcome {
            SubsetOutcome::Evaluated { summary, .. } => Some(summary),
            SubsetOutcome::NoData { .. } => None,
        }
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub settings: AnalysisSettings,
    pub census: FacilityCensus,
    pub grid: Grid,
    /// The "any facility" subset first, then one entry per configured category.
    pub subsets: Vec<SubsetReport>,
    /// Underserved points measured against the "any facility" distances.
    pub underserved: UnderservedSet,
}

impl AnalysisReport {
    #[must_use]
    pub fn subset(&self, label: &str) -> Option<&SubsetReport> {
        self.subsets.iter().find(|s| s.label == label)
    }
}

/// Run the full grid analysis over `facilities`.
///
/// 1. Validate facility positions.
/// 2. Derive the padded bounding box and generate the grid.
/// 3. Evaluate the "any" subset and every configured category.
/// 4. Summarize each evaluated subset and extract underserved points.
///
/// # Errors
///
/// Returns [`GridError::MalformedCoordinate`], [`GridError::InvalidBoundingBox`]
/// or [`GridError::InvalidResolution`] for structural failures. Empty
/// category subsets are reported as [`SubsetOutcome::NoData`] instead.
pub fn run_analysis(
    facilities: &[Facility],
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, GridError> {
    let run_id = Uuid::new_v4();
    tracing::info!(%run_id, facilities = facilities.len(), "starting accessibility analysis");

    let positions = facilities
        .iter()
        .map(|f| GeoPoint::new(f.latitude, f.longitude).validate(format!("facility '{}'", f.id)))
        .collect::<Result<Vec<_>, _>>()?;

    let bbox = BoundingBox::around(&positions, settings.padding_degrees)?;
    tracing::info!(
        lat_min = bbox.lat_min,
        lat_max = bbox.lat_max,
        lon_min = bbox.lon_min,
        lon_max = bbox.lon_max,
        "study area bounds"
    );

    let grid = generate_grid(bbox, settings.grid_resolution)?;
    tracing::info!(
        resolution = grid.resolution,
        points = grid.len(),
        "analysis grid created"
    );

    let subsets = build_subsets(facilities, &settings.categories);
    let results = evaluate_subsets(&grid, &subsets);

    let mut reports = Vec::with_capacity(subsets.len());
    for (subset, result) in subsets.iter().zip(results) {
        let outcome = match result {
            Ok(series) => {
                let summary = summarize(&series.distances(), &settings.coverage_thresholds_km)?;
                tracing::info!(
                    subset = %subset.label,
                    facilities = subset.facilities.len(),
                    mean_km = summary.stats.mean,
                    median_km = summary.stats.median,
                    max_km = summary.stats.max,
                    "subset evaluated"
                );
                SubsetOutcome::Evaluated { series, summary }
            }
            Err(e) if e.is_subset_local() => {
                tracing::warn!(subset = %subset.label, error = %e, "no coverage data for subset");
                SubsetOutcome::NoData {
                    reason: e.to_string(),
                }
            }
            Err(e) => return Err(e),
        };

        reports.push(SubsetReport {
            label: subset.label.clone(),
            slug: subset.slug(),
            facility_count: subset.facilities.len(),
            outcome,
        });
    }

    let any_distances = reports
        .first()
        .and_then(SubsetReport::series)
        .map(DistanceSeries::distances)
        .ok_or_else(|| GridError::EmptyFacilitySet {
            subset: ALL_FACILITIES.to_string(),
        })?;
    let underserved = underserved(
        &any_distances,
        grid.points(),
        settings.underserved_threshold_km,
    )?;
    tracing::info!(
        threshold_km = underserved.threshold_km,
        points = underserved.len(),
        percent = underserved.percent_of_grid,
        "underserved areas identified"
    );

    Ok(AnalysisReport {
        run_id,
        generated_at: Utc::now(),
        settings: settings.clone(),
        census: census(facilities),
        grid,
        subsets: reports,
        underserved,
    })
}
