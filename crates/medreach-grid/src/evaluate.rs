//! Per-subset nearest-facility evaluation over the analysis grid.

pub use medreach_core::ALL_FACILITIES;
use medreach_core::{category_slug, Facility};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::GridError;
use crate::geo::GeoPoint;
use crate::grid::Grid;
use crate::index::GeoIndex;

/// A named group of facilities evaluated as one nearest-neighbour source set.
#[derive(Debug, Clone)]
pub struct FacilitySubset<'a> {
    pub label: String,
    pub facilities: Vec<&'a Facility>,
}

impl<'a> FacilitySubset<'a> {
    #[must_use]
    pub fn all(facilities: &'a [Facility]) -> Self {
        Self {
            label: ALL_FACILITIES.to_string(),
            facilities: facilities.iter().collect(),
        }
    }

    /// Facilities whose category equals `category` exactly.
    #[must_use]
    pub fn category(facilities: &'a [Facility], category: &str) -> Self {
        Self {
            label: category.to_string(),
            facilities: facilities
                .iter()
                .filter(|f| f.category == category)
                .collect(),
        }
    }

    /// Column-safe key used by output adapters.
    #[must_use]
    pub fn slug(&self) -> String {
        category_slug(&self.label)
    }
}

/// The "any facility" subset followed by one subset per requested category,
/// in the order given.
#[must_use]
pub fn build_subsets<'a>(
    facilities: &'a [Facility],
    categories: &[String],
) -> Vec<FacilitySubset<'a>> {
    std::iter::once(FacilitySubset::all(facilities))
        .chain(
            categories
                .iter()
                .map(|c| FacilitySubset::category(facilities, c)),
        )
        .collect()
}

/// Nearest facility for one grid point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRecord {
    pub distance_km: f64,
    pub nearest_id: String,
    pub nearest_name: String,
}

/// One [`DistanceRecord`] per grid point, in grid order.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceSeries {
    pub subset: String,
    pub records: Vec<DistanceRecord>,
}

impl DistanceSeries {
    #[must_use]
    pub fn distances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.distance_km).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Evaluate the nearest facility of `subset` for every point of `grid`.
///
/// # Errors
///
/// Returns [`GridError::EmptyFacilitySet`] when the subset has no members;
/// callers should record "no coverage data" for it and carry on. Returns
/// [`GridError::MalformedCoordinate`] if a facility position is invalid.
pub fn evaluate_subset(
    grid: &Grid,
    subset: &FacilitySubset<'_>,
) -> Result<DistanceSeries, GridError> {
    let sources: Vec<GeoPoint> = subset
        .facilities
        .iter()
        .map(|f| GeoPoint::new(f.latitude, f.longitude))
        .collect();
    let index = GeoIndex::build(&subset.label, &sources)?;

    let queries: Vec<GeoPoint> = grid.points().iter().map(|p| p.position()).collect();
    let hits = index.nearest_batch(&queries)?;

    let records = hits
        .into_iter()
        .map(|hit| {
            let facility = subset.facilities[hit.index];
            DistanceRecord {
                distance_km: hit.distance_km,
                nearest_id: facility.id.clone(),
                nearest_name: facility.name.clone(),
            }
        })
        .collect();

    tracing::debug!(
        subset = %subset.label,
        facilities = index.len(),
        points = grid.len(),
        "evaluated nearest-facility distances"
    );

    Ok(DistanceSeries {
        subset: subset.label.clone(),
        records,
    })
}

/// Evaluate every subset against the same grid.
///
/// Subsets share no state and are evaluated in parallel; results come back
/// in the order of `subsets`.
#[must_use]
pub fn evaluate_subsets(
    grid: &Grid,
    subsets: &[FacilitySubset<'_>],
) -> Vec<Result<DistanceSeries, GridError>> {
    subsets
        .par_iter()
        .map(|subset| evaluate_subset(grid, subset))
        .collect()
}
