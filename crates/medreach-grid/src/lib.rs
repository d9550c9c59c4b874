//! Accessibility grid engine.
//!
//! Lays a uniform lattice over the study area, finds the nearest facility of
//! each subset for every lattice point through an R-tree, and reduces the
//! resulting distances to coverage statistics and underserved points.

pub mod bbox;
pub mod coverage;
pub mod error;
pub mod evaluate;
pub mod geo;
pub mod grid;
pub mod index;
pub mod pipeline;

pub use bbox::BoundingBox;
pub use coverage::{
    summarize, underserved, CoverageSummary, DistanceStats, ThresholdCoverage, UnderservedPoint,
    UnderservedSet,
};
pub use error::GridError;
pub use evaluate::{
    build_subsets, evaluate_subset, evaluate_subsets, DistanceRecord, DistanceSeries,
    FacilitySubset, ALL_FACILITIES,
};
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use grid::{generate_grid, Grid, GridPoint};
pub use index::{GeoIndex, Nearest};
pub use pipeline::{run_analysis, AnalysisReport, SubsetOutcome, SubsetReport};
