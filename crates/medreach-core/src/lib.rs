//! Shared domain types and configuration for medreach.
//!
//! Holds the facility model, the category classifier, facility dataset
//! loading and cleaning, environment configuration, and the analysis
//! settings consumed by the grid engine.

pub mod app_config;
pub mod category;
pub mod config;
pub mod facilities;
pub mod settings;

pub use app_config::{AppConfig, Environment};
pub use category::{categorize_facility, category_slug, FacilityCategory, ALL_FACILITIES};
pub use config::{load_app_config, load_app_config_from_env};
pub use facilities::{
    census, clean_facilities, load_facilities, read_raw_facilities, CategoryCount,
    CleaningReport, Facility, FacilityCensus, RawFacility,
};
pub use settings::{load_settings, AnalysisSettings};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file: {0}")]
    SettingsParse(#[from] serde_yaml::Error),

    #[error("failed to parse facilities file: {0}")]
    FacilitiesParse(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
