use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::{category_slug, ALL_FACILITIES};
use crate::ConfigError;

/// Parameters of one accessibility analysis run.
///
/// Every field has a default so a settings file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Angular padding added on every side of the facility bounds, in degrees.
    pub padding_degrees: f64,
    /// Grid side length; the lattice has `grid_resolution²` points.
    pub grid_resolution: usize,
    /// Categories evaluated individually in addition to "any facility".
    pub categories: Vec<String>,
    pub coverage_thresholds_km: Vec<f64>,
    pub underserved_threshold_km: f64,
    /// How many of the worst underserved points the CLI prints.
    pub underserved_report_limit: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            padding_degrees: 0.02,
            grid_resolution: 100,
            categories: vec!["Hospital".to_string(), "Clinic".to_string()],
            coverage_thresholds_km: vec![1.0, 2.0, 5.0, 10.0],
            underserved_threshold_km: 5.0,
            underserved_report_limit: 10,
        }
    }
}

/// Load and validate analysis settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_settings(path: &Path) -> Result<AnalysisSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings: AnalysisSettings = serde_yaml::from_str(&content)?;
    settings.validate()?;

    Ok(settings)
}

impl AnalysisSettings {
    /// Check the distance and category fields.
    ///
    /// Grid resolution and padding are left to the grid engine, which
    /// reports them as structural analysis errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &t in &self.coverage_thresholds_km {
            if !t.is_finite() || t < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "coverage threshold {t} km must be a finite non-negative number"
                )));
            }
        }

        if !self.underserved_threshold_km.is_finite() || self.underserved_threshold_km < 0.0 {
            return Err(ConfigError::Validation(format!(
                "underserved threshold {} km must be a finite non-negative number",
                self.underserved_threshold_km
            )));
        }

        // Output columns are keyed by slug, so labels must stay distinct
        // after slugging and must not shadow the all-facilities columns.
        let reserved = category_slug(ALL_FACILITIES);
        let mut seen: HashMap<String, &str> = HashMap::new();
        for category in &self.categories {
            let slug = category_slug(category);
            if slug.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category label '{category}' has no letters or digits"
                )));
            }
            if slug == reserved {
                return Err(ConfigError::Validation(format!(
                    "category '{category}' is reserved for the all-facilities subset"
                )));
            }
            if let Some(previous) = seen.insert(slug.clone(), category) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category: '{category}' and '{previous}' both map to '{slug}'"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
