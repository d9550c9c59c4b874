//! Facility records and the dataset adapter that produces them.
//!
//! Raw rows come from an OSM export and may carry string or numeric ids,
//! string-encoded coordinates, missing names, and a raw `type` tag instead
//! of a category. Everything that reaches [`Facility`] has a finite,
//! in-range position.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::categorize_facility;
use crate::ConfigError;

const UNNAMED: &str = "Unnamed";

/// A healthcare facility with a validated position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    /// Category label; the grid engine only uses it to partition facilities.
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Facility {
    /// `true` when both coordinates are finite and inside the WGS84 range.
    #[must_use]
    pub fn has_valid_position(&self) -> bool {
        valid_position(self.latitude, self.longitude)
    }
}

fn valid_position(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// One row of an input dataset before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFacility {
    /// OSM ids arrive as numbers, hand-made datasets use strings.
    pub id: Option<Value>,
    pub name: Option<String>,
    pub category: Option<String>,
    /// Raw amenity/healthcare tag, used when `category` is absent.
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

/// Counters describing what [`clean_facilities`] removed or repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub invalid_coordinates: usize,
    pub duplicate_positions: usize,
    pub duplicate_ids: usize,
    /// Rows kept with the placeholder name `"Unnamed"`.
    pub unnamed: usize,
    pub output_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    pub percent: f64,
}

/// Per-category facility counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityCensus {
    pub total: usize,
    /// Sorted by count descending, then label ascending.
    pub categories: Vec<CategoryCount>,
}

impl FacilityCensus {
    /// Count for a category label, zero when absent.
    #[must_use]
    pub fn count(&self, category: &str) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

/// Read a JSON array of raw facility rows.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not a JSON array
/// of objects.
pub fn read_raw_facilities(path: &Path) -> Result<Vec<RawFacility>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a facility dataset, dropping rows whose coordinates are missing,
/// non-numeric, or out of range.
///
/// Duplicate positions are kept, including rows without an id that are
/// otherwise identical; run [`clean_facilities`] first to remove them.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if two
/// kept rows share an id.
pub fn load_facilities(path: &Path) -> Result<Vec<Facility>, ConfigError> {
    let raw = read_raw_facilities(path)?;
    let input_rows = raw.len();

    let facilities: Vec<Facility> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(row, r)| normalize_facility(r, row))
        .collect();

    let dropped = input_rows - facilities.len();
    if dropped > 0 {
        tracing::warn!(
            path = %path.display(),
            dropped,
            "dropped facility rows with unusable coordinates"
        );
    }

    let mut seen = HashSet::new();
    for facility in &facilities {
        if !seen.insert(facility.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate facility id '{}' in {}; run `medreach clean` first",
                facility.id,
                path.display()
            )));
        }
    }

    tracing::debug!(path = %path.display(), count = facilities.len(), "loaded facilities");
    Ok(facilities)
}

/// Clean raw rows into analysis-ready facilities.
///
/// Drops rows with unusable coordinates, keeps the first row for each exact
/// (latitude, longitude) position and for each id, fills missing names with
/// `"Unnamed"`, and classifies rows without a category from their raw type.
#[must_use]
pub fn clean_facilities(raw: Vec<RawFacility>) -> (Vec<Facility>, CleaningReport) {
    let mut report = CleaningReport {
        input_rows: raw.len(),
        ..CleaningReport::default()
    };

    let mut positions = HashSet::new();
    let mut ids = HashSet::new();
    let mut cleaned = Vec::with_capacity(raw.len());

    for (row, r) in raw.into_iter().enumerate() {
        let Some(facility) = normalize_facility(r, row) else {
            report.invalid_coordinates += 1;
            continue;
        };

        let key = (
            position_bits(facility.latitude),
            position_bits(facility.longitude),
        );
        if !positions.insert(key) {
            report.duplicate_positions += 1;
            continue;
        }

        if !ids.insert(facility.id.clone()) {
            tracing::debug!(id = %facility.id, row, "skipping row with duplicate id");
            report.duplicate_ids += 1;
            continue;
        }

        if facility.name == UNNAMED {
            report.unnamed += 1;
        }
        cleaned.push(facility);
    }

    report.output_rows = cleaned.len();
    if report.invalid_coordinates > 0 {
        tracing::warn!(
            dropped = report.invalid_coordinates,
            "dropped facility rows with unusable coordinates"
        );
    }
    (cleaned, report)
}

/// Count facilities per category label.
#[must_use]
pub fn census(facilities: &[Facility]) -> FacilityCensus {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for facility in facilities {
        *counts.entry(facility.category.as_str()).or_default() += 1;
    }

    let total = facilities.len();
    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
            percent: percent_of(count, total),
        })
        .collect();
    // BTreeMap iteration is label-ordered, so a stable sort keeps that as the tie-break.
    categories.sort_by(|a, b| b.count.cmp(&a.count));

    FacilityCensus { total, categories }
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// `-0.0` and `0.0` are the same position.
#[allow(clippy::float_cmp)]
fn position_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn normalize_facility(raw: RawFacility, row: usize) -> Option<Facility> {
    let latitude = raw.latitude.as_ref().and_then(coordinate_from_value);
    let longitude = raw.longitude.as_ref().and_then(coordinate_from_value);

    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        tracing::debug!(row, "skipping facility row with missing or non-numeric coordinates");
        return None;
    };
    if !valid_position(latitude, longitude) {
        tracing::debug!(
            row,
            latitude,
            longitude,
            "skipping facility row with out-of-range coordinates"
        );
        return None;
    }

    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNNAMED.to_string());

    let category = raw
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| {
            categorize_facility(raw.facility_type.as_deref().unwrap_or(""))
                .label()
                .to_string()
        });

    let id = raw
        .id
        .as_ref()
        .and_then(id_from_value)
        .unwrap_or_else(|| derive_facility_id(row, &name, latitude, longitude));

    Some(Facility {
        id,
        name,
        category,
        latitude,
        longitude,
    })
}

fn coordinate_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Id for rows without one: SHA-256 over `row || name || lat || lon`,
/// hex-encoded. Stable for a given file; the row index keeps otherwise
/// identical rows apart.
fn derive_facility_id(row: usize, name: &str, latitude: f64, longitude: f64) -> String {
    use sha2::{Digest, Sha256};
    let input = format!(
        "{row}\x00{}\x00{latitude:.7}\x00{longitude:.7}",
        name.to_lowercase()
    );
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
#[path = "facilities_test.rs"]
mod tests;
