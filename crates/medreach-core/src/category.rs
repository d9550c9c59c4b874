//! Classification of raw OpenStreetMap healthcare tags into facility categories.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityCategory {
    Hospital,
    Clinic,
    Pharmacy,
    Dental,
    Laboratory,
    Therapy,
    #[serde(rename = "Specialized Care")]
    SpecializedCare,
    #[serde(rename = "Health Center")]
    HealthCenter,
    #[serde(rename = "Alternative/Mental Health")]
    AlternativeMentalHealth,
    Other,
}

impl FacilityCategory {
    /// The label stored in [`crate::Facility::category`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FacilityCategory::Hospital => "Hospital",
            FacilityCategory::Clinic => "Clinic",
            FacilityCategory::Pharmacy => "Pharmacy",
            FacilityCategory::Dental => "Dental",
            FacilityCategory::Laboratory => "Laboratory",
            FacilityCategory::Therapy => "Therapy",
            FacilityCategory::SpecializedCare => "Specialized Care",
            FacilityCategory::HealthCenter => "Health Center",
            FacilityCategory::AlternativeMentalHealth => "Alternative/Mental Health",
            FacilityCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered substring rules. The first rule with a matching needle wins, so
/// `"hospital;pharmacy"` is a Hospital and `"dialysis_centre"` is Specialized
/// Care rather than Health Center.
const RULES: &[(&[&str], FacilityCategory)] = &[
    (&["hospital"], FacilityCategory::Hospital),
    (&["clinic", "doctor"], FacilityCategory::Clinic),
    (&["pharmacy"], FacilityCategory::Pharmacy),
    (&["dentist"], FacilityCategory::Dental),
    (&["laboratory", "lab"], FacilityCategory::Laboratory),
    (
        &[
            "physiotherapist",
            "occupational_therapist",
            "speech_therapist",
        ],
        FacilityCategory::Therapy,
    ),
    (
        &["blood_donation", "dialysis"],
        FacilityCategory::SpecializedCare,
    ),
    (
        &["health", "centre", "center"],
        FacilityCategory::HealthCenter,
    ),
    (
        &["psychotherapist", "alternative"],
        FacilityCategory::AlternativeMentalHealth,
    ),
];

/// Classify a raw amenity/healthcare tag value.
///
/// Matching is case-insensitive substring matching; unknown or empty tags
/// fall through to [`FacilityCategory::Other`].
#[must_use]
pub fn categorize_facility(raw_type: &str) -> FacilityCategory {
    let lowered = raw_type.to_lowercase();
    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map_or(FacilityCategory::Other, |(_, category)| *category)
}

/// Label of the subset containing every facility, whatever its category.
pub const ALL_FACILITIES: &str = "any";

/// Column-safe key for a category label: lower-case ASCII alphanumerics
/// joined by single underscores.
///
/// `"Health Center"` becomes `"health_center"` and
/// `"Alternative/Mental Health"` becomes `"alternative_mental_health"`.
#[must_use]
pub fn category_slug(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
