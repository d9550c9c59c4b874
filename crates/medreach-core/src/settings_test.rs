use std::path::PathBuf;

use super::*;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "medreach-settings-{}-{name}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("write temp settings");
    path
}

#[test]
fn defaults_match_documented_values() {
    let s = AnalysisSettings::default();
    assert!((s.padding_degrees - 0.02).abs() < f64::EPSILON);
    assert_eq!(s.grid_resolution, 100);
    assert_eq!(s.categories, vec!["Hospital", "Clinic"]);
    assert_eq!(s.coverage_thresholds_km, vec![1.0, 2.0, 5.0, 10.0]);
    assert!((s.underserved_threshold_km - 5.0).abs() < f64::EPSILON);
    assert!(s.validate().is_ok());
}

#[test]
fn partial_yaml_keeps_defaults_for_missing_fields() {
    let path = temp_file("partial", "grid_resolution: 50\ncategories: [Pharmacy]\n");
    let s = load_settings(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(s.grid_resolution, 50);
    assert_eq!(s.categories, vec!["Pharmacy"]);
    assert_eq!(s.coverage_thresholds_km, vec![1.0, 2.0, 5.0, 10.0]);
}

#[test]
fn unknown_field_is_a_parse_error() {
    let path = temp_file("unknown", "grid_size: 50\n");
    let result = load_settings(&path);
    std::fs::remove_file(&path).ok();

    assert!(
        matches!(result, Err(ConfigError::SettingsParse(_))),
        "expected SettingsParse, got: {result:?}"
    );
}

#[test]
fn missing_file_is_io_error() {
    let result = load_settings(Path::new("/nonexistent/medreach/settings.yaml"));
    assert!(matches!(result, Err(ConfigError::FileIo { .. })));
}

#[test]
fn validate_rejects_negative_threshold() {
    let s = AnalysisSettings {
        coverage_thresholds_km: vec![1.0, -2.0],
        ..AnalysisSettings::default()
    };
    assert!(matches!(s.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn validate_rejects_nan_underserved_threshold() {
    let s = AnalysisSettings {
        underserved_threshold_km: f64::NAN,
        ..AnalysisSettings::default()
    };
    assert!(matches!(s.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn validate_rejects_duplicate_category() {
    let s = AnalysisSettings {
        categories: vec!["Clinic".to_string(), "Clinic".to_string()],
        ..AnalysisSettings::default()
    };
    let err = s.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate category"), "{err}");
}

#[test]
fn validate_rejects_categories_with_the_same_slug() {
    let s = AnalysisSettings {
        categories: vec!["Health Center".to_string(), "health-center".to_string()],
        ..AnalysisSettings::default()
    };
    let err = s.validate().unwrap_err();
    assert!(err.to_string().contains("health_center"), "{err}");
}

#[test]
fn validate_rejects_category_named_like_all_facilities() {
    for label in ["any", "Any", " ANY "] {
        let s = AnalysisSettings {
            categories: vec![label.to_string(), "Clinic".to_string()],
            ..AnalysisSettings::default()
        };
        let result = s.validate();
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("reserved")),
            "label {label:?} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn validate_rejects_label_without_alphanumerics() {
    for label in ["", "   ", "//"] {
        let s = AnalysisSettings {
            categories: vec![label.to_string()],
            ..AnalysisSettings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Validation(_))), "{label:?}");
    }
}

#[test]
fn validate_accepts_unordered_thresholds() {
    let s = AnalysisSettings {
        coverage_thresholds_km: vec![10.0, 1.0, 5.0],
        ..AnalysisSettings::default()
    };
    assert!(s.validate().is_ok());
}
