use std::path::PathBuf;

use medreach_core::Environment;

use super::*;

fn test_config(settings_path: Option<PathBuf>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        facilities_path: PathBuf::from("./facilities.json"),
        output_dir: PathBuf::from("./outputs"),
        settings_path,
    }
}

fn no_overrides() -> AnalyzeArgs {
    AnalyzeArgs {
        facilities: None,
        out_dir: None,
        settings: None,
        resolution: None,
        padding: None,
        categories: Vec::new(),
        thresholds: Vec::new(),
        underserved_km: None,
        top: None,
        dry_run: false,
    }
}

fn temp_settings(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "medreach-cli-{}-{name}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("write temp settings");
    path
}

#[test]
fn defaults_apply_without_file_or_flags() {
    let settings = resolve_settings(&test_config(None), &no_overrides()).unwrap();
    assert_eq!(settings, AnalysisSettings::default());
}

#[test]
fn flags_override_defaults() {
    let args = AnalyzeArgs {
        resolution: Some(40),
        categories: vec!["Pharmacy".to_string()],
        thresholds: vec![3.0],
        underserved_km: Some(2.5),
        ..no_overrides()
    };
    let settings = resolve_settings(&test_config(None), &args).unwrap();

    assert_eq!(settings.grid_resolution, 40);
    assert_eq!(settings.categories, vec!["Pharmacy"]);
    assert_eq!(settings.coverage_thresholds_km, vec![3.0]);
    assert!((settings.underserved_threshold_km - 2.5).abs() < f64::EPSILON);
    assert!((settings.padding_degrees - 0.02).abs() < f64::EPSILON);
}

#[test]
fn flags_override_settings_file() {
    let path = temp_settings("layered", "grid_resolution: 20\ncategories: [Dental]\n");
    let args = AnalyzeArgs {
        resolution: Some(30),
        ..no_overrides()
    };
    let result = resolve_settings(&test_config(Some(path.clone())), &args);
    std::fs::remove_file(&path).ok();

    let settings = result.unwrap();
    assert_eq!(settings.grid_resolution, 30);
    assert_eq!(settings.categories, vec!["Dental"]);
}

#[test]
fn settings_flag_wins_over_configured_path() {
    let path = temp_settings("flag", "grid_resolution: 12\n");
    let args = AnalyzeArgs {
        settings: Some(path.clone()),
        ..no_overrides()
    };
    let config = test_config(Some(PathBuf::from("/nonexistent/medreach.yaml")));
    let result = resolve_settings(&config, &args);
    std::fs::remove_file(&path).ok();

    assert_eq!(result.unwrap().grid_resolution, 12);
}

#[test]
fn invalid_override_is_rejected() {
    let args = AnalyzeArgs {
        thresholds: vec![-1.0],
        ..no_overrides()
    };
    assert!(resolve_settings(&test_config(None), &args).is_err());
}

#[test]
fn category_override_colliding_with_output_columns_is_rejected() {
    for categories in [
        vec!["any".to_string(), "Clinic".to_string()],
        vec!["Health Center".to_string(), "health-center".to_string()],
    ] {
        let args = AnalyzeArgs {
            categories: categories.clone(),
            ..no_overrides()
        };
        assert!(
            resolve_settings(&test_config(None), &args).is_err(),
            "{categories:?} should be rejected"
        );
    }
}
