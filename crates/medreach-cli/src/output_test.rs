use medreach_core::Facility;

use super::*;

fn facility(id: &str, category: &str, latitude: f64, longitude: f64) -> Facility {
    Facility {
        id: id.to_string(),
        name: format!("{category} {id}"),
        category: category.to_string(),
        latitude,
        longitude,
    }
}

fn small_report() -> AnalysisReport {
    let facilities = vec![
        facility("f1", "Hospital", 13.0, 80.0),
        facility("f2", "Health Center", 13.1, 80.1),
        facility("f3", "Pharmacy", 13.2, 80.2),
    ];
    let settings = AnalysisSettings {
        grid_resolution: 3,
        categories: vec!["Health Center".to_string(), "Dental".to_string()],
        ..AnalysisSettings::default()
    };
    medreach_grid::run_analysis(&facilities, &settings).unwrap()
}

#[test]
fn grid_rows_have_one_row_per_point_with_subset_columns() {
    let report = small_report();
    let rows = grid_rows(&report);
    assert_eq!(rows.len(), 9);

    let first = &rows[0];
    for key in [
        "latitude",
        "longitude",
        "distance_to_any_km",
        "nearest_facility",
        "distance_to_health_center_km",
        "nearest_health_center",
        "distance_to_dental_km",
        "nearest_dental",
    ] {
        assert!(first.contains_key(key), "missing column {key}");
    }
    assert_eq!(first["nearest_facility"], "Hospital f1");
}

#[test]
fn no_data_subset_yields_null_columns() {
    let report = small_report();
    let rows = grid_rows(&report);
    assert!(rows
        .iter()
        .all(|r| r["distance_to_dental_km"].is_null() && r["nearest_dental"].is_null()));
}

#[test]
fn summary_document_marks_subset_status() {
    let report = small_report();
    let doc = serde_json::to_value(summary_document(&report)).unwrap();

    assert_eq!(doc["grid_points"], 9);
    assert_eq!(doc["subsets"][0]["label"], "any");
    assert_eq!(doc["subsets"][0]["status"], "evaluated");
    assert!(doc["subsets"][0]["summary"]["stats"]["mean"].is_number());
    assert_eq!(doc["subsets"][2]["status"], "no_data");
    assert!(doc["subsets"][2].get("summary").is_none());
    assert_eq!(doc["census"]["total"], 3);
}

#[test]
fn write_outputs_creates_both_documents() {
    let report = small_report();
    let dir = std::env::temp_dir().join(format!("medreach-out-{}", std::process::id()));

    let written = write_outputs(&report, &dir).unwrap();
    assert_eq!(written, vec![dir.join(GRID_FILE), dir.join(SUMMARY_FILE)]);

    let grid: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.join(GRID_FILE)).unwrap()).unwrap();
    assert_eq!(grid.len(), 9);

    std::fs::remove_dir_all(&dir).ok();
}
