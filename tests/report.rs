//! Profile summaries, CSV export and folder batches

mod common;

use common::{gpx_document, staged_route};
use gpx_route_profile::profile_report::{
    collect_gpx_files, save_summaries_to_csv, summarize_folder, write_profile_csv, ProfileSummary,
};
use gpx_route_profile::{build_profile, DisplayUnits, WidgetConfig};

fn metric() -> WidgetConfig {
    WidgetConfig {
        units: DisplayUnits::Metric,
        ..WidgetConfig::default()
    }
}

#[test]
fn test_summary_numbers() {
    let text = gpx_document(&[
        vec![(46.0, 7.0, Some(1000.0)), (46.01, 7.0, Some(1100.0))],
        vec![(46.02, 7.0, Some(1050.0)), (46.03, 7.0, Some(1200.0))],
    ]);
    let profile = build_profile(&text, &metric()).unwrap();
    let summary = ProfileSummary::from_profile("alps.gpx", &profile);

    assert!(summary.is_success());
    assert_eq!(summary.points, 4);
    assert_eq!(summary.stages, 2);
    assert_eq!(summary.elevation_gain, 250.0);
    assert_eq!(summary.elevation_loss, 50.0);
    assert_eq!(summary.min_elevation, 1000.0);
    assert_eq!(summary.max_elevation, 1200.0);
    assert_eq!(summary.distance_unit, "km");
}

#[test]
fn test_profile_csv_rows_and_stages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    let profile = build_profile(&staged_route(&[3, 2]), &metric()).unwrap();

    write_profile_csv(&profile, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[3], "Distance_km");
    assert_eq!(&headers[4], "Elevation_m");

    let stages: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[5].to_string())
        .collect();
    assert_eq!(stages, vec!["1", "1", "1", "2", "2"]);
}

#[test]
fn test_folder_batch_records_failures() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("trips");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(dir.path().join("a.gpx"), staged_route(&[4])).unwrap();
    std::fs::write(nested.join("b.GPX"), staged_route(&[2, 3])).unwrap();
    std::fs::write(nested.join("broken.gpx"), "not a track").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    assert_eq!(collect_gpx_files(dir.path()).len(), 3);

    let summaries = summarize_folder(dir.path(), &WidgetConfig::default());
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries.iter().filter(|s| s.is_success()).count(), 2);

    let broken = summaries.iter().find(|s| s.filename == "broken.gpx").unwrap();
    assert!(broken.status.starts_with("ERROR"));

    let out = dir.path().join("summary.csv");
    save_summaries_to_csv(&summaries, &out).unwrap();
    let rows = csv::Reader::from_path(&out).unwrap().records().count();
    assert_eq!(rows, 3);
}
