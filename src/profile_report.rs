//! Profile summaries and CSV export

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::WidgetConfig;
use crate::profile::{build_profile, TrackProfile};
use crate::track_source::{FileTrackSource, TrackSource};

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub filename: String,
    pub points: usize,
    pub stages: usize,
    pub total_distance: f64,
    pub elevation_gain: f64,
    pub elevation_loss: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
    pub distance_unit: String,
    pub elevation_unit: String,
    pub status: String,
}

impl ProfileSummary {
    pub fn from_profile(filename: &str, profile: &TrackProfile) -> Self {
        let series = profile.series();
        let elevations = series.elevation();
        let (gain, loss) = calculate_gain_loss(elevations);
        let min_elevation = elevations.iter().copied().fold(f64::INFINITY, f64::min);
        let max_elevation = elevations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        ProfileSummary {
            filename: filename.to_string(),
            points: series.len(),
            stages: profile.segment_count(),
            total_distance: series.total_distance(),
            elevation_gain: gain,
            elevation_loss: loss,
            min_elevation,
            max_elevation,
            distance_unit: series.units().distance_label().to_string(),
            elevation_unit: series.units().elevation_label().to_string(),
            status: "SUCCESS".to_string(),
        }
    }

    fn failed(filename: &str, error: &str) -> Self {
        ProfileSummary {
            filename: filename.to_string(),
            points: 0,
            stages: 0,
            total_distance: 0.0,
            elevation_gain: 0.0,
            elevation_loss: 0.0,
            min_elevation: 0.0,
            max_elevation: 0.0,
            distance_unit: String::new(),
            elevation_unit: String::new(),
            status: format!("ERROR: {}", error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "SUCCESS"
    }
}

/// Total climb and descent of an elevation series
pub fn calculate_gain_loss(elevations: &[f64]) -> (f64, f64) {
    let mut gain = 0.0;
    let mut loss = 0.0;

    for window in elevations.windows(2) {
        let change = window[1] - window[0];
        if change > 0.0 {
            gain += change;
        } else {
            loss += -change;
        }
    }

    (gain, loss)
}

/// One row per track point, with the stage each point belongs to
pub fn write_profile_csv(profile: &TrackProfile, csv_path: &Path) -> Result<(), csv::Error> {
    let series = profile.series();
    let units = series.units();
    let mut wtr = csv::Writer::from_path(csv_path)?;

    wtr.write_record([
        "Index".to_string(),
        "Latitude".to_string(),
        "Longitude".to_string(),
        format!("Distance_{}", units.distance_label()),
        format!("Elevation_{}", units.elevation_label()),
        "Stage".to_string(),
    ])?;

    // Stage ends are ascending, so the stage number only ever moves forward
    let stage_ends = profile.segment_ends();
    let mut stage = 0;

    for (i, point) in series.points().iter().enumerate() {
        wtr.write_record(&[
            i.to_string(),
            format!("{:.6}", point.latitude_deg),
            format!("{:.6}", point.longitude_deg),
            format!("{:.3}", series.cumulative_distance()[i]),
            format!("{:.1}", series.elevation()[i]),
            (stage + 1).to_string(),
        ])?;
        if stage_ends.get(stage) == Some(&i) {
            stage += 1;
        }
    }

    wtr.flush()?;
    log::info!("Profile saved to {}", csv_path.display());
    Ok(())
}

/// Every `.gpx` file under a folder
pub fn collect_gpx_files(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Profile every GPX file under `folder` in parallel.
/// Failures are recorded in the summary rather than aborting the batch.
pub fn summarize_folder(folder: &Path, config: &WidgetConfig) -> Vec<ProfileSummary> {
    let mut files = collect_gpx_files(folder);
    files.sort();
    log::info!("Found {} GPX files under {}", files.len(), folder.display());

    files
        .par_iter()
        .map(|path| {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let location = path.to_string_lossy();

            let result = FileTrackSource
                .fetch(&location)
                .and_then(|text| build_profile(&text, config).map_err(Into::into));

            match result {
                Ok(profile) => ProfileSummary::from_profile(&filename, &profile),
                Err(e) => {
                    log::warn!("Failed to profile {}: {}", filename, e);
                    ProfileSummary::failed(&filename, &e.to_string())
                }
            }
        })
        .collect()
}

pub fn save_summaries_to_csv(summaries: &[ProfileSummary], csv_path: &Path) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(csv_path)?;
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()?;
    log::info!("Summaries saved to {}", csv_path.display());
    Ok(())
}
