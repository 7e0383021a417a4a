//! Load-time pipeline: parse, measure, normalize, mark stages

use crate::config::WidgetConfig;
use crate::elevation::count_missing;
use crate::error::ParseError;
use crate::series::Series;
use crate::stage_markers::{extract_stage_markers, StageMarker};
use crate::track_parser::{parse_track, ParseStrategy};

/// Everything computed from one track document. Immutable once built.
#[derive(Debug, Clone)]
pub struct TrackProfile {
    series: Series,
    stage_markers: Vec<StageMarker>,
    segment_ends: Vec<usize>,
    repaired_elevations: usize,
    strategy: ParseStrategy,
}

impl TrackProfile {
    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn stage_markers(&self) -> &[StageMarker] {
        &self.stage_markers
    }

    /// Flat index of the last point of each stage
    pub fn segment_ends(&self) -> &[usize] {
        &self.segment_ends
    }

    pub fn segment_count(&self) -> usize {
        self.segment_ends.len()
    }

    /// Points whose elevation was missing or unreadable
    pub fn repaired_elevations(&self) -> usize {
        self.repaired_elevations
    }

    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }
}

/// Run the whole load-time pipeline over raw track text
pub fn build_profile(text: &str, config: &WidgetConfig) -> Result<TrackProfile, ParseError> {
    let parsed = parse_track(text, config.coordinates)?;
    let raw: Vec<f64> = parsed.points.iter().map(|p| p.elevation_m).collect();
    let repaired_elevations = count_missing(&raw);

    let series = Series::build(parsed.points, config.units)?;
    let stage_markers = extract_stage_markers(&parsed.segment_ends, &parsed.segment_names, &series);

    log::info!(
        "Built profile: {} points, {} stages, {:.2} {}",
        series.len(),
        parsed.segment_ends.len(),
        series.total_distance(),
        series.units().distance_label()
    );
    if repaired_elevations > 0 {
        log::warn!("Repaired {} missing elevation readings", repaired_elevations);
    }

    Ok(TrackProfile {
        series,
        stage_markers,
        segment_ends: parsed.segment_ends,
        repaired_elevations,
        strategy: parsed.strategy,
    })
}
