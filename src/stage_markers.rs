//! Stage boundary annotations for the elevation profile

use crate::series::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct StageMarker {
    pub distance: f64,
    pub elevation: f64,
    /// True only for the boundary that opens the last stage
    pub is_final: bool,
    pub point_index: usize,
    /// Name of the stage that ends here
    pub label: Option<String>,
}

/// One marker per boundary between consecutive stages.
///
/// Stage `k` is entered at the last point of stage `k - 1`; the first stage
/// is entered at index 0, which never gets a marker. A leading single-point
/// stage also ends at index 0 and is skipped the same way.
///
/// That gives `stages - 1` markers, or `stages - 2` when the first stage is a
/// single point. The last boundary is never 0 unless every boundary is, so a
/// non-empty result always ends with its one final marker.
///
/// `segment_ends` and `segment_names` come from the parser and line up
/// one-to-one.
pub fn extract_stage_markers(
    segment_ends: &[usize],
    segment_names: &[Option<String>],
    series: &Series,
) -> Vec<StageMarker> {
    if segment_ends.is_empty() {
        return Vec::new();
    }

    let boundaries: Vec<usize> = std::iter::once(0)
        .chain(segment_ends[..segment_ends.len() - 1].iter().copied())
        .collect();
    let last_stage = boundaries.len() - 1;
    let distances = series.cumulative_distance();
    let elevations = series.elevation();

    boundaries
        .iter()
        .enumerate()
        .filter(|(_, &index)| index != 0)
        .filter_map(|(stage, &index)| {
            if index >= series.len() {
                log::warn!("Stage boundary {} is outside a {}-point series", index, series.len());
                return None;
            }
            Some(StageMarker {
                distance: distances[index],
                elevation: elevations[index],
                is_final: stage == last_stage,
                point_index: index,
                label: segment_names.get(stage - 1).cloned().flatten(),
            })
        })
        .collect()
}
