//! Cursor synchronization between the elevation chart and the route map
//!
//! Pointer handling is a pure reducer: `reduce` maps the current
//! `CursorState` and one `PointerEvent` to the next state plus a list of
//! `SyncEffect`s. `CursorSync` is the thin adapter that keeps the state and
//! applies those effects to real map and chart surfaces.

use crate::locator::nearest_index;
use crate::series::Series;

/// Marker operations the map collaborator exposes
pub trait MapSurface {
    fn set_marker_position(&mut self, latitude_deg: f64, longitude_deg: f64);
    /// Hidden markers stay on the map, fully transparent
    fn set_marker_visibility(&mut self, visible: bool);
    /// Animated pan of the map view
    fn pan_to(&mut self, latitude_deg: f64, longitude_deg: f64);
}

/// Highlight and axis operations the chart collaborator exposes
pub trait ChartSurface {
    fn highlight_point(&mut self, series_index: usize, point_index: usize);
    fn clear_highlight(&mut self);
    /// Pixel position to distance along the x axis
    fn pixel_x_to_data_x(&self, pixel_x: f64) -> f64;
    /// Left and right pixel edges of the plotting area
    fn visible_pixel_bounds(&self) -> (f64, f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { pixel_x: f64 },
    Leave,
    Click,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    pub active_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncEffect {
    MoveMarker { latitude_deg: f64, longitude_deg: f64 },
    ShowMarker,
    HideMarker,
    HighlightPoint { series_index: usize, point_index: usize },
    ClearHighlight,
    PanTo { latitude_deg: f64, longitude_deg: f64 },
}

/// Next cursor state and the side effects one pointer event causes
pub fn reduce<C: ChartSurface + ?Sized>(
    series: &Series,
    chart: &C,
    series_index: usize,
    state: CursorState,
    event: PointerEvent,
) -> (CursorState, Vec<SyncEffect>) {
    match event {
        PointerEvent::Move { pixel_x } => {
            let (left, right) = chart.visible_pixel_bounds();
            let pixel_x = pixel_x.max(left.min(right)).min(left.max(right));
            let query = chart
                .pixel_x_to_data_x(pixel_x)
                .max(0.0)
                .min(series.total_distance());

            let index = nearest_index(series.cumulative_distance(), query);
            let point = series.points()[index];

            let mut effects = Vec::with_capacity(3);
            effects.push(SyncEffect::MoveMarker {
                latitude_deg: point.latitude_deg,
                longitude_deg: point.longitude_deg,
            });
            if state.active_index.is_none() {
                effects.push(SyncEffect::ShowMarker);
            }
            effects.push(SyncEffect::HighlightPoint {
                series_index,
                point_index: index,
            });

            (CursorState { active_index: Some(index) }, effects)
        }
        PointerEvent::Leave => (
            CursorState::default(),
            vec![SyncEffect::HideMarker, SyncEffect::ClearHighlight],
        ),
        PointerEvent::Click => match state.active_index {
            Some(index) => {
                let point = series.points()[index];
                let pan = SyncEffect::PanTo {
                    latitude_deg: point.latitude_deg,
                    longitude_deg: point.longitude_deg,
                };
                (state, vec![pan])
            }
            None => (state, Vec::new()),
        },
    }
}

/// Replay effects onto the real surfaces, in order
pub fn apply_effects<M, C>(effects: &[SyncEffect], map: &mut M, chart: &mut C)
where
    M: MapSurface + ?Sized,
    C: ChartSurface + ?Sized,
{
    for effect in effects {
        match *effect {
            SyncEffect::MoveMarker { latitude_deg, longitude_deg } => {
                map.set_marker_position(latitude_deg, longitude_deg)
            }
            SyncEffect::ShowMarker => map.set_marker_visibility(true),
            SyncEffect::HideMarker => map.set_marker_visibility(false),
            SyncEffect::HighlightPoint { series_index, point_index } => {
                chart.highlight_point(series_index, point_index)
            }
            SyncEffect::ClearHighlight => chart.clear_highlight(),
            SyncEffect::PanTo { latitude_deg, longitude_deg } => {
                map.pan_to(latitude_deg, longitude_deg)
            }
        }
    }
}

/// Holds the cursor state for one widget and drives the surfaces
#[derive(Debug)]
pub struct CursorSync<'a> {
    series: &'a Series,
    series_index: usize,
    state: CursorState,
}

impl<'a> CursorSync<'a> {
    pub fn new(series: &'a Series, series_index: usize) -> Self {
        Self::resume(series, series_index, CursorState::default())
    }

    pub fn resume(series: &'a Series, series_index: usize, state: CursorState) -> Self {
        CursorSync {
            series,
            series_index,
            state,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Process one event to completion and return what was applied
    pub fn dispatch<M, C>(&mut self, event: PointerEvent, map: &mut M, chart: &mut C) -> Vec<SyncEffect>
    where
        M: MapSurface + ?Sized,
        C: ChartSurface + ?Sized,
    {
        let (next, effects) = reduce(self.series, &*chart, self.series_index, self.state, event);
        log::trace!("{:?}: {:?} -> {:?}", event, self.state.active_index, next.active_index);
        self.state = next;
        apply_effects(&effects, map, chart);
        effects
    }
}
