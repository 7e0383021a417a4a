//! Route widget shell
//!
//! Load order is fixed: fetch, build the profile, then acquire the map and
//! chart surfaces from the caller's `SurfaceProvider`. Surfaces are never
//! requested for a track that failed to load, so a failed widget leaves
//! nothing half-built behind. Pointer events only reach the synchronizer of a
//! fully constructed widget.

use crate::config::WidgetConfig;
use crate::cursor_sync::{ChartSurface, CursorState, CursorSync, MapSurface, PointerEvent, SyncEffect};
use crate::error::WidgetError;
use crate::profile::{build_profile, TrackProfile};
use crate::stage_markers::StageMarker;
use crate::track_source::TrackSource;

/// Hands already-initialized rendering capabilities to the widget.
///
/// Implementations own library loading; a library that is not available
/// is reported as `WidgetError::Dependency`.
pub trait SurfaceProvider {
    type Map: MapSurface;
    type Chart: ChartSurface;

    /// Map with the route drawn and a hidden cursor marker
    fn map(&mut self, profile: &TrackProfile) -> Result<Self::Map, WidgetError>;

    /// Chart plotting the series with the given stage annotations
    fn chart(&mut self, profile: &TrackProfile, markers: &[StageMarker]) -> Result<Self::Chart, WidgetError>;
}

/// Dedicated area that shows a single load failure message
pub trait ErrorRegion {
    fn show_error(&mut self, message: &str);
}

/// A loaded widget: immutable profile, two surfaces, one cursor
pub struct RouteWidget<M: MapSurface, C: ChartSurface> {
    profile: TrackProfile,
    map: M,
    chart: C,
    cursor: CursorState,
    series_index: usize,
}

impl<M: MapSurface, C: ChartSurface> RouteWidget<M, C> {
    pub fn profile(&self) -> &TrackProfile {
        &self.profile
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Handle one pointer event on the chart surface
    pub fn handle(&mut self, event: PointerEvent) -> Vec<SyncEffect> {
        let mut sync = CursorSync::resume(self.profile.series(), self.series_index, self.cursor);
        let effects = sync.dispatch(event, &mut self.map, &mut self.chart);
        self.cursor = sync.state();
        effects
    }
}

/// Load a track and build the widget around it
pub fn create_widget<S, P>(
    source: &S,
    location: &str,
    config: &WidgetConfig,
    provider: &mut P,
) -> Result<RouteWidget<P::Map, P::Chart>, WidgetError>
where
    S: TrackSource + ?Sized,
    P: SurfaceProvider,
{
    let text = source.fetch(location)?;
    let profile = build_profile(&text, config)?;

    let map = provider.map(&profile)?;
    let chart = provider.chart(&profile, profile.stage_markers())?;

    Ok(RouteWidget {
        profile,
        map,
        chart,
        cursor: CursorState::default(),
        series_index: config.primary_series_index,
    })
}

/// `create_widget`, with failures logged and shown in the error region
pub fn mount<S, P>(
    source: &S,
    location: &str,
    config: &WidgetConfig,
    provider: &mut P,
    errors: &mut dyn ErrorRegion,
) -> Option<RouteWidget<P::Map, P::Chart>>
where
    S: TrackSource + ?Sized,
    P: SurfaceProvider,
{
    match create_widget(source, location, config, provider) {
        Ok(widget) => Some(widget),
        Err(e) => {
            log::error!("Route widget for {} failed to load: {}", location, e);
            errors.show_error(&e.user_message());
            None
        }
    }
}
