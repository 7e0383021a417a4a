//! Elevation profile and cursor synchronization for GPX route widgets
//!
//! A track document is parsed into an immutable [`Series`] of cumulative
//! distance and elevation. The cursor synchronizer then maps pointer events
//! on the elevation chart to a track point and mirrors that point onto the
//! route map.

pub mod config;
pub mod cursor_sync;
pub mod distance;
pub mod elevation;
pub mod error;
pub mod headless;
pub mod locator;
pub mod profile;
pub mod profile_report;
pub mod series;
pub mod stage_markers;
pub mod track_parser;
pub mod track_source;
pub mod units;
pub mod widget;

pub use config::{CoordinatePolicy, WidgetConfig};
pub use cursor_sync::{ChartSurface, CursorState, CursorSync, MapSurface, PointerEvent, SyncEffect};
pub use error::{ParseError, WidgetError};
pub use profile::{build_profile, TrackProfile};
pub use series::{Series, TrackPoint};
pub use stage_markers::StageMarker;
pub use units::DisplayUnits;
