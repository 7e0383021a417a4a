//! In-memory map and chart surfaces
//!
//! Used by the CLI cursor replay and by tests. The chart maps its plotting
//! area linearly onto `[0, total_distance]`; the map only records what it
//! was told to do.

use crate::cursor_sync::{ChartSurface, MapSurface};

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessChart {
    pub left_px: f64,
    pub right_px: f64,
    pub max_distance: f64,
    /// (series index, point index) currently highlighted
    pub highlighted: Option<(usize, usize)>,
}

impl HeadlessChart {
    pub fn new(left_px: f64, right_px: f64, max_distance: f64) -> Self {
        HeadlessChart {
            left_px,
            right_px,
            max_distance,
            highlighted: None,
        }
    }
}

impl ChartSurface for HeadlessChart {
    fn highlight_point(&mut self, series_index: usize, point_index: usize) {
        self.highlighted = Some((series_index, point_index));
    }

    fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    fn pixel_x_to_data_x(&self, pixel_x: f64) -> f64 {
        let width = self.right_px - self.left_px;
        if width <= 0.0 {
            return 0.0;
        }
        (pixel_x - self.left_px) / width * self.max_distance
    }

    fn visible_pixel_bounds(&self) -> (f64, f64) {
        (self.left_px, self.right_px)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessMap {
    /// (lat, lon) of the cursor marker, kept while hidden
    pub marker: Option<(f64, f64)>,
    pub marker_visible: bool,
    pub pans: Vec<(f64, f64)>,
}

impl MapSurface for HeadlessMap {
    fn set_marker_position(&mut self, latitude_deg: f64, longitude_deg: f64) {
        self.marker = Some((latitude_deg, longitude_deg));
    }

    fn set_marker_visibility(&mut self, visible: bool) {
        self.marker_visible = visible;
    }

    fn pan_to(&mut self, latitude_deg: f64, longitude_deg: f64) {
        self.pans.push((latitude_deg, longitude_deg));
    }
}
