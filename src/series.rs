//! The immutable profile series computed once per track load

use geo::{point, BoundingRect, LineString, Point, Rect};

use crate::distance::cumulative_distances;
use crate::elevation::normalize_elevations;
use crate::error::ParseError;
use crate::units::DisplayUnits;

/// One parsed GPS fix. Elevation is NaN when the reading was missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
}

impl TrackPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        TrackPoint {
            latitude_deg,
            longitude_deg,
            elevation_m,
        }
    }

    pub fn point(&self) -> Point<f64> {
        point!(x: self.longitude_deg, y: self.latitude_deg)
    }
}

/// Distance and elevation aligned index-for-index with the track points
#[derive(Debug, Clone)]
pub struct Series {
    points: Vec<TrackPoint>,
    cumulative_distance: Vec<f64>,
    elevation: Vec<f64>,
    units: DisplayUnits,
}

impl Series {
    /// Build the series; an empty point list is a parse failure
    pub fn build(points: Vec<TrackPoint>, units: DisplayUnits) -> Result<Self, ParseError> {
        if points.is_empty() {
            return Err(ParseError::NoPoints);
        }

        let cumulative_distance = cumulative_distances(&points, units);
        let raw: Vec<f64> = points.iter().map(|p| p.elevation_m).collect();
        let elevation = normalize_elevations(&raw, units);

        debug_assert_eq!(cumulative_distance.len(), points.len());
        debug_assert_eq!(elevation.len(), points.len());

        Ok(Series {
            points,
            cumulative_distance,
            elevation,
            units,
        })
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn cumulative_distance(&self) -> &[f64] {
        &self.cumulative_distance
    }

    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    pub fn units(&self) -> DisplayUnits {
        self.units
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a built series
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_distance(&self) -> f64 {
        self.cumulative_distance[self.cumulative_distance.len() - 1]
    }

    /// (distance, elevation) pairs in the order the chart plots them
    pub fn chart_data(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.cumulative_distance
            .iter()
            .copied()
            .zip(self.elevation.iter().copied())
    }

    /// Geographic extent for fitting the map view
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let line: LineString<f64> = self.points.iter().map(|p| p.point()).collect();
        line.bounding_rect()
    }
}
