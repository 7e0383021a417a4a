//! Great-circle distance accumulation along a track

use crate::series::TrackPoint;
use crate::units::DisplayUnits;

/// Earth radius used for every profile distance
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Half-angle haversine distance between two points, in kilometers
pub fn haversine_km(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let lat1 = a.latitude_deg.to_radians();
    let lat2 = b.latitude_deg.to_radians();
    let d_lat = (b.latitude_deg - a.latitude_deg).to_radians();
    let d_lon = (b.longitude_deg - a.longitude_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Running distance from the first point, in the display distance unit.
/// Starts at 0 and never decreases for finite coordinates.
pub fn cumulative_distances(points: &[TrackPoint], units: DisplayUnits) -> Vec<f64> {
    let factor = units.distance_factor();
    let mut distances = Vec::with_capacity(points.len());

    if points.is_empty() {
        return distances;
    }

    distances.push(0.0);
    for i in 1..points.len() {
        let step = haversine_km(&points[i - 1], &points[i]) * factor;
        distances.push(distances[i - 1] + step);
    }

    distances
}
