//! Elevation repair and unit conversion for the profile series

use crate::units::DisplayUnits;

/// Convert raw meter readings into the display unit, one output per input.
///
/// A non-finite first reading becomes 0. A non-finite later reading reuses
/// the previous reading in meters before conversion, so a gap never gets
/// converted twice.
pub fn normalize_elevations(raw_meters: &[f64], units: DisplayUnits) -> Vec<f64> {
    let factor = units.elevation_factor();
    let mut output = Vec::with_capacity(raw_meters.len());
    let mut carried_meters = 0.0;

    for (i, &reading) in raw_meters.iter().enumerate() {
        let meters = if reading.is_finite() {
            reading
        } else if i == 0 {
            0.0
        } else {
            carried_meters
        };
        carried_meters = meters;
        output.push(meters * factor);
    }

    output
}

/// Count readings that had to be repaired
pub fn count_missing(raw_meters: &[f64]) -> usize {
    raw_meters.iter().filter(|e| !e.is_finite()).count()
}
