//! Display units for the profile chart

use serde::{Deserialize, Serialize};

const MILES_PER_KM: f64 = 0.621371;
const FEET_PER_METER: f64 = 3.28084;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnits {
    /// Miles and feet
    #[default]
    Imperial,
    /// Kilometers and meters
    Metric,
}

impl DisplayUnits {
    /// Multiplier from kilometers into the display distance unit
    pub fn distance_factor(self) -> f64 {
        match self {
            DisplayUnits::Imperial => MILES_PER_KM,
            DisplayUnits::Metric => 1.0,
        }
    }

    /// Multiplier from meters into the display elevation unit
    pub fn elevation_factor(self) -> f64 {
        match self {
            DisplayUnits::Imperial => FEET_PER_METER,
            DisplayUnits::Metric => 1.0,
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            DisplayUnits::Imperial => "mi",
            DisplayUnits::Metric => "km",
        }
    }

    pub fn elevation_label(self) -> &'static str {
        match self {
            DisplayUnits::Imperial => "ft",
            DisplayUnits::Metric => "m",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_is_identity() {
        assert_eq!(DisplayUnits::Metric.distance_factor(), 1.0);
        assert_eq!(DisplayUnits::Metric.elevation_factor(), 1.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DisplayUnits::Imperial.distance_label(), "mi");
        assert_eq!(DisplayUnits::Imperial.elevation_label(), "ft");
        assert_eq!(DisplayUnits::Metric.distance_label(), "km");
    }
}
