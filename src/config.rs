//! Widget configuration schema and loader
//!
//! Configuration is stored as YAML.
//! Default location: <config dir>/gpx-route-profile/widget.yaml

use crate::units::DisplayUnits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the parser treats a track point whose latitude or longitude is
/// missing or not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePolicy {
    /// Fail the load with `ParseError::InvalidCoordinate`
    #[default]
    Reject,
    /// Keep the point with a NaN coordinate; distances after it become NaN
    Propagate,
}

/// Root widget configuration, fixed for the lifetime of a widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Display units for distance and elevation
    pub units: DisplayUnits,

    /// Handling of unparsable coordinates
    pub coordinates: CoordinatePolicy,

    /// Abort the track fetch after this many seconds
    pub fetch_timeout_secs: u64,

    /// Dataset index of the elevation line on the chart
    pub primary_series_index: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            units: DisplayUnits::Imperial,
            coordinates: CoordinatePolicy::Reject,
            fetch_timeout_secs: 30,
            primary_series_index: 0,
        }
    }
}

/// Get the default widget config file path
pub fn default_widget_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gpx-route-profile")
        .join("widget.yaml")
}

/// Read the widget settings, falling back to defaults
///
/// Absent, unreadable and malformed files all give `WidgetConfig::default()`;
/// only the last two are worth a warning.
pub fn load_widget_config(path: &Path) -> WidgetConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No widget settings at {}, using defaults", path.display());
            return WidgetConfig::default();
        }
        Err(e) => {
            log::warn!("Ignoring widget settings {}: {}", path.display(), e);
            return WidgetConfig::default();
        }
    };

    match serde_yaml::from_str::<WidgetConfig>(&contents) {
        Ok(config) => {
            log::info!(
                "Widget settings from {}: {:?} units, {:?} coordinates, {}s fetch timeout",
                path.display(),
                config.units,
                config.coordinates,
                config.fetch_timeout_secs
            );
            config
        }
        Err(e) => {
            log::warn!("Widget settings {} are not valid YAML ({}), using defaults", path.display(), e);
            WidgetConfig::default()
        }
    }
}

/// Write the widget settings as YAML, creating the directory on the way
pub fn save_widget_config(config: &WidgetConfig, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let yaml = serde_yaml::to_string(config).context("encoding widget settings")?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;

    log::info!("Saved widget settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.units, DisplayUnits::Imperial);
        assert_eq!(config.coordinates, CoordinatePolicy::Reject);
        assert_eq!(config.primary_series_index, 0);
    }

    #[test]
    fn test_yaml_parsing_partial() {
        let yaml = r#"
units: metric
coordinates: propagate
"#;
        let config: WidgetConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.units, DisplayUnits::Metric);
        assert_eq!(config.coordinates, CoordinatePolicy::Propagate);
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_widget_config(&dir.path().join("nope.yaml"));
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.yaml");
        std::fs::write(&path, "units: [not, a, unit").unwrap();
        assert_eq!(load_widget_config(&path), WidgetConfig::default());
    }

    #[test]
    fn test_unreadable_path_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_widget_config(dir.path()), WidgetConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("widget.yaml");
        let config = WidgetConfig {
            units: DisplayUnits::Metric,
            coordinates: CoordinatePolicy::Propagate,
            fetch_timeout_secs: 5,
            primary_series_index: 1,
        };
        save_widget_config(&config, &path).unwrap();
        assert_eq!(load_widget_config(&path), config);
    }
}
