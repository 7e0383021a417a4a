//! Error taxonomy for loading a route widget.
//!
//! Every variant is terminal for the widget instance that raised it.
//! Numeric oddities inside a track (missing elevation, single-point stages)
//! are repaired in place and never show up here.

/// Failures while turning track markup into a `Series`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Track document contains no segments")]
    NoSegments,

    #[error("Track document contains no track points")]
    NoPoints,

    /// `text` is `None` when the attribute is absent altogether
    #[error("Track point {index} has an invalid {axis} coordinate ({})", describe_text(.text))]
    InvalidCoordinate {
        index: usize,
        axis: CoordinateAxis,
        text: Option<String>,
    },
}

fn describe_text(text: &Option<String>) -> String {
    match text {
        Some(raw) => format!("unparsable value {:?}", raw),
        None => "attribute missing".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateAxis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateAxis::Latitude => f.write_str("latitude"),
            CoordinateAxis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Top-level error for one widget load
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Failed to parse track: {0}")]
    Parse(#[from] ParseError),

    /// `message` already carries the failing status code when there is one
    #[error("Failed to fetch track: {message}")]
    Fetch { status: Option<u16>, message: String },

    #[error("Rendering dependency unavailable: {0}")]
    Dependency(String),
}

impl WidgetError {
    pub fn fetch_status(status: u16, location: &str) -> Self {
        WidgetError::Fetch {
            status: Some(status),
            message: format!("HTTP status {} while fetching {}", status, location),
        }
    }

    pub fn fetch_other(location: &str, cause: impl std::fmt::Display) -> Self {
        WidgetError::Fetch {
            status: None,
            message: format!("{} ({})", location, cause),
        }
    }

    /// Short message for the widget's error region
    pub fn user_message(&self) -> String {
        match self {
            WidgetError::Parse(_) => format!("This route could not be read. {}", self),
            WidgetError::Fetch { .. } => format!("This route could not be loaded. {}", self),
            WidgetError::Dependency(_) => format!("The route map is unavailable. {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_message_embeds_status() {
        let err = WidgetError::fetch_status(404, "https://example.com/route.gpx");
        assert!(err.to_string().contains("404"));
        assert!(err.user_message().contains("404"));
    }

    #[test]
    fn test_invalid_coordinate_messages() {
        let missing = ParseError::InvalidCoordinate {
            index: 3,
            axis: CoordinateAxis::Latitude,
            text: None,
        };
        assert_eq!(
            missing.to_string(),
            "Track point 3 has an invalid latitude coordinate (attribute missing)"
        );

        let malformed = ParseError::InvalidCoordinate {
            index: 0,
            axis: CoordinateAxis::Longitude,
            text: Some("abc".to_string()),
        };
        assert!(malformed.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_parse_error_converts_into_widget_error() {
        let err: WidgetError = ParseError::NoSegments.into();
        assert!(matches!(err, WidgetError::Parse(ParseError::NoSegments)));
        assert!(!err.user_message().is_empty());
    }
}
