//! Where raw track documents come from

use std::path::Path;
use std::time::Duration;

use crate::error::WidgetError;

/// Fetch-by-location returning the raw track text
pub trait TrackSource {
    fn fetch(&self, location: &str) -> Result<String, WidgetError>;
}

/// HTTP(S) source; the timeout doubles as the abort for a stuck request
pub struct HttpTrackSource {
    agent: ureq::Agent,
}

impl HttpTrackSource {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpTrackSource { agent }
    }
}

impl TrackSource for HttpTrackSource {
    fn fetch(&self, location: &str) -> Result<String, WidgetError> {
        log::info!("Fetching track from {}", location);

        let response = match self.agent.get(location).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(WidgetError::fetch_status(code, location));
            }
            Err(e) => {
                return Err(WidgetError::fetch_other(location, e));
            }
        };

        response
            .into_string()
            .map_err(|e| WidgetError::fetch_other(location, e))
    }
}

/// Local files, for the CLI and for tests
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTrackSource;

impl TrackSource for FileTrackSource {
    fn fetch(&self, location: &str) -> Result<String, WidgetError> {
        log::info!("Reading track from {}", location);
        std::fs::read_to_string(Path::new(location)).map_err(|e| WidgetError::fetch_other(location, e))
    }
}

/// Pick the HTTP source for URLs and the file source otherwise
pub fn source_for(location: &str, timeout: Duration) -> Box<dyn TrackSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpTrackSource::new(timeout))
    } else {
        Box::new(FileTrackSource)
    }
}
