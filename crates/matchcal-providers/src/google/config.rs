//! Google Calendar binding configuration.

use std::time::Duration;

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Default HTTP timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the Google Calendar service.
#[derive(Debug, Clone)]
pub struct GoogleCalendarConfig {
    /// Opaque bearer token sent with every request.
    pub token: String,

    /// API base URL. Overridable for tests and proxies.
    pub base_url: String,

    /// HTTP timeout.
    pub timeout: Duration,
}

impl GoogleCalendarConfig {
    /// Creates a config with the given token and default endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: CALENDAR_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
