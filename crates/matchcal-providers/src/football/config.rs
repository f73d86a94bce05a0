//! api-football binding configuration.

use std::time::Duration;

/// Base URL for api-football v3 on RapidAPI.
const API_FOOTBALL_BASE: &str = "https://api-football-v1.p.rapidapi.com/v3";

/// Host header value expected by RapidAPI.
const API_FOOTBALL_HOST: &str = "api-football-v1.p.rapidapi.com";

/// How many upcoming fixtures to request per subject.
const DEFAULT_NEXT_WINDOW: u32 = 99;

/// Default HTTP timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the api-football fixture source.
#[derive(Debug, Clone)]
pub struct ApiFootballConfig {
    /// RapidAPI key sent in the `x-rapidapi-key` header.
    pub api_key: String,

    /// API base URL. Overridable for tests and proxies.
    pub base_url: String,

    /// Value of the `x-rapidapi-host` header.
    pub host: String,

    /// How many upcoming fixtures to request per subject.
    pub next_window: u32,

    /// HTTP timeout.
    pub timeout: Duration,
}

impl ApiFootballConfig {
    /// Creates a config with the given API key and default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_FOOTBALL_BASE.to_string(),
            host: API_FOOTBALL_HOST.to_string(),
            next_window: DEFAULT_NEXT_WINDOW,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the host header value.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the upcoming-fixtures window.
    #[must_use]
    pub fn with_next_window(mut self, next_window: u32) -> Self {
        self.next_window = next_window;
        self
    }

    /// Overrides the HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
