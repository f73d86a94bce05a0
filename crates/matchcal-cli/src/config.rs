//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/matchcal/config.toml` by default:
//!
//! ```toml
//! [football]
//! api_key = "env::RAPIDAPI_KEY"
//!
//! [calendar]
//! token = "file::/home/me/.local/share/matchcal/token"
//!
//! [calendar.subjects]
//! 131 = "athletico@group.calendar.google.com"
//!
//! [tickets]
//! feed_url = "https://yourclub.example.com/noticias"
//! calendar_id = "tickets@group.calendar.google.com"
//! ```
//!
//! Credential values (`api_key`, `token`) support secret references:
//! - `pass::path/in/store` — resolved via `pass show`
//! - `env::VAR_NAME` — resolved from the environment
//! - `file::/path` — first line of the file
//! - plain text — used as-is

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use matchcal_core::{Subject, SubjectId, DEFAULT_FRESHNESS_DAYS};
use matchcal_providers::football::ApiFootballConfig;
use matchcal_providers::google::GoogleCalendarConfig;
use matchcal_providers::news::NewsFeedConfig;
use matchcal_sync::{StatePaths, TicketsConfig};

/// Timezone assumed when the fixture data has none.
const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Keyword that marks a ticket post title.
const DEFAULT_TICKET_KEYWORD: &str = "ingresso";

/// Ticket shop, used as the reminder event's location.
const DEFAULT_SHOP_URL: &str = "sociogigante.com/ingressos";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Config (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the matchcal CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixture API settings.
    pub football: FootballSettings,

    /// Calendar settings, including the subject-to-calendar table.
    pub calendar: CalendarSettings,

    /// Local state settings.
    pub storage: StorageSettings,

    /// Ticket watcher settings; absent disables the `tickets` command.
    pub tickets: Option<TicketsSettings>,
}

/// Fixture API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FootballSettings {
    /// API key (supports `pass::`, `env::` and `file::` prefixes).
    pub api_key: Option<String>,

    /// Base URL override, mainly for tests.
    pub base_url: Option<String>,

    /// API host header override.
    pub host: Option<String>,

    /// How many upcoming fixtures to request per subject.
    pub next_window: Option<u32>,

    /// HTTP timeout in seconds.
    pub timeout: u64,
}

impl Default for FootballSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            host: None,
            next_window: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Calendar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// API token (supports `pass::`, `env::` and `file::` prefixes).
    pub token: Option<String>,

    /// IANA timezone used when a fixture has none.
    pub timezone: String,

    /// HTTP timeout in seconds.
    pub timeout: u64,

    /// Team id to calendar id, one entry per tracked team.
    pub subjects: BTreeMap<String, String>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            token: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            subjects: BTreeMap::new(),
        }
    }
}

/// Local state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for fixture caches and identity maps.
    pub data_dir: Option<PathBuf>,

    /// Fixture cache freshness window in days.
    pub freshness_days: f64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            freshness_days: DEFAULT_FRESHNESS_DAYS,
        }
    }
}

/// Ticket watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsSettings {
    /// News listing page to scan.
    pub feed_url: Option<String>,

    /// URL path marker of post links; default matches `/noticias/`.
    pub post_path_marker: Option<String>,

    /// Case-insensitive keyword that marks a ticket post title.
    pub keyword: String,

    /// Calendar that receives the reminder events.
    pub calendar_id: Option<String>,

    /// Ticket shop URL, used as the event location.
    pub shop_url: String,

    /// Title prefix stripped from post titles, e.g. a club tag.
    pub title_prefix: Option<String>,
}

impl Default for TicketsSettings {
    fn default() -> Self {
        Self {
            feed_url: None,
            post_path_marker: None,
            keyword: DEFAULT_TICKET_KEYWORD.to_string(),
            calendar_id: None,
            shop_url: DEFAULT_SHOP_URL.to_string(),
            title_prefix: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults; an unreadable or unparsable
    /// one is an error.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matchcal")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matchcal")
    }

    /// The tracked subjects, sorted by team id.
    pub fn subjects(&self) -> Result<Vec<Subject>, String> {
        let mut subjects = Vec::with_capacity(self.calendar.subjects.len());
        for (id, calendar_id) in &self.calendar.subjects {
            let id: SubjectId = id.parse().map_err(|e| {
                format!("invalid subject id `{}` in [calendar.subjects]: {}", id, e)
            })?;
            subjects.push(Subject::new(id, calendar_id.clone()));
        }
        subjects.sort_by_key(|s| s.id);
        Ok(subjects)
    }

    /// State file layout under the configured data directory.
    pub fn state_paths(&self) -> StatePaths {
        let data_dir = self
            .storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir);
        StatePaths::new(data_dir)
    }

    /// The fixture cache freshness window.
    pub fn freshness_window(&self) -> Duration {
        matchcal_core::freshness_window(self.storage.freshness_days)
    }

    /// Builds the fixture API configuration, resolving the key.
    pub fn football_config(&self) -> Result<ApiFootballConfig, String> {
        let raw_key = self.football.api_key.as_deref().ok_or_else(|| {
            format!(
                "fixture API key not found. Add to {}:\n  \
                 [football]\n  \
                 api_key = \"env::RAPIDAPI_KEY\"",
                Self::default_path().display()
            )
        })?;
        let api_key = crate::secret::resolve(raw_key)
            .map_err(|e| format!("failed to resolve football api_key: {}", e))?;

        let mut config = ApiFootballConfig::new(api_key)
            .with_timeout(Duration::from_secs(self.football.timeout));
        if let Some(ref base_url) = self.football.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(ref host) = self.football.host {
            config = config.with_host(host);
        }
        if let Some(next_window) = self.football.next_window {
            config = config.with_next_window(next_window);
        }
        Ok(config)
    }

    /// Builds the calendar configuration, resolving the token.
    pub fn calendar_config(&self) -> Result<GoogleCalendarConfig, String> {
        let raw_token = self.calendar.token.as_deref().ok_or_else(|| {
            format!(
                "calendar token not found. Add to {}:\n  \
                 [calendar]\n  \
                 token = \"file::/path/to/token\"",
                Self::default_path().display()
            )
        })?;
        let token = crate::secret::resolve(raw_token)
            .map_err(|e| format!("failed to resolve calendar token: {}", e))?;

        Ok(GoogleCalendarConfig::new(token)
            .with_timeout(Duration::from_secs(self.calendar.timeout)))
    }

    /// Builds the ticket watcher configuration.
    ///
    /// Errors when the `[tickets]` section is absent or lacks the feed
    /// URL or target calendar.
    pub fn tickets_config(&self) -> Result<(NewsFeedConfig, TicketsConfig), String> {
        let tickets = self.tickets.as_ref().ok_or_else(|| {
            format!(
                "ticket watching is not configured. Add to {}:\n  \
                 [tickets]\n  \
                 feed_url = \"https://yourclub.example.com/noticias\"\n  \
                 calendar_id = \"tickets@group.calendar.google.com\"",
                Self::default_path().display()
            )
        })?;
        let feed_url = tickets.feed_url.as_deref().ok_or_else(|| {
            "feed_url is missing from [tickets] section in config.toml".to_string()
        })?;
        let calendar_id = tickets.calendar_id.as_deref().ok_or_else(|| {
            "calendar_id is missing from [tickets] section in config.toml".to_string()
        })?;

        let mut feed = NewsFeedConfig::new(feed_url);
        if let Some(ref marker) = tickets.post_path_marker {
            feed = feed.with_post_path_marker(marker);
        }

        let config = TicketsConfig {
            keyword: tickets.keyword.clone(),
            calendar_id: calendar_id.to_string(),
            shop_url: tickets.shop_url.clone(),
            title_prefix: tickets.title_prefix.clone(),
            timezone: self.calendar.timezone.clone(),
        };
        Ok((feed, config))
    }
}
