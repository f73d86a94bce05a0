//! Ticket sale reminder events from club news posts.
//!
//! One pass scans the recent news listing for a post whose title mentions
//! the ticket keyword, pulls the sale window out of the post body and
//! creates a reminder event for it. Handled posts are recorded by URL so a
//! post produces at most one event across runs.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::{info, warn};

use matchcal_core::storage::{self, StorageResult};
use matchcal_core::{extract_sale_start, DraftTime, EventDraft, ReminderOverride, Reminders};
use matchcal_providers::{CalendarService, NewsFeed};

use crate::error::SyncResult;
use crate::state::StatePaths;

/// Length of a ticket sale event. Sales typically stay open for a couple
/// of days, and a long block keeps the event visible on the calendar.
const TICKET_EVENT_HOURS: i64 = 48;

/// Posts already turned into events, keyed by URL.
///
/// Values record when the event was created, for inspection only.
#[derive(Debug)]
pub struct SeenPosts {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl SeenPosts {
    /// Loads the seen-posts state; empty when no file exists.
    pub fn load(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = storage::read_json(&path)?.unwrap_or_default();
        Ok(Self { path, entries })
    }

    /// True when the post was already handled.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Records a handled post and persists the state.
    pub fn record(&mut self, url: impl Into<String>, at: DateTime<Utc>) -> StorageResult<()> {
        self.entries.insert(url.into(), at.to_rfc3339());
        storage::write_json_pretty(&self.path, &self.entries)
    }

    /// Number of handled posts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no post was handled yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Settings for the ticket watcher.
#[derive(Debug, Clone)]
pub struct TicketsConfig {
    /// Case-insensitive keyword that marks a ticket post title.
    pub keyword: String,

    /// Calendar that receives the reminder events.
    pub calendar_id: String,

    /// Ticket shop URL, used as the event location.
    pub shop_url: String,

    /// Title prefix stripped from the post title, e.g. a club tag.
    pub title_prefix: Option<String>,

    /// IANA timezone the sale times are quoted in.
    pub timezone: String,
}

/// What one watcher pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// A reminder event was created for the post.
    Created { url: String, summary: String },
    /// No recent post title mentioned the keyword.
    NoMatchingPost,
    /// The newest matching post was already handled.
    AlreadySeen { url: String },
    /// The post body had no recognizable sale window.
    NoSaleWindow { url: String },
}

/// Watches club news for ticket sale announcements.
pub struct TicketWatcher {
    feed: Arc<dyn NewsFeed>,
    calendar: Arc<dyn CalendarService>,
    config: TicketsConfig,
}

impl TicketWatcher {
    /// Creates a watcher.
    pub fn new(
        feed: Arc<dyn NewsFeed>,
        calendar: Arc<dyn CalendarService>,
        config: TicketsConfig,
    ) -> Self {
        Self {
            feed,
            calendar,
            config,
        }
    }

    /// Runs one watcher pass over the newest matching post.
    ///
    /// Sale windows never spell out the year, so the caller supplies the
    /// one to assume. A post is recorded as seen only after its event was
    /// created; earlier exits leave it unrecorded so a later run can pick
    /// it up again once the page or body changed.
    pub async fn run(&self, paths: &StatePaths, year: i32) -> SyncResult<TicketOutcome> {
        let posts = self.feed.recent_posts().await?;
        let keyword = self.config.keyword.to_lowercase();
        let Some(post) = posts
            .iter()
            .find(|post| post.title.to_lowercase().contains(&keyword))
        else {
            info!(keyword = %self.config.keyword, "no ticket post in recent news");
            return Ok(TicketOutcome::NoMatchingPost);
        };

        let mut seen = SeenPosts::load(paths.seen_posts_file())?;
        if seen.contains(&post.url) {
            info!(url = %post.url, "ticket post already handled");
            return Ok(TicketOutcome::AlreadySeen {
                url: post.url.clone(),
            });
        }

        let body = self.feed.post_body(&post.url).await?;
        let Some(sale_start) = extract_sale_start(&body, year) else {
            warn!(url = %post.url, "no sale window found in ticket post");
            return Ok(TicketOutcome::NoSaleWindow {
                url: post.url.clone(),
            });
        };

        let draft = self.build_draft(&post.title, sale_start);
        let provider_id = self
            .calendar
            .create_event(&self.config.calendar_id, &draft)
            .await?;
        seen.record(post.url.as_str(), Utc::now())?;
        info!(
            url = %post.url,
            provider_id = %provider_id,
            start = %draft.start.to_rfc3339(),
            "created ticket sale event"
        );

        Ok(TicketOutcome::Created {
            url: post.url.clone(),
            summary: draft.summary,
        })
    }

    /// Builds the reminder event for a sale starting at the given
    /// wall-clock time.
    fn build_draft(&self, title: &str, sale_start: NaiveDateTime) -> EventDraft {
        let summary = match &self.config.title_prefix {
            Some(prefix) => title.strip_prefix(prefix.as_str()).unwrap_or(title),
            None => title,
        };

        let start = DraftTime::local(sale_start);
        let end = start.plus(Duration::hours(TICKET_EVENT_HOURS));

        EventDraft::new(summary.trim(), start, end, &self.config.timezone)
            .with_location(&self.config.shop_url)
            .with_reminders(Reminders::with_overrides(vec![
                ReminderOverride::email(24 * 60),
                ReminderOverride::email(12 * 60),
                ReminderOverride::popup(12 * 60),
                ReminderOverride::popup(3 * 60),
            ]))
    }
}
