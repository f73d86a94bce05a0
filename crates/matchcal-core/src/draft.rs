//! Event drafts: normalized calendar events before submission to a
//! provider.
//!
//! Drafts are pure values derived from fixture records or ticket posts;
//! they are never persisted. Times come in two shapes: fixtures carry an
//! explicit UTC offset, ticket sale windows are wall-clock times that the
//! calendar interprets in the draft's timezone.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Location placeholder when a fixture has no venue.
pub const LOCATION_TBD: &str = "TBD";

/// Fixed length of a match event.
const MATCH_DURATION_HOURS: i64 = 2;

/// An event time, either anchored to an offset or left as wall-clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum DraftTime {
    /// An instant with the offset delivered by the data provider.
    Fixed(DateTime<FixedOffset>),

    /// A wall-clock time, interpreted in the event's timezone by the
    /// calendar backend.
    Local(NaiveDateTime),
}

impl DraftTime {
    /// Wraps an offset-bearing instant.
    pub fn fixed(instant: DateTime<FixedOffset>) -> Self {
        Self::Fixed(instant)
    }

    /// Wraps a wall-clock time.
    pub fn local(instant: NaiveDateTime) -> Self {
        Self::Local(instant)
    }

    /// Returns the time shifted by a duration.
    pub fn plus(&self, duration: Duration) -> Self {
        match self {
            Self::Fixed(instant) => Self::Fixed(*instant + duration),
            Self::Local(instant) => Self::Local(*instant + duration),
        }
    }

    /// Renders the time for provider payloads. Fixed times carry their
    /// offset, wall-clock times do not.
    pub fn to_rfc3339(&self) -> String {
        match self {
            Self::Fixed(instant) => instant.to_rfc3339(),
            Self::Local(instant) => instant.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// How the calendar reminds the user about an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Email,
    Popup,
}

impl ReminderMethod {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Popup => "popup",
        }
    }
}

/// A single reminder, fired `minutes` before the event start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: ReminderMethod,
    pub minutes: u32,
}

impl ReminderOverride {
    /// An email reminder.
    pub fn email(minutes: u32) -> Self {
        Self {
            method: ReminderMethod::Email,
            minutes,
        }
    }

    /// A popup reminder.
    pub fn popup(minutes: u32) -> Self {
        Self {
            method: ReminderMethod::Popup,
            minutes,
        }
    }
}

/// Reminder set attached to a draft, replacing the calendar's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminders {
    pub overrides: Vec<ReminderOverride>,
}

impl Reminders {
    /// Creates a reminder set from explicit overrides.
    pub fn with_overrides(overrides: Vec<ReminderOverride>) -> Self {
        Self { overrides }
    }
}

/// A normalized calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event title.
    pub summary: String,

    /// Start time.
    pub start: DraftTime,

    /// End time.
    pub end: DraftTime,

    /// IANA timezone attached to the event times.
    pub timezone: String,

    /// Venue or meeting place; "TBD" when unknown.
    pub location: String,

    /// Reminder overrides; `None` keeps the calendar's defaults.
    pub reminders: Option<Reminders>,
}

impl EventDraft {
    /// Creates a draft with the default location and no reminder
    /// overrides.
    pub fn new(
        summary: impl Into<String>,
        start: DraftTime,
        end: DraftTime,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            timezone: timezone.into(),
            location: LOCATION_TBD.to_string(),
            reminders: None,
        }
    }

    /// Creates a draft spanning the fixed match duration from kick-off.
    pub fn match_event(
        summary: impl Into<String>,
        kickoff: DateTime<FixedOffset>,
        timezone: impl Into<String>,
    ) -> Self {
        let start = DraftTime::fixed(kickoff);
        let end = start.plus(Duration::hours(MATCH_DURATION_HOURS));
        Self::new(summary, start, end, timezone)
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets reminder overrides.
    pub fn with_reminders(mut self, reminders: Reminders) -> Self {
        self.reminders = Some(reminders);
        self
    }
}
