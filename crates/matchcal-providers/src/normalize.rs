//! Fixture to event-draft normalization.
//!
//! Pure conversion from provider records to calendar drafts. Rules:
//!
//! - summary is "home vs away, league"
//! - the event spans the fixed match duration from kick-off
//! - a fixture without a parseable kick-off time is skipped
//! - a missing or blank venue becomes "TBD"
//! - a missing or blank provider timezone falls back to the configured one

use chrono::DateTime;

use matchcal_core::EventDraft;

use crate::fixture::Fixture;

/// Normalizes one fixture into an event draft.
///
/// Returns `None` when the fixture has no kick-off time or the time does
/// not parse; unscheduled fixtures are normal in provider data and are
/// skipped without comment.
pub fn normalize(fixture: &Fixture, default_timezone: &str) -> Option<EventDraft> {
    let date = fixture.date.as_deref()?;
    let kickoff = DateTime::parse_from_rfc3339(date).ok()?;

    let summary = format!("{} vs {}, {}", fixture.home, fixture.away, fixture.league);
    let timezone = fixture
        .timezone
        .as_deref()
        .filter(|tz| !tz.trim().is_empty())
        .unwrap_or(default_timezone);

    let mut draft = EventDraft::match_event(summary, kickoff, timezone);
    if let Some(venue) = fixture.venue.as_deref().filter(|v| !v.trim().is_empty()) {
        draft = draft.with_location(venue);
    }
    Some(draft)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use matchcal_core::{DraftTime, LOCATION_TBD};

    use super::*;

    const DEFAULT_TZ: &str = "America/Sao_Paulo";

    fn scheduled() -> Fixture {
        Fixture::new(867946, "Athletico-PR", "Flamengo", "Serie A")
            .with_date("2025-05-21T16:00:00-03:00")
            .with_timezone("America/Sao_Paulo")
            .with_venue("Arena da Baixada")
    }

    #[test]
    fn test_summary_format() {
        let draft = normalize(&scheduled(), DEFAULT_TZ).unwrap();
        assert_eq!(draft.summary, "Athletico-PR vs Flamengo, Serie A");
    }

    #[test]
    fn test_event_spans_two_hours_from_kickoff() {
        let draft = normalize(&scheduled(), DEFAULT_TZ).unwrap();
        assert_eq!(draft.start.to_rfc3339(), "2025-05-21T16:00:00-03:00");
        assert_eq!(draft.end, draft.start.plus(Duration::hours(2)));
    }

    #[test]
    fn test_kickoff_offset_is_preserved() {
        let fixture = Fixture::new(1, "A", "B", "Cup").with_date("2025-08-02T20:30:00+02:00");
        let draft = normalize(&fixture, DEFAULT_TZ).unwrap();
        assert_eq!(draft.start.to_rfc3339(), "2025-08-02T20:30:00+02:00");
        assert!(matches!(draft.start, DraftTime::Fixed(_)));
    }

    #[test]
    fn test_unscheduled_fixture_is_skipped() {
        let fixture = Fixture::new(1, "A", "B", "Cup");
        assert!(normalize(&fixture, DEFAULT_TZ).is_none());
    }

    #[test]
    fn test_unparseable_date_is_skipped() {
        let fixture = Fixture::new(1, "A", "B", "Cup").with_date("next saturday");
        assert!(normalize(&fixture, DEFAULT_TZ).is_none());

        let fixture = Fixture::new(1, "A", "B", "Cup").with_date("2025-13-45T99:00:00Z");
        assert!(normalize(&fixture, DEFAULT_TZ).is_none());
    }

    #[test]
    fn test_missing_venue_defaults_to_tbd() {
        let fixture = Fixture::new(1, "A", "B", "Cup").with_date("2025-05-21T16:00:00-03:00");
        let draft = normalize(&fixture, DEFAULT_TZ).unwrap();
        assert_eq!(draft.location, LOCATION_TBD);
    }

    #[test]
    fn test_blank_venue_defaults_to_tbd() {
        let fixture = Fixture::new(1, "A", "B", "Cup")
            .with_date("2025-05-21T16:00:00-03:00")
            .with_venue("   ");
        let draft = normalize(&fixture, DEFAULT_TZ).unwrap();
        assert_eq!(draft.location, LOCATION_TBD);
    }

    #[test]
    fn test_missing_timezone_falls_back_to_default() {
        let fixture = Fixture::new(1, "A", "B", "Cup").with_date("2025-05-21T16:00:00-03:00");
        let draft = normalize(&fixture, DEFAULT_TZ).unwrap();
        assert_eq!(draft.timezone, DEFAULT_TZ);
    }

    #[test]
    fn test_provider_timezone_wins_when_present() {
        let fixture = Fixture::new(1, "A", "B", "Cup")
            .with_date("2025-05-21T16:00:00+00:00")
            .with_timezone("UTC");
        let draft = normalize(&fixture, DEFAULT_TZ).unwrap();
        assert_eq!(draft.timezone, "UTC");
    }

    #[test]
    fn test_no_reminder_overrides_on_match_events() {
        let draft = normalize(&scheduled(), DEFAULT_TZ).unwrap();
        assert!(draft.reminders.is_none());
    }
}
