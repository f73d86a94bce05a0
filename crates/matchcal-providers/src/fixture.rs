//! Raw fixture records from the match-data provider.
//!
//! A [`Fixture`] keeps provider values as delivered; interpretation of
//! timestamps and fallbacks for missing fields happens in
//! [`normalize`](crate::normalize). Fixture records are also what the
//! per-subject cache files persist between runs.

use serde::{Deserialize, Serialize};

/// A scheduled match as delivered by the fixture data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Stable provider-side fixture id.
    pub id: i64,

    /// Kick-off as an RFC3339 string; `None` when the match has no
    /// scheduled time yet.
    pub date: Option<String>,

    /// IANA timezone the provider attached to the kick-off time.
    pub timezone: Option<String>,

    /// Home team name.
    pub home: String,

    /// Away team name.
    pub away: String,

    /// Competition name.
    pub league: String,

    /// Venue name, when known.
    pub venue: Option<String>,
}

impl Fixture {
    /// Creates a fixture with the required fields.
    pub fn new(
        id: i64,
        home: impl Into<String>,
        away: impl Into<String>,
        league: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date: None,
            timezone: None,
            home: home.into(),
            away: away.into(),
            league: league.into(),
            venue: None,
        }
    }

    /// Sets the kick-off time.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the provider timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// The identity-map key for this fixture.
    pub fn external_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fixture {
        Fixture::new(867946, "Athletico-PR", "Flamengo", "Serie A")
            .with_date("2025-05-21T16:00:00-03:00")
            .with_timezone("America/Sao_Paulo")
            .with_venue("Arena da Baixada")
    }

    #[test]
    fn test_builder() {
        let fixture = sample();
        assert_eq!(fixture.id, 867946);
        assert_eq!(fixture.home, "Athletico-PR");
        assert_eq!(fixture.away, "Flamengo");
        assert_eq!(fixture.league, "Serie A");
        assert_eq!(fixture.date.as_deref(), Some("2025-05-21T16:00:00-03:00"));
        assert_eq!(fixture.venue.as_deref(), Some("Arena da Baixada"));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let fixture = Fixture::new(1, "A", "B", "Cup");
        assert!(fixture.date.is_none());
        assert!(fixture.timezone.is_none());
        assert!(fixture.venue.is_none());
    }

    #[test]
    fn test_external_id_is_the_provider_id() {
        assert_eq!(sample().external_id(), "867946");
    }

    #[test]
    fn test_cache_serialization_round_trip() {
        let fixtures = vec![sample(), Fixture::new(1, "A", "B", "Cup")];
        let json = serde_json::to_string_pretty(&fixtures).unwrap();
        let back: Vec<Fixture> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fixtures);
    }
}
