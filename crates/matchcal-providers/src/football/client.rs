//! api-football HTTP client.
//!
//! Fetches upcoming fixtures for one team and maps the wire format down
//! to [`Fixture`] records.

use serde::Deserialize;
use tracing::debug;

use matchcal_core::SubjectId;

use crate::error::{ProviderError, ProviderResult};
use crate::fixture::Fixture;
use crate::traits::{BoxFuture, FixtureSource};

use super::config::ApiFootballConfig;

/// api-football fixture source.
#[derive(Debug)]
pub struct ApiFootballSource {
    http_client: reqwest::Client,
    config: ApiFootballConfig,
}

impl ApiFootballSource {
    /// Creates a new fixture source from its configuration.
    pub fn new(config: ApiFootballConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            config,
        }
    }

    /// Fetches the next fixtures for one team.
    async fn fetch(&self, subject: SubjectId) -> ProviderResult<Vec<Fixture>> {
        let url = format!("{}/fixtures", self.config.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.host)
            .query(&[
                ("team", subject.value().to_string()),
                ("next", self.config.next_window.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::rate_limited("fixture API quota exhausted"));
        }

        // RapidAPI signals a bad or suspended key with either status.
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::authentication("API key rejected"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let parsed: FixturesResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })?;

        let fixtures: Vec<Fixture> = parsed.response.into_iter().map(convert_item).collect();
        debug!(subject = %subject, count = fixtures.len(), "fetched fixtures");
        Ok(fixtures)
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::network("request timeout")
    } else if e.is_connect() {
        ProviderError::network(format!("connection failed: {}", e))
    } else {
        ProviderError::network(format!("request failed: {}", e))
    }
}

impl FixtureSource for ApiFootballSource {
    fn name(&self) -> &str {
        "api-football"
    }

    fn fetch_fixtures(&self, subject: SubjectId) -> BoxFuture<'_, ProviderResult<Vec<Fixture>>> {
        Box::pin(async move {
            self.fetch(subject)
                .await
                .map_err(|e| e.with_provider("api-football"))
        })
    }
}

/// Converts one wire item to a fixture record.
fn convert_item(item: WireItem) -> Fixture {
    let mut fixture = Fixture::new(
        item.fixture.id,
        item.teams.home.name,
        item.teams.away.name,
        item.league.name,
    );
    if let Some(date) = item.fixture.date {
        fixture = fixture.with_date(date);
    }
    if let Some(timezone) = item.fixture.timezone {
        fixture = fixture.with_timezone(timezone);
    }
    if let Some(venue) = item.fixture.venue.and_then(|v| v.name) {
        fixture = fixture.with_venue(venue);
    }
    fixture
}

/// Response from the fixtures endpoint.
#[derive(Debug, Deserialize)]
struct FixturesResponse {
    #[serde(default)]
    response: Vec<WireItem>,
}

/// One entry in the response array.
#[derive(Debug, Deserialize)]
struct WireItem {
    fixture: WireFixture,
    league: WireLeague,
    teams: WireTeams,
}

#[derive(Debug, Deserialize)]
struct WireFixture {
    id: i64,
    date: Option<String>,
    timezone: Option<String>,
    venue: Option<WireVenue>,
}

#[derive(Debug, Deserialize)]
struct WireVenue {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLeague {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireTeams {
    home: WireTeam,
    away: WireTeam,
}

#[derive(Debug, Deserialize)]
struct WireTeam {
    name: String,
}
