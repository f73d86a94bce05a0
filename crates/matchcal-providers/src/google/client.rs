//! Google Calendar API client.
//!
//! Low-level HTTP client for the event verbs the sync engine needs:
//! insert, update, list and delete.

use serde::{Deserialize, Serialize};
use tracing::debug;

use matchcal_core::EventDraft;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{BoxFuture, CalendarService};

use super::config::GoogleCalendarConfig;

/// Page size for event listing.
const LIST_PAGE_SIZE: usize = 2500;

/// Google Calendar service.
#[derive(Debug)]
pub struct GoogleCalendarService {
    http_client: reqwest::Client,
    config: GoogleCalendarConfig,
}

impl GoogleCalendarService {
    /// Creates a new Google Calendar service from its configuration.
    pub fn new(config: GoogleCalendarConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            config,
        }
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.config.base_url,
            urlencoding::encode(calendar_id)
        )
    }

    fn event_url(&self, calendar_id: &str, event_id: &str) -> String {
        format!(
            "{}/{}",
            self.events_url(calendar_id),
            urlencoding::encode(event_id)
        )
    }

    /// Inserts a new event and returns its id.
    async fn insert(&self, calendar_id: &str, draft: &EventDraft) -> ProviderResult<String> {
        let response = self
            .http_client
            .post(self.events_url(calendar_id))
            .bearer_auth(&self.config.token)
            .json(&ApiEventBody::from_draft(draft))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;
        let created: ApiEventRef = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })?;

        debug!(
            calendar_id,
            event_id = %created.id,
            "inserted calendar event"
        );
        Ok(created.id)
    }

    /// Replaces an existing event's content.
    async fn update(
        &self,
        calendar_id: &str,
        event_id: &str,
        draft: &EventDraft,
    ) -> ProviderResult<()> {
        let response = self
            .http_client
            .put(self.event_url(calendar_id, event_id))
            .bearer_auth(&self.config.token)
            .json(&ApiEventBody::from_draft(draft))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for_status(response).await);
        }

        debug!(calendar_id, event_id, "updated calendar event");
        Ok(())
    }

    /// Lists the ids of every event in the calendar, following pagination.
    async fn list_ids(&self, calendar_id: &str) -> ProviderResult<Vec<String>> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http_client
                .get(self.events_url(calendar_id))
                .bearer_auth(&self.config.token)
                .query(&[("maxResults", LIST_PAGE_SIZE.to_string())]);

            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.clone())]);
            }

            let response = request.send().await.map_err(transport_error)?;
            let status = response.status();
            if !status.is_success() {
                return Err(Self::error_for_status(response).await);
            }

            let body = response
                .text()
                .await
                .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;
            let page: ApiEventList = serde_json::from_str(&body).map_err(|e| {
                ProviderError::invalid_response(format!("failed to parse response: {}", e))
            })?;

            ids.extend(page.items.into_iter().map(|item| item.id));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(calendar_id, count = ids.len(), "listed calendar events");
        Ok(ids)
    }

    /// Deletes an event.
    async fn delete(&self, calendar_id: &str, event_id: &str) -> ProviderResult<()> {
        let response = self
            .http_client
            .delete(self.event_url(calendar_id, event_id))
            .bearer_auth(&self.config.token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for_status(response).await);
        }

        debug!(calendar_id, event_id, "deleted calendar event");
        Ok(())
    }

    /// Maps an error response to a ProviderError, consuming the body for
    /// the message.
    async fn error_for_status(response: reqwest::Response) -> ProviderError {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return ProviderError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            ));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ProviderError::authentication("calendar token expired or invalid");
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return ProviderError::authorization("access denied to calendar");
        }

        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return ProviderError::not_found("calendar or event not found");
        }

        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return ProviderError::bad_request(format!("rejected request: {}", body));
        }

        let body = response.text().await.unwrap_or_default();
        ProviderError::server(format!("API error ({}): {}", status, body))
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

impl CalendarService for GoogleCalendarService {
    fn name(&self) -> &str {
        "google"
    }

    fn create_event(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> BoxFuture<'_, ProviderResult<String>> {
        let calendar_id = calendar_id.to_string();
        let draft = draft.clone();
        Box::pin(async move {
            self.insert(&calendar_id, &draft)
                .await
                .map_err(|e| e.with_provider("google"))
        })
    }

    fn update_event(
        &self,
        calendar_id: &str,
        provider_id: &str,
        draft: &EventDraft,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let calendar_id = calendar_id.to_string();
        let provider_id = provider_id.to_string();
        let draft = draft.clone();
        Box::pin(async move {
            self.update(&calendar_id, &provider_id, &draft)
                .await
                .map_err(|e| e.with_provider("google"))
        })
    }

    fn list_events(&self, calendar_id: &str) -> BoxFuture<'_, ProviderResult<Vec<String>>> {
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            self.list_ids(&calendar_id)
                .await
                .map_err(|e| e.with_provider("google"))
        })
    }

    fn delete_event(
        &self,
        calendar_id: &str,
        provider_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let calendar_id = calendar_id.to_string();
        let provider_id = provider_id.to_string();
        Box::pin(async move {
            self.delete(&calendar_id, &provider_id)
                .await
                .map_err(|e| e.with_provider("google"))
        })
    }
}

/// Event payload for insert and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventBody {
    summary: String,
    location: String,
    start: ApiEventTime,
    end: ApiEventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminders: Option<ApiReminders>,
}

/// Event time for the API; wall-clock times rely on `timeZone`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date_time: String,
    time_zone: String,
}

/// Reminder overrides for the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiReminders {
    use_default: bool,
    overrides: Vec<ApiReminderOverride>,
}

/// A single reminder override for the API.
#[derive(Debug, Serialize)]
struct ApiReminderOverride {
    method: String,
    minutes: u32,
}

/// The subset of an event the engine reads back: its id.
#[derive(Debug, Deserialize)]
struct ApiEventRef {
    id: String,
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventList {
    #[serde(default)]
    items: Vec<ApiEventRef>,
    next_page_token: Option<String>,
}

impl ApiEventBody {
    fn from_draft(draft: &EventDraft) -> Self {
        Self {
            summary: draft.summary.clone(),
            location: draft.location.clone(),
            start: ApiEventTime {
                date_time: draft.start.to_rfc3339(),
                time_zone: draft.timezone.clone(),
            },
            end: ApiEventTime {
                date_time: draft.end.to_rfc3339(),
                time_zone: draft.timezone.clone(),
            },
            reminders: draft.reminders.as_ref().map(|reminders| ApiReminders {
                use_default: false,
                overrides: reminders
                    .overrides
                    .iter()
                    .map(|o| ApiReminderOverride {
                        method: o.method.as_str().to_string(),
                        minutes: o.minutes,
                    })
                    .collect(),
            }),
        }
    }
}
