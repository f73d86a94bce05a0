//! Collaborator traits for the sync engine.
//!
//! The engine talks to the outside world through three narrow interfaces:
//! fixtures in ([`FixtureSource`]), calendar events out
//! ([`CalendarService`]) and news posts in ([`NewsFeed`]). All methods
//! return [`BoxFuture`] so the traits stay object-safe and the engine can
//! hold `Arc<dyn ...>` collaborators built once at startup.

use std::future::Future;
use std::pin::Pin;

use matchcal_core::{EventDraft, SubjectId};

use crate::error::ProviderResult;
use crate::fixture::Fixture;

/// A boxed future for async trait methods.
///
/// Async functions in traits are not yet stable in a way that works well
/// with dynamic dispatch; boxed futures keep the traits object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of fixture records for a subject.
///
/// # Example Implementation
///
/// ```ignore
/// impl FixtureSource for ApiFootballSource {
///     fn name(&self) -> &str { "api-football" }
///
///     fn fetch_fixtures(&self, subject: SubjectId) -> BoxFuture<'_, ProviderResult<Vec<Fixture>>> {
///         Box::pin(async move {
///             // GET /fixtures?team=<subject>&next=<window>
///             Ok(fixtures)
///         })
///     }
/// }
/// ```
pub trait FixtureSource: Send + Sync {
    /// Returns the name of this source (e.g., "api-football").
    fn name(&self) -> &str;

    /// Fetches the upcoming fixtures for one subject.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on network errors, authentication failures
    /// or malformed responses.
    fn fetch_fixtures(&self, subject: SubjectId) -> BoxFuture<'_, ProviderResult<Vec<Fixture>>>;
}

/// Calendar backend that receives the events.
///
/// Create, update and delete operate on provider event ids; discovery of
/// existing events is the identity map's job, so [`list_events`] exists
/// only for the reset operation.
///
/// [`list_events`]: CalendarService::list_events
pub trait CalendarService: Send + Sync {
    /// Returns the name of this service (e.g., "google").
    fn name(&self) -> &str;

    /// Creates an event and returns its provider event id.
    fn create_event(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> BoxFuture<'_, ProviderResult<String>>;

    /// Replaces an existing event's content with the draft.
    fn update_event(
        &self,
        calendar_id: &str,
        provider_id: &str,
        draft: &EventDraft,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    /// Lists the provider ids of every event in a calendar.
    fn list_events(&self, calendar_id: &str) -> BoxFuture<'_, ProviderResult<Vec<String>>>;

    /// Deletes an event by provider id.
    fn delete_event(
        &self,
        calendar_id: &str,
        provider_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>>;
}

/// A news post candidate for the ticket watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPost {
    /// Absolute URL of the post. Also the dedupe key in the seen-posts
    /// state file.
    pub url: String,

    /// Post title as shown on the listing page.
    pub title: String,
}

impl NewsPost {
    /// Creates a news post.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Source of recent news posts.
pub trait NewsFeed: Send + Sync {
    /// Returns the name of this feed (e.g., "club-news").
    fn name(&self) -> &str;

    /// Lists recent posts in page order, newest first.
    fn recent_posts(&self) -> BoxFuture<'_, ProviderResult<Vec<NewsPost>>>;

    /// Fetches the visible text of a post.
    fn post_body(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    /// A fixture source that always fails, for exercising error paths.
    struct ErrorSource;

    impl FixtureSource for ErrorSource {
        fn name(&self) -> &str {
            "error"
        }

        fn fetch_fixtures(
            &self,
            _subject: SubjectId,
        ) -> BoxFuture<'_, ProviderResult<Vec<Fixture>>> {
            Box::pin(async { Err(ProviderError::configuration("not configured")) })
        }
    }

    #[test]
    fn news_post_creation() {
        let post = NewsPost::new("https://club.example/noticias/1", "Ingressos à venda");
        assert_eq!(post.url, "https://club.example/noticias/1");
        assert_eq!(post.title, "Ingressos à venda");
    }

    #[tokio::test]
    async fn traits_are_object_safe() {
        let source: Box<dyn FixtureSource> = Box::new(ErrorSource);
        assert_eq!(source.name(), "error");

        let result = source.fetch_fixtures(SubjectId::new(131)).await;
        assert!(result.is_err());
    }
}
