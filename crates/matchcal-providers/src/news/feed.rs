//! News feed over the club site's listing page.
//!
//! The listing page is plain server-rendered HTML. Post links are pulled
//! from anchor tags whose href contains the configured path marker;
//! bodies are reduced to visible text by dropping script and style blocks,
//! stripping the remaining tags and decoding the common entities.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{BoxFuture, NewsFeed, NewsPost};

/// Default href substring that marks a post link.
pub const DEFAULT_POST_PATH_MARKER: &str = "/noticias/";

/// Default HTTP timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Regex for anchor tags with an href and inner markup.
static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s+[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#).expect("Invalid anchor regex")
});

/// Regex for script and style blocks, dropped before text extraction.
static SCRIPT_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>")
        .expect("Invalid script/style regex")
});

/// Regex for any remaining HTML tag.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"));

/// Settings for the news feed binding.
#[derive(Debug, Clone)]
pub struct NewsFeedConfig {
    /// URL of the news listing page.
    pub feed_url: String,

    /// Substring a href must contain to count as a post link.
    pub post_path_marker: String,

    /// HTTP timeout.
    pub timeout: Duration,
}

impl NewsFeedConfig {
    /// Creates a config for the given listing page.
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            post_path_marker: DEFAULT_POST_PATH_MARKER.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the post link marker.
    #[must_use]
    pub fn with_post_path_marker(mut self, marker: impl Into<String>) -> Self {
        self.post_path_marker = marker.into();
        self
    }

    /// Overrides the HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// News feed over a server-rendered HTML listing page.
#[derive(Debug)]
pub struct HtmlNewsFeed {
    http_client: reqwest::Client,
    config: NewsFeedConfig,
}

impl HtmlNewsFeed {
    /// Creates a new feed from its configuration.
    pub fn new(config: NewsFeedConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            config,
        }
    }

    async fn fetch_page(&self, url: &str) -> ProviderResult<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::server(format!(
                "news page error ({}) for {}",
                status, url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read page: {}", e)))
    }

    async fn posts(&self) -> ProviderResult<Vec<NewsPost>> {
        let html = self.fetch_page(&self.config.feed_url).await?;
        let base = Url::parse(&self.config.feed_url)
            .map_err(|e| ProviderError::configuration(format!("invalid feed url: {}", e)))?;

        let posts = extract_posts(&html, &base, &self.config.post_path_marker);
        debug!(feed = %self.config.feed_url, count = posts.len(), "scanned news listing");
        Ok(posts)
    }

    async fn body(&self, url: &str) -> ProviderResult<String> {
        let html = self.fetch_page(url).await?;
        Ok(visible_text(&html))
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

impl NewsFeed for HtmlNewsFeed {
    fn name(&self) -> &str {
        "club-news"
    }

    fn recent_posts(&self) -> BoxFuture<'_, ProviderResult<Vec<NewsPost>>> {
        Box::pin(async move {
            self.posts()
                .await
                .map_err(|e| e.with_provider("club-news"))
        })
    }

    fn post_body(&self, url: &str) -> BoxFuture<'_, ProviderResult<String>> {
        let url = url.to_string();
        Box::pin(async move {
            self.body(&url)
                .await
                .map_err(|e| e.with_provider("club-news"))
        })
    }
}

/// Extracts post links from the listing HTML, in page order, deduplicated
/// by resolved URL.
fn extract_posts(html: &str, base: &Url, marker: &str) -> Vec<NewsPost> {
    let mut seen = HashSet::new();
    let mut posts = Vec::new();

    for captures in ANCHOR_REGEX.captures_iter(html) {
        let href = &captures[1];
        if !href.contains(marker) {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        let title = visible_text(&captures[2]);
        if title.is_empty() {
            continue;
        }
        let url = resolved.to_string();
        if seen.insert(url.clone()) {
            posts.push(NewsPost::new(url, title));
        }
    }

    posts
}

/// Reduces an HTML snippet to its visible text with collapsed whitespace.
fn visible_text(html: &str) -> String {
    let without_blocks = SCRIPT_STYLE_REGEX.replace_all(html, " ");
    let without_tags = TAG_REGEX.replace_all(&without_blocks, " ");
    let decoded = decode_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the handful of entities that show up in the club pages.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
