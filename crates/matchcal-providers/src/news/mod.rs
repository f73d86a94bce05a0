//! Club news feed binding.
//!
//! Implements [`NewsFeed`](crate::traits::NewsFeed) over the club site's
//! server-rendered news listing.

mod feed;

pub use feed::{DEFAULT_POST_PATH_MARKER, HtmlNewsFeed, NewsFeedConfig};
