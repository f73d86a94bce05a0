//! Provider bindings for matchcal: fixtures in, calendar events out,
//! news posts in.

pub mod error;
pub mod fixture;
pub mod football;
pub mod google;
pub mod news;
pub mod normalize;
pub mod traits;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use fixture::Fixture;
pub use normalize::normalize;
pub use traits::{BoxFuture, CalendarService, FixtureSource, NewsFeed, NewsPost};
