//! Sync engine for matchcal.
//!
//! Four operations over one data directory:
//!
//! - [`Fetcher`] refreshes per-subject fixture caches, respecting a
//!   freshness window so a quota-limited source is not hit on every run.
//! - [`Reconciler`] pushes cached fixtures into calendars, creating or
//!   updating events as the identity map dictates.
//! - [`Resetter`] wipes a subject's calendar and identity map.
//! - [`TicketWatcher`] turns ticket sale announcements from club news
//!   into reminder events.
//!
//! Everything talks to the outside world through the provider traits, so
//! the engine is testable without network access.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod reconciler;
pub mod reset;
pub mod state;
pub mod tickets;

pub use cache::FixtureCache;
pub use error::{SyncError, SyncResult};
pub use fetcher::{Fetcher, RefreshReport};
pub use reconciler::{ReconcileOutcome, Reconciler, SyncReport};
pub use reset::{ResetReport, Resetter};
pub use state::StatePaths;
pub use tickets::{SeenPosts, TicketOutcome, TicketWatcher, TicketsConfig};
