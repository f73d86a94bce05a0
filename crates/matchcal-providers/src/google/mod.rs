//! Google Calendar binding.
//!
//! Implements [`CalendarService`](crate::traits::CalendarService) on top of
//! the Calendar API v3 with an opaque bearer token. Obtaining and
//! refreshing that token happens outside this binding.

mod client;
mod config;

pub use client::GoogleCalendarService;
pub use config::GoogleCalendarConfig;
