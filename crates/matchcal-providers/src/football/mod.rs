//! api-football fixture source.
//!
//! Implements [`FixtureSource`](crate::traits::FixtureSource) against the
//! api-football v3 endpoint hosted on RapidAPI.

mod client;
mod config;

pub use client::ApiFootballSource;
pub use config::ApiFootballConfig;
