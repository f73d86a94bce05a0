//! Command implementations.

pub mod config;
pub mod fetch;
pub mod reset;
pub mod sync;
pub mod tickets;
