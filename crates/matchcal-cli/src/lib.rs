//! CLI for matchcal: fixture fetch, calendar sync, reset, ticket watcher.
//!
//! This crate provides the `matchcal` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, CliResult};
