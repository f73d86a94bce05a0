//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// matchcal - Your team's matches on your calendar
#[derive(Debug, Parser)]
#[command(name = "matchcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MATCHCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh the fixture caches from the fixture API
    Fetch,

    /// Push cached fixtures into the calendars
    Sync,

    /// Delete every event in a subject's calendar and forget its mappings
    Reset {
        /// Team id of the subject to reset
        #[arg(long)]
        subject: u32,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Scan club news for a ticket sale and create a reminder event
    Tickets,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
