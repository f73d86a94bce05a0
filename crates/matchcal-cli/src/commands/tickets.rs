//! Tickets command — one ticket watcher pass.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use matchcal_providers::google::GoogleCalendarService;
use matchcal_providers::news::HtmlNewsFeed;
use matchcal_sync::{TicketOutcome, TicketWatcher};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Scans club news for a ticket sale and creates a reminder event.
pub async fn run(config: &Config) -> CliResult<()> {
    let (feed_config, tickets_config) = config.tickets_config().map_err(CliError::Config)?;

    let feed = Arc::new(HtmlNewsFeed::new(feed_config));
    let calendar = Arc::new(GoogleCalendarService::new(
        config.calendar_config().map_err(CliError::Config)?,
    ));
    let watcher = TicketWatcher::new(feed, calendar, tickets_config);

    // Posts give sale dates without a year; assume the current one.
    let year = Utc::now().year();
    let outcome = watcher.run(&config.state_paths(), year).await?;

    match outcome {
        TicketOutcome::Created { url, summary } => {
            println!("Created ticket sale event: {}", summary);
            println!("  from post: {}", url);
        }
        TicketOutcome::NoMatchingPost => {
            println!("No ticket post in recent news.");
        }
        TicketOutcome::AlreadySeen { url } => {
            println!("Newest ticket post was already handled: {}", url);
        }
        TicketOutcome::NoSaleWindow { url } => {
            println!("No sale window found in ticket post: {}", url);
        }
    }
    Ok(())
}
