//! Sync command — pushes cached fixtures into the calendars.

use std::sync::Arc;

use tracing::info;

use matchcal_providers::google::GoogleCalendarService;
use matchcal_sync::Reconciler;

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Reconciles every subject's cached fixtures against its calendar.
pub async fn run(config: &Config) -> CliResult<()> {
    let subjects = config.subjects().map_err(CliError::Config)?;
    if subjects.is_empty() {
        return Err(CliError::Config(
            "no subjects configured; add a [calendar.subjects] table to config.toml, \
             one `<team id> = \"<calendar id>\"` entry per team"
                .into(),
        ));
    }

    let calendar = Arc::new(GoogleCalendarService::new(
        config.calendar_config().map_err(CliError::Config)?,
    ));
    let reconciler = Reconciler::new(calendar);
    info!(subjects = subjects.len(), "syncing cached fixtures");

    let report = reconciler
        .sync_all(&subjects, &config.state_paths(), &config.calendar.timezone)
        .await?;

    println!(
        "Events: {} created, {} updated, {} skipped, {} failed.",
        report.created, report.updated, report.skipped, report.failed
    );
    Ok(())
}
