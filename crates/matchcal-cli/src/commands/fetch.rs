//! Fetch command — refreshes the fixture caches.

use std::sync::Arc;

use tracing::info;

use matchcal_providers::football::ApiFootballSource;
use matchcal_sync::Fetcher;

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Refreshes every subject's fixture cache from the fixture API.
pub async fn run(config: &Config) -> CliResult<()> {
    let subjects = config.subjects().map_err(CliError::Config)?;
    if subjects.is_empty() {
        return Err(CliError::Config(
            "no subjects configured; add a [calendar.subjects] table to config.toml, \
             one `<team id> = \"<calendar id>\"` entry per team"
                .into(),
        ));
    }

    let source = Arc::new(ApiFootballSource::new(
        config.football_config().map_err(CliError::Config)?,
    ));
    let fetcher = Fetcher::new(source, config.state_paths(), config.freshness_window());
    info!(subjects = subjects.len(), "refreshing fixture caches");

    let ids: Vec<_> = subjects.iter().map(|s| s.id).collect();
    let report = fetcher.run(&ids).await?;

    println!(
        "Fixture caches: {} refreshed, {} fresh, {} failed.",
        report.refreshed, report.skipped, report.failed
    );
    Ok(())
}
