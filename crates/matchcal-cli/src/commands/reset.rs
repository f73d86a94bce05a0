//! Reset command — wipes a subject's calendar and identity map.

use std::sync::Arc;

use tracing::info;

use matchcal_providers::google::GoogleCalendarService;
use matchcal_sync::Resetter;

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Deletes every event in the subject's calendar, then forgets its
/// mappings so the next sync starts from scratch.
pub async fn run(config: &Config, subject_id: u32, yes: bool) -> CliResult<()> {
    let subjects = config.subjects().map_err(CliError::Config)?;
    let Some(subject) = subjects.iter().find(|s| s.id.value() == subject_id) else {
        return Err(CliError::Config(format!(
            "subject {} is not in [calendar.subjects]",
            subject_id
        )));
    };

    if !yes {
        return Err(CliError::Refused(format!(
            "reset deletes every event in calendar {} and forgets the stored mappings; \
             rerun with --yes to confirm",
            subject.calendar_id
        )));
    }

    let calendar = Arc::new(GoogleCalendarService::new(
        config.calendar_config().map_err(CliError::Config)?,
    ));
    info!(subject = %subject.id, calendar_id = %subject.calendar_id, "resetting subject");
    let report = Resetter::new(calendar)
        .reset_subject(subject, &config.state_paths())
        .await?;

    println!(
        "Deleted {} events from calendar {}.",
        report.deleted, subject.calendar_id
    );
    Ok(())
}
