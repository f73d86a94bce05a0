//! Full calendar reset for one subject.

use std::sync::Arc;

use tracing::info;

use matchcal_core::{IdentityMap, Subject};
use matchcal_providers::CalendarService;

use crate::error::SyncResult;
use crate::state::StatePaths;

/// Counts from one reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetReport {
    /// Events deleted from the calendar.
    pub deleted: usize,
}

/// Wipes a subject's calendar and identity map.
pub struct Resetter {
    calendar: Arc<dyn CalendarService>,
}

impl Resetter {
    /// Creates a resetter around a calendar service.
    pub fn new(calendar: Arc<dyn CalendarService>) -> Self {
        Self { calendar }
    }

    /// Deletes every event in the subject's calendar, then clears its
    /// identity map so the next sync rebuilds from scratch.
    ///
    /// # Errors
    ///
    /// A failed delete aborts the reset with the identity map intact; the
    /// remaining events and mappings are still there for a rerun.
    pub async fn reset_subject(
        &self,
        subject: &Subject,
        paths: &StatePaths,
    ) -> SyncResult<ResetReport> {
        let ids = self.calendar.list_events(&subject.calendar_id).await?;
        info!(subject = %subject.id, count = ids.len(), "deleting calendar events");

        for id in &ids {
            self.calendar.delete_event(&subject.calendar_id, id).await?;
        }

        IdentityMap::new(paths.identity_file(subject.id)).clear()?;
        info!(subject = %subject.id, deleted = ids.len(), "reset complete");

        Ok(ResetReport { deleted: ids.len() })
    }
}
