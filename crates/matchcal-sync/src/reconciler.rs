//! Create-vs-update reconciliation against the calendar.
//!
//! The identity map is the single source of truth for whether a fixture
//! already has a calendar event. A mapped fixture is updated in place; an
//! unmapped one is created and its new provider id persisted before the
//! next fixture is touched. The calendar itself is never searched.

use std::sync::Arc;

use tracing::{debug, error, info};

use matchcal_core::{EventDraft, IdentityMap, Subject};
use matchcal_providers::{normalize, CalendarService};

use crate::cache::FixtureCache;
use crate::error::SyncResult;
use crate::state::StatePaths;

/// What happened to one fixture during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new event was created and its id persisted.
    Created,
    /// The mapped event was updated in place.
    Updated,
    /// The calendar call failed; the identity map was not touched.
    Failed,
}

/// Counts from one sync pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Events created.
    pub created: usize,
    /// Events updated.
    pub updated: usize,
    /// Fixtures skipped because they produced no draft.
    pub skipped: usize,
    /// Fixtures whose calendar call failed.
    pub failed: usize,
}

impl SyncReport {
    /// Folds another report into this one.
    pub fn merge(&mut self, other: SyncReport) {
        self.created += other.created;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Pushes cached fixtures into calendars, creating or updating events.
pub struct Reconciler {
    calendar: Arc<dyn CalendarService>,
}

impl Reconciler {
    /// Creates a reconciler around a calendar service.
    pub fn new(calendar: Arc<dyn CalendarService>) -> Self {
        Self { calendar }
    }

    /// Reconciles one fixture's draft against the calendar.
    ///
    /// Calendar failures are contained: they produce
    /// [`ReconcileOutcome::Failed`] and leave the identity map untouched,
    /// so the next run retries the same fixture. Only a failure to persist
    /// a new mapping aborts, because carrying on without it would create
    /// the event again on the next run.
    async fn reconcile(
        &self,
        calendar_id: &str,
        map: &IdentityMap,
        external_id: &str,
        draft: &EventDraft,
    ) -> SyncResult<ReconcileOutcome> {
        if let Some(provider_id) = map.get(external_id) {
            match self
                .calendar
                .update_event(calendar_id, &provider_id, draft)
                .await
            {
                Ok(()) => {
                    debug!(external_id, provider_id = %provider_id, "updated event");
                    Ok(ReconcileOutcome::Updated)
                }
                Err(e) => {
                    error!(external_id, provider_id = %provider_id, error = %e, "event update failed");
                    Ok(ReconcileOutcome::Failed)
                }
            }
        } else {
            match self.calendar.create_event(calendar_id, draft).await {
                Ok(provider_id) => {
                    map.insert(external_id, provider_id.as_str())?;
                    debug!(external_id, provider_id = %provider_id, "created event");
                    Ok(ReconcileOutcome::Created)
                }
                Err(e) => {
                    error!(external_id, error = %e, "event creation failed");
                    Ok(ReconcileOutcome::Failed)
                }
            }
        }
    }

    /// Syncs one subject's cached fixtures into its calendar.
    pub async fn sync_subject(
        &self,
        subject: &Subject,
        paths: &StatePaths,
        default_timezone: &str,
    ) -> SyncResult<SyncReport> {
        let fixtures = FixtureCache::new(paths.fixtures_file(subject.id)).load()?;
        let map = IdentityMap::open(paths.identity_file(subject.id))?;

        let mut report = SyncReport::default();
        for fixture in &fixtures {
            let Some(draft) = normalize(fixture, default_timezone) else {
                debug!(external_id = %fixture.external_id(), "fixture has no schedulable draft");
                report.skipped += 1;
                continue;
            };

            match self
                .reconcile(&subject.calendar_id, &map, &fixture.external_id(), &draft)
                .await?
            {
                ReconcileOutcome::Created => report.created += 1,
                ReconcileOutcome::Updated => report.updated += 1,
                ReconcileOutcome::Failed => report.failed += 1,
            }
        }

        info!(
            subject = %subject.id,
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "synced subject"
        );
        Ok(report)
    }

    /// Syncs every subject in turn, folding the per-subject reports.
    pub async fn sync_all(
        &self,
        subjects: &[Subject],
        paths: &StatePaths,
        default_timezone: &str,
    ) -> SyncResult<SyncReport> {
        let mut report = SyncReport::default();
        for subject in subjects {
            report.merge(self.sync_subject(subject, paths, default_timezone).await?);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use matchcal_core::SubjectId;
    use matchcal_providers::{BoxFuture, Fixture, ProviderError, ProviderResult};

    use super::*;

    /// In-memory calendar that hands out sequential event ids and records
    /// every call. Drafts whose summary is listed in a fail set error.
    #[derive(Default)]
    struct RecordingCalendar {
        next_id: AtomicU64,
        created: Mutex<Vec<(String, EventDraft)>>,
        updated: Mutex<Vec<(String, String, EventDraft)>>,
        fail_create_summaries: HashSet<String>,
        fail_update: bool,
    }

    impl RecordingCalendar {
        fn failing_create(mut self, summary: &str) -> Self {
            self.fail_create_summaries.insert(summary.to_string());
            self
        }

        fn failing_update(mut self) -> Self {
            self.fail_update = true;
            self
        }

        fn created_summaries(&self) -> Vec<String> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .map(|(_, d)| d.summary.clone())
                .collect()
        }

        fn updated_ids(&self) -> Vec<String> {
            self.updated
                .lock()
                .unwrap()
                .iter()
                .map(|(_, id, _)| id.clone())
                .collect()
        }
    }

    impl CalendarService for RecordingCalendar {
        fn name(&self) -> &str {
            "recording"
        }

        fn create_event(
            &self,
            calendar_id: &str,
            draft: &EventDraft,
        ) -> BoxFuture<'_, ProviderResult<String>> {
            let calendar_id = calendar_id.to_string();
            let draft = draft.clone();
            Box::pin(async move {
                if self.fail_create_summaries.contains(&draft.summary) {
                    return Err(ProviderError::server("injected create failure"));
                }
                let id = format!("evt-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
                self.created.lock().unwrap().push((calendar_id, draft));
                Ok(id)
            })
        }

        fn update_event(
            &self,
            calendar_id: &str,
            provider_id: &str,
            draft: &EventDraft,
        ) -> BoxFuture<'_, ProviderResult<()>> {
            let calendar_id = calendar_id.to_string();
            let provider_id = provider_id.to_string();
            let draft = draft.clone();
            Box::pin(async move {
                if self.fail_update {
                    return Err(ProviderError::server("injected update failure"));
                }
                self.updated
                    .lock()
                    .unwrap()
                    .push((calendar_id, provider_id, draft));
                Ok(())
            })
        }

        fn list_events(&self, _calendar_id: &str) -> BoxFuture<'_, ProviderResult<Vec<String>>> {
            Box::pin(async move { Ok(Vec::new()) })
        }

        fn delete_event(
            &self,
            _calendar_id: &str,
            _provider_id: &str,
        ) -> BoxFuture<'_, ProviderResult<()>> {
            Box::pin(async move { Ok(()) })
        }
    }

    fn subject() -> Subject {
        Subject::new(131, "team@group.calendar.google.com")
    }

    fn scheduled(id: i64, home: &str) -> Fixture {
        Fixture::new(id, home, "Flamengo", "Serie A").with_date("2025-05-21T16:00:00-03:00")
    }

    fn store_cache(paths: &StatePaths, fixtures: &[Fixture]) {
        FixtureCache::new(paths.fixtures_file(SubjectId::new(131)))
            .store(fixtures)
            .unwrap();
    }

    #[tokio::test]
    async fn test_first_run_creates_second_run_updates() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        store_cache(&paths, &[scheduled(555, "Athletico-PR"), scheduled(556, "Coritiba")]);

        let calendar = Arc::new(RecordingCalendar::default());
        let reconciler = Reconciler::new(calendar.clone());

        let first = reconciler
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();
        assert_eq!(first.created, 2);
        assert_eq!(first.updated, 0);

        let map = IdentityMap::open(paths.identity_file(SubjectId::new(131))).unwrap();
        assert_eq!(map.get("555").as_deref(), Some("evt-1"));
        assert_eq!(map.get("556").as_deref(), Some("evt-2"));

        let second = reconciler
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 2);
        assert_eq!(calendar.updated_ids(), vec!["evt-1", "evt-2"]);

        // The mappings survive the update pass unchanged.
        let map = IdentityMap::open(paths.identity_file(SubjectId::new(131))).unwrap();
        assert_eq!(map.get("555").as_deref(), Some("evt-1"));
        assert_eq!(map.len(), 2);
    }

    #[tokio::test]
    async fn test_mapped_fixture_updates_existing_event() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        store_cache(&paths, &[scheduled(555, "Athletico-PR")]);

        IdentityMap::new(paths.identity_file(SubjectId::new(131)))
            .insert("555", "abc")
            .unwrap();

        let calendar = Arc::new(RecordingCalendar::default());
        let report = Reconciler::new(calendar.clone())
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.created, 0);
        assert_eq!(calendar.updated_ids(), vec!["abc"]);
        assert!(calendar.created_summaries().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_does_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        store_cache(
            &paths,
            &[
                scheduled(1, "First"),
                scheduled(2, "Second"),
                scheduled(3, "Third"),
            ],
        );

        let calendar =
            Arc::new(RecordingCalendar::default().failing_create("Second vs Flamengo, Serie A"));
        let report = Reconciler::new(calendar.clone())
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 1);

        // The failed fixture got no mapping; the later one was still handled.
        let map = IdentityMap::open(paths.identity_file(SubjectId::new(131))).unwrap();
        assert!(map.get("1").is_some());
        assert!(map.get("2").is_none());
        assert!(map.get("3").is_some());
        assert_eq!(
            calendar.created_summaries(),
            vec!["First vs Flamengo, Serie A", "Third vs Flamengo, Serie A"]
        );
    }

    #[tokio::test]
    async fn test_update_failure_keeps_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        store_cache(&paths, &[scheduled(555, "Athletico-PR")]);

        IdentityMap::new(paths.identity_file(SubjectId::new(131)))
            .insert("555", "abc")
            .unwrap();

        let calendar = Arc::new(RecordingCalendar::default().failing_update());
        let report = Reconciler::new(calendar)
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.updated, 0);

        let map = IdentityMap::open(paths.identity_file(SubjectId::new(131))).unwrap();
        assert_eq!(map.get("555").as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_unscheduled_fixture_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        store_cache(
            &paths,
            &[
                Fixture::new(777, "Athletico-PR", "Flamengo", "Copa do Brasil"),
                scheduled(555, "Athletico-PR"),
            ],
        );

        let calendar = Arc::new(RecordingCalendar::default());
        let report = Reconciler::new(calendar.clone())
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.created, 1);
        assert_eq!(
            calendar.created_summaries(),
            vec!["Athletico-PR vs Flamengo, Serie A"]
        );
    }

    #[tokio::test]
    async fn test_sync_all_folds_subject_reports() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());

        FixtureCache::new(paths.fixtures_file(SubjectId::new(131)))
            .store(&[scheduled(1, "Athletico-PR")])
            .unwrap();
        FixtureCache::new(paths.fixtures_file(SubjectId::new(20)))
            .store(&[scheduled(2, "Coritiba")])
            .unwrap();

        let subjects = vec![
            Subject::new(131, "cap@example.com"),
            Subject::new(20, "cfc@example.com"),
        ];

        let calendar = Arc::new(RecordingCalendar::default());
        let report = Reconciler::new(calendar.clone())
            .sync_all(&subjects, &paths, "America/Sao_Paulo")
            .await
            .unwrap();

        assert_eq!(report.created, 2);

        // Each event landed in its own subject's calendar.
        let created = calendar.created.lock().unwrap();
        assert_eq!(created[0].0, "cap@example.com");
        assert_eq!(created[1].0, "cfc@example.com");
    }

    #[tokio::test]
    async fn test_missing_cache_syncs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());

        let calendar = Arc::new(RecordingCalendar::default());
        let report = Reconciler::new(calendar.clone())
            .sync_subject(&subject(), &paths, "America/Sao_Paulo")
            .await
            .unwrap();

        assert_eq!(report, SyncReport::default());
        assert!(calendar.created_summaries().is_empty());
    }
}
