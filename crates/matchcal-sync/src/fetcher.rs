//! Fixture cache refresh cycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use matchcal_core::SubjectId;
use matchcal_providers::FixtureSource;

use crate::cache::FixtureCache;
use crate::error::SyncResult;
use crate::state::StatePaths;

/// Refreshes per-subject fixture caches from the fixture source.
pub struct Fetcher {
    source: Arc<dyn FixtureSource>,
    paths: StatePaths,
    freshness: Duration,
}

impl Fetcher {
    /// Creates a fetcher.
    pub fn new(source: Arc<dyn FixtureSource>, paths: StatePaths, freshness: Duration) -> Self {
        Self {
            source,
            paths,
            freshness,
        }
    }

    /// Refreshes every subject's cache, one subject at a time.
    ///
    /// A cache file still inside the freshness window skips the fetch
    /// entirely. A failed fetch is logged and the stale cache file is left
    /// in place so the sync pass still has data to work with.
    pub async fn run(&self, subjects: &[SubjectId]) -> SyncResult<RefreshReport> {
        let mut report = RefreshReport::default();

        for &subject in subjects {
            let cache = FixtureCache::new(self.paths.fixtures_file(subject));

            if cache.is_fresh(self.freshness) {
                info!(subject = %subject, "fixture cache is fresh, skipping fetch");
                report.skipped += 1;
                continue;
            }

            match self.source.fetch_fixtures(subject).await {
                Ok(fixtures) => {
                    cache.store(&fixtures)?;
                    info!(subject = %subject, count = fixtures.len(), "refreshed fixture cache");
                    report.refreshed += 1;
                }
                Err(e) => {
                    error!(subject = %subject, error = %e, "fixture fetch failed, keeping stale cache");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Counts from one refresh pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    /// Subjects whose cache was refreshed.
    pub refreshed: usize,
    /// Subjects skipped because the cache was fresh.
    pub skipped: usize,
    /// Subjects whose fetch failed.
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use matchcal_providers::{BoxFuture, Fixture, ProviderError, ProviderResult};

    use super::*;

    /// Serves canned fixtures per subject; subjects in `fail_for` error.
    struct CannedSource {
        fixtures: Vec<Fixture>,
        fail_for: Vec<SubjectId>,
        calls: Mutex<Vec<SubjectId>>,
    }

    impl CannedSource {
        fn new(fixtures: Vec<Fixture>) -> Self {
            Self {
                fixtures,
                fail_for: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_for(mut self, subject: SubjectId) -> Self {
            self.fail_for.push(subject);
            self
        }

        fn calls(&self) -> Vec<SubjectId> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FixtureSource for CannedSource {
        fn name(&self) -> &str {
            "canned"
        }

        fn fetch_fixtures(
            &self,
            subject: SubjectId,
        ) -> BoxFuture<'_, ProviderResult<Vec<Fixture>>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(subject);
                if self.fail_for.contains(&subject) {
                    return Err(ProviderError::server("injected fetch failure"));
                }
                Ok(self.fixtures.clone())
            })
        }
    }

    fn fixtures() -> Vec<Fixture> {
        vec![Fixture::new(1, "A", "B", "Cup").with_date("2025-05-21T16:00:00-03:00")]
    }

    #[tokio::test]
    async fn refreshes_stale_caches() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        let source = Arc::new(CannedSource::new(fixtures()));
        let fetcher = Fetcher::new(source.clone(), paths.clone(), Duration::from_secs(3600));

        let report = fetcher.run(&[SubjectId::new(131)]).await.unwrap();

        assert_eq!(report.refreshed, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(source.calls(), vec![SubjectId::new(131)]);

        let cache = FixtureCache::new(paths.fixtures_file(SubjectId::new(131)));
        assert_eq!(cache.load().unwrap(), fixtures());
    }

    #[tokio::test]
    async fn skips_fresh_caches_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        let subject = SubjectId::new(131);

        FixtureCache::new(paths.fixtures_file(subject))
            .store(&fixtures())
            .unwrap();

        let source = Arc::new(CannedSource::new(Vec::new()));
        let fetcher = Fetcher::new(source.clone(), paths, Duration::from_secs(3600));
        let report = fetcher.run(&[subject]).await.unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.refreshed, 0);
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_keeps_stale_cache_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StatePaths::new(dir.path());
        let failing = SubjectId::new(131);
        let healthy = SubjectId::new(20);

        // Pre-existing stale-ish cache for the failing subject.
        let stale = vec![Fixture::new(9, "Old", "Cache", "Cup")];
        FixtureCache::new(paths.fixtures_file(failing))
            .store(&stale)
            .unwrap();

        let source = Arc::new(CannedSource::new(fixtures()).failing_for(failing));
        let fetcher = Fetcher::new(source.clone(), paths.clone(), Duration::ZERO);
        let report = fetcher.run(&[failing, healthy]).await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.refreshed, 1);
        assert_eq!(source.calls(), vec![failing, healthy]);

        // The failing subject's previous cache is untouched.
        let kept = FixtureCache::new(paths.fixtures_file(failing)).load().unwrap();
        assert_eq!(kept, stale);
    }
}
