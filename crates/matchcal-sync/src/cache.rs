//! Per-subject fixture cache files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use matchcal_core::storage::{self, StorageResult};
use matchcal_providers::Fixture;

/// Pretty-JSON fixture cache for one subject.
#[derive(Debug)]
pub struct FixtureCache {
    path: PathBuf,
}

impl FixtureCache {
    /// Creates a cache handle for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads cached fixtures; empty when no cache file exists.
    pub fn load(&self) -> StorageResult<Vec<Fixture>> {
        let fixtures: Vec<Fixture> = storage::read_json(&self.path)?.unwrap_or_default();
        debug!(path = %self.path.display(), count = fixtures.len(), "loaded fixture cache");
        Ok(fixtures)
    }

    /// Stores fixtures, replacing the cache file.
    pub fn store(&self, fixtures: &[Fixture]) -> StorageResult<()> {
        storage::write_json_pretty(&self.path, &fixtures)?;
        debug!(path = %self.path.display(), count = fixtures.len(), "stored fixture cache");
        Ok(())
    }

    /// True while the cache file's mtime is inside the window.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        matchcal_core::is_fresh(&self.path, max_age)
    }

    /// The cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fixtures() -> Vec<Fixture> {
        vec![
            Fixture::new(867946, "Athletico-PR", "Flamengo", "Serie A")
                .with_date("2025-05-21T16:00:00-03:00"),
            Fixture::new(867950, "Flamengo", "Athletico-PR", "Copa do Brasil"),
        ]
    }

    #[test]
    fn test_load_missing_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FixtureCache::new(dir.path().join("matches131.json"));

        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FixtureCache::new(dir.path().join("matches131.json"));

        cache.store(&sample_fixtures()).unwrap();
        assert_eq!(cache.load().unwrap(), sample_fixtures());
    }

    #[test]
    fn test_store_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FixtureCache::new(dir.path().join("matches131.json"));

        cache.store(&sample_fixtures()).unwrap();
        cache.store(&[]).unwrap();
        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn test_fresh_after_store() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FixtureCache::new(dir.path().join("matches131.json"));

        assert!(!cache.is_fresh(Duration::from_secs(60)));
        cache.store(&sample_fixtures()).unwrap();
        assert!(cache.is_fresh(Duration::from_secs(60)));
    }
}
