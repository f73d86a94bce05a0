//! Identity map: external fixture id to provider event id.
//!
//! One map per subject, persisted as a JSON object with sorted keys. The
//! map is the single source of truth for the create-vs-update decision;
//! the remote calendar is never queried to discover existing events.
//! Entries are written through to disk immediately after each successful
//! create, so an interrupted run loses at most the in-flight item.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info};

use crate::storage::{self, StorageResult};

/// Persisted external-id to provider-event-id table for one subject.
#[derive(Debug)]
pub struct IdentityMap {
    /// Path of the map file.
    path: PathBuf,

    /// In-memory view of the persisted entries.
    entries: RwLock<BTreeMap<String, String>>,
}

impl IdentityMap {
    /// Creates a map backed by the given file. Nothing is read until
    /// [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates the map and loads persisted entries in one step.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let map = Self::new(path);
        map.load()?;
        Ok(map)
    }

    /// Loads entries from disk, replacing the in-memory view.
    ///
    /// Returns `Ok(true)` when a file was read, `Ok(false)` when none
    /// exists and the map starts empty.
    pub fn load(&self) -> StorageResult<bool> {
        match storage::read_json::<BTreeMap<String, String>>(&self.path)? {
            Some(entries) => {
                debug!(
                    path = %self.path.display(),
                    entries = entries.len(),
                    "loaded identity map"
                );
                *self.entries.write().unwrap() = entries;
                Ok(true)
            }
            None => {
                debug!(path = %self.path.display(), "no identity map file, starting empty");
                Ok(false)
            }
        }
    }

    /// Returns the provider event id mapped to an external id.
    pub fn get(&self, external_id: &str) -> Option<String> {
        self.entries.read().unwrap().get(external_id).cloned()
    }

    /// Returns true when the external id is already mapped.
    pub fn contains(&self, external_id: &str) -> bool {
        self.entries.read().unwrap().contains_key(external_id)
    }

    /// Inserts a mapping and persists the whole map immediately.
    pub fn insert(
        &self,
        external_id: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> StorageResult<()> {
        {
            let mut entries = self.entries.write().unwrap();
            entries.insert(external_id.into(), provider_id.into());
        }
        self.save()
    }

    /// Persists the current entries.
    pub fn save(&self) -> StorageResult<()> {
        let entries = self.entries.read().unwrap();
        storage::write_json_pretty(&self.path, &*entries)?;
        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "saved identity map"
        );
        Ok(())
    }

    /// Clears the map in memory and removes the file on disk.
    pub fn clear(&self) -> StorageResult<()> {
        self.entries.write().unwrap().clear();
        if storage::remove_if_exists(&self.path)? {
            info!(path = %self.path.display(), "removed identity map file");
        }
        Ok(())
    }

    /// Number of mapped external ids.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true when no external id is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Returns the map file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a snapshot of all entries.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.read().unwrap().clone()
    }
}
