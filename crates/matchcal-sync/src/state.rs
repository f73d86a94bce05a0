//! On-disk state layout.
//!
//! All persisted state lives under one data directory:
//!
//! - `matches<id>.json` - cached fixture records for one subject
//! - `events<id>.json` - identity map for one subject
//! - `seen_posts.json` - ticket posts already turned into events

use std::path::{Path, PathBuf};

use matchcal_core::SubjectId;

/// File name of the seen-posts state.
const SEEN_POSTS_FILE: &str = "seen_posts.json";

/// Resolves state file paths under the data directory.
#[derive(Debug, Clone)]
pub struct StatePaths {
    data_dir: PathBuf,
}

impl StatePaths {
    /// Creates the layout rooted at the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory root.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Fixture cache file for a subject.
    pub fn fixtures_file(&self, subject: SubjectId) -> PathBuf {
        self.data_dir.join(subject.fixtures_file_name())
    }

    /// Identity map file for a subject.
    pub fn identity_file(&self, subject: SubjectId) -> PathBuf {
        self.data_dir.join(subject.identity_file_name())
    }

    /// Seen ticket posts file.
    pub fn seen_posts_file(&self) -> PathBuf {
        self.data_dir.join(SEEN_POSTS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted_in_the_data_dir() {
        let paths = StatePaths::new("/var/lib/matchcal");
        let subject = SubjectId::new(131);

        assert_eq!(
            paths.fixtures_file(subject),
            PathBuf::from("/var/lib/matchcal/matches131.json")
        );
        assert_eq!(
            paths.identity_file(subject),
            PathBuf::from("/var/lib/matchcal/events131.json")
        );
        assert_eq!(
            paths.seen_posts_file(),
            PathBuf::from("/var/lib/matchcal/seen_posts.json")
        );
    }
}
