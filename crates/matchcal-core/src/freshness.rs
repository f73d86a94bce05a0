//! Freshness checks for cached files.
//!
//! Refreshing a subject's fixture cache is skipped while the cache file's
//! mtime falls inside the configured window. The check is advisory:
//! callers decide what to do with a stale or missing file.

use std::path::Path;
use std::time::Duration;

/// Default freshness window, in days.
pub const DEFAULT_FRESHNESS_DAYS: f64 = 0.9;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts a window in (fractional) days to a duration. Negative values
/// clamp to zero.
pub fn freshness_window(days: f64) -> Duration {
    Duration::from_secs_f64(days.max(0.0) * SECONDS_PER_DAY)
}

/// Returns true when `path` exists and its mtime is within `max_age` of
/// now.
///
/// A missing file or unreadable metadata counts as stale so callers fall
/// through to a refresh. An mtime ahead of the clock counts as fresh.
pub fn is_fresh(path: &Path, max_age: Duration) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    let Ok(modified) = metadata.modified() else {
        return false;
    };
    match modified.elapsed() {
        Ok(age) => age <= max_age,
        Err(_) => true,
    }
}
