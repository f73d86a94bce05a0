//! Sync engine error types.

use thiserror::Error;

/// Result type for engine operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort an engine operation.
///
/// Per-item failures (one fixture's calendar write, one subject's fetch)
/// are logged and counted inside the loops; they never surface here.
/// What does surface is damage to local state or a provider failure in an
/// operation with no isolation policy, such as reset.
#[derive(Debug, Error)]
pub enum SyncError {
    /// State file error (fixture cache, identity map, seen posts).
    #[error("state error: {0}")]
    Storage(#[from] matchcal_core::StorageError),

    /// Provider error outside a per-item isolation loop.
    #[error("provider error: {0}")]
    Provider(#[from] matchcal_providers::ProviderError),
}
