//! CLI error types.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// Provider error.
    Provider(String),
    /// Sync engine error.
    Sync(String),
    /// IO error.
    Io(std::io::Error),
    /// Operation refused without explicit confirmation.
    Refused(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Provider(msg) => write!(f, "provider error: {}", msg),
            Self::Sync(msg) => write!(f, "sync error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Refused(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<matchcal_providers::ProviderError> for CliError {
    fn from(err: matchcal_providers::ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<matchcal_sync::SyncError> for CliError {
    fn from(err: matchcal_sync::SyncError) -> Self {
        Self::Sync(err.to_string())
    }
}
