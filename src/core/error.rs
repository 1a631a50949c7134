//! Error types and error handling for docfeed.
//!
//! This module defines the error types used throughout the
//! ingestion pipeline and the index backends. Per-file read
//! problems are not errors: the walker reports them as
//! `ReadOutcome::Skipped` and the run carries on. Failing to walk
//! the tree itself is an error and aborts the run.

use thiserror::Error;

/// Result type alias for docfeed operations
pub type Result<T> = std::result::Result<T, DocfeedError>;

/// Main error type for docfeed
#[derive(Error, Debug)]
pub enum DocfeedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Document store not found: {0}")]
    StoreNotFound(String),

    /// The store could not be enumerated below its root. The run
    /// stops at the first such error.
    #[error("Failed to walk {path}: {reason}")]
    WalkFailed { path: String, reason: String },

    /// A batch upload was rejected. Batches before this one remain
    /// committed in the index.
    #[error(
        "Batch {batch} failed with {pending} records pending \
         ({committed} records already indexed): {reason}"
    )]
    BatchFailed {
        batch: usize,
        pending: usize,
        committed: usize,
        reason: String,
    },

    #[error("Index service error: {0}")]
    IndexService(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl DocfeedError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error was raised before any work started
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DocfeedError::ConfigError(_)
                | DocfeedError::StoreNotFound(_)
                | DocfeedError::TomlError(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, DocfeedError::InvalidQuery(_))
    }

    /// Number of records committed before the run was aborted, if
    /// the error came from a batch upload
    pub fn committed_records(&self) -> Option<usize> {
        match self {
            DocfeedError::BatchFailed { committed, .. } => Some(*committed),
            _ => None,
        }
    }
}
