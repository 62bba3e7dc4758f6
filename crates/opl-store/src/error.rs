//! Dataset store error types.

use std::path::PathBuf;

use opl_common::AtomicWriteError;
use thiserror::Error;

/// Dataset store error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No cached dataset exists yet; run a refresh first.
    #[error("dataset cache not found at {path}; refresh the dataset first")]
    DatasetMissing { path: PathBuf },

    /// Fetching from the remote endpoint failed.
    #[error("network error: {0}")]
    Network(String),

    /// The downloaded archive could not be read.
    #[error("archive error: {0}")]
    Archive(String),

    /// The table could not be parsed, validated or written.
    #[error("table error: {0}")]
    Table(String),

    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Staleness metadata could not be read or written.
    #[error("invalid metadata file {path}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<AtomicWriteError> for StoreError {
    fn from(err: AtomicWriteError) -> Self {
        Self::Io {
            operation: err.operation,
            path: err.path,
            source: err.source,
        }
    }
}

/// Result type alias for dataset store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
