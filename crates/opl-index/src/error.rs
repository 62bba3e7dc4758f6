//! Index error types.

use std::path::PathBuf;

use opl_common::AtomicWriteError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Index build or persistence error.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A mandatory dataset column is absent.
    #[error("dataset has no {0} column")]
    MissingColumn(&'static str),

    /// Reading the dataset table failed.
    #[error("table error: {0}")]
    Table(#[from] PolarsError),

    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted index exists but cannot be trusted.
    #[error("persisted index {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Persisted index was written by a newer schema.
    #[error("index file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Index could not be encoded.
    #[error("failed to serialize index: {0}")]
    Serialization(String),
}

impl IndexError {
    /// Whether this error means the persisted file should be discarded and
    /// the index rebuilt from the dataset.
    pub fn calls_for_rebuild(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::UnsupportedVersion { .. })
    }
}

impl From<AtomicWriteError> for IndexError {
    fn from(err: AtomicWriteError) -> Self {
        Self::Io {
            operation: err.operation,
            path: err.path,
            source: err.source,
        }
    }
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
