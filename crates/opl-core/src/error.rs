//! Lookup service errors.

use std::path::PathBuf;

use opl_index::IndexError;
use opl_match::MatchError;
use opl_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("invalid configuration {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl From<MatchError> for LookupError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::InvalidQuery(reason) => Self::InvalidQuery(reason),
        }
    }
}

impl LookupError {
    /// Whether a refresh could fix this error.
    pub fn is_dataset_missing(&self) -> bool {
        matches!(self, Self::Store(StoreError::DatasetMissing { .. }))
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
