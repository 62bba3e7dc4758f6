//! Matching error types.

use thiserror::Error;

/// Errors from matching operations.
///
/// Not finding a lifter is never an error; it is
/// [`opl_model::Resolution::NotFound`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// Search term is unusable.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
