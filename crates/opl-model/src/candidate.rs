//! Scored match candidates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// How a candidate was discovered in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// The only record under an exactly matching key.
    Exact,
    /// One of several records sharing an exactly matching key.
    ExactDuplicate,
    /// A record under a longer key that starts with the searched name.
    PrefixMatch,
}

impl MatchType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::ExactDuplicate => "exact_duplicate",
            Self::PrefixMatch => "prefix_match",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record proposed as a possible match for a searched name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub record: Record,
    /// Composite match score in `[0, 1]`.
    pub score: f64,
    /// Name similarity in `[0, 1]` that fed the score.
    pub name_similarity: f64,
    pub match_type: MatchType,
}
