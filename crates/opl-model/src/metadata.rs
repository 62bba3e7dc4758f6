//! Cache bookkeeping types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staleness record written next to the cached dataset after every
/// successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessMetadata {
    /// When the last successful refresh completed.
    pub last_update: DateTime<Utc>,
    /// Fingerprint derived from the remote cache-validation headers.
    pub fingerprint: String,
    /// Number of rows in the cached table.
    pub rows: u64,
    /// Column names of the cached table, in source order.
    pub columns: Vec<String>,
}

impl StalenessMetadata {
    /// Identity of the cached dataset generation.
    ///
    /// Persisted indexes carry this stamp so they can be discarded once the
    /// dataset they were built from has been replaced.
    pub fn stamp(&self) -> String {
        format!("{}#{}", self.last_update.to_rfc3339(), self.fingerprint)
    }

    /// Whether more than `max_age_hours` have passed since `last_update`.
    pub fn is_older_than(&self, max_age_hours: i64, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_update) > chrono::Duration::hours(max_age_hours)
    }
}

/// Snapshot of the dataset and index state for status reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataStatus {
    pub data_loaded: bool,
    pub total_records: u64,
    pub indexed_names: u64,
    pub last_update: Option<DateTime<Utc>>,
    pub fingerprint: Option<String>,
    pub cache_size_mb: f64,
}
