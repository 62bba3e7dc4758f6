//! Dataset store configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Latest full OpenPowerlifting export.
pub const DEFAULT_SOURCE_URL: &str =
    "https://openpowerlifting.gitlab.io/opl-csv/files/openpowerlifting-latest.zip";

/// Fallback cache directory when no platform cache directory is available.
const FALLBACK_CACHE_DIR: &str = "data_cache";

/// Where the dataset lives and how often it is re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the table, metadata and persisted index.
    pub cache_dir: PathBuf,
    /// Zip archive containing the results CSV.
    pub source_url: String,
    /// Maximum cache age before a refresh is forced.
    pub max_age_hours: i64,
    /// Timeout for the full archive download.
    pub fetch_timeout_secs: u64,
    /// Timeout for the header-only staleness probe.
    pub probe_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            max_age_hours: 24,
            fetch_timeout_secs: 30,
            probe_timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Config rooted at `cache_dir` with every other field defaulted.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("org", "openpowerlifting", "opl-lookup")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
}
