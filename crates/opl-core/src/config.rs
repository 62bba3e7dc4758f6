//! Service configuration.

use std::fs;
use std::path::Path;

use opl_match::{BatchConfig, ScoringConfig};
use opl_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};

/// Complete service configuration, loadable from TOML.
///
/// ```toml
/// [store]
/// cache_dir = "data_cache"
/// max_age_hours = 24
///
/// [scoring.thresholds]
/// high = 0.9
/// medium = 0.7
///
/// [batch]
/// max_workers = 3
/// ```
///
/// Missing tables and keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub store: StoreConfig,
    pub scoring: ScoringConfig,
    pub batch: BatchConfig,
}

impl LookupConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| LookupError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| LookupError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
