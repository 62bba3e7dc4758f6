//! File locations inside the cache directory.

use std::path::{Path, PathBuf};

const DATA_FILE: &str = "openpowerlifting.parquet";
const METADATA_FILE: &str = "metadata.json";
const INDEX_BINARY_FILE: &str = "name_index.bin";
const INDEX_JSON_FILE: &str = "name_index.json";

/// Resolved paths of every cache artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    root: PathBuf,
}

impl CachePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Columnar dataset cache.
    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// Preferred (binary) persisted index.
    pub fn index_binary_file(&self) -> PathBuf {
        self.root.join(INDEX_BINARY_FILE)
    }

    /// Fallback (JSON) persisted index.
    pub fn index_json_file(&self) -> PathBuf {
        self.root.join(INDEX_JSON_FILE)
    }
}
