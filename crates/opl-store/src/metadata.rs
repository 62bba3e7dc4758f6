//! Staleness metadata persistence.

use std::fs;
use std::path::Path;

use opl_common::write_atomic;
use opl_model::StalenessMetadata;

use crate::error::{Result, StoreError};

/// Load metadata, returning `Ok(None)` if the file does not exist.
pub fn load_metadata(path: &Path) -> Result<Option<StalenessMetadata>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Save metadata atomically.
pub fn save_metadata(path: &Path, metadata: &StalenessMetadata) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(metadata).map_err(|e| StoreError::Metadata {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_atomic(path, &bytes)?;
    Ok(())
}
