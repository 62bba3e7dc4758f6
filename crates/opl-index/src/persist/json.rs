//! JSON index encoding, used when binary encoding is unavailable.

use std::path::Path;

use super::snapshot::IndexFile;
use crate::error::{IndexError, Result};

pub fn encode(file: &IndexFile) -> Result<Vec<u8>> {
    serde_json::to_vec(file).map_err(|e| IndexError::Serialization(e.to_string()))
}

pub fn decode(bytes: &[u8], path: &Path) -> Result<IndexFile> {
    serde_json::from_slice(bytes).map_err(|e| IndexError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
