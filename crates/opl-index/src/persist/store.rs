//! Saving and loading persisted indexes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use opl_common::write_atomic;
use tracing::{debug, info, warn};

use super::snapshot::IndexFile;
use super::{IndexFormat, IndexOrigin, binary, json};
use crate::error::{IndexError, Result};
use crate::index::NameIndex;

/// A usable index and where it came from.
#[derive(Debug)]
pub struct LoadedIndex {
    pub index: NameIndex,
    pub origin: IndexOrigin,
}

/// Location of the persisted index files.
#[derive(Debug, Clone)]
pub struct IndexStore {
    binary_path: PathBuf,
    json_path: PathBuf,
}

impl IndexStore {
    pub fn new(binary_path: impl Into<PathBuf>, json_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            json_path: json_path.into(),
        }
    }

    pub fn path(&self, format: IndexFormat) -> &Path {
        match format {
            IndexFormat::Binary => &self.binary_path,
            IndexFormat::Json => &self.json_path,
        }
    }

    /// Persist in the preferred format, falling back to JSON when binary
    /// encoding or writing fails.
    pub fn save(&self, index: &NameIndex) -> Result<IndexFormat> {
        match self.save_as(index, IndexFormat::Binary) {
            Ok(()) => Ok(IndexFormat::Binary),
            Err(err) => {
                warn!(error = %err, "binary index save failed, writing JSON");
                self.save_as(index, IndexFormat::Json)?;
                self.remove(IndexFormat::Binary);
                Ok(IndexFormat::Json)
            }
        }
    }

    /// Persist in a specific format.
    pub fn save_as(&self, index: &NameIndex, format: IndexFormat) -> Result<()> {
        let file = IndexFile::from(index);
        let bytes = match format {
            IndexFormat::Binary => binary::encode(&file)?,
            IndexFormat::Json => json::encode(&file)?,
        };
        let path = self.path(format);
        write_atomic(path, &bytes)?;
        debug!(path = %path.display(), keys = index.len(), "saved name index");
        Ok(())
    }

    /// Load one format. `Ok(None)` when the file does not exist.
    pub fn load(&self, format: IndexFormat) -> Result<Option<NameIndex>> {
        let path = self.path(format);
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(IndexError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let file = match format {
            IndexFormat::Binary => binary::decode(&bytes, path)?,
            IndexFormat::Json => json::decode(&bytes, path)?,
        };
        file.into_index(path).map(Some)
    }

    /// Reuse a persisted index built from `expected_stamp`, or rebuild.
    ///
    /// Unreadable, corrupt and outdated files are skipped with a warning,
    /// so the only error returned is one raised by `build`. A rebuilt index
    /// is persisted before returning; failing to persist it is logged but
    /// does not fail the call.
    pub fn load_or_build<F, E>(
        &self,
        expected_stamp: &str,
        build: F,
    ) -> std::result::Result<LoadedIndex, E>
    where
        F: FnOnce() -> std::result::Result<NameIndex, E>,
    {
        for format in IndexFormat::PREFERENCE {
            let path = self.path(format);
            match self.load(format) {
                Ok(Some(index)) if index.source_stamp() == expected_stamp => {
                    info!(path = %path.display(), keys = index.len(), "loaded persisted name index");
                    return Ok(LoadedIndex {
                        index,
                        origin: format.into(),
                    });
                }
                Ok(Some(index)) => {
                    warn!(
                        path = %path.display(),
                        found = index.source_stamp(),
                        expected = expected_stamp,
                        "persisted name index is out of date"
                    );
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "discarding unreadable name index");
                    if err.calls_for_rebuild() {
                        self.remove(format);
                    }
                }
            }
        }

        let index = build()?;
        if let Err(err) = self.save(&index) {
            warn!(error = %err, "failed to persist rebuilt name index");
        }
        Ok(LoadedIndex {
            index,
            origin: IndexOrigin::Rebuilt,
        })
    }

    fn remove(&self, format: IndexFormat) {
        let path = self.path(format);
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(path = %path.display(), error = %err, "failed to remove index file"),
        }
    }
}
