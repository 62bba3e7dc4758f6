//! Atomic file replacement.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Stage of an atomic write that failed.
#[derive(Debug, Error)]
#[error("failed to {operation} {}", path.display())]
pub struct AtomicWriteError {
    pub operation: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Write `path` via a sibling temp file and a rename.
///
/// Readers observe either the previous file or the complete new one. The
/// temp file is removed if `write` fails.
pub fn write_atomic_with<F>(path: &Path, write: F) -> Result<(), AtomicWriteError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let temp_path = temp_sibling(path);
    let fail = |operation: &'static str, at: &Path, source: io::Error| AtomicWriteError {
        operation,
        path: at.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| fail("create directory", parent, e))?;
    }

    let mut file = File::create(&temp_path).map_err(|e| fail("create", &temp_path, e))?;
    let written = write(&mut file).and_then(|()| file.sync_all());
    drop(file);
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(fail("write", &temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        fail("rename", path, e)
    })
}

/// Write a byte buffer atomically.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AtomicWriteError> {
    write_atomic_with(path, |file| io::Write::write_all(file, bytes))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
