//! Archive extraction.

use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::error::{Result, StoreError};

/// Extract the first `*.csv` member of a zip archive to `dest`.
///
/// Returns the member name.
pub fn extract_csv(data: &[u8], dest: &Path) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| StoreError::Archive(format!("failed to open zip archive: {e}")))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| StoreError::Archive(format!("failed to read zip entry {i}: {e}")))?;

        if !entry.is_file() || !entry.name().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }

        let name = entry.name().to_string();
        debug!(member = %name, size = entry.size(), "Extracting CSV member");

        let mut out = File::create(dest).map_err(|e| StoreError::Io {
            operation: "create",
            path: dest.to_path_buf(),
            source: e,
        })?;
        io::copy(&mut entry, &mut out).map_err(|e| StoreError::Io {
            operation: "write",
            path: dest.to_path_buf(),
            source: e,
        })?;

        return Ok(name);
    }

    Err(StoreError::Archive("no CSV file found in archive".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_first_csv() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.csv");
        let data = zip_with(&[
            ("README.txt", "not a table"),
            ("opl/openpowerlifting-2024.csv", "Name\nJohn Smith\n"),
        ]);

        let name = extract_csv(&data, &dest).unwrap();
        assert_eq!(name, "opl/openpowerlifting-2024.csv");
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "Name\nJohn Smith\n");
    }

    #[test]
    fn test_archive_without_csv_fails() {
        let dir = tempdir().unwrap();
        let data = zip_with(&[("README.txt", "nothing here")]);
        let result = extract_csv(&data, &dir.path().join("out.csv"));
        assert!(matches!(result, Err(StoreError::Archive(_))));
    }

    #[test]
    fn test_garbage_is_not_an_archive() {
        let dir = tempdir().unwrap();
        let result = extract_csv(b"definitely not a zip", &dir.path().join("out.csv"));
        assert!(matches!(result, Err(StoreError::Archive(_))));
    }
}
