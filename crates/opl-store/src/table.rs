//! Columnar table I/O.

use std::fs::File;
use std::path::Path;

use opl_common::write_atomic_with;
use polars::prelude::*;

use crate::error::{Result, StoreError};

/// Read a CSV file with every column kept as text.
///
/// Numeric cells are parsed later by the index builder so that a malformed
/// cell only ever affects its own record.
pub fn read_csv_as_text(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| StoreError::Table(format!("{}: {e}", path.display())))?
        .finish()
        .map_err(|e| StoreError::Table(format!("{}: {e}", path.display())))
}

/// Write the table as parquet, replacing `path` atomically.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    write_atomic_with(path, |file| {
        ParquetWriter::new(file)
            .finish(df)
            .map(|_| ())
            .map_err(std::io::Error::other)
    })?;
    Ok(())
}

/// Read a parquet table.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    ParquetReader::new(file)
        .finish()
        .map_err(|e| StoreError::Table(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_columns_stay_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        std::fs::write(
            &path,
            "Name,WeightClassKg,TotalKg\nJohn Smith,120+,700\nJane Doe,63,\n",
        )
        .unwrap();

        let df = read_csv_as_text(&path).unwrap();
        assert_eq!(df.height(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
    }

    #[test]
    fn test_parquet_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.parquet");
        let mut df = df!(
            "Name" => ["John Smith", "Jane Doe"],
            "TotalKg" => ["700", ""],
        )
        .unwrap();

        write_table(&mut df, &path).unwrap();
        let back = read_table(&path).unwrap();
        assert!(back.equals_missing(&df));
    }
}
