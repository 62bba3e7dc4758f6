//! Serializable index layout shared by the binary and JSON encodings.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use opl_model::Record;

use super::CURRENT_SCHEMA_VERSION;
use crate::error::{IndexError, Result};
use crate::index::NameIndex;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Root of a persisted index.
#[derive(
    Debug,
    Clone,
    PartialEq,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct IndexFile {
    pub schema_version: u32,
    /// Stamp of the dataset the index was built from.
    pub source_stamp: String,
    /// Build reference date (`YYYY-MM-DD`).
    pub as_of: String,
    pub entries: Vec<EntrySnapshot>,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct EntrySnapshot {
    pub key: String,
    pub records: Vec<RecordSnapshot>,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct RecordSnapshot {
    pub row: u64,
    pub name: String,
    pub meet_name: String,
    pub date: String,
    pub division: String,
    pub federation: String,
    pub country: String,
    pub weight_class_kg: f64,
    pub squat_kg: f64,
    pub bench_kg: f64,
    pub deadlift_kg: f64,
    pub total_kg: f64,
    pub dots: f64,
    pub bodyweight_kg: f64,
    pub age: f64,
    pub days_old: i64,
}

impl From<&NameIndex> for IndexFile {
    fn from(index: &NameIndex) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            source_stamp: index.source_stamp().to_string(),
            as_of: index.as_of().format(DATE_FORMAT).to_string(),
            entries: index
                .iter()
                .map(|(key, records)| EntrySnapshot {
                    key: key.to_string(),
                    records: records.iter().map(RecordSnapshot::from).collect(),
                })
                .collect(),
        }
    }
}

impl From<&Record> for RecordSnapshot {
    fn from(record: &Record) -> Self {
        Self {
            row: record.row,
            name: record.name.clone(),
            meet_name: record.meet_name.clone(),
            date: record.date.clone(),
            division: record.division.clone(),
            federation: record.federation.clone(),
            country: record.country.clone(),
            weight_class_kg: record.weight_class_kg,
            squat_kg: record.squat_kg,
            bench_kg: record.bench_kg,
            deadlift_kg: record.deadlift_kg,
            total_kg: record.total_kg,
            dots: record.dots,
            bodyweight_kg: record.bodyweight_kg,
            age: record.age,
            days_old: record.days_old,
        }
    }
}

impl RecordSnapshot {
    fn into_record(self, canonical_name: String) -> Record {
        Record {
            row: self.row,
            name: self.name,
            canonical_name,
            meet_name: self.meet_name,
            date: self.date,
            division: self.division,
            federation: self.federation,
            country: self.country,
            weight_class_kg: self.weight_class_kg,
            squat_kg: self.squat_kg,
            bench_kg: self.bench_kg,
            deadlift_kg: self.deadlift_kg,
            total_kg: self.total_kg,
            dots: self.dots,
            bodyweight_kg: self.bodyweight_kg,
            age: self.age,
            days_old: self.days_old,
        }
    }
}

impl IndexFile {
    /// Restore the in-memory index, checking the key invariant on the way.
    ///
    /// Canonical names are not stored per record; they are recomputed from
    /// the display name and must equal the entry key.
    pub fn into_index(self, path: &Path) -> Result<NameIndex> {
        let corrupt = |reason: String| IndexError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };

        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(IndexError::UnsupportedVersion {
                found: self.schema_version,
                max_supported: CURRENT_SCHEMA_VERSION,
                path: path.to_path_buf(),
            });
        }
        let as_of = NaiveDate::parse_from_str(&self.as_of, DATE_FORMAT)
            .map_err(|e| corrupt(format!("invalid build date {:?}: {e}", self.as_of)))?;

        let mut entries = BTreeMap::new();
        for entry in self.entries {
            let mut records = Vec::with_capacity(entry.records.len());
            for snapshot in entry.records {
                let canonical = crate::normalize::canonical_name(&snapshot.name);
                if canonical != entry.key {
                    return Err(corrupt(format!(
                        "record {:?} stored under key {:?}",
                        snapshot.name, entry.key
                    )));
                }
                records.push(snapshot.into_record(canonical));
            }
            if entries.insert(entry.key.clone(), records).is_some() {
                return Err(corrupt(format!("duplicate key {:?}", entry.key)));
            }
        }

        Ok(NameIndex::from_entries(entries, as_of, self.source_stamp))
    }
}
