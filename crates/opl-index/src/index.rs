//! Immutable canonical-name index.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::NaiveDate;
use opl_model::Record;

/// Mapping from canonical name to the records stored under it.
///
/// Keys iterate in ascending order and records under a key keep dataset
/// order. Once built the index is never mutated; a rebuild produces a new
/// value that is published through [`crate::IndexHandle`].
#[derive(Debug, Clone, PartialEq)]
pub struct NameIndex {
    entries: BTreeMap<String, Vec<Record>>,
    as_of: NaiveDate,
    source_stamp: String,
    record_count: usize,
}

impl NameIndex {
    /// Assemble an index from already grouped entries.
    ///
    /// Callers guarantee that every record under a key has that key as its
    /// canonical name.
    pub(crate) fn from_entries(
        entries: BTreeMap<String, Vec<Record>>,
        as_of: NaiveDate,
        source_stamp: String,
    ) -> Self {
        let record_count = entries.values().map(Vec::len).sum();
        Self {
            entries,
            as_of,
            source_stamp,
            record_count,
        }
    }

    /// An index with no entries.
    pub fn empty(as_of: NaiveDate) -> Self {
        Self::from_entries(BTreeMap::new(), as_of, String::new())
    }

    /// Date `days_old` was computed against.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Stamp of the dataset this index was built from.
    pub fn source_stamp(&self) -> &str {
        &self.source_stamp
    }

    /// Records stored under an exact canonical key.
    pub fn get(&self, key: &str) -> Option<&[Record]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Entries whose key starts with `prefix`, in key order.
    ///
    /// The exact key itself is included when present.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [Record])> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.entries
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// Number of distinct canonical names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records across all keys.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
