//! Index construction from the cached dataset table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use opl_common::{parse_numeric, string_column, string_column_or_empty};
use opl_model::{DAYS_OLD_UNKNOWN, Record, columns, parse_meet_date};
use polars::prelude::{DataFrame, StringChunked};
use tracing::{debug, info};

use crate::error::{IndexError, Result};
use crate::index::NameIndex;
use crate::normalize::canonical_name;

/// Counters collected while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows in the source table.
    pub rows: usize,
    /// Records placed in the index.
    pub records: usize,
    /// Distinct canonical names.
    pub keys: usize,
    /// Rows dropped because the name was null or blank.
    pub skipped_rows: usize,
    /// Non-empty numeric cells that failed to parse and were set to zero.
    pub malformed_fields: usize,
}

/// Builds a [`NameIndex`] from the dataset table.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    as_of: NaiveDate,
    source_stamp: String,
}

/// Text columns read alongside the name.
struct TextColumns {
    meet_name: StringChunked,
    date: StringChunked,
    division: StringChunked,
    federation: StringChunked,
    country: StringChunked,
}

/// Numeric columns, still as text.
struct NumericColumns {
    weight_class: StringChunked,
    squat: StringChunked,
    bench: StringChunked,
    deadlift: StringChunked,
    total: StringChunked,
    dots: StringChunked,
    bodyweight: StringChunked,
    age: StringChunked,
}

impl IndexBuilder {
    /// `as_of` is the reference date for `days_old`; `source_stamp`
    /// identifies the dataset version the index is built from.
    pub fn new(as_of: NaiveDate, source_stamp: impl Into<String>) -> Self {
        Self {
            as_of,
            source_stamp: source_stamp.into(),
        }
    }

    /// Build the index, grouping rows by canonical name in source order.
    ///
    /// Only the `Name` column is mandatory. Missing optional columns read as
    /// empty text and zero.
    pub fn build(&self, df: &DataFrame) -> Result<(NameIndex, BuildStats)> {
        let names =
            string_column(df, columns::NAME)?.ok_or(IndexError::MissingColumn(columns::NAME))?;
        let text = TextColumns {
            meet_name: string_column_or_empty(df, columns::MEET_NAME)?,
            date: string_column_or_empty(df, columns::DATE)?,
            division: string_column_or_empty(df, columns::DIVISION)?,
            federation: string_column_or_empty(df, columns::FEDERATION)?,
            country: string_column_or_empty(df, columns::COUNTRY)?,
        };
        let numeric = NumericColumns {
            weight_class: string_column_or_empty(df, columns::WEIGHT_CLASS)?,
            squat: string_column_or_empty(df, columns::SQUAT)?,
            bench: string_column_or_empty(df, columns::BENCH)?,
            deadlift: string_column_or_empty(df, columns::DEADLIFT)?,
            total: string_column_or_empty(df, columns::TOTAL)?,
            dots: string_column_or_empty(df, columns::DOTS)?,
            bodyweight: string_column_or_empty(df, columns::BODYWEIGHT)?,
            age: string_column_or_empty(df, columns::AGE)?,
        };

        let mut stats = BuildStats {
            rows: df.height(),
            ..BuildStats::default()
        };
        let mut entries: BTreeMap<String, Vec<Record>> = BTreeMap::new();

        for (row, name) in names.iter().enumerate() {
            let Some(name) = name else {
                stats.skipped_rows += 1;
                continue;
            };
            let canonical = canonical_name(name);
            if canonical.is_empty() {
                stats.skipped_rows += 1;
                continue;
            }
            let record = self.record_at(row, name, canonical.clone(), &text, &numeric, &mut stats);
            entries.entry(canonical).or_default().push(record);
        }

        stats.keys = entries.len();
        stats.records = entries.values().map(Vec::len).sum();
        if stats.malformed_fields > 0 {
            debug!(
                malformed_fields = stats.malformed_fields,
                "numeric cells defaulted to zero"
            );
        }
        info!(
            rows = stats.rows,
            records = stats.records,
            keys = stats.keys,
            skipped = stats.skipped_rows,
            "built name index"
        );

        let index = NameIndex::from_entries(entries, self.as_of, self.source_stamp.clone());
        Ok((index, stats))
    }

    fn record_at(
        &self,
        row: usize,
        name: &str,
        canonical_name: String,
        text: &TextColumns,
        numeric: &NumericColumns,
        stats: &mut BuildStats,
    ) -> Record {
        let mut number = |column: &StringChunked| {
            let field = parse_numeric(column.get(row));
            if field.is_malformed() {
                stats.malformed_fields += 1;
            }
            field.or_zero()
        };
        let weight_class_kg = number(&numeric.weight_class);
        let squat_kg = number(&numeric.squat);
        let bench_kg = number(&numeric.bench);
        let deadlift_kg = number(&numeric.deadlift);
        let total_kg = number(&numeric.total);
        let dots = number(&numeric.dots);
        let bodyweight_kg = number(&numeric.bodyweight);
        let age = number(&numeric.age);

        let cell = |column: &StringChunked| column.get(row).unwrap_or_default().trim().to_string();
        let date = cell(&text.date);
        let days_old = parse_meet_date(&date)
            .map_or(DAYS_OLD_UNKNOWN, |date| (self.as_of - date).num_days());

        Record {
            row: row as u64,
            name: name.to_string(),
            canonical_name,
            meet_name: cell(&text.meet_name),
            date,
            division: cell(&text.division),
            federation: cell(&text.federation),
            country: cell(&text.country),
            weight_class_kg,
            squat_kg,
            bench_kg,
            deadlift_kg,
            total_kg,
            dots,
            bodyweight_kg,
            age,
            days_old,
        }
    }
}
