//! A single competition performance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resolution::LifterStats;

/// `days_old` sentinel for records whose date is missing or unparsable.
pub const DAYS_OLD_UNKNOWN: i64 = 9999;

/// One row of the results dataset after preprocessing.
///
/// Numeric fields are never absent: anything missing or unparsable in the
/// source has already been defaulted to `0.0` by the index builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-based row position in the source table.
    pub row: u64,
    /// Display name exactly as it appears in the dataset.
    pub name: String,
    /// Canonical form of `name`, used as the index key.
    pub canonical_name: String,
    pub meet_name: String,
    /// Meet date as `YYYY-MM-DD` (may be empty).
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
    /// Days between `date` and the day the index was built.
    pub days_old: i64,
}

impl Record {
    /// Whether the record carries any date text at all.
    pub fn has_date(&self) -> bool {
        !self.date.trim().is_empty()
    }

    /// Parse the meet date, if it is a valid `YYYY-MM-DD` value.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_meet_date(&self.date)
    }

    /// Lift statistics and meet context for result payloads.
    pub fn stats(&self) -> LifterStats {
        LifterStats {
            name: self.name.clone(),
            squat_kg: self.squat_kg,
            bench_kg: self.bench_kg,
            deadlift_kg: self.deadlift_kg,
            total_kg: self.total_kg,
            dots: self.dots,
            weight_class_kg: self.weight_class_kg,
            meet_name: self.meet_name.clone(),
            date: self.date.clone(),
            division: self.division.clone(),
            federation: self.federation.clone(),
            country: self.country.clone(),
        }
    }
}

/// Parse a dataset date (`YYYY-MM-DD`).
pub fn parse_meet_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_iso_dates_only() {
        assert_eq!(
            parse_meet_date("2023-06-10"),
            NaiveDate::from_ymd_opt(2023, 6, 10)
        );
        assert_eq!(parse_meet_date(" 2023-06-10 "), NaiveDate::from_ymd_opt(2023, 6, 10));
        assert_eq!(parse_meet_date("10/06/2023"), None);
        assert_eq!(parse_meet_date(""), None);
    }
}
