//! Free-text name search results.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// One record returned by a name search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub total_kg: f64,
    pub squat_kg: f64,
    pub bench_kg: f64,
    pub deadlift_kg: f64,
    pub dots: f64,
    pub weight_class_kg: f64,
    pub age: f64,
    pub division: String,
    pub meet_name: String,
    pub date: String,
}

impl From<&Record> for SearchHit {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            total_kg: record.total_kg,
            squat_kg: record.squat_kg,
            bench_kg: record.bench_kg,
            deadlift_kg: record.deadlift_kg,
            dots: record.dots,
            weight_class_kg: record.weight_class_kg,
            age: record.age,
            division: record.division.clone(),
            meet_name: record.meet_name.clone(),
            date: record.date.clone(),
        }
    }
}

/// One page of search results, best Dots first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub term: String,
    /// Number of matching records before pagination.
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
    pub lifters: Vec<SearchHit>,
}
