//! Composite match scoring.

use chrono::NaiveDate;
use opl_model::Record;

use crate::config::ScoringConfig;
use crate::hints::LookupHints;

/// Completeness sub-score parts. They sum to 1.0.
const COMPLETE_TOTAL: f64 = 0.5;
const COMPLETE_WEIGHT_CLASS: f64 = 0.3;
const COMPLETE_DATE: f64 = 0.2;

/// Weighted contribution of each factor to a score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub name_similarity: f64,
    pub weight_class: f64,
    pub recency: f64,
    pub completeness: f64,
}

impl ScoreBreakdown {
    /// Sum of the components, clamped to `[0, 1]`.
    pub fn total(&self) -> f64 {
        (self.name_similarity + self.weight_class + self.recency + self.completeness)
            .clamp(0.0, 1.0)
    }
}

/// Scores a record against a searched name and lookup hints.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Composite score in `[0, 1]`.
    ///
    /// `as_of` is the reference date for recency.
    pub fn score(
        &self,
        record: &Record,
        name_similarity: f64,
        hints: &LookupHints,
        as_of: NaiveDate,
    ) -> f64 {
        self.breakdown(record, name_similarity, hints, as_of).total()
    }

    /// Per-factor contributions behind [`Scorer::score`].
    pub fn breakdown(
        &self,
        record: &Record,
        name_similarity: f64,
        hints: &LookupHints,
        as_of: NaiveDate,
    ) -> ScoreBreakdown {
        let weights = &self.config.weights;
        ScoreBreakdown {
            name_similarity: name_similarity * weights.name_similarity,
            weight_class: self.weight_class_proximity(record.weight_class_kg, hints.weight_class_kg)
                * weights.weight_class,
            recency: self.recency(record, as_of) * weights.recency,
            completeness: completeness(record) * weights.completeness,
        }
    }

    /// 1.0 at equal classes falling linearly to 0.0 at the window edge.
    /// Zero unless both values are positive.
    fn weight_class_proximity(&self, record_kg: f64, hint_kg: f64) -> f64 {
        if record_kg <= 0.0 || hint_kg <= 0.0 {
            return 0.0;
        }
        let diff = (record_kg - hint_kg).abs();
        (1.0 - diff / self.config.weight_class_window_kg).max(0.0)
    }

    fn recency(&self, record: &Record, as_of: NaiveDate) -> f64 {
        let Some(date) = record.parsed_date() else {
            return 0.0;
        };
        let days = (as_of - date).num_days();
        if days < self.config.recent_days {
            1.0
        } else if days < self.config.stale_days {
            0.5
        } else {
            0.0
        }
    }
}

fn completeness(record: &Record) -> f64 {
    let mut sub_score = 0.0;
    if record.total_kg > 0.0 {
        sub_score += COMPLETE_TOTAL;
    }
    if record.weight_class_kg > 0.0 {
        sub_score += COMPLETE_WEIGHT_CLASS;
    }
    if record.has_date() {
        sub_score += COMPLETE_DATE;
    }
    sub_score
}
