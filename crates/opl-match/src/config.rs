//! Scoring and batch configuration.
//!
//! All fields have defaults so partial TOML tables deserialize.

use serde::{Deserialize, Serialize};

/// Weight of each score component. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub name_similarity: f64,
    pub weight_class: f64,
    /// Full recency weight; records inside the stale window earn half.
    pub recency: f64,
    pub completeness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name_similarity: 0.5,
            weight_class: 0.3,
            recency: 0.1,
            completeness: 0.1,
        }
    }
}

/// Confidence tier cut-offs. A score must be strictly above a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 0.9,
            medium: 0.7,
        }
    }
}

/// Scoring, candidate and resolver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Weight-class difference (kg) at which proximity reaches zero.
    pub weight_class_window_kg: f64,
    /// Records younger than this many days earn the full recency weight.
    pub recent_days: i64,
    /// Records younger than this many days earn half the recency weight.
    pub stale_days: i64,
    pub thresholds: Thresholds,
    pub max_candidates: usize,
    pub max_alternatives: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            weight_class_window_kg: 20.0,
            recent_days: 365,
            stale_days: 1095,
            thresholds: Thresholds::default(),
            max_candidates: 10,
            max_alternatives: 3,
        }
    }
}

/// Batch worker pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_workers: 3 }
    }
}
