//! Resolver outcomes and the result envelope handed to collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::record::Record;

/// Trust tier attached to a resolved lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// First record under an exact key (batch lookups only).
    Exact,
    High,
    Medium,
    Low,
    NotFound,
}

impl Confidence {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::NotFound => "not_found",
        }
    }

    /// Human-readable description of the tier.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Exact => "exact name match",
            Self::High => "high confidence - single strong match",
            Self::Medium => "medium confidence - verify accuracy",
            Self::Low => "low confidence - several plausible matches",
            Self::NotFound => "no matching lifter",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-known lift statistics for a lifter, plus the meet they came from.
///
/// `LifterStats::default()` is the zero-valued "not found" payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifterStats {
    pub name: String,
    pub squat_kg: f64,
    pub bench_kg: f64,
    pub deadlift_kg: f64,
    pub total_kg: f64,
    pub dots: f64,
    pub weight_class_kg: f64,
    pub meet_name: String,
    pub date: String,
    pub division: String,
    pub federation: String,
    pub country: String,
}

/// A runner-up match reported alongside a low-confidence result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub meet_name: String,
    pub date: String,
    pub weight_class_kg: f64,
    pub total_kg: f64,
    pub score: f64,
}

impl From<&Candidate> for Alternative {
    fn from(candidate: &Candidate) -> Self {
        let record = &candidate.record;
        Self {
            name: record.name.clone(),
            meet_name: record.meet_name.clone(),
            date: record.date.clone(),
            weight_class_kg: record.weight_class_kg,
            total_kg: record.total_kg,
            score: candidate.score,
        }
    }
}

/// Terminal state of a single lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    NotFound,
    /// First record of the first exact-key hit (batch lookups).
    Exact(Record),
    HighConfidence(Record),
    MediumConfidence {
        record: Record,
        warning: String,
    },
    LowConfidence {
        record: Record,
        alternatives: Vec<Alternative>,
        warning: String,
    },
}

impl Resolution {
    pub fn confidence(&self) -> Confidence {
        match self {
            Self::NotFound => Confidence::NotFound,
            Self::Exact(_) => Confidence::Exact,
            Self::HighConfidence(_) => Confidence::High,
            Self::MediumConfidence { .. } => Confidence::Medium,
            Self::LowConfidence { .. } => Confidence::Low,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// The chosen record, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::NotFound => None,
            Self::Exact(record) | Self::HighConfidence(record) => Some(record),
            Self::MediumConfidence { record, .. } | Self::LowConfidence { record, .. } => {
                Some(record)
            }
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::MediumConfidence { warning, .. } | Self::LowConfidence { warning, .. } => {
                Some(warning)
            }
            _ => None,
        }
    }

    pub fn alternatives(&self) -> &[Alternative] {
        match self {
            Self::LowConfidence { alternatives, .. } => alternatives,
            _ => &[],
        }
    }

    /// Flatten into the serializable result envelope.
    pub fn envelope(&self) -> LookupEnvelope {
        LookupEnvelope::from(self)
    }
}

/// Serializable lookup result: `{found, confidence, stats, warning?, alternatives?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupEnvelope {
    pub found: bool,
    pub confidence: Confidence,
    pub stats: LifterStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,
}

impl From<&Resolution> for LookupEnvelope {
    fn from(resolution: &Resolution) -> Self {
        Self {
            found: resolution.is_found(),
            confidence: resolution.confidence(),
            stats: resolution.record().map(Record::stats).unwrap_or_default(),
            warning: resolution.warning().map(str::to_string),
            alternatives: resolution.alternatives().to_vec(),
        }
    }
}
