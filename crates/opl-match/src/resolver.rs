//! Confidence tiering of ranked candidates.

use opl_model::{Alternative, Candidate, Resolution};

use crate::config::{ScoringConfig, Thresholds};

const MEDIUM_WARNING: &str = "Possible match, verify accuracy";

/// Turns ranked candidates into a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    thresholds: Thresholds,
    max_alternatives: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl Resolver {
    pub fn new(thresholds: Thresholds, max_alternatives: usize) -> Self {
        Self {
            thresholds,
            max_alternatives,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.thresholds, config.max_alternatives)
    }

    /// Classify candidates already sorted best first.
    ///
    /// A lone candidate above the high threshold is trusted outright and a
    /// lone candidate above the medium threshold is returned with a
    /// warning. Anything else is low confidence: the best record plus the
    /// next few as alternatives.
    pub fn resolve(&self, candidates: &[Candidate]) -> Resolution {
        match candidates {
            [] => Resolution::NotFound,
            [only] if only.score > self.thresholds.high => {
                Resolution::HighConfidence(only.record.clone())
            }
            [only] if only.score > self.thresholds.medium => Resolution::MediumConfidence {
                record: only.record.clone(),
                warning: MEDIUM_WARNING.to_string(),
            },
            [best, rest @ ..] => Resolution::LowConfidence {
                record: best.record.clone(),
                alternatives: rest
                    .iter()
                    .take(self.max_alternatives)
                    .map(Alternative::from)
                    .collect(),
                warning: low_warning(candidates.len()),
            },
        }
    }
}

fn low_warning(count: usize) -> String {
    if count == 1 {
        "Weak match, verify accuracy (1 candidate)".to_string()
    } else {
        format!("Multiple matches found ({count} candidates)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opl_model::{Confidence, DAYS_OLD_UNKNOWN, MatchType, Record};

    fn candidate(name: &str, score: f64) -> Candidate {
        Candidate {
            record: Record {
                row: 0,
                name: name.into(),
                canonical_name: name.to_lowercase(),
                meet_name: String::new(),
                date: String::new(),
                division: String::new(),
                federation: String::new(),
                country: String::new(),
                weight_class_kg: 0.0,
                squat_kg: 0.0,
                bench_kg: 0.0,
                deadlift_kg: 0.0,
                total_kg: 0.0,
                dots: 0.0,
                bodyweight_kg: 0.0,
                age: 0.0,
                days_old: DAYS_OLD_UNKNOWN,
            },
            score,
            name_similarity: 1.0,
            match_type: MatchType::PrefixMatch,
        }
    }

    #[test]
    fn test_single_candidate_boundaries() {
        let resolver = Resolver::default();
        let tier = |score| resolver.resolve(&[candidate("a", score)]).confidence();
        assert_eq!(tier(1.0), Confidence::High);
        assert_eq!(tier(0.9000001), Confidence::High);
        assert_eq!(tier(0.9), Confidence::Medium);
        assert_eq!(tier(0.7000001), Confidence::Medium);
        assert_eq!(tier(0.7), Confidence::Low);
        assert_eq!(tier(0.1), Confidence::Low);
    }

    #[test]
    fn test_medium_warning() {
        let resolution = Resolver::default().resolve(&[candidate("a", 0.8)]);
        assert_eq!(resolution.warning(), Some("Possible match, verify accuracy"));
    }

    #[test]
    fn test_single_weak_candidate() {
        let resolution = Resolver::default().resolve(&[candidate("a", 0.5)]);
        assert_eq!(resolution.warning(), Some("Weak match, verify accuracy (1 candidate)"));
        assert!(resolution.alternatives().is_empty());
    }

    #[test]
    fn test_multiple_candidates_are_low_with_capped_alternatives() {
        let candidates: Vec<Candidate> = (0..6)
            .map(|i| candidate(&format!("n{i}"), 0.99 - f64::from(i) * 0.01))
            .collect();
        let resolution = Resolver::default().resolve(&candidates);
        assert_eq!(resolution.confidence(), Confidence::Low);
        assert_eq!(resolution.record().unwrap().name, "n0");
        let names: Vec<&str> = resolution
            .alternatives()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["n1", "n2", "n3"]);
        assert_eq!(resolution.warning(), Some("Multiple matches found (6 candidates)"));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(Resolver::default().resolve(&[]), Resolution::NotFound);
    }
}
