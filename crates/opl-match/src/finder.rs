//! Candidate discovery.

use chrono::NaiveDate;
use opl_index::{NameIndex, search_variants};
use opl_model::{Candidate, MatchType, Record};

use crate::hints::LookupHints;
use crate::observer::LookupObserver;
use crate::scorer::Scorer;

/// Finds and ranks the records a name could refer to.
#[derive(Debug, Clone, Default)]
pub struct CandidateFinder {
    scorer: Scorer,
}

impl CandidateFinder {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Candidates for free-text input.
    ///
    /// Normalizer variants are tried in order and the first variant that
    /// yields any candidate wins. No hit under any variant is an empty list.
    pub fn find_for_input(
        &self,
        index: &NameIndex,
        input: &str,
        hints: &LookupHints,
        max_candidates: usize,
        observer: &dyn LookupObserver,
    ) -> Vec<Candidate> {
        for key in search_variants(input) {
            let candidates = self.find(index, &key, hints, max_candidates);
            observer.variant_tried(input, &key, candidates.len());
            if !candidates.is_empty() {
                return candidates;
            }
        }
        Vec::new()
    }

    /// Candidates for one canonical key.
    ///
    /// - a key holding exactly one record returns it unscored with score 1.0
    /// - a key holding several records returns them all, scored
    /// - otherwise every record under a longer key starting with `key` is
    ///   scored with similarity `len(key) / len(longer key)`
    ///
    /// Results are sorted by descending score, ties keeping index order,
    /// and truncated to `max_candidates`.
    pub fn find(
        &self,
        index: &NameIndex,
        key: &str,
        hints: &LookupHints,
        max_candidates: usize,
    ) -> Vec<Candidate> {
        if key.is_empty() {
            return Vec::new();
        }
        let as_of = hints.as_of.unwrap_or_else(|| index.as_of());

        if let Some(records) = index.get(key) {
            if let [record] = records {
                return vec![Candidate {
                    record: record.clone(),
                    score: 1.0,
                    name_similarity: 1.0,
                    match_type: MatchType::Exact,
                }];
            }
            let candidates = records
                .iter()
                .map(|record| self.candidate(record, 1.0, MatchType::ExactDuplicate, hints, as_of))
                .collect();
            return rank(candidates, max_candidates);
        }

        let key_len = key.chars().count() as f64;
        let candidates = index
            .with_prefix(key)
            .flat_map(|(longer, records)| {
                let similarity = key_len / longer.chars().count() as f64;
                records.iter().map(move |record| {
                    self.candidate(record, similarity, MatchType::PrefixMatch, hints, as_of)
                })
            })
            .collect();
        rank(candidates, max_candidates)
    }

    fn candidate(
        &self,
        record: &Record,
        name_similarity: f64,
        match_type: MatchType,
        hints: &LookupHints,
        as_of: NaiveDate,
    ) -> Candidate {
        Candidate {
            record: record.clone(),
            score: self.scorer.score(record, name_similarity, hints, as_of),
            name_similarity,
            match_type,
        }
    }
}

fn rank(mut candidates: Vec<Candidate>, max_candidates: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(max_candidates);
    candidates
}
