//! End-to-end matching scenarios against a small index.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use opl_index::{IndexBuilder, NameIndex};
use opl_match::{
    BatchConfig, BatchResolver, CandidateFinder, LookupHints, LookupObserver, MatchError,
    NoopObserver, Resolver, ScoringConfig, Scorer, exact_lookup, search,
};
use opl_model::{Confidence, MatchType, Resolution};
use polars::df;

fn index() -> NameIndex {
    let df = df!(
        "Name" => [
            "John Smith",
            "Ryan Jordan #1",
            "Ryan Jordan #2",
            "Jane Doe",
            "Jane Doe",
            "O'Brien, Sean",
            "Alex Strong",
        ],
        "WeightClassKg" => ["90", "83", "105", "63", "72", "100", "120+"],
        "TotalKg" => ["700", "650", "690", "400", "420", "800", "900"],
        "Dots" => ["450", "430", "410", "460", "470", "500", "520"],
        "Date" => ["2025-05-01", "2025-01-01", "2021-01-01", "2025-02-01", "2020-02-01", "2024-12-01", "2025-04-01"],
        "MeetName" => ["Nationals", "Open", "Open", "Classic", "Classic", "Worlds", "Pro"],
    )
    .unwrap();
    let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    IndexBuilder::new(as_of, "stamp").build(&df).unwrap().0
}

#[derive(Default)]
struct Recorder {
    keys: Mutex<Vec<String>>,
}

impl LookupObserver for Recorder {
    fn variant_tried(&self, _input: &str, key: &str, _hits: usize) {
        self.keys.lock().unwrap().push(key.to_string());
    }
}

fn resolve(index: &NameIndex, name: &str, hints: &LookupHints) -> Resolution {
    let finder = CandidateFinder::default();
    let candidates = finder.find_for_input(index, name, hints, 10, &NoopObserver);
    Resolver::default().resolve(&candidates)
}

#[test]
fn unique_exact_name_is_high_confidence() {
    let index = index();
    let candidates = CandidateFinder::default().find_for_input(
        &index,
        "John Smith",
        &LookupHints::new(),
        10,
        &NoopObserver,
    );
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].match_type, MatchType::Exact);
    assert_eq!(candidates[0].score, 1.0);

    let resolution = resolve(&index, "John Smith", &LookupHints::new());
    assert_eq!(resolution.confidence(), Confidence::High);
    assert_eq!(resolution.record().unwrap().total_kg, 700.0);
}

#[test]
fn disambiguated_names_resolve_low_with_one_alternative() {
    let index = index();
    let hints = LookupHints::new().with_weight_class(83.0);
    let candidates =
        CandidateFinder::default().find_for_input(&index, "Ryan Jordan", &hints, 10, &NoopObserver);
    assert_eq!(candidates.len(), 2);
    assert!(candidates.iter().all(|c| c.match_type == MatchType::PrefixMatch));
    assert!(candidates[0].score >= candidates[1].score);
    assert_eq!(candidates[0].record.name, "Ryan Jordan #1");
    // "ryanjordan" is 10 of the 12 characters in "ryanjordan#1".
    assert!((candidates[0].name_similarity - 10.0 / 12.0).abs() < 1e-12);

    let resolution = Resolver::default().resolve(&candidates);
    assert_eq!(resolution.confidence(), Confidence::Low);
    assert_eq!(resolution.alternatives().len(), 1);
    assert_eq!(resolution.alternatives()[0].name, "Ryan Jordan #2");
    assert_eq!(resolution.warning(), Some("Multiple matches found (2 candidates)"));
}

#[test]
fn duplicate_names_are_scored_and_ranked() {
    let index = index();
    let hints = LookupHints::new().with_weight_class(72.0);
    let candidates =
        CandidateFinder::default().find_for_input(&index, "jane doe", &hints, 10, &NoopObserver);
    assert_eq!(candidates.len(), 2);
    assert!(candidates.iter().all(|c| c.match_type == MatchType::ExactDuplicate));
    assert_eq!(candidates[0].record.weight_class_kg, 72.0);
}

#[test]
fn max_candidates_truncates() {
    let index = index();
    let candidates = CandidateFinder::default().find_for_input(
        &index,
        "Ryan Jordan",
        &LookupHints::new(),
        1,
        &NoopObserver,
    );
    assert_eq!(candidates.len(), 1);
}

#[test]
fn first_matching_variant_wins() {
    let index = index();
    let recorder = Recorder::default();
    let candidates = CandidateFinder::default().find_for_input(
        &index,
        "O'Brien, Sean",
        &LookupHints::new(),
        10,
        &recorder,
    );
    // The index key keeps the comma, so the comma-stripping variant misses
    // and the spaces-only variant hits.
    assert_eq!(candidates.len(), 1);
    assert_eq!(
        *recorder.keys.lock().unwrap(),
        vec!["o'briensean".to_string(), "o'brien,sean".to_string()]
    );
}

#[test]
fn unknown_name_is_not_found() {
    let index = index();
    assert_eq!(
        resolve(&index, "Nobody Here", &LookupHints::new()),
        Resolution::NotFound
    );
    let envelope = Resolution::NotFound.envelope();
    assert!(!envelope.found);
    assert_eq!(envelope.stats.total_kg, 0.0);
    assert_eq!(envelope.stats.dots, 0.0);
}

#[test]
fn batch_uses_exact_keys_only() {
    let index = index();
    let resolver = BatchResolver::new(BatchConfig::default(), Arc::new(NoopObserver));
    let results = resolver.resolve(&index, &["Jane Doe", "Ryan Jordan", "John Smith", "Jane Doe"]);

    assert_eq!(results.len(), 3);
    let jane = &results["Jane Doe"];
    assert_eq!(jane.confidence(), Confidence::Exact);
    // First record in dataset order, not the best scored one.
    assert_eq!(jane.record().unwrap().weight_class_kg, 63.0);
    // Prefix hits do not count in batches.
    assert_eq!(results["Ryan Jordan"], Resolution::NotFound);
    let zeroed = results["Ryan Jordan"].envelope();
    assert_eq!(zeroed.stats.squat_kg, 0.0);
    assert_eq!(zeroed.stats.bench_kg, 0.0);
    assert_eq!(zeroed.stats.deadlift_kg, 0.0);
    assert_eq!(zeroed.stats.total_kg, 0.0);
}

#[test]
fn exact_lookup_tries_variants() {
    let index = index();
    let resolution = exact_lookup(&index, "O'Brien, Sean", &NoopObserver);
    assert_eq!(resolution.record().unwrap().total_kg, 800.0);
}

#[test]
fn search_sorts_by_dots_and_pages() {
    let index = index();
    let page = search(&index, "jo", 100, 0).unwrap();
    // johnsmith, ryanjordan#1, ryanjordan#2
    assert_eq!(page.total_count, 3);
    let names: Vec<&str> = page.lifters.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["John Smith", "Ryan Jordan #1", "Ryan Jordan #2"]);

    let second = search(&index, "jo", 1, 1).unwrap();
    assert_eq!(second.lifters.len(), 1);
    assert_eq!(second.lifters[0].name, "Ryan Jordan #1");
    assert_eq!(search(&index, "jo", 500, 0).unwrap().limit, 100);
}

#[test]
fn search_rejects_short_terms() {
    let index = index();
    assert!(matches!(search(&index, " j ", 10, 0), Err(MatchError::InvalidQuery(_))));
    assert!(search(&index, "zz", 10, 0).unwrap().lifters.is_empty());
}

#[test]
fn custom_thresholds_change_tiers() {
    let index = index();
    let config = ScoringConfig {
        max_candidates: 5,
        ..ScoringConfig::default()
    };
    let finder = CandidateFinder::new(Scorer::new(config.clone()));
    let candidates = finder.find_for_input(
        &index,
        "Alex",
        &LookupHints::new().with_weight_class(110.0),
        config.max_candidates,
        &NoopObserver,
    );
    assert_eq!(candidates.len(), 1);
    // 0.5 * 4/10 + 0.3 * 0.5 + 0.1 + 0.1
    assert!((candidates[0].score - 0.55).abs() < 1e-9);

    let strict = Resolver::default().resolve(&candidates);
    assert_eq!(strict.confidence(), Confidence::Low);

    let mut lenient = config;
    lenient.thresholds.medium = 0.5;
    let resolution = Resolver::from_config(&lenient).resolve(&candidates);
    assert_eq!(resolution.confidence(), Confidence::Medium);
}

#[test]
fn recency_follows_as_of_hint_instead_of_build_date() {
    let index = index();
    let finder = CandidateFinder::default();
    let best = |hints: &LookupHints| {
        finder.find_for_input(&index, "Jane Doe", hints, 10, &NoopObserver)[0].clone()
    };

    // 2025-02-01 is recent at the 2025-06-01 build date.
    let at_build = best(&LookupHints::new());
    let later = best(&LookupHints::new().with_as_of(NaiveDate::from_ymd_opt(2027, 6, 1).unwrap()));

    assert_eq!(at_build.record.date, "2025-02-01");
    assert_eq!(later.record.date, "2025-02-01");
    assert!((at_build.score - 0.7).abs() < 1e-9);
    assert!((later.score - 0.65).abs() < 1e-9);
}
