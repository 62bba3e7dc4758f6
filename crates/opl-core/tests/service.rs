//! Lookup service behavior over a fake remote source.

use std::fs;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use opl_core::{LifterLookup, LookupConfig, LookupError};
use opl_match::LookupHints;
use opl_model::{Confidence, Resolution};
use opl_store::{FetchedArchive, RemoteSource, StoreConfig, StoreError, fingerprint};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const CSV_V1: &str = "Name,WeightClassKg,Best3SquatKg,Best3BenchKg,Best3DeadliftKg,TotalKg,Dots,Date,MeetName,Federation\n\
                      John Smith,93,250,170,280,700,455.2,2025-03-01,Nationals,USAPL\n\
                      Ryan Jordan #1,83,220,150,260,630,430.1,2024-10-01,Open,USPA\n\
                      Ryan Jordan #2,105,240,160,270,670,410.0,2019-10-01,Open,USPA\n\
                      Jane Doe,63,140,80,170,390,470.3,2025-01-11,Classic,IPF\n";

const CSV_V2: &str = "Name,WeightClassKg,TotalKg,Dots,Date\n\
                      John Smith,93,720,460.0,2025-05-01\n\
                      Newcomer Lifter,74,600,440.0,2025-05-02\n";

#[derive(Clone)]
struct FakeSource {
    state: Arc<Mutex<(Vec<u8>, String, bool)>>,
}

impl FakeSource {
    fn new(csv: &str, version: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new((zip_csv(csv), fingerprint(version, "v"), true))),
        }
    }

    fn publish(&self, csv: &str, version: &str) {
        let mut state = self.state.lock().unwrap();
        state.0 = zip_csv(csv);
        state.1 = fingerprint(version, "v");
    }

    fn set_online(&self, online: bool) {
        self.state.lock().unwrap().2 = online;
    }
}

impl RemoteSource for FakeSource {
    fn fingerprint(&self) -> opl_store::Result<String> {
        let state = self.state.lock().unwrap();
        if !state.2 {
            return Err(StoreError::Network("offline".to_string()));
        }
        Ok(state.1.clone())
    }

    fn fetch(&self) -> opl_store::Result<FetchedArchive> {
        let state = self.state.lock().unwrap();
        if !state.2 {
            return Err(StoreError::Network("offline".to_string()));
        }
        Ok(FetchedArchive {
            data: state.0.clone(),
            fingerprint: state.1.clone(),
        })
    }
}

fn zip_csv(csv: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("openpowerlifting.csv", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(csv.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn lookup(dir: &TempDir, source: &FakeSource) -> LifterLookup {
    let config = LookupConfig {
        store: StoreConfig::with_cache_dir(dir.path()),
        ..LookupConfig::default()
    };
    LifterLookup::with_source(config, Box::new(source.clone()))
}

#[test]
fn lookups_before_any_download_report_dataset_missing() {
    let dir = TempDir::new().unwrap();
    let service = lookup(&dir, &FakeSource::new(CSV_V1, "1"));

    let err = service.load().unwrap_err();
    assert!(err.is_dataset_missing());
    assert!(matches!(
        service.resolve("John Smith", &LookupHints::new()),
        Err(LookupError::Store(StoreError::DatasetMissing { .. }))
    ));
    assert!(!service.status().data_loaded);
}

#[test]
fn update_then_resolve() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let service = lookup(&dir, &source);

    assert!(service.update_if_needed());
    assert!(!service.update_if_needed());

    let resolution = service.resolve("John Smith", &LookupHints::new()).unwrap();
    assert_eq!(resolution.confidence(), Confidence::High);
    let envelope = resolution.envelope();
    assert!(envelope.found);
    assert_eq!(envelope.stats.total_kg, 700.0);
    assert_eq!(envelope.stats.squat_kg, 250.0);
    assert_eq!(envelope.stats.federation, "USAPL");

    let ryan = service
        .resolve("Ryan Jordan", &LookupHints::new().with_weight_class(83.0))
        .unwrap();
    assert_eq!(ryan.confidence(), Confidence::Low);
    assert_eq!(ryan.record().unwrap().name, "Ryan Jordan #1");
    assert_eq!(ryan.alternatives().len(), 1);

    let status = service.status();
    assert!(status.data_loaded);
    assert_eq!(status.total_records, 4);
    assert_eq!(status.indexed_names, 4);
    assert_eq!(status.fingerprint, Some(fingerprint("1", "v")));
    assert!(status.cache_size_mb > 0.0);
}

#[test]
fn persisted_index_gives_identical_results_after_restart() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let first = lookup(&dir, &source);
    assert!(first.update_if_needed());
    let hints = LookupHints::new().with_weight_class(90.0);
    let before = first.find_candidates("Ryan Jordan", &hints).unwrap();

    let binary = first.store().paths().index_binary_file();
    assert!(binary.is_file());
    let written = fs::metadata(&binary).unwrap().modified().unwrap();

    let second = lookup(&dir, &source);
    let index = second.load().unwrap();
    assert_eq!(*index, *first.load().unwrap());
    assert_eq!(second.find_candidates("Ryan Jordan", &hints).unwrap(), before);
    // Reused, not rewritten.
    assert_eq!(fs::metadata(&binary).unwrap().modified().unwrap(), written);
}

#[test]
fn corrupt_index_is_rebuilt_transparently() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let first = lookup(&dir, &source);
    assert!(first.update_if_needed());
    let expected = first.resolve("Jane Doe", &LookupHints::new()).unwrap();

    fs::write(first.store().paths().index_binary_file(), b"not an index").unwrap();

    let second = lookup(&dir, &source);
    assert_eq!(second.resolve("Jane Doe", &LookupHints::new()).unwrap(), expected);
}

#[test]
fn refresh_publishes_a_new_snapshot() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let service = lookup(&dir, &source);
    assert!(service.update_if_needed());
    let old = service.load().unwrap();

    source.publish(CSV_V2, "2");
    assert!(service.update_if_needed());

    // A reader holding the old snapshot keeps seeing the old data.
    assert!(old.get("ryanjordan#1").is_some());
    assert!(old.get("newcomerlifter").is_none());

    let new = service.load().unwrap();
    assert!(new.get("newcomerlifter").is_some());
    assert!(new.get("ryanjordan#1").is_none());
    let john = service.resolve("John Smith", &LookupHints::new()).unwrap();
    assert_eq!(john.record().unwrap().total_kg, 720.0);
}

#[test]
fn failed_refresh_keeps_serving() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let service = lookup(&dir, &source);
    assert!(service.update_if_needed());

    source.set_online(false);
    assert!(!service.update_if_needed());
    assert!(matches!(
        service.force_update(),
        Err(LookupError::Store(StoreError::Network(_)))
    ));
    assert!(service.resolve("Jane Doe", &LookupHints::new()).unwrap().is_found());
}

#[test]
fn batch_and_search() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let service = lookup(&dir, &source);
    assert!(service.update_if_needed());

    let results = service
        .resolve_batch(&["John Smith", "Ryan Jordan", "jane doe"])
        .unwrap();
    assert_eq!(results["John Smith"].confidence(), Confidence::Exact);
    assert_eq!(results["jane doe"].confidence(), Confidence::Exact);
    assert_eq!(results["Ryan Jordan"], Resolution::NotFound);

    let page = service.search("ryan", 10, 0).unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.lifters[0].name, "Ryan Jordan #1");
    assert!(matches!(
        service.search("r", 10, 0),
        Err(LookupError::InvalidQuery(_))
    ));
}

#[test]
fn explain_matches_score() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let service = lookup(&dir, &source);
    assert!(service.update_if_needed());

    let hints = LookupHints::new().with_weight_class(83.0);
    for candidate in service.find_candidates("Ryan Jordan", &hints).unwrap() {
        let breakdown = service.explain(&candidate, &hints).unwrap().unwrap();
        assert!((breakdown.total() - candidate.score).abs() < 1e-12);
    }
    let exact = service.find_candidates("John Smith", &hints).unwrap();
    assert!(service.explain(&exact[0], &hints).unwrap().is_none());
}

#[test]
fn failed_commit_keeps_table_and_index_consistent_after_restart() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::new(CSV_V1, "1");
    let first = lookup(&dir, &source);
    assert!(first.update_if_needed());

    let blocker = dir.path().join("metadata.json.tmp");
    fs::create_dir(&blocker).unwrap();
    source.publish(CSV_V2, "2");
    assert!(first.force_update().is_err());
    assert_eq!(first.store().load().unwrap().height(), 4);

    let restarted = lookup(&dir, &source);
    let index = restarted.load().unwrap();
    assert_eq!(index.record_count(), 4);
    let john = restarted.resolve("John Smith", &LookupHints::new()).unwrap();
    assert_eq!(john.envelope().stats.total_kg, 700.0);
    assert_eq!(
        restarted.resolve("Newcomer Lifter", &LookupHints::new()).unwrap(),
        Resolution::NotFound
    );

    fs::remove_dir(&blocker).unwrap();
    restarted.force_update().unwrap();
    assert_eq!(restarted.load().unwrap().record_count(), 2);
}
