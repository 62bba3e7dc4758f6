//! Batch lookups on a bounded worker pool.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use opl_index::{NameIndex, search_variants};
use opl_model::Resolution;
use tracing::info_span;

use crate::config::BatchConfig;
use crate::observer::LookupObserver;

/// Exact-key lookup used by batches.
///
/// Returns the first record of the first variant whose key exists, with no
/// scoring and no prefix fallback.
pub fn exact_lookup(index: &NameIndex, input: &str, observer: &dyn LookupObserver) -> Resolution {
    for key in search_variants(input) {
        let hit = index.get(&key).and_then(<[_]>::first);
        observer.variant_tried(input, &key, usize::from(hit.is_some()));
        if let Some(record) = hit {
            return Resolution::Exact(record.clone());
        }
    }
    Resolution::NotFound
}

/// Resolves many names concurrently against one index snapshot.
#[derive(Clone)]
pub struct BatchResolver {
    max_workers: usize,
    observer: Arc<dyn LookupObserver>,
}

impl std::fmt::Debug for BatchResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchResolver")
            .field("max_workers", &self.max_workers)
            .finish_non_exhaustive()
    }
}

impl BatchResolver {
    pub fn new(config: BatchConfig, observer: Arc<dyn LookupObserver>) -> Self {
        Self {
            max_workers: config.max_workers,
            observer,
        }
    }

    /// Look up every name, keyed by the input string.
    ///
    /// Duplicate inputs are looked up once. A worker that fails on a name
    /// reports it as not found without affecting the rest of the batch.
    pub fn resolve<S: AsRef<str>>(
        &self,
        index: &NameIndex,
        names: &[S],
    ) -> BTreeMap<String, Resolution> {
        self.resolve_with(names, |name| exact_lookup(index, name, self.observer.as_ref()))
    }

    fn resolve_with<S, F>(&self, names: &[S], lookup: F) -> BTreeMap<String, Resolution>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Resolution + Sync,
    {
        let mut seen = BTreeSet::new();
        let unique: Vec<&str> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| seen.insert(*name))
            .collect();
        let _span = info_span!("resolve_batch", names = unique.len()).entered();

        let outcomes = run_isolated(&unique, self.max_workers, |name| lookup(name));

        unique
            .into_iter()
            .zip(outcomes)
            .map(|(name, outcome)| {
                let resolution = outcome.unwrap_or_else(|reason| {
                    self.observer.worker_failed(name, &reason);
                    Resolution::NotFound
                });
                self.observer.resolved(name, &resolution);
                (name.to_string(), resolution)
            })
            .collect()
    }
}

/// Run `work` over `inputs` on at most `max_workers` threads.
///
/// Results come back in input order. A panicking task yields `Err` with the
/// panic message; the worker carries on with the next input.
fn run_isolated<T, R, F>(inputs: &[T], max_workers: usize, work: F) -> Vec<Result<R, String>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if inputs.is_empty() {
        return Vec::new();
    }
    let workers = max_workers.clamp(1, inputs.len());
    let (job_tx, job_rx) = unbounded::<usize>();
    let (result_tx, result_rx) = unbounded::<(usize, Result<R, String>)>();
    for position in 0..inputs.len() {
        if job_tx.send(position).is_err() {
            break;
        }
    }
    drop(job_tx);

    let work = &work;
    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for position in job_rx {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| work(&inputs[position])))
                        .map_err(panic_message);
                    if result_tx.send((position, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<Result<R, String>>> = inputs.iter().map(|_| None).collect();
    for (position, outcome) in result_rx {
        slots[position] = Some(outcome);
    }
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err("worker exited before reporting".to_string())))
        .collect()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::observer::NoopObserver;

    #[derive(Default)]
    struct FailureLog {
        failed: Mutex<Vec<String>>,
    }

    impl LookupObserver for FailureLog {
        fn worker_failed(&self, input: &str, _reason: &str) {
            self.failed.lock().unwrap().push(input.to_string());
        }
    }

    #[test]
    fn test_pool_keeps_input_order() {
        let inputs: Vec<u32> = (0..50).collect();
        let results = run_isolated(&inputs, 3, |n| n * 2);
        let doubled: Vec<u32> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(doubled, (0..50).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_pool_bounds_concurrency() {
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let inputs: Vec<u32> = (0..20).collect();
        run_isolated(&inputs, 3, |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(2));
            active.fetch_sub(1, Ordering::SeqCst);
        });
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_failed_worker_degrades_to_not_found() {
        let observer = Arc::new(FailureLog::default());
        let resolver = BatchResolver::new(BatchConfig { max_workers: 2 }, observer.clone());
        let results = resolver.resolve_with(&["ok", "boom", "also ok"], |name| {
            if name == "boom" {
                panic!("lookup exploded");
            }
            Resolution::NotFound
        });

        assert_eq!(results.len(), 3);
        assert_eq!(results["boom"], Resolution::NotFound);
        assert_eq!(*observer.failed.lock().unwrap(), vec!["boom".to_string()]);
    }

    #[test]
    fn test_duplicate_inputs_collapse() {
        let calls = AtomicUsize::new(0);
        let resolver = BatchResolver::new(BatchConfig::default(), Arc::new(NoopObserver));
        let results = resolver.resolve_with(&["a", "b", "a"], |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Resolution::NotFound
        });
        assert_eq!(results.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_batch() {
        let resolver = BatchResolver::new(BatchConfig { max_workers: 0 }, Arc::new(NoopObserver));
        assert!(resolver.resolve_with::<&str, _>(&[], |_| Resolution::NotFound).is_empty());
    }
}
