//! Lookup observation hooks.

use opl_model::Resolution;
use tracing::{debug, warn};

/// Receives lookup events. All methods default to doing nothing.
///
/// Implementations are shared across batch workers.
pub trait LookupObserver: Send + Sync {
    /// A normalization variant was looked up; `hits` is the number of
    /// candidates it produced.
    fn variant_tried(&self, _input: &str, _key: &str, _hits: usize) {}

    /// A lookup reached its final result.
    fn resolved(&self, _input: &str, _resolution: &Resolution) {}

    /// A batch worker failed on `input`; its result became `NotFound`.
    fn worker_failed(&self, _input: &str, _reason: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LookupObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LookupObserver for TracingObserver {
    fn variant_tried(&self, input: &str, key: &str, hits: usize) {
        debug!(input, key, hits, "tried name variant");
    }

    fn resolved(&self, input: &str, resolution: &Resolution) {
        debug!(input, confidence = %resolution.confidence(), "resolved lifter");
    }

    fn worker_failed(&self, input: &str, reason: &str) {
        warn!(input, reason, "batch worker failed, reporting not found");
    }
}
