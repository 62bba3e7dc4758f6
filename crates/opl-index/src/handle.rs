//! Atomic publication of index snapshots.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::index::NameIndex;

/// Shared slot holding the current [`NameIndex`] snapshot.
///
/// Readers take an `Arc` to whatever snapshot is current and keep using it
/// for the whole lookup. A rebuild is published with one pointer swap, so a
/// reader sees either the old index or the new one, never a mix.
#[derive(Debug, Default)]
pub struct IndexHandle {
    current: ArcSwapOption<NameIndex>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, if one has been published.
    pub fn snapshot(&self) -> Option<Arc<NameIndex>> {
        self.current.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Replace the current snapshot, returning the previous one.
    pub fn publish(&self, index: NameIndex) -> Option<Arc<NameIndex>> {
        self.publish_shared(Arc::new(index))
    }

    /// [`Self::publish`] for a snapshot the caller keeps a reference to.
    pub fn publish_shared(&self, index: Arc<NameIndex>) -> Option<Arc<NameIndex>> {
        self.current.swap(Some(index))
    }
}
