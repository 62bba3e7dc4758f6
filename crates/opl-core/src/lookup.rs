//! The lookup service.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use opl_index::{IndexBuilder, IndexHandle, IndexOrigin, IndexStore, NameIndex};
use opl_match::{
    BatchResolver, CandidateFinder, LookupHints, LookupObserver, Resolver, ScoreBreakdown, Scorer,
    TracingObserver,
};
use opl_model::{Candidate, DataStatus, MatchType, Resolution, SearchPage, StalenessMetadata};
use opl_store::{DatasetStore, HttpSource, RemoteSource};
use tracing::{error, info, info_span};

use crate::config::LookupConfig;
use crate::error::{LookupError, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Dataset store plus the current index snapshot.
///
/// Lookups run against whatever snapshot is published when they start and
/// never touch the network. The first lookup loads the snapshot lazily;
/// [`LifterLookup::update_if_needed`] refreshes the dataset and publishes a
/// rebuilt snapshot in one swap.
pub struct LifterLookup {
    config: LookupConfig,
    store: DatasetStore,
    index_store: IndexStore,
    handle: IndexHandle,
    finder: CandidateFinder,
    resolver: Resolver,
    batch: BatchResolver,
    observer: Arc<dyn LookupObserver>,
    load_lock: Mutex<()>,
}

impl std::fmt::Debug for LifterLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifterLookup")
            .field("config", &self.config)
            .field("index_loaded", &self.handle.is_loaded())
            .finish_non_exhaustive()
    }
}

impl LifterLookup {
    /// Service backed by the configured HTTP source.
    pub fn new(config: LookupConfig) -> Result<Self> {
        let source = HttpSource::new(&config.store)?;
        Ok(Self::with_source(config, Box::new(source)))
    }

    /// Service backed by any remote source.
    pub fn with_source(config: LookupConfig, source: Box<dyn RemoteSource>) -> Self {
        let store = DatasetStore::with_source(config.store.clone(), source);
        let paths = store.paths();
        let index_store = IndexStore::new(paths.index_binary_file(), paths.index_json_file());
        let observer: Arc<dyn LookupObserver> = Arc::new(TracingObserver);
        Self {
            finder: CandidateFinder::new(Scorer::new(config.scoring.clone())),
            resolver: Resolver::from_config(&config.scoring),
            batch: BatchResolver::new(config.batch, Arc::clone(&observer)),
            config,
            store,
            index_store,
            handle: IndexHandle::new(),
            observer,
            load_lock: Mutex::new(()),
        }
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: Arc<dyn LookupObserver>) -> Self {
        self.batch = BatchResolver::new(self.config.batch, Arc::clone(&observer));
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Refresh the dataset when it is missing, old or changed remotely.
    ///
    /// Returns `true` only when new data was downloaded and a new index was
    /// published. Failures are logged and leave the previous cache and
    /// snapshot in place.
    pub fn update_if_needed(&self) -> bool {
        if !self.store.needs_refresh() {
            info!("Data is up to date");
            return false;
        }
        info!("Data update needed");
        if !self.store.refresh() {
            return false;
        }
        match self.load() {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Index rebuild after refresh failed");
                false
            }
        }
    }

    /// Refresh unconditionally and publish the rebuilt index.
    pub fn force_update(&self) -> Result<StalenessMetadata> {
        let metadata = self.store.try_refresh()?;
        self.load()?;
        Ok(metadata)
    }

    /// Load the index for the cached dataset and publish it.
    ///
    /// Reuses the published snapshot or a persisted index when they match
    /// the cached dataset, otherwise rebuilds from the table. Fails with
    /// `DatasetMissing` when nothing has been downloaded yet.
    pub fn load(&self) -> Result<Arc<NameIndex>> {
        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !self.store.has_cache() {
            return Err(opl_store::StoreError::DatasetMissing {
                path: self.store.paths().data_file(),
            }
            .into());
        }
        let stamp = self
            .store
            .metadata()
            .as_ref()
            .map(StalenessMetadata::stamp)
            .unwrap_or_default();

        if let Some(current) = self.handle.snapshot()
            && current.source_stamp() == stamp
        {
            return Ok(current);
        }

        let _span = info_span!("load_index").entered();
        let loaded = self.index_store.load_or_build(&stamp, || {
            let df = self.store.load()?;
            let builder = IndexBuilder::new(Utc::now().date_naive(), stamp.clone());
            let (index, _stats) = builder.build(&df)?;
            Ok::<_, LookupError>(index)
        })?;
        if loaded.origin == IndexOrigin::Rebuilt {
            info!(keys = loaded.index.len(), "Published rebuilt name index");
        }
        let index = Arc::new(loaded.index);
        self.handle.publish_shared(Arc::clone(&index));
        Ok(index)
    }

    /// Up to the configured number of candidates for `name`, best first.
    pub fn find_candidates(&self, name: &str, hints: &LookupHints) -> Result<Vec<Candidate>> {
        self.find_candidates_limited(name, hints, self.config.scoring.max_candidates)
    }

    /// Like [`Self::find_candidates`] with an explicit cap.
    pub fn find_candidates_limited(
        &self,
        name: &str,
        hints: &LookupHints,
        max_candidates: usize,
    ) -> Result<Vec<Candidate>> {
        let index = self.snapshot()?;
        Ok(self
            .finder
            .find_for_input(&index, name, hints, max_candidates, self.observer.as_ref()))
    }

    /// Resolve a name to a single confidence-tiered result.
    pub fn resolve(&self, name: &str, hints: &LookupHints) -> Result<Resolution> {
        let candidates = self.find_candidates(name, hints)?;
        let resolution = self.resolver.resolve(&candidates);
        self.observer.resolved(name, &resolution);
        Ok(resolution)
    }

    /// Exact-key lookup of many names on the worker pool.
    pub fn resolve_batch<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<BTreeMap<String, Resolution>> {
        let index = self.snapshot()?;
        Ok(self.batch.resolve(&index, names))
    }

    /// Per-factor score of a candidate. `None` for an unscored exact hit.
    pub fn explain(
        &self,
        candidate: &Candidate,
        hints: &LookupHints,
    ) -> Result<Option<ScoreBreakdown>> {
        if candidate.match_type == MatchType::Exact {
            return Ok(None);
        }
        let index = self.snapshot()?;
        let as_of = hints.as_of.unwrap_or_else(|| index.as_of());
        Ok(Some(self.finder.scorer().breakdown(
            &candidate.record,
            candidate.name_similarity,
            hints,
            as_of,
        )))
    }

    /// Names containing `term`, best Dots first.
    pub fn search(&self, term: &str, limit: usize, offset: usize) -> Result<SearchPage> {
        let index = self.snapshot()?;
        Ok(opl_match::search(&index, term, limit, offset)?)
    }

    /// Dataset and index state. Never loads anything.
    pub fn status(&self) -> DataStatus {
        let metadata = self.store.metadata();
        let snapshot = self.handle.snapshot();
        DataStatus {
            data_loaded: snapshot.is_some(),
            total_records: snapshot.as_ref().map_or_else(
                || metadata.as_ref().map_or(0, |m| m.rows),
                |index| index.record_count() as u64,
            ),
            indexed_names: snapshot.as_ref().map_or(0, |index| index.len() as u64),
            last_update: metadata.as_ref().map(|m| m.last_update),
            fingerprint: metadata.map(|m| m.fingerprint),
            cache_size_mb: self.store.cache_size_bytes() as f64 / BYTES_PER_MB,
        }
    }

    fn snapshot(&self) -> Result<Arc<NameIndex>> {
        match self.handle.snapshot() {
            Some(index) => Ok(index),
            None => self.load(),
        }
    }
}
