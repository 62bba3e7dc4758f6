//! The dataset store: staleness policy and all-or-nothing refresh.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use opl_model::{StalenessMetadata, columns};
use polars::prelude::DataFrame;
use tracing::{debug, error, info, info_span, warn};

use crate::archive::extract_csv;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::metadata::{load_metadata, save_metadata};
use crate::paths::CachePaths;
use crate::source::{HttpSource, RemoteSource};
use crate::table::{read_csv_as_text, read_table, write_table};

/// Owns the cached results table and its staleness record.
pub struct DatasetStore {
    config: StoreConfig,
    paths: CachePaths,
    source: Box<dyn RemoteSource>,
    /// Serializes refreshes; lookups never take it.
    refresh_lock: Mutex<()>,
}

impl DatasetStore {
    /// Store backed by the configured HTTP endpoint.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let source = HttpSource::new(&config)?;
        Ok(Self::with_source(config, Box::new(source)))
    }

    /// Store backed by an arbitrary remote source.
    pub fn with_source(config: StoreConfig, source: Box<dyn RemoteSource>) -> Self {
        let paths = CachePaths::new(&config.cache_dir);
        Self {
            config,
            paths,
            source,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    /// Whether a cached table exists on disk.
    pub fn has_cache(&self) -> bool {
        self.paths.data_file().is_file()
    }

    /// Current staleness metadata, if readable.
    pub fn metadata(&self) -> Option<StalenessMetadata> {
        match load_metadata(&self.paths.metadata_file()) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "Could not load dataset metadata");
                None
            }
        }
    }

    /// Size of the cached table in bytes (0 if absent).
    pub fn cache_size_bytes(&self) -> u64 {
        fs::metadata(self.paths.data_file())
            .map(|m| m.len())
            .unwrap_or(0)
    }

    /// Whether the cache must be re-fetched.
    ///
    /// True if no cache exists, the last refresh is older than
    /// `max_age_hours`, or the remote fingerprint differs from the cached
    /// one. A failed probe also counts as changed.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh_at(Utc::now())
    }

    /// [`Self::needs_refresh`] evaluated at an explicit instant.
    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        if !self.has_cache() {
            debug!("No cached dataset");
            return true;
        }

        let Some(metadata) = self.metadata() else {
            debug!("No staleness metadata for cached dataset");
            return true;
        };

        if metadata.is_older_than(self.config.max_age_hours, now) {
            debug!(last_update = %metadata.last_update, "Cached dataset is too old");
            return true;
        }

        match self.source.fingerprint() {
            Ok(remote) if remote == metadata.fingerprint => false,
            Ok(_) => {
                debug!("Remote dataset fingerprint changed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not probe remote dataset");
                true
            }
        }
    }

    /// Fetch and replace the cached dataset.
    ///
    /// Returns `false` on any failure; the previous cache is left intact.
    pub fn refresh(&self) -> bool {
        match self.try_refresh() {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Dataset refresh failed");
                false
            }
        }
    }

    /// Fetch and replace the cached dataset, reporting the failure cause.
    ///
    /// Everything is staged in a scratch directory inside the cache
    /// directory. The live files are only touched once the new table has
    /// been fully written, and a failed commit restores the previous table.
    pub fn try_refresh(&self) -> Result<StalenessMetadata> {
        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let span = info_span!("refresh", url = %self.config.source_url);
        let _enter = span.enter();

        info!("Downloading OpenPowerlifting data");
        let archive = self.source.fetch()?;

        let root = self.paths.root();
        fs::create_dir_all(root).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: root.to_path_buf(),
            source: e,
        })?;
        let staging = tempfile::Builder::new()
            .prefix(".refresh-")
            .tempdir_in(root)
            .map_err(|e| StoreError::Io {
                operation: "create staging directory in",
                path: root.to_path_buf(),
                source: e,
            })?;

        let csv_path = staging.path().join("dataset.csv");
        let member = extract_csv(&archive.data, &csv_path)?;
        drop(archive.data);

        let mut df = read_csv_as_text(&csv_path)?;
        validate_table(&df)?;

        let staged_table = staging.path().join("dataset.parquet");
        write_table(&mut df, &staged_table)?;

        let metadata = StalenessMetadata {
            last_update: Utc::now(),
            fingerprint: archive.fingerprint,
            rows: df.height() as u64,
            columns: df
                .get_column_names()
                .iter()
                .map(ToString::to_string)
                .collect(),
        };

        self.commit(staging.path(), &staged_table, &metadata)?;

        info!(member = %member, rows = metadata.rows, "Dataset refreshed");
        Ok(metadata)
    }

    /// Swap the staged table in and record its metadata.
    ///
    /// The live table is first linked (or copied) into the staging
    /// directory. If replacing it or writing the metadata fails, that copy
    /// is renamed back, so the table and the metadata always describe the
    /// same dataset.
    fn commit(
        &self,
        staging: &Path,
        staged_table: &Path,
        metadata: &StalenessMetadata,
    ) -> Result<()> {
        let data_file = self.paths.data_file();
        let backup = if data_file.is_file() {
            let backup = staging.join("previous.parquet");
            fs::hard_link(&data_file, &backup)
                .or_else(|_| fs::copy(&data_file, &backup).map(|_| ()))
                .map_err(|e| StoreError::Io {
                    operation: "back up",
                    path: data_file.clone(),
                    source: e,
                })?;
            Some(backup)
        } else {
            None
        };

        let committed = fs::rename(staged_table, &data_file)
            .map_err(|e| StoreError::Io {
                operation: "replace",
                path: data_file.clone(),
                source: e,
            })
            .and_then(|()| save_metadata(&self.paths.metadata_file(), metadata));

        if let Err(e) = committed {
            let restored = match &backup {
                Some(backup) => fs::rename(backup, &data_file),
                None => fs::remove_file(&data_file).or_else(|err| {
                    if err.kind() == io::ErrorKind::NotFound {
                        Ok(())
                    } else {
                        Err(err)
                    }
                }),
            };
            if let Err(restore_error) = restored {
                error!(
                    path = %data_file.display(),
                    error = %restore_error,
                    "Could not restore previous dataset table"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    /// Read the cached table into memory.
    pub fn load(&self) -> Result<DataFrame> {
        let data_file = self.paths.data_file();
        if !data_file.is_file() {
            return Err(StoreError::DatasetMissing { path: data_file });
        }
        let df = read_table(&data_file)?;
        debug!(rows = df.height(), "Loaded cached dataset");
        Ok(df)
    }
}

/// Reject tables that could not produce a usable index.
fn validate_table(df: &DataFrame) -> Result<()> {
    if df.height() == 0 {
        return Err(StoreError::Table("downloaded table is empty".to_string()));
    }
    if df.column(columns::NAME).is_err() {
        return Err(StoreError::Table(format!(
            "downloaded table has no {} column",
            columns::NAME
        )));
    }
    let missing: Vec<&str> = columns::INDEXED
        .iter()
        .copied()
        .filter(|name| df.column(name).is_err())
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "Downloaded table lacks some expected columns");
    }
    Ok(())
}
