//! Dataset Store for the OpenPowerlifting results table.
//!
//! Owns the on-disk cache (a parquet table plus a JSON staleness record),
//! decides when the cache must be re-fetched and performs all-or-nothing
//! refreshes. This is the only crate that talks to the network.
//!
//! # Cache layout
//!
//! ```text
//! <cache_dir>/
//!   openpowerlifting.parquet   columnar table, every column stored as text
//!   metadata.json              StalenessMetadata
//!   name_index.bin / .json     persisted name index (written by opl-index)
//! ```

mod archive;
mod config;
mod error;
mod metadata;
mod paths;
mod source;
mod store;
mod table;

pub use archive::extract_csv;
pub use config::{DEFAULT_SOURCE_URL, StoreConfig};
pub use error::{Result, StoreError};
pub use metadata::{load_metadata, save_metadata};
pub use paths::CachePaths;
pub use source::{FetchedArchive, HttpSource, RemoteSource, fingerprint};
pub use store::DatasetStore;
pub use table::{read_csv_as_text, read_table, write_table};
