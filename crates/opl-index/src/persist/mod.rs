//! Persisted index files.
//!
//! The binary form is preferred; JSON is written only when binary encoding
//! fails and is read only when no valid binary file exists.

mod binary;
mod json;
mod snapshot;
mod store;

pub use store::{IndexStore, LoadedIndex};

/// Current schema version.
///
/// Increment this when making breaking changes to the persisted layout.
/// Files with a newer version are rejected and rebuilt.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Magic bytes at the start of binary index files.
pub const MAGIC_BYTES: [u8; 4] = *b"OPLX";

/// On-disk encoding of a persisted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    Binary,
    Json,
}

impl IndexFormat {
    /// Formats in load preference order.
    pub const PREFERENCE: [IndexFormat; 2] = [IndexFormat::Binary, IndexFormat::Json];
}

/// Where a loaded index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrigin {
    Binary,
    Json,
    /// No valid persisted file; built from the dataset.
    Rebuilt,
}

impl From<IndexFormat> for IndexOrigin {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::Binary => Self::Binary,
            IndexFormat::Json => Self::Json,
        }
    }
}
