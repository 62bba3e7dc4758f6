//! Canonical-name index over the results dataset.
//!
//! - [`normalize`]: canonical key rule and the ordered search variants
//! - [`IndexBuilder`]: groups records by canonical name
//! - [`NameIndex`]: immutable snapshot with exact and prefix lookup
//! - [`IndexStore`]: binary (rkyv) persistence with a JSON fallback
//! - [`IndexHandle`]: atomic publication of replacement snapshots
//!
//! # Binary file format
//!
//! ```text
//! +------------------+
//! | Magic: "OPLX"    | 4 bytes
//! +------------------+
//! | Version          | 4 bytes - u32 little-endian schema version
//! +------------------+
//! | rkyv Payload     | IndexFile
//! +------------------+
//! ```

mod builder;
mod error;
mod handle;
mod index;
pub mod normalize;
mod persist;

pub use builder::{BuildStats, IndexBuilder};
pub use error::{IndexError, Result};
pub use handle::IndexHandle;
pub use index::NameIndex;
pub use normalize::{Variant, canonical_name, search_variants};
pub use persist::{
    CURRENT_SCHEMA_VERSION, IndexFormat, IndexOrigin, IndexStore, LoadedIndex, MAGIC_BYTES,
};
