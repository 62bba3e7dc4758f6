//! Data model for OpenPowerlifting lifter lookups.
//!
//! These types are shared by the dataset store, the name index, the matching
//! engine and the outer surfaces (CLI, API). They carry no behaviour beyond
//! simple accessors and conversions.

pub mod candidate;
pub mod columns;
pub mod metadata;
pub mod record;
pub mod resolution;
pub mod search;

pub use candidate::{Candidate, MatchType};
pub use metadata::{DataStatus, StalenessMetadata};
pub use record::{DAYS_OLD_UNKNOWN, Record, parse_meet_date};
pub use resolution::{Alternative, Confidence, LifterStats, LookupEnvelope, Resolution};
pub use search::{SearchHit, SearchPage};
