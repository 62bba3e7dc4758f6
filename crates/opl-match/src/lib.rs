//! Lifter name matching against a [`opl_index::NameIndex`] snapshot.
//!
//! A lookup runs the normalizer variants in order, asks the
//! [`CandidateFinder`] for exact or prefix hits, ranks them with the
//! [`Scorer`] and lets the [`Resolver`] pick a confidence tier. Batch
//! lookups use exact keys only and run on a bounded worker pool.

mod batch;
mod config;
mod error;
mod finder;
mod hints;
mod observer;
mod resolver;
mod scorer;
mod search;

pub use batch::{BatchResolver, exact_lookup};
pub use config::{BatchConfig, ScoreWeights, ScoringConfig, Thresholds};
pub use error::{MatchError, Result};
pub use finder::CandidateFinder;
pub use hints::LookupHints;
pub use observer::{LookupObserver, NoopObserver, TracingObserver};
pub use resolver::Resolver;
pub use scorer::{ScoreBreakdown, Scorer};
pub use search::{MAX_PAGE_SIZE, MIN_TERM_CHARS, search};
