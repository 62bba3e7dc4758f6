//! Shared utilities for opl-lookup crates.

pub mod fs;
pub mod numeric;
pub mod polars;

pub use fs::{AtomicWriteError, write_atomic, write_atomic_with};
pub use numeric::{NumericField, parse_lenient_f64, parse_numeric};
pub use polars::{string_column, string_column_or_empty};
