//! Lifter lookup service.
//!
//! [`LifterLookup`] owns the dataset store and the current index snapshot
//! and exposes the lookup operations used by the CLI and other callers.
//!
//! # Example
//!
//! ```no_run
//! use opl_core::{LifterLookup, LookupConfig};
//! use opl_match::LookupHints;
//!
//! # fn main() -> opl_core::Result<()> {
//! let lookup = LifterLookup::new(LookupConfig::default())?;
//! lookup.update_if_needed();
//! let resolution = lookup.resolve("John Smith", &LookupHints::new().with_weight_class(93.0))?;
//! println!("{}", resolution.confidence());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod lookup;

pub use config::LookupConfig;
pub use error::{LookupError, Result};
pub use lookup::LifterLookup;
