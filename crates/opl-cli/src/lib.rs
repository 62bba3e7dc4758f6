//! CLI library components for opl-lookup.

pub mod logging;
pub mod names;
