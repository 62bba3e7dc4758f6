//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "opl-lookup",
    version,
    about = "Look up powerlifting results by lifter name",
    long_about = "Look up lifters in the OpenPowerlifting dataset.\n\n\
                  Downloads and caches the full results export, indexes it by\n\
                  normalized name and resolves free-text names to the most\n\
                  likely lifter with a confidence rating."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides the configuration file).
    #[arg(long = "cache-dir", value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Batch worker count (overrides the configuration file).
    #[arg(long, value_name = "N", global = true)]
    pub workers: Option<usize>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the dataset if it is missing, old or changed.
    Update(UpdateArgs),

    /// Show cache and index state.
    Status(StatusArgs),

    /// Resolve a name to the most likely lifter.
    Lookup(LookupArgs),

    /// List ranked candidates for a name.
    Candidates(CandidatesArgs),

    /// Resolve many names using exact matches only.
    Batch(BatchArgs),

    /// Find lifters whose name contains a term.
    Search(SearchArgs),
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Download even if the cache is fresh.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Hints that sharpen scoring.
#[derive(Args)]
pub struct HintArgs {
    /// Expected weight class in kg.
    #[arg(long = "weight-class", value_name = "KG")]
    pub weight_class: Option<f64>,

    /// Meet the lifter is entered in.
    #[arg(long = "meet", value_name = "NAME")]
    pub meet: Option<String>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Lifter name as written anywhere.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub hints: HintArgs,

    /// Print the result envelope as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CandidatesArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub hints: HintArgs,

    /// Maximum candidates to list (default from configuration).
    #[arg(long, value_name = "N")]
    pub max: Option<usize>,

    /// Show each score component.
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Names to resolve.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// File with one name per line (`#` starts a comment).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print results as JSON keyed by input name.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Page size (at most 100).
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// Matches to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    #[arg(long)]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
