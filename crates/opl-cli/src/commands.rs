use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use opl_core::{LifterLookup, LookupConfig, LookupError};
use opl_match::LookupHints;
use opl_model::LookupEnvelope;
use tracing::{info, warn};

use opl_cli::names::collect_names;

use crate::cli::{
    BatchArgs, CandidatesArgs, Cli, HintArgs, LookupArgs, SearchArgs, StatusArgs, UpdateArgs,
};
use crate::output::{print_batch, print_candidates, print_envelope, print_search, print_status};

/// Configuration file, then command-line overrides.
pub fn load_config(cli: &Cli) -> Result<LookupConfig> {
    let mut config = match &cli.config {
        Some(path) => LookupConfig::from_toml_file(path)?,
        None => LookupConfig::default(),
    };
    if let Some(dir) = &cli.cache_dir {
        config.store.cache_dir = dir.clone();
    }
    if let Some(workers) = cli.workers {
        config.batch.max_workers = workers;
    }
    Ok(config)
}

pub fn open(config: LookupConfig) -> Result<LifterLookup> {
    LifterLookup::new(config).context("initialize lookup service")
}

pub fn run_update(lookup: &LifterLookup, args: &UpdateArgs) -> Result<()> {
    if args.force {
        let metadata = lookup.force_update().context("refresh dataset")?;
        println!("Dataset refreshed: {} rows", metadata.rows);
        return Ok(());
    }
    if lookup.update_if_needed() {
        println!("Dataset updated");
    } else if lookup.store().has_cache() {
        println!("Dataset is up to date");
    } else {
        bail!("no cached dataset and the download failed; see the log for details");
    }
    Ok(())
}

pub fn run_status(lookup: &LifterLookup, args: &StatusArgs) -> Result<()> {
    if lookup.store().has_cache()
        && let Err(error) = lookup.load()
    {
        warn!(%error, "Could not load name index");
    }
    let status = lookup.status();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status(&status);
    }
    Ok(())
}

pub fn run_lookup(lookup: &LifterLookup, args: &LookupArgs) -> Result<()> {
    let resolution = lookup
        .resolve(&args.name, &hints(&args.hints))
        .map_err(with_update_hint)?;
    let envelope = resolution.envelope();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print_envelope(&args.name, &envelope);
    }
    Ok(())
}

pub fn run_candidates(lookup: &LifterLookup, args: &CandidatesArgs) -> Result<()> {
    let hints = hints(&args.hints);
    let max = args
        .max
        .unwrap_or(lookup.config().scoring.max_candidates);
    let candidates = lookup
        .find_candidates_limited(&args.name, &hints, max)
        .map_err(with_update_hint)?;
    if candidates.is_empty() {
        println!("No candidates for {:?}", args.name);
        return Ok(());
    }

    let mut rows = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let breakdown = if args.explain {
            lookup.explain(&candidate, &hints)?
        } else {
            None
        };
        rows.push((candidate, breakdown));
    }
    print_candidates(&rows);
    Ok(())
}

pub fn run_batch(lookup: &LifterLookup, args: &BatchArgs) -> Result<()> {
    let names = collect_names(&args.names, args.file.as_deref()).with_context(|| {
        format!(
            "read names from {}",
            args.file
                .as_deref()
                .map_or_else(String::new, |p| p.display().to_string())
        )
    })?;
    if names.is_empty() {
        bail!("no names given; pass names as arguments or with --file");
    }
    info!(count = names.len(), "Resolving batch");
    let results = lookup.resolve_batch(&names).map_err(with_update_hint)?;

    if args.json {
        let envelopes: BTreeMap<&String, LookupEnvelope> = results
            .iter()
            .map(|(name, resolution)| (name, resolution.envelope()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&envelopes)?);
    } else {
        print_batch(&results);
    }
    Ok(())
}

pub fn run_search(lookup: &LifterLookup, args: &SearchArgs) -> Result<()> {
    let page = lookup
        .search(&args.term, args.limit, args.offset)
        .map_err(with_update_hint)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_search(&page);
    }
    Ok(())
}

fn hints(args: &HintArgs) -> LookupHints {
    let mut hints = LookupHints::new();
    if let Some(kg) = args.weight_class {
        hints = hints.with_weight_class(kg);
    }
    if let Some(meet) = &args.meet {
        hints = hints.with_meet_name(meet.clone());
    }
    hints
}

fn with_update_hint(error: LookupError) -> anyhow::Error {
    if error.is_dataset_missing() {
        anyhow::Error::new(error).context("no dataset cached yet; run `opl-lookup update` first")
    } else {
        error.into()
    }
}
