//! # Risk Subcommand
//!
//! Scores every record under the given paths with the risk engine, using
//! the `--config` file when one is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use nftmeta_rarity::compute_rarity;
use nftmeta_risk::{RiskConfig, RiskEngine, RiskResult};

use crate::loader::load_documents;
use crate::GlobalOptions;

/// Arguments for the `nftmeta risk` subcommand.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Metadata files or directories of `*.json` files.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Use the collection's rarity statistics as context (enables the
    /// trait concentration factor).
    #[arg(long)]
    pub with_rarity: bool,
}

/// Risk result for one record, with its origin.
#[derive(Debug, Serialize)]
pub struct RecordRisk {
    pub index: usize,
    pub origin: String,
    #[serde(flatten)]
    pub result: RiskResult,
}

/// Load the risk configuration named by `--config`, or the defaults.
pub fn load_config(options: &GlobalOptions) -> Result<RiskConfig> {
    match options.config {
        Some(ref path) => RiskConfig::from_path(path)
            .with_context(|| format!("failed to load risk config {}", path.display())),
        None => Ok(RiskConfig::default()),
    }
}

/// Score every record under `args.paths`.
pub fn assess_paths(args: &RiskArgs, options: &GlobalOptions) -> Result<Vec<RecordRisk>> {
    let engine = RiskEngine::new(load_config(options)?).context("invalid risk configuration")?;
    let loaded = load_documents(&args.paths)?;
    let records = loaded.records()?;

    let rarity = if args.with_rarity && !records.is_empty() {
        Some(compute_rarity(&records)?)
    } else {
        None
    };

    Ok(records
        .iter()
        .zip(&loaded.origins)
        .enumerate()
        .map(|(index, (record, origin))| RecordRisk {
            index,
            origin: origin.clone(),
            result: engine.assess(record, rarity.as_ref()),
        })
        .collect())
}

/// Execute the risk subcommand.
pub fn run_risk(args: &RiskArgs, options: &GlobalOptions) -> Result<u8> {
    let results = assess_paths(args, options)?;
    tracing::info!(records = results.len(), "risk assessed");
    crate::print_json(&results)?;
    Ok(0)
}
