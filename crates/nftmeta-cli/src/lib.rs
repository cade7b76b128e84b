//! # nftmeta-cli — Metadata Toolchain CLI
//!
//! Provides the `nftmeta` command-line interface over local metadata files.
//!
//! ## Subcommands
//!
//! - `nftmeta validate`: HIP-412 validation report for every record.
//! - `nftmeta rarity`: collection rarity report with records ranked.
//! - `nftmeta risk`: risk score and level for every record.
//!
//! ```bash
//! nftmeta validate metadata/
//! nftmeta rarity metadata/ -v
//! nftmeta --config risk.yaml risk metadata/ --with-rarity
//! ```
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates; no scoring or validation
//!   rules live here.
//! - Reports are printed to stdout as pretty JSON; diagnostics go through
//!   `tracing` to stderr.
//! - Handlers return an exit code: 0 on success, 1 when the input fails
//!   validation. Operational errors propagate as `anyhow::Error`.

pub mod loader;
pub mod rarity;
pub mod risk;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Risk configuration file (YAML, or JSON by `.json` extension).
    pub config: Option<PathBuf>,
}

/// Print a report to stdout as pretty JSON.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    println!("{rendered}");
    Ok(())
}
