//! # nftmeta CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nftmeta_cli::rarity::{run_rarity, RarityArgs};
use nftmeta_cli::risk::{run_risk, RiskArgs};
use nftmeta_cli::validate::{run_validate, ValidateArgs};
use nftmeta_cli::GlobalOptions;

/// NFT metadata toolchain.
///
/// Validates HIP-412 metadata records, ranks collection rarity, and scores
/// per-record risk from local JSON files.
#[derive(Parser, Debug)]
#[command(name = "nftmeta", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a risk configuration file (YAML, or JSON by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate metadata records against HIP-412.
    Validate(ValidateArgs),

    /// Compute trait rarity and rank records rarest first.
    Rarity(RarityArgs),

    /// Score every record's risk and resolve its level.
    Risk(RiskArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = GlobalOptions { config: cli.config };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &options),
        Commands::Rarity(args) => run_rarity(&args, &options),
        Commands::Risk(args) => run_risk(&args, &options),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
