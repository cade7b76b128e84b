//! # Rarity Subcommand
//!
//! Computes collection rarity over every record under the given paths and
//! prints the records ranked rarest first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use nftmeta_rarity::{compute_rarity, TraitOccurrence, TraitOccurrenceSummary};

use crate::loader::load_documents;
use crate::GlobalOptions;

/// Arguments for the `nftmeta rarity` subcommand.
#[derive(Args, Debug)]
pub struct RarityArgs {
    /// Metadata files or directories of `*.json` files.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Include per-trait-type value distributions in the output.
    #[arg(long)]
    pub occurrences: bool,
}

/// One ranked record in the printed report.
#[derive(Debug, Serialize)]
pub struct RankedRecord {
    pub rank: usize,
    pub index: usize,
    pub origin: String,
    pub score: f64,
}

/// Printed output of `nftmeta rarity`.
#[derive(Debug, Serialize)]
pub struct RarityOutput {
    pub collection_size: usize,
    pub ranking: Vec<RankedRecord>,
    pub traits: Vec<TraitOccurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Vec<TraitOccurrenceSummary>>,
}

/// Build the rarity output for `args.paths`.
pub fn rank_paths(args: &RarityArgs) -> Result<RarityOutput> {
    let loaded = load_documents(&args.paths)?;
    let records = loaded.records()?;
    let report = compute_rarity(&records).context("no metadata records found")?;

    let ranking = report
        .ranking()
        .into_iter()
        .enumerate()
        .map(|(rank, entry)| RankedRecord {
            rank: rank + 1,
            index: entry.index,
            origin: loaded.origins[entry.index].clone(),
            score: entry.score,
        })
        .collect();

    Ok(RarityOutput {
        collection_size: report.collection_size,
        ranking,
        traits: report.per_trait.values().cloned().collect(),
        occurrences: args.occurrences.then(|| report.trait_occurrences()),
    })
}

/// Execute the rarity subcommand.
pub fn run_rarity(args: &RarityArgs, _options: &GlobalOptions) -> Result<u8> {
    let output = rank_paths(args)?;
    tracing::info!(collection_size = output.collection_size, "rarity computed");
    crate::print_json(&output)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn ranks_rarest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.json");
        fs::write(
            &path,
            r#"[
                {"name": "A", "attributes": [{"trait_type": "color", "value": "red"}]},
                {"name": "B", "attributes": [{"trait_type": "color", "value": "red"},
                                             {"trait_type": "color", "value": "blue"}]}
            ]"#,
        )
        .unwrap();
        let args = RarityArgs {
            paths: vec![path],
            occurrences: true,
        };
        let output = rank_paths(&args).unwrap();
        assert_eq!(output.collection_size, 2);
        assert_eq!(output.ranking[0].index, 1);
        assert_eq!(output.ranking[0].score, 3.0);
        assert_eq!(output.ranking[1].score, 1.0);
        assert!(output.ranking[0].origin.ends_with("collection.json#1"));
        assert_eq!(output.occurrences.unwrap().len(), 1);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = RarityArgs {
            paths: vec![dir.path().to_path_buf()],
            occurrences: false,
        };
        let err = rank_paths(&args).unwrap_err();
        assert!(err.to_string().contains("no metadata records"));
    }
}
