//! # Validate Subcommand
//!
//! Validates every record under the given paths against HIP-412 and prints
//! the batch report. Inputs that cannot be loaded are listed in the report
//! and make it invalid; they never hide the findings of the other inputs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use nftmeta_schema::{BatchValidationReport, Hip412Validator};

use crate::loader::{load_documents_lenient, LoadFailure};
use crate::GlobalOptions;

/// Arguments for the `nftmeta validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Metadata files or directories of `*.json` files.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Label attached to every finding. Defaults to the input path when
    /// exactly one is given.
    #[arg(long)]
    pub source_label: Option<String>,
}

/// Output of `nftmeta validate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidateReport {
    /// Findings for every loaded record. `is_valid` is false when any
    /// input failed to load.
    #[serde(flatten)]
    pub batch: BatchValidationReport,
    /// Origin of each checked record; `record_index` in a finding indexes
    /// this list.
    pub origins: Vec<String>,
    /// Inputs that contributed no records.
    pub load_errors: Vec<LoadFailure>,
}

impl ValidateReport {
    pub fn is_valid(&self) -> bool {
        self.batch.is_valid
    }
}

/// Validate the documents under `args.paths`.
pub fn validate_paths(args: &ValidateArgs) -> Result<ValidateReport> {
    let validator = Hip412Validator::new().context("failed to compile HIP-412 schema")?;
    let loaded = load_documents_lenient(&args.paths);

    let label = args.source_label.clone().or_else(|| match args.paths.as_slice() {
        [only] => Some(only.display().to_string()),
        _ => None,
    });
    let mut batch = validator.validate_many_values(&loaded.documents, label.as_deref());
    batch.is_valid &= loaded.failures.is_empty();

    Ok(ValidateReport {
        batch,
        origins: loaded.origins,
        load_errors: loaded.failures,
    })
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every input loaded and every record is valid,
/// 1 otherwise.
pub fn run_validate(args: &ValidateArgs, _options: &GlobalOptions) -> Result<u8> {
    let report = validate_paths(args)?;
    tracing::info!(
        records = report.batch.records_checked,
        invalid = report.batch.invalid_records.len(),
        findings = report.batch.errors.len(),
        load_errors = report.load_errors.len(),
        "validation complete"
    );
    crate::print_json(&report)?;
    Ok(if report.is_valid() { 0 } else { 1 })
}
