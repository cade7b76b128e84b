//! # Error Types
//!
//! Configuration errors for the risk engine. Every variant names the
//! offending key or value so a bad override file can be fixed without
//! guesswork.

use std::path::PathBuf;

use nftmeta_schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    /// A weight is negative, NaN or infinite.
    #[error("weight for '{factor}' must be a non-negative finite number, got {weight}")]
    InvalidWeight { factor: String, weight: f64 },

    /// A weight override names a factor that does not exist.
    #[error("unknown risk factor '{key}'")]
    UnknownFactor { key: String },

    /// The level table has no entries.
    #[error("risk level table must not be empty")]
    EmptyLevels,

    /// A level threshold is NaN or infinite.
    #[error("threshold for level '{label}' must be finite, got {threshold}")]
    InvalidThreshold { label: String, threshold: f64 },

    /// A level has an empty or whitespace-only label.
    #[error("level at threshold {threshold} has an empty label")]
    EmptyLabel { threshold: f64 },

    /// Two levels share a threshold.
    #[error("duplicate level threshold {threshold}")]
    DuplicateThreshold { threshold: f64 },

    /// The trait concentration threshold is outside (0, 1].
    #[error("concentration_threshold must be in (0, 1], got {value}")]
    InvalidConcentrationThreshold { value: f64 },

    /// A configuration file could not be read.
    #[error("cannot read risk config {}: {reason}", path.display())]
    ConfigRead { path: PathBuf, reason: String },

    /// A configuration file could not be parsed.
    #[error("cannot parse risk config {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// The embedded schema used for the structural validity factor failed
    /// to compile.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
