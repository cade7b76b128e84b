//! # nftmeta-risk — Metadata Risk Engine
//!
//! Scores a metadata record as a weighted composite of risk signals and
//! buckets the score into a level label.
//!
//! ## Architecture
//!
//! - **Factors** (`factor.rs`): the closed set of signals, each valued in
//!   [0, 1] per record.
//!
//! - **Configuration** (`config.rs`): weights, level table and trait
//!   concentration threshold, with built-in defaults and YAML/JSON loading.
//!
//! - **Engine** (`engine.rs`): evaluates factors, applies weights, and
//!   resolves the level. Structural validity comes from the HIP-412
//!   validator in `nftmeta-schema`; trait concentration from a
//!   `nftmeta-rarity` report when the caller supplies one.
//!
//! ## Crate Policy
//!
//! - Depends on `nftmeta-core`, `nftmeta-schema` and `nftmeta-rarity`
//!   internally.
//! - Every `match` on `RiskFactor` is exhaustive, so a new factor cannot be
//!   silently left unweighted.
//! - Defaults are constructed fresh per call; there is no global state.

pub mod config;
pub mod engine;
pub mod error;
pub mod factor;

pub use config::{
    RiskConfig, RiskLevel, RiskLevels, RiskWeights, DEFAULT_CONCENTRATION_THRESHOLD,
};
pub use engine::{compute_risk, resolve_level, RiskEngine, RiskResult};
pub use error::RiskError;
pub use factor::RiskFactor;
