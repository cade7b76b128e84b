//! # nftmeta-rarity — Trait Rarity Engine
//!
//! Computes how unusual each record's traits are relative to the rest of
//! one collection.
//!
//! - **Statistics** (`rarity.rs`): counts every `(trait_type, value)` pair
//!   across the collection, derives its probability, and scores each record.
//!
//! - **Occurrence summaries** (`occurrence.rs`): per-trait-type value
//!   distributions as percentages, for display.
//!
//! ## Mathematical Definition
//!
//! Let N be the collection size and `c(t, v)` the number of records that
//! carry trait `t` with normalized value `v` (each record counted at most
//! once per pair). Then `P(t, v) = c(t, v) / N` and the rarity score of a
//! record `r` is
//!
//! ```text
//! score(r) = Σ_{(t, v) ∈ attributes(r)} 1 / P(t, v)
//! ```
//!
//! Higher scores are rarer. A record with no attributes scores 0.
//!
//! ## Invariants
//!
//! - Every probability is in (0, 1].
//! - Scores are relative to the collection they were computed over and are
//!   meaningless across collections.
//! - Values are compared through [`nftmeta_core::NormalizedValue`], the same
//!   normalization the schema validator uses.

pub mod error;
pub mod occurrence;
pub mod rarity;

pub use error::RarityError;
pub use occurrence::{TraitOccurrenceSummary, ValueOccurrence};
pub use rarity::{compute_rarity, RarityReport, RecordRarity, TraitKey, TraitOccurrence};
