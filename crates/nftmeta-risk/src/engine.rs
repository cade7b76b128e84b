//! # Risk Engine
//!
//! Scores one record as a weighted sum of [`RiskFactor`] values and buckets
//! the score into a level label.
//!
//! ## Invariants
//!
//! - Every factor value is in [0, 1] and every weight is non-negative, so
//!   scores are non-negative.
//! - `score` is the sum of `breakdown`, accumulated in factor order.
//! - Trait concentration is 0 unless collection statistics are supplied.

use std::collections::{BTreeMap, HashSet};

use nftmeta_core::{MetadataRecord, NormalizedValue};
use nftmeta_rarity::RarityReport;
use nftmeta_schema::Hip412Validator;
use serde::Serialize;

use crate::config::{RiskConfig, RiskLevels, RiskWeights};
use crate::error::RiskError;
use crate::factor::RiskFactor;

/// Risk assessment of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResult {
    /// Sum of `breakdown`.
    pub score: f64,
    /// Label of the level the score resolves to.
    pub level: String,
    /// Weighted contribution of every factor.
    pub breakdown: BTreeMap<RiskFactor, f64>,
}

/// Resolve a score to a level label: the first level (ascending) whose
/// threshold is at least `score`, otherwise the highest level.
pub fn resolve_level(score: f64, levels: &RiskLevels) -> &str {
    let table = levels.levels();
    table
        .iter()
        .find(|level| level.threshold >= score)
        .or_else(|| table.last())
        .map(|level| level.label.as_str())
        .unwrap_or_default()
}

/// Reusable risk scorer holding a validated configuration.
#[derive(Debug)]
pub struct RiskEngine {
    config: RiskConfig,
    validator: Hip412Validator,
}

impl RiskEngine {
    /// Build an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the configuration error naming the offending key, or
    /// [`RiskError::Schema`] if the embedded schema fails to compile.
    pub fn new(config: RiskConfig) -> Result<Self, RiskError> {
        config.validate()?;
        if config.weights.is_all_zero() {
            tracing::warn!("every risk weight is zero; all scores will be 0");
        }
        Ok(Self {
            config,
            validator: Hip412Validator::new()?,
        })
    }

    /// Engine with the built-in weights, levels and threshold.
    pub fn with_defaults() -> Result<Self, RiskError> {
        Self::new(RiskConfig::default())
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Assess one record, optionally in the context of its collection.
    pub fn assess(&self, record: &MetadataRecord, rarity: Option<&RarityReport>) -> RiskResult {
        let breakdown: BTreeMap<RiskFactor, f64> = RiskFactor::all()
            .iter()
            .map(|factor| {
                let value = self.factor_value(*factor, record, rarity);
                (*factor, value * self.config.weights.get(*factor))
            })
            .collect();
        let score: f64 = breakdown.values().sum();
        let level = resolve_level(score, &self.config.levels).to_string();

        tracing::debug!(score, level = %level, "assessed record risk");

        RiskResult {
            score,
            level,
            breakdown,
        }
    }

    /// Unweighted value of one factor, in [0, 1].
    pub fn factor_value(
        &self,
        factor: RiskFactor,
        record: &MetadataRecord,
        rarity: Option<&RarityReport>,
    ) -> f64 {
        match factor {
            RiskFactor::StructuralValidity => {
                indicator(!self.validator.validate_one(record).is_valid)
            }
            RiskFactor::CreatorWithoutDid => {
                indicator(!is_blank(&record.creator) && is_blank(&record.creator_did))
            }
            RiskFactor::ChecksumMissing => indicator(is_blank(&record.checksum)),
            RiskFactor::TraitConcentration => rarity.map_or(0.0, |report| {
                trait_concentration(record, report, self.config.concentration_threshold)
            }),
            RiskFactor::DuplicateTraits => duplicate_share(record),
        }
    }
}

/// Score one record without building an engine first. `None` selects the
/// built-in table.
///
/// Builds a fresh [`RiskEngine`] per call, which compiles the HIP-412
/// schema again. To score more than one record, build the engine once and
/// call [`RiskEngine::assess`].
///
/// # Errors
///
/// Returns a [`RiskError`] if a supplied table is invalid.
pub fn compute_risk(
    record: &MetadataRecord,
    weights: Option<&RiskWeights>,
    levels: Option<&RiskLevels>,
    rarity: Option<&RarityReport>,
) -> Result<RiskResult, RiskError> {
    let config = RiskConfig {
        weights: weights.copied().unwrap_or_default(),
        levels: levels.cloned().unwrap_or_default(),
        ..RiskConfig::default()
    };
    Ok(RiskEngine::new(config)?.assess(record, rarity))
}

fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Rarest-trait probability `p` mapped onto [0, 1]: 1 at or above
/// `threshold`, 0 for a trait unique in the collection, linear in between.
fn trait_concentration(record: &MetadataRecord, report: &RarityReport, threshold: f64) -> f64 {
    let rarest = record
        .attributes()
        .iter()
        .filter_map(|attr| report.probability_of(&attr.trait_type, &NormalizedValue::of(attr)))
        .reduce(f64::min);
    let Some(p) = rarest else {
        return 0.0;
    };
    if p >= threshold {
        return 1.0;
    }
    let floor = 1.0 / report.collection_size as f64;
    let span = threshold - floor;
    if span <= 0.0 {
        return 0.0;
    }
    ((p - floor) / span).clamp(0.0, 1.0)
}

fn duplicate_share(record: &MetadataRecord) -> f64 {
    let attributes = record.attributes();
    if attributes.is_empty() {
        return 0.0;
    }
    let mut seen = HashSet::new();
    let repeats = attributes
        .iter()
        .filter(|attr| !seen.insert(attr.trait_type.as_str()))
        .count();
    repeats as f64 / attributes.len() as f64
}
