//! # Risk Configuration
//!
//! Weights per [`RiskFactor`], the level table that buckets scores into
//! labels, and the trait concentration threshold.
//!
//! ## Override Semantics
//!
//! Both tables have built-in defaults and are replaced wholesale by an
//! override. A weight mapping that omits a factor gives that factor weight 0;
//! it does not fall back to the default. In a config file, an omitted
//! `weights` or `levels` section keeps the default table for that section.
//!
//! ```yaml
//! weights:
//!   structural_validity: 50
//!   checksum_missing: 5
//! levels:
//!   - { threshold: 0, label: normal }
//!   - { threshold: 40, label: elevated }
//! concentration_threshold: 0.9
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::factor::RiskFactor;

/// Default trait concentration threshold.
pub const DEFAULT_CONCENTRATION_THRESHOLD: f64 = 0.8;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Non-negative finite weight for every risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct RiskWeights {
    pub structural_validity: f64,
    pub creator_without_did: f64,
    pub checksum_missing: f64,
    pub trait_concentration: f64,
    pub duplicate_traits: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            structural_validity: 50.0,
            creator_without_did: 20.0,
            checksum_missing: 10.0,
            trait_concentration: 30.0,
            duplicate_traits: 15.0,
        }
    }
}

impl RiskWeights {
    /// Every weight 0.
    pub fn zeroed() -> Self {
        Self {
            structural_validity: 0.0,
            creator_without_did: 0.0,
            checksum_missing: 0.0,
            trait_concentration: 0.0,
            duplicate_traits: 0.0,
        }
    }

    /// Build a weight table from a key → weight mapping.
    ///
    /// Factors missing from `map` get weight 0.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::UnknownFactor`] for a key that names no factor
    /// and [`RiskError::InvalidWeight`] for a negative or non-finite weight.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, RiskError> {
        let mut weights = Self::zeroed();
        for (key, weight) in map {
            let factor: RiskFactor = key.parse()?;
            weights.set(factor, *weight);
        }
        weights.validate()?;
        Ok(weights)
    }

    /// Weight of one factor.
    pub fn get(&self, factor: RiskFactor) -> f64 {
        match factor {
            RiskFactor::StructuralValidity => self.structural_validity,
            RiskFactor::CreatorWithoutDid => self.creator_without_did,
            RiskFactor::ChecksumMissing => self.checksum_missing,
            RiskFactor::TraitConcentration => self.trait_concentration,
            RiskFactor::DuplicateTraits => self.duplicate_traits,
        }
    }

    /// Replace the weight of one factor.
    pub fn set(&mut self, factor: RiskFactor, weight: f64) {
        let slot = match factor {
            RiskFactor::StructuralValidity => &mut self.structural_validity,
            RiskFactor::CreatorWithoutDid => &mut self.creator_without_did,
            RiskFactor::ChecksumMissing => &mut self.checksum_missing,
            RiskFactor::TraitConcentration => &mut self.trait_concentration,
            RiskFactor::DuplicateTraits => &mut self.duplicate_traits,
        };
        *slot = weight;
    }

    /// Check every weight is non-negative and finite.
    pub fn validate(&self) -> Result<(), RiskError> {
        for factor in RiskFactor::all() {
            let weight = self.get(*factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(RiskError::InvalidWeight {
                    factor: factor.to_string(),
                    weight,
                });
            }
        }
        Ok(())
    }

    /// True if every weight is 0, which makes every score 0.
    pub fn is_all_zero(&self) -> bool {
        RiskFactor::all().iter().all(|f| self.get(*f) == 0.0)
    }
}

impl TryFrom<BTreeMap<String, f64>> for RiskWeights {
    type Error = RiskError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// One bucket of the level table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevel {
    /// Upper bound (inclusive) of scores that resolve to this level.
    pub threshold: f64,
    pub label: String,
}

impl RiskLevel {
    pub fn new(threshold: f64, label: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
        }
    }
}

/// Validated level table, sorted by ascending threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskLevel>", into = "Vec<RiskLevel>")]
pub struct RiskLevels {
    levels: Vec<RiskLevel>,
}

impl Default for RiskLevels {
    fn default() -> Self {
        Self {
            levels: vec![
                RiskLevel::new(0.0, "normal"),
                RiskLevel::new(20.0, "low"),
                RiskLevel::new(60.0, "medium"),
                RiskLevel::new(125.0, "high"),
            ],
        }
    }
}

impl RiskLevels {
    /// Build a level table. Input order does not matter.
    ///
    /// # Errors
    ///
    /// Fails on an empty table, a non-finite threshold, an empty label, or
    /// two levels with the same threshold.
    pub fn new(levels: Vec<RiskLevel>) -> Result<Self, RiskError> {
        if levels.is_empty() {
            return Err(RiskError::EmptyLevels);
        }
        for level in &levels {
            if !level.threshold.is_finite() {
                return Err(RiskError::InvalidThreshold {
                    label: level.label.clone(),
                    threshold: level.threshold,
                });
            }
            if level.label.trim().is_empty() {
                return Err(RiskError::EmptyLabel {
                    threshold: level.threshold,
                });
            }
        }

        let mut levels = levels;
        levels.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        for pair in levels.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(RiskError::DuplicateThreshold {
                    threshold: pair[0].threshold,
                });
            }
        }
        Ok(Self { levels })
    }

    /// Levels in ascending threshold order. Never empty.
    pub fn levels(&self) -> &[RiskLevel] {
        &self.levels
    }
}

impl TryFrom<Vec<RiskLevel>> for RiskLevels {
    type Error = RiskError;

    fn try_from(levels: Vec<RiskLevel>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<RiskLevels> for Vec<RiskLevel> {
    fn from(levels: RiskLevels) -> Self {
        levels.levels
    }
}

// ---------------------------------------------------------------------------
// Full configuration
// ---------------------------------------------------------------------------

/// Everything the risk engine needs besides the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    pub weights: RiskWeights,
    pub levels: RiskLevels,
    /// Rarest-trait probability at or above which trait concentration is 1.
    pub concentration_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
            levels: RiskLevels::default(),
            concentration_threshold: DEFAULT_CONCENTRATION_THRESHOLD,
        }
    }
}

impl RiskConfig {
    /// Load a configuration file. Files ending in `.json` are parsed as
    /// JSON; anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::ConfigRead`] or [`RiskError::ConfigParse`] for
    /// I/O and syntax problems, and the usual validation errors for bad
    /// values.
    pub fn from_path(path: &Path) -> Result<Self, RiskError> {
        let content = fs::read_to_string(path).map_err(|e| RiskError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&content).map_err(|e| RiskError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| RiskError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded risk config");
        Ok(config)
    }

    /// Validate weights and the concentration threshold. `RiskLevels` is
    /// validated on construction.
    pub fn validate(&self) -> Result<(), RiskError> {
        self.weights.validate()?;
        let t = self.concentration_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(RiskError::InvalidConcentrationThreshold { value: t });
        }
        Ok(())
    }
}
