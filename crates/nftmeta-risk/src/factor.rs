//! # Risk Factors
//!
//! The closed set of signals the risk engine weighs. Each factor evaluates
//! to a value in [0, 1] for one record; the engine multiplies it by the
//! factor's weight.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;

/// A risk signal.
///
/// Declaration order is evaluation order, and the order in which weighted
/// contributions are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// The record has at least one error-class validation finding.
    StructuralValidity,
    /// `creator` is set but `creatorDID` is not.
    CreatorWithoutDid,
    /// `checksum` is absent or empty.
    ChecksumMissing,
    /// The record's traits are common within its collection.
    TraitConcentration,
    /// Share of attributes repeating an earlier `trait_type`.
    DuplicateTraits,
}

impl RiskFactor {
    pub fn all() -> &'static [RiskFactor] {
        &[
            Self::StructuralValidity,
            Self::CreatorWithoutDid,
            Self::ChecksumMissing,
            Self::TraitConcentration,
            Self::DuplicateTraits,
        ]
    }

    /// Configuration key for this factor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuralValidity => "structural_validity",
            Self::CreatorWithoutDid => "creator_without_did",
            Self::ChecksumMissing => "checksum_missing",
            Self::TraitConcentration => "trait_concentration",
            Self::DuplicateTraits => "duplicate_traits",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskFactor {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|factor| factor.as_str() == s)
            .ok_or_else(|| RiskError::UnknownFactor { key: s.to_string() })
    }
}
