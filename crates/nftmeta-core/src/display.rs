//! # Display Type — Attribute Rendering Variants
//!
//! Defines the closed set of attribute display types recognized by the
//! HIP-412 attribute shape. An attribute without a `display_type` is
//! categorical; the three numeric variants require a value that parses as
//! a number.
//!
//! Every `match` on [`DisplayType`] is exhaustive, so adding a variant forces
//! the validator and the rarity engine to decide how to treat it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::NftMetaError;

/// How an attribute value is meant to be displayed and compared.
///
/// | Variant | Wire name | Numeric |
/// |---------|-----------|---------|
/// | Categorical | `string` | no |
/// | Number | `number` | yes |
/// | BoostNumber | `boost_number` | yes |
/// | BoostPercentage | `boost_percentage` | yes |
/// | Date | `date` | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// Plain categorical trait, compared by exact string equality.
    #[serde(rename = "string", alias = "categorical")]
    Categorical,
    /// Numeric trait rendered as a plain number.
    Number,
    /// Numeric trait rendered as a boost.
    BoostNumber,
    /// Numeric trait rendered as a percentage boost.
    BoostPercentage,
    /// Date trait (typically a unix timestamp). Not range-checked.
    Date,
}

impl DisplayType {
    /// Returns all display types in declaration order.
    pub fn all() -> &'static [DisplayType] {
        &[
            Self::Categorical,
            Self::Number,
            Self::BoostNumber,
            Self::BoostPercentage,
            Self::Date,
        ]
    }

    /// Returns the wire name for this display type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categorical => "string",
            Self::Number => "number",
            Self::BoostNumber => "boost_number",
            Self::BoostPercentage => "boost_percentage",
            Self::Date => "date",
        }
    }

    /// True for display types whose value must parse as a number.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number | Self::BoostNumber | Self::BoostPercentage => true,
            Self::Categorical | Self::Date => false,
        }
    }
}

impl std::fmt::Display for DisplayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = NftMetaError;

    /// Parse a display type from its wire name. `categorical` is accepted
    /// as an alias of `string`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "categorical" => Ok(Self::Categorical),
            "number" => Ok(Self::Number),
            "boost_number" => Ok(Self::BoostNumber),
            "boost_percentage" => Ok(Self::BoostPercentage),
            "date" => Ok(Self::Date),
            other => Err(NftMetaError::UnknownDisplayType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_roundtrip() {
        for display in DisplayType::all() {
            let parsed: DisplayType = display.as_str().parse().unwrap();
            assert_eq!(*display, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("color".parse::<DisplayType>().is_err());
        assert!("Number".parse::<DisplayType>().is_err()); // case-sensitive
        assert!("".parse::<DisplayType>().is_err());
    }

    #[test]
    fn test_categorical_alias() {
        assert_eq!(
            "categorical".parse::<DisplayType>().unwrap(),
            DisplayType::Categorical
        );
        let parsed: DisplayType = serde_json::from_str("\"categorical\"").unwrap();
        assert_eq!(parsed, DisplayType::Categorical);
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for display in DisplayType::all() {
            let json = serde_json::to_string(display).unwrap();
            assert_eq!(json, format!("\"{}\"", display.as_str()));
        }
    }

    #[test]
    fn test_numeric_variants() {
        let numeric: Vec<_> = DisplayType::all()
            .iter()
            .filter(|d| d.is_numeric())
            .collect();
        assert_eq!(
            numeric,
            vec![
                &DisplayType::Number,
                &DisplayType::BoostNumber,
                &DisplayType::BoostPercentage
            ]
        );
    }
}
