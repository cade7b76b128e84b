//! # Numeric Normalization
//!
//! The single place where attribute values are interpreted as numbers.
//!
//! The schema validator uses [`parse_numeric`] to decide whether a numeric
//! display type carries a numeric value, and the rarity engine uses
//! [`NormalizedValue`] to decide whether two trait values are the same. Both
//! go through the same parser so the two components can never disagree on
//! what counts as a number.
//!
//! ## Rules
//!
//! - JSON numbers are numeric.
//! - Strings are numeric if, after trimming surrounding whitespace, they
//!   parse as a decimal float (`"5"`, `"5.0"`, `"-1.5e3"`).
//! - NaN and infinities are never numeric, whether spelled as strings
//!   (`"NaN"`, `"inf"`) or produced by overflow.
//! - `-0` and `0` are equal.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attribute::{Attribute, AttributeValue};

/// Parse an attribute value as a finite number.
pub fn parse_numeric(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        AttributeValue::Text(s) => parse_numeric_str(s),
    }
}

/// Parse a raw JSON value as a finite number. Non-string, non-number JSON
/// values are never numeric.
pub fn parse_numeric_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Canonical text of a finite float: shortest round-trip representation,
/// with negative zero folded into zero.
fn canonical_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// A trait value in the form used for equality and counting.
///
/// Numeric display types whose value parses are compared by numeric value;
/// everything else is compared by exact, case-sensitive string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NormalizedValue {
    /// Exact string form of a categorical value.
    Text(String),
    /// Canonical text of a numeric value.
    Number(String),
}

impl NormalizedValue {
    /// Normalize an attribute's value according to its display type.
    ///
    /// A numeric display type with a value that does not parse falls back to
    /// its text form; the schema validator reports that case separately.
    pub fn of(attribute: &Attribute) -> Self {
        if attribute.display_kind().is_numeric() {
            if let Some(number) = parse_numeric(&attribute.value) {
                return Self::Number(canonical_number(number));
            }
        }
        Self::Text(attribute.value.to_string())
    }

    /// Normalized form of a categorical value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Normalized form of a numeric value. Returns `None` for NaN or infinity.
    pub fn number(value: f64) -> Option<Self> {
        value
            .is_finite()
            .then(|| Self::Number(canonical_number(value)))
    }

    /// The normalized text, without the kind tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Number(s) => s,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
