//! # Attributes
//!
//! A single trait on an item: a `trait_type` key, a string-or-number value,
//! and optional display hints.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::display::DisplayType;

/// An attribute value as it appears in metadata JSON: a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A JSON string value (also used for numbers written as strings).
    Text(String),
    /// A JSON number value.
    Number(serde_json::Number),
}

impl AttributeValue {
    /// Build a numeric value from a float. Returns `None` for NaN or infinity,
    /// which JSON cannot represent.
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Self::Number)
    }

    /// Returns the string if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Render this value as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// A single trait on an NFT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Categorical key of the trait, e.g. `"color"`.
    pub trait_type: String,
    /// The trait's value.
    pub value: AttributeValue,
    /// Display hint; `None` means categorical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
    /// Upper bound for bounded numeric display types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<AttributeValue>,
}

impl Attribute {
    /// Create a categorical attribute.
    pub fn new(trait_type: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type: None,
            max_value: None,
        }
    }

    /// Set the display type.
    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = Some(display_type);
        self
    }

    /// Set the maximum value.
    pub fn with_max_value(mut self, max_value: impl Into<AttributeValue>) -> Self {
        self.max_value = Some(max_value.into());
        self
    }

    /// The effective display type: an absent `display_type` is categorical.
    pub fn display_kind(&self) -> DisplayType {
        self.display_type.unwrap_or(DisplayType::Categorical)
    }

    /// Render this attribute as a JSON object.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("trait_type".into(), Value::String(self.trait_type.clone()));
        map.insert("value".into(), self.value.to_json());
        if let Some(display_type) = self.display_type {
            map.insert(
                "display_type".into(),
                Value::String(display_type.as_str().to_string()),
            );
        }
        if let Some(ref max_value) = self.max_value {
            map.insert("max_value".into(), max_value.to_json());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_accepts_string_and_number() {
        let text: AttributeValue = serde_json::from_value(json!("red")).unwrap();
        assert_eq!(text, AttributeValue::Text("red".into()));

        let number: AttributeValue = serde_json::from_value(json!(65)).unwrap();
        assert_eq!(number, AttributeValue::from(65_i64));
    }

    #[test]
    fn value_rejects_other_json_types() {
        assert!(serde_json::from_value::<AttributeValue>(json!(true)).is_err());
        assert!(serde_json::from_value::<AttributeValue>(json!(null)).is_err());
        assert!(serde_json::from_value::<AttributeValue>(json!([1])).is_err());
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(AttributeValue::from_f64(f64::NAN).is_none());
        assert!(AttributeValue::from_f64(f64::INFINITY).is_none());
        assert!(AttributeValue::from_f64(2.5).is_some());
    }

    #[test]
    fn absent_display_type_is_categorical() {
        let attr = Attribute::new("color", "red");
        assert_eq!(attr.display_kind(), DisplayType::Categorical);
        let boosted = Attribute::new("stamina", 65_i64).with_display_type(DisplayType::BoostNumber);
        assert_eq!(boosted.display_kind(), DisplayType::BoostNumber);
    }

    #[test]
    fn to_json_omits_absent_hints() {
        let attr = Attribute::new("color", "red");
        assert_eq!(attr.to_json(), json!({"trait_type": "color", "value": "red"}));

        let bounded = Attribute::new("level", "5")
            .with_display_type(DisplayType::Number)
            .with_max_value(10_i64);
        assert_eq!(
            bounded.to_json(),
            json!({
                "trait_type": "level",
                "value": "5",
                "display_type": "number",
                "max_value": 10
            })
        );
    }

    #[test]
    fn to_json_agrees_with_serde() {
        let attr = Attribute::new("speed", 12_i64)
            .with_display_type(DisplayType::BoostPercentage)
            .with_max_value("100");
        assert_eq!(attr.to_json(), serde_json::to_value(&attr).unwrap());
    }
}
