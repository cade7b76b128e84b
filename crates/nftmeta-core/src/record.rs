//! # Metadata Records
//!
//! One NFT's descriptive document in the HIP-412 shape.
//!
//! Every field is optional at the type level. Required-ness (`name`, `image`,
//! `type`, `format`) is a validation concern, not a deserialization concern:
//! a record missing a required field still loads, and the schema validator
//! reports one finding per missing field. Unrecognized top-level keys are
//! kept in [`MetadataRecord::extra`] for the same reason.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::NftMetaError;
use crate::file::{Localization, MetadataFile};

/// Schema version tag written by the metadata builder.
pub const DEFAULT_FORMAT: &str = "HIP412@2.0.0";

/// Schema version tags the validator recognizes without a warning.
pub const RECOGNIZED_FORMATS: &[&str] = &["HIP412@1.0.0", "HIP412@2.0.0"];

/// Every top-level key of the HIP-412 record shape, in canonical order.
pub const KNOWN_FIELDS: &[&str] = &[
    "name",
    "creator",
    "creatorDID",
    "description",
    "image",
    "checksum",
    "type",
    "format",
    "attributes",
    "properties",
    "files",
    "localization",
];

/// An NFT metadata record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Display name of the item. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form creator name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Decentralized identifier of the creator.
    #[serde(default, rename = "creatorDID", skip_serializing_if = "Option::is_none")]
    pub creator_did: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URI of the item's media. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Checksum of the media file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// MIME type of the media. Required.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Schema version tag, e.g. `HIP412@2.0.0`. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Ordered traits. Order is display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
    /// Free-form properties; not validated beyond presence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Value>>,
    /// Additional media files, e.g. a high-resolution copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<MetadataFile>>,
    /// Pointers to localized copies of this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localization: Option<Localization>,
    /// Top-level keys outside [`KNOWN_FIELDS`].
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MetadataRecord {
    /// Deserialize a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`NftMetaError::Serialization`] if a known field has a JSON
    /// type the record cannot hold. Use the schema validator's raw-document
    /// path to get findings for such documents instead.
    pub fn from_json(value: Value) -> Result<Self, NftMetaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The record's attributes, or an empty slice when none are declared.
    pub fn attributes(&self) -> &[Attribute] {
        self.attributes.as_deref().unwrap_or(&[])
    }

    /// The record's additional files, or an empty slice when none are declared.
    pub fn files(&self) -> &[MetadataFile] {
        self.files.as_deref().unwrap_or(&[])
    }

    /// True if `attributes` is present and non-empty.
    pub fn has_attributes(&self) -> bool {
        !self.attributes().is_empty()
    }

    /// Render the record as a JSON object.
    ///
    /// Absent fields are omitted. Keys in `extra` that collide with a known
    /// field name are dropped, since deserialization can never produce them.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in &self.extra {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                map.insert(key.clone(), value.clone());
            }
        }

        let strings = [
            ("name", &self.name),
            ("creator", &self.creator),
            ("creatorDID", &self.creator_did),
            ("description", &self.description),
            ("image", &self.image),
            ("checksum", &self.checksum),
            ("type", &self.media_type),
            ("format", &self.format),
        ];
        for (key, value) in strings {
            if let Some(v) = value {
                map.insert(key.to_string(), Value::String(v.clone()));
            }
        }

        if let Some(ref attributes) = self.attributes {
            map.insert(
                "attributes".into(),
                Value::Array(attributes.iter().map(Attribute::to_json).collect()),
            );
        }
        if let Some(ref properties) = self.properties {
            let props: Map<String, Value> = properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            map.insert("properties".into(), Value::Object(props));
        }
        if let Some(ref files) = self.files {
            map.insert(
                "files".into(),
                Value::Array(files.iter().map(MetadataFile::to_json).collect()),
            );
        }
        if let Some(ref localization) = self.localization {
            map.insert("localization".into(), localization.to_json());
        }

        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayType;
    use serde_json::json;

    fn full_record_json() -> Value {
        json!({
            "name": "Example NFT 1",
            "creator": "Hedera",
            "description": "This is an example NFT 1",
            "image": "https://nft.com/mycollection/1.jpg",
            "type": "image/jpeg",
            "format": "HIP412@2.0.0",
            "properties": {
                "external_url": "https://nft.com/mycollection/1",
                "url": "https://nft.com/mycollection/1"
            },
            "attributes": [
                { "trait_type": "color", "value": "rgb(0,255,0)" },
                { "trait_type": "hasPipe", "value": "false" },
                { "trait_type": "stamina", "value": "65", "display_type": "boost_number" }
            ]
        })
    }

    #[test]
    fn deserializes_known_fields() {
        let record = MetadataRecord::from_json(full_record_json()).unwrap();
        assert_eq!(record.name.as_deref(), Some("Example NFT 1"));
        assert_eq!(record.media_type.as_deref(), Some("image/jpeg"));
        assert_eq!(record.attributes().len(), 3);
        assert_eq!(
            record.attributes()[2].display_type,
            Some(DisplayType::BoostNumber)
        );
        assert!(record.extra.is_empty());
    }

    #[test]
    fn unknown_keys_land_in_extra() {
        let record = MetadataRecord::from_json(json!({
            "name": "x",
            "edition": 3,
            "external_url": "https://example.com"
        }))
        .unwrap();
        assert_eq!(record.extra.len(), 2);
        assert_eq!(record.extra["edition"], json!(3));
    }

    #[test]
    fn missing_required_fields_still_load() {
        let record = MetadataRecord::from_json(json!({})).unwrap();
        assert!(record.name.is_none());
        assert!(record.image.is_none());
        assert!(!record.has_attributes());
    }

    #[test]
    fn wrong_field_type_is_a_serialization_error() {
        let err = MetadataRecord::from_json(json!({"name": 42})).unwrap_err();
        assert!(matches!(err, NftMetaError::Serialization(_)));
    }

    #[test]
    fn to_json_matches_serde_output() {
        let record = MetadataRecord::from_json(full_record_json()).unwrap();
        assert_eq!(record.to_json(), serde_json::to_value(&record).unwrap());
    }

    #[test]
    fn to_json_keeps_extra_keys() {
        let record = MetadataRecord::from_json(json!({"name": "x", "edition": 3})).unwrap();
        let rendered = record.to_json();
        assert_eq!(rendered["edition"], json!(3));
        assert_eq!(rendered["name"], json!("x"));
    }

    #[test]
    fn files_and_localization_are_typed_fields() {
        let record = MetadataRecord::from_json(json!({
            "name": "x",
            "files": [{"uri": "ipfs://y", "type": "image/png"}],
            "localization": {
                "uri": "ipfs://bafy/{locale}.json",
                "default": "en",
                "locales": ["es", "fr"]
            }
        }))
        .unwrap();
        assert!(record.extra.is_empty());
        assert_eq!(record.files()[0].media_type.as_deref(), Some("image/png"));
        assert_eq!(record.localization.as_ref().and_then(|l| l.default.as_deref()), Some("en"));
        assert_eq!(record.to_json(), serde_json::to_value(&record).unwrap());
    }

    #[test]
    fn empty_attribute_list_is_not_has_attributes() {
        let record = MetadataRecord {
            attributes: Some(vec![]),
            ..Default::default()
        };
        assert!(!record.has_attributes());
    }
}
