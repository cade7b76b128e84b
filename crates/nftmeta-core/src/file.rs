//! # Files & Localization
//!
//! The two nested objects a record may carry besides attributes:
//! additional media files and pointers to localized copies of the record.
//!
//! Fields the HIP-412 shape requires (`uri` and `type` on a file; `uri`,
//! `default` and `locales` on localization) are still `Option` here so that
//! a record missing them loads and the validator can report each one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a record's `files` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFile {
    /// Location of the file. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// MIME type of the file. Required.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Marks the file shown by default when several are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default_file: Option<bool>,
    /// Nested metadata describing this file. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Location of nested metadata stored elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_uri: Option<String>,
}

impl MetadataFile {
    /// A file entry with its two required fields set.
    pub fn new(uri: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            media_type: Some(media_type.into()),
            ..Default::default()
        }
    }

    /// Render this entry as a JSON object. Absent fields are omitted.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        let strings = [
            ("uri", &self.uri),
            ("type", &self.media_type),
            ("checksum", &self.checksum),
            ("metadata_uri", &self.metadata_uri),
        ];
        for (key, value) in strings {
            if let Some(v) = value {
                map.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        if let Some(is_default) = self.is_default_file {
            map.insert("is_default_file".into(), Value::Bool(is_default));
        }
        if let Some(ref metadata) = self.metadata {
            map.insert("metadata".into(), metadata.clone());
        }
        Value::Object(map)
    }
}

/// The `localization` object: where to find this record in other locales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    /// URI template containing `{locale}`. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Locale of the record itself, e.g. `en`. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Other available locales. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
}

impl Localization {
    pub fn new(
        uri: impl Into<String>,
        default: impl Into<String>,
        locales: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            uri: Some(uri.into()),
            default: Some(default.into()),
            locales: Some(locales.into_iter().map(Into::into).collect()),
        }
    }

    /// Render as a JSON object. Absent fields are omitted.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(ref uri) = self.uri {
            map.insert("uri".into(), Value::String(uri.clone()));
        }
        if let Some(ref default) = self.default {
            map.insert("default".into(), Value::String(default.clone()));
        }
        if let Some(ref locales) = self.locales {
            map.insert(
                "locales".into(),
                Value::Array(locales.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(map)
    }
}
