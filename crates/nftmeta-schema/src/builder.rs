//! # Metadata Builder
//!
//! Assembles a [`MetadataRecord`] field by field and validates it on
//! [`MetadataBuilder::build`].
//!
//! ## Set-Once Semantics
//!
//! Every single-valued field may be set exactly once. A second call to the
//! same setter returns [`BuilderError::FieldAlreadySet`] and the first value
//! is kept. Properties are set-once per key. Attributes are a list and may be
//! added any number of times; their order is preserved. `files` behaves like
//! attributes and `localization` is set-once.
//!
//! The builder does not check values as they are set. `build` always returns
//! the assembled record together with its validation result, so callers can
//! inspect a partially-filled record and the findings explaining what is
//! missing.

use serde::Serialize;
use serde_json::Value;

use nftmeta_core::{
    Attribute, AttributeValue, DisplayType, Localization, MetadataFile, MetadataRecord,
    DEFAULT_FORMAT,
};

use crate::error::BuilderError;
use crate::finding::ValidationResult;
use crate::validate::Hip412Validator;

/// Output of [`MetadataBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltMetadata {
    /// The assembled record.
    pub metadata: MetadataRecord,
    /// Validation result for `metadata`.
    pub validation: ValidationResult,
}

impl BuiltMetadata {
    /// True if the assembled record has no error-class findings.
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

/// Set-once builder for HIP-412 metadata records.
///
/// `format` starts preset to [`DEFAULT_FORMAT`] and is not settable.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    record: MetadataRecord,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn set_once(
    slot: &mut Option<String>,
    field: &'static str,
    value: impl Into<String>,
) -> Result<(), BuilderError> {
    if slot.is_some() {
        return Err(BuilderError::FieldAlreadySet { field });
    }
    *slot = Some(value.into());
    Ok(())
}

impl MetadataBuilder {
    /// Start an empty record with `format` preset.
    pub fn new() -> Self {
        Self {
            record: MetadataRecord {
                format: Some(DEFAULT_FORMAT.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Result<Self, BuilderError> {
        set_once(&mut self.record.name, "name", name)?;
        Ok(self)
    }

    pub fn set_image(mut self, image: impl Into<String>) -> Result<Self, BuilderError> {
        set_once(&mut self.record.image, "image", image)?;
        Ok(self)
    }

    /// Set the media MIME type (the record's `type` field).
    pub fn set_type(mut self, media_type: impl Into<String>) -> Result<Self, BuilderError> {
        set_once(&mut self.record.media_type, "type", media_type)?;
        Ok(self)
    }

    pub fn set_creator(mut self, creator: impl Into<String>) -> Result<Self, BuilderError> {
        set_once(&mut self.record.creator, "creator", creator)?;
        Ok(self)
    }

    pub fn set_creator_did(mut self, did: impl Into<String>) -> Result<Self, BuilderError> {
        set_once(&mut self.record.creator_did, "creatorDID", did)?;
        Ok(self)
    }

    pub fn set_description(
        mut self,
        description: impl Into<String>,
    ) -> Result<Self, BuilderError> {
        set_once(&mut self.record.description, "description", description)?;
        Ok(self)
    }

    pub fn set_checksum(mut self, checksum: impl Into<String>) -> Result<Self, BuilderError> {
        set_once(&mut self.record.checksum, "checksum", checksum)?;
        Ok(self)
    }

    /// Set one entry of the free-form `properties` map.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::PropertyAlreadySet`] if `key` was set before.
    pub fn set_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, BuilderError> {
        let key = key.into();
        let properties = self.record.properties.get_or_insert_with(Default::default);
        if properties.contains_key(&key) {
            return Err(BuilderError::PropertyAlreadySet { key });
        }
        properties.insert(key, value.into());
        Ok(self)
    }

    /// Append an attribute. Attributes are never deduplicated here; a
    /// repeated `trait_type` shows up as a warning at build time.
    pub fn add_attribute(
        mut self,
        trait_type: impl Into<String>,
        value: impl Into<AttributeValue>,
        display_type: Option<DisplayType>,
        max_value: Option<AttributeValue>,
    ) -> Self {
        let attribute = Attribute {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type,
            max_value,
        };
        self.record
            .attributes
            .get_or_insert_with(Vec::new)
            .push(attribute);
        self
    }

    /// Append an additional media file.
    pub fn add_file(mut self, file: MetadataFile) -> Self {
        self.record.files.get_or_insert_with(Vec::new).push(file);
        self
    }

    pub fn set_localization(mut self, localization: Localization) -> Result<Self, BuilderError> {
        if self.record.localization.is_some() {
            return Err(BuilderError::FieldAlreadySet {
                field: "localization",
            });
        }
        self.record.localization = Some(localization);
        Ok(self)
    }

    /// Validate and return the assembled record.
    pub fn build(self, validator: &Hip412Validator) -> BuiltMetadata {
        let validation = validator.validate_one(&self.record);
        tracing::debug!(
            is_valid = validation.is_valid,
            findings = validation.findings.len(),
            "built metadata record"
        );
        BuiltMetadata {
            metadata: self.record,
            validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;

    #[test]
    fn format_is_preset() {
        let validator = Hip412Validator::new().unwrap();
        let built = MetadataBuilder::new().build(&validator);
        assert_eq!(built.metadata.format.as_deref(), Some(DEFAULT_FORMAT));
        assert!(!built
            .validation
            .findings
            .iter()
            .any(|f| f.location.path.as_deref() == Some("format")));
    }

    #[test]
    fn files_and_localization_build_clean() {
        let validator = Hip412Validator::new().unwrap();
        let built = MetadataBuilder::new()
            .set_name("Item")
            .unwrap()
            .set_image("ipfs://x")
            .unwrap()
            .set_type("image/png")
            .unwrap()
            .add_file(MetadataFile::new("ipfs://y", "image/png"))
            .set_localization(Localization::new("ipfs://l/{locale}.json", "en", ["fr"]))
            .unwrap()
            .build(&validator);
        assert!(built.validation.findings.is_empty(), "{:?}", built.validation.findings);
        assert_eq!(built.metadata.files().len(), 1);

        let err = MetadataBuilder::new()
            .set_localization(Localization::default())
            .unwrap()
            .set_localization(Localization::default())
            .unwrap_err();
        assert_eq!(err, BuilderError::FieldAlreadySet { field: "localization" });
    }

    #[test]
    fn second_set_keeps_first_value() {
        let builder = MetadataBuilder::new().set_name("first").unwrap();
        let err = builder.clone().set_name("second").unwrap_err();
        assert_eq!(err, BuilderError::FieldAlreadySet { field: "name" });
        assert_eq!(err.to_string(), "name can only be set once");

        let validator = Hip412Validator::new().unwrap();
        assert_eq!(
            builder.build(&validator).metadata.name.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn every_setter_is_set_once() {
        type Setter = fn(MetadataBuilder) -> Result<MetadataBuilder, BuilderError>;
        let setters: [(&str, Setter); 7] = [
            ("name", |b| b.set_name("x")),
            ("image", |b| b.set_image("x")),
            ("type", |b| b.set_type("x")),
            ("creator", |b| b.set_creator("x")),
            ("creatorDID", |b| b.set_creator_did("x")),
            ("description", |b| b.set_description("x")),
            ("checksum", |b| b.set_checksum("x")),
        ];
        for (field, set) in setters {
            let once = set(MetadataBuilder::new()).unwrap();
            assert_eq!(
                set(once).unwrap_err(),
                BuilderError::FieldAlreadySet { field }
            );
        }
    }

    #[test]
    fn property_keys_are_set_once() {
        let builder = MetadataBuilder::new()
            .set_property("external_url", "https://a")
            .unwrap()
            .set_property("edition", 3)
            .unwrap();
        let err = builder.set_property("edition", 4).unwrap_err();
        assert_eq!(
            err,
            BuilderError::PropertyAlreadySet {
                key: "edition".into()
            }
        );
    }

    #[test]
    fn attributes_preserve_order() {
        let validator = Hip412Validator::new().unwrap();
        let built = MetadataBuilder::new()
            .add_attribute("b", "2", None, None)
            .add_attribute("a", "1", None, None)
            .build(&validator);
        let order: Vec<_> = built
            .metadata
            .attributes()
            .iter()
            .map(|a| a.trait_type.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn incomplete_build_reports_missing_fields() {
        let validator = Hip412Validator::new().unwrap();
        let built = MetadataBuilder::new()
            .set_name("Example")
            .unwrap()
            .add_attribute("color", "red", None, None)
            .build(&validator);
        assert!(!built.is_valid());
        assert!(built
            .validation
            .has_kind(FindingKind::RequiredTypeFieldMissing));
        assert_eq!(
            built
                .validation
                .count_kind(FindingKind::MissingRequiredField),
            1
        );
    }
}
