//! # HIP-412 Schema Validation
//!
//! Validates metadata records against the HIP-412 record shape and reports
//! every problem as a structured [`Finding`].
//!
//! ## Two Layers
//!
//! 1. **JSON type layer.** The embedded `schemas/hip412.schema.json`
//!    document (Draft 2020-12) constrains the JSON type of every known field.
//!    Each `jsonschema` violation becomes a `WrongType` finding at the
//!    violating path.
//!
//! 2. **Semantic rules.** Required fields (including those of `files`
//!    entries and `localization`), the attributes-require-`type` rule,
//!    attribute shape, numeric display types, the media allow-list, unknown
//!    keys, duplicate traits and schema format tags. A field already
//!    reported by the type layer is not reported again here.
//!
//! ## Invariants
//!
//! - Validation never short-circuits: a problem in one field never hides a
//!   problem in a sibling field or a sibling record.
//! - Batch findings are ordered by input record, then by rule order within
//!   the record, so callers can map them back to source rows.
//! - The same document always produces the same findings in the same order.

use std::collections::HashSet;
use std::fmt;

use jsonschema::Validator;
use serde_json::{Map, Value};

use nftmeta_core::numeric::parse_numeric_json;
use nftmeta_core::{
    is_supported_media_type, DisplayType, MetadataRecord, KNOWN_FIELDS, RECOGNIZED_FORMATS,
};

use crate::error::SchemaError;
use crate::finding::{BatchValidationReport, Finding, FindingKind, ValidationResult};

/// The JSON type layer of the HIP-412 schema.
const HIP412_SCHEMA: &str = include_str!("../schemas/hip412.schema.json");

/// Fields every record must carry with a non-empty value.
pub const REQUIRED_FIELDS: &[&str] = &["name", "image", "type", "format"];

/// Validator for HIP-412 metadata records.
///
/// Compiles the embedded schema once at construction; validation calls are
/// read-only and the validator can be shared freely.
pub struct Hip412Validator {
    schema: Validator,
}

impl fmt::Debug for Hip412Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hip412Validator").finish_non_exhaustive()
    }
}

impl Hip412Validator {
    /// Compile the embedded HIP-412 schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if the embedded document is not
    /// valid JSON, or [`SchemaError::ValidatorBuild`] if it does not compile.
    pub fn new() -> Result<Self, SchemaError> {
        let document: Value =
            serde_json::from_str(HIP412_SCHEMA).map_err(|e| SchemaError::SchemaLoad {
                reason: format!("invalid JSON: {e}"),
            })?;

        let schema = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(&document)
            .map_err(|e| SchemaError::ValidatorBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { schema })
    }

    /// Validate a single typed record.
    pub fn validate_one(&self, record: &MetadataRecord) -> ValidationResult {
        self.validate_value(&record.to_json())
    }

    /// Validate a raw JSON document.
    ///
    /// Accepts documents that cannot deserialize into a [`MetadataRecord`]
    /// (wrong field types, null attribute values, non-object input) and
    /// reports those problems as findings.
    pub fn validate_value(&self, document: &Value) -> ValidationResult {
        let result = ValidationResult::from_findings(self.collect_findings(document));
        tracing::debug!(
            findings = result.findings.len(),
            is_valid = result.is_valid,
            "validated metadata record"
        );
        result
    }

    /// Validate a batch of typed records.
    ///
    /// `source_label` is attached verbatim to every finding's location.
    pub fn validate_many(
        &self,
        records: &[MetadataRecord],
        source_label: Option<&str>,
    ) -> BatchValidationReport {
        self.validate_batch(records, source_label, Self::validate_one)
    }

    /// Validate a batch of raw JSON documents.
    pub fn validate_many_values(
        &self,
        documents: &[Value],
        source_label: Option<&str>,
    ) -> BatchValidationReport {
        self.validate_batch(documents, source_label, Self::validate_value)
    }

    fn validate_batch<T>(
        &self,
        items: &[T],
        source_label: Option<&str>,
        validate: impl Fn(&Self, &T) -> ValidationResult,
    ) -> BatchValidationReport {
        let mut errors = Vec::new();
        let mut invalid_records = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let result = validate(self, item);
            if !result.is_valid {
                invalid_records.push(index);
            }
            errors.extend(
                result
                    .findings
                    .into_iter()
                    .map(|finding| finding.located(index, source_label)),
            );
        }

        tracing::debug!(
            source = source_label.unwrap_or("-"),
            records = items.len(),
            invalid = invalid_records.len(),
            findings = errors.len(),
            "validated metadata batch"
        );

        BatchValidationReport {
            is_valid: invalid_records.is_empty(),
            errors,
            records_checked: items.len(),
            invalid_records,
        }
    }

    fn collect_findings(&self, document: &Value) -> Vec<Finding> {
        let mut findings = Vec::new();

        for error in self.schema.iter_errors(document) {
            let path = pointer_to_path(&error.instance_path.to_string());
            let field = if path.is_empty() {
                "(root)".to_string()
            } else {
                path.clone()
            };
            findings.push(Finding::new(
                FindingKind::WrongType,
                (!path.is_empty()).then_some(path),
                [("field", field), ("detail", error.to_string())],
            ));
        }

        let Some(object) = document.as_object() else {
            return findings;
        };

        check_required_fields(object, &mut findings);
        check_media_type(object, &mut findings);
        check_format(object, &mut findings);

        if let Some(Value::Array(attributes)) = object.get("attributes") {
            let mut seen_trait_types = HashSet::new();
            for (index, entry) in attributes.iter().enumerate() {
                check_attribute(index, entry, &mut seen_trait_types, &mut findings);
            }
        }
        if let Some(Value::Array(files)) = object.get("files") {
            for (index, entry) in files.iter().enumerate() {
                check_file(index, entry, &mut findings);
            }
        }
        if let Some(Value::Object(localization)) = object.get("localization") {
            check_localization(localization, &mut findings);
        }

        for key in object.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                findings.push(Finding::new(
                    FindingKind::RedundantKey,
                    Some(key.clone()),
                    [("key", key.clone())],
                ));
            }
        }

        findings
    }
}

/// Absent, null, and whitespace-only strings all count as missing. A
/// non-string value is not missing; the type layer reports it.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_required_fields(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    let declares_attributes = object
        .get("attributes")
        .and_then(Value::as_array)
        .is_some_and(|attributes| !attributes.is_empty());

    for field in REQUIRED_FIELDS {
        if !is_blank(object.get(*field)) {
            continue;
        }
        if *field == "type" && declares_attributes {
            findings.push(Finding::new(
                FindingKind::RequiredTypeFieldMissing,
                Some("type".to_string()),
                [],
            ));
        } else {
            findings.push(missing(field.to_string()));
        }
    }
}

fn missing(path: String) -> Finding {
    Finding::new(
        FindingKind::MissingRequiredField,
        Some(path.clone()),
        [("field", path)],
    )
}

fn check_media_type(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    check_media_type_at(object, "type".to_string(), findings);
}

fn check_media_type_at(object: &Map<String, Value>, path: String, findings: &mut Vec<Finding>) {
    if let Some(Value::String(mime)) = object.get("type") {
        if !mime.trim().is_empty() && !is_supported_media_type(mime) {
            findings.push(Finding::new(
                FindingKind::UnsupportedMediaType,
                Some(path),
                [("mime", mime.clone())],
            ));
        }
    }
}

/// A `files` entry needs a `uri` and a supported `type`. Non-object entries
/// are left to the type layer.
fn check_file(index: usize, entry: &Value, findings: &mut Vec<Finding>) {
    let Some(file) = entry.as_object() else {
        return;
    };
    let base = format!("files[{index}]");
    for field in ["uri", "type"] {
        if is_blank(file.get(field)) {
            findings.push(missing(format!("{base}.{field}")));
        }
    }
    check_media_type_at(file, format!("{base}.type"), findings);
}

fn check_localization(localization: &Map<String, Value>, findings: &mut Vec<Finding>) {
    for field in ["uri", "default", "locales"] {
        if is_blank(localization.get(field)) {
            findings.push(missing(format!("localization.{field}")));
        }
    }
}

fn check_format(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    if let Some(Value::String(format)) = object.get("format") {
        let format = format.trim();
        if !format.is_empty() && !RECOGNIZED_FORMATS.contains(&format) {
            findings.push(Finding::new(
                FindingKind::UnrecognizedFormat,
                Some("format".to_string()),
                [("format", format.to_string())],
            ));
        }
    }
}

fn malformed(index: usize, path: String, detail: &str) -> Finding {
    Finding::new(
        FindingKind::MalformedAttribute,
        Some(path),
        [("index", index.to_string()), ("detail", detail.to_string())],
    )
}

fn check_attribute(
    index: usize,
    entry: &Value,
    seen_trait_types: &mut HashSet<String>,
    findings: &mut Vec<Finding>,
) {
    let base = format!("attributes[{index}]");
    let Some(attribute) = entry.as_object() else {
        findings.push(malformed(index, base, "entry is not an object"));
        return;
    };

    let trait_path = format!("{base}.trait_type");
    match attribute.get("trait_type") {
        None | Some(Value::Null) => {
            findings.push(malformed(index, trait_path, "missing trait_type"));
        }
        Some(Value::String(trait_type)) if trait_type.trim().is_empty() => {
            findings.push(malformed(index, trait_path, "empty trait_type"));
        }
        Some(Value::String(trait_type)) => {
            if !seen_trait_types.insert(trait_type.clone()) {
                findings.push(Finding::new(
                    FindingKind::DuplicateTraitType,
                    Some(trait_path),
                    [("index", index.to_string()), ("trait_type", trait_type.clone())],
                ));
            }
        }
        Some(_) => {}
    }

    let value_path = format!("{base}.value");
    let value = attribute.get("value").filter(|v| !v.is_null());
    if value.is_none() {
        findings.push(malformed(index, value_path.clone(), "missing value"));
    }

    let display = match attribute.get("display_type") {
        Some(Value::String(name)) => match name.parse::<DisplayType>() {
            Ok(display) => display,
            Err(_) => {
                findings.push(malformed(
                    index,
                    format!("{base}.display_type"),
                    &format!("unknown display_type \"{name}\""),
                ));
                return;
            }
        },
        _ => DisplayType::Categorical,
    };
    if !display.is_numeric() {
        return;
    }

    let number = match value {
        Some(v @ (Value::String(_) | Value::Number(_))) => {
            let parsed = parse_numeric_json(v);
            if parsed.is_none() {
                findings.push(Finding::new(
                    FindingKind::WrongType,
                    Some(value_path.clone()),
                    [
                        ("field", value_path.clone()),
                        (
                            "detail",
                            format!(
                                "display_type \"{display}\" requires a numeric value, got {}",
                                json_text(v)
                            ),
                        ),
                    ],
                ));
            }
            parsed
        }
        _ => None,
    };

    if let Some(max @ (Value::String(_) | Value::Number(_))) = attribute.get("max_value") {
        let max_path = format!("{base}.max_value");
        match parse_numeric_json(max) {
            None => findings.push(Finding::new(
                FindingKind::WrongType,
                Some(max_path.clone()),
                [
                    ("field", max_path),
                    (
                        "detail",
                        format!("max_value must be numeric, got {}", json_text(max)),
                    ),
                ],
            )),
            Some(limit) => {
                if let Some(n) = number.filter(|n| *n > limit) {
                    let trait_type = attribute
                        .get("trait_type")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    findings.push(Finding::new(
                        FindingKind::ValueExceedsMaximum,
                        Some(value_path),
                        [
                            ("index", index.to_string()),
                            ("trait_type", trait_type.to_string()),
                            ("value", n.to_string()),
                            ("max", limit.to_string()),
                        ],
                    ));
                }
            }
        }
    }
}

/// Strings render without quotes; everything else as compact JSON.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert a JSON Pointer (`/attributes/0/value`) into the dotted field path
/// used in finding locations (`attributes[0].value`).
fn pointer_to_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !path.is_empty() && segment.parse::<usize>().is_ok() {
            path.push('[');
            path.push_str(&segment);
            path.push(']');
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&segment);
        }
    }
    path
}
