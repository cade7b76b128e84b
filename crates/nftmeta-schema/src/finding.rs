//! # Validation Findings
//!
//! Structured validation output: one [`Finding`] per problem, with a kind,
//! a rendered message, the message parameters, and a location precise enough
//! to map the finding back to a batch row and a field inside the record.
//!
//! Findings are partitioned into two severities. Error-class findings make a
//! record invalid; warning-class findings are advisory and never flip
//! `is_valid` on their own.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::messages;

/// Whether a finding makes a record invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Advisory only.
    Warning,
    /// The record does not conform to the schema.
    Error,
}

/// The kind of structural problem a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A required field (`name`, `image`, `type`, `format`) is absent or empty.
    MissingRequiredField,
    /// `type` is absent on a record that declares attributes.
    RequiredTypeFieldMissing,
    /// A field has the wrong JSON type, or a numeric display type carries a
    /// non-numeric value.
    WrongType,
    /// An attribute entry lacks `trait_type` or `value`, is not an object, or
    /// names an unknown `display_type`.
    MalformedAttribute,
    /// `type` is not on the media allow-list.
    UnsupportedMediaType,
    /// A numeric attribute's value is greater than its `max_value`.
    ValueExceedsMaximum,
    /// A top-level key outside the known field set.
    RedundantKey,
    /// The same `trait_type` appears more than once in one record.
    DuplicateTraitType,
    /// `format` is not a recognized schema version.
    UnrecognizedFormat,
}

impl FindingKind {
    /// Stable identifier for this kind, suitable as a localization key.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::RequiredTypeFieldMissing => "required_type_field_missing",
            Self::WrongType => "wrong_type",
            Self::MalformedAttribute => "malformed_attribute",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::ValueExceedsMaximum => "value_exceeds_maximum",
            Self::RedundantKey => "redundant_key",
            Self::DuplicateTraitType => "duplicate_trait_type",
            Self::UnrecognizedFormat => "unrecognized_format",
        }
    }

    /// Severity class of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingRequiredField
            | Self::RequiredTypeFieldMissing
            | Self::WrongType
            | Self::MalformedAttribute
            | Self::UnsupportedMediaType
            | Self::ValueExceedsMaximum => Severity::Error,
            Self::RedundantKey | Self::DuplicateTraitType | Self::UnrecognizedFormat => {
                Severity::Warning
            }
        }
    }

    /// True for error-class kinds.
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a finding was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindingLocation {
    /// Index of the record within a batch. `None` for single-record validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_index: Option<usize>,
    /// Caller-supplied label (file path, CSV row, ...). Used verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Field path within the record, e.g. `attributes[2].value`. `None` for
    /// the record as a whole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for FindingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref source) = self.source {
            parts.push(source.clone());
        }
        if let Some(index) = self.record_index {
            parts.push(format!("record {index}"));
        }
        parts.push(self.path.clone().unwrap_or_else(|| "(root)".to_string()));
        f.write_str(&parts.join(": "))
    }
}

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What kind of problem this is.
    pub kind: FindingKind,
    /// Severity derived from `kind`, carried for serialized consumers.
    pub severity: Severity,
    /// English message rendered from the catalog template for `kind`.
    pub message: String,
    /// Template parameters, so callers can re-render the message in
    /// another locale keyed by [`FindingKind::code`].
    pub params: BTreeMap<String, String>,
    /// Where the problem was found.
    pub location: FindingLocation,
}

impl Finding {
    /// Create a finding at `path`, rendering its message from the catalog.
    pub fn new<'a>(
        kind: FindingKind,
        path: Option<String>,
        params: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Self {
        let params: BTreeMap<String, String> = params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            kind,
            severity: kind.severity(),
            message: messages::render(kind, &params),
            params,
            location: FindingLocation {
                record_index: None,
                source: None,
                path,
            },
        }
    }

    /// True if this finding is error-class.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Attach the batch position and source label.
    pub(crate) fn located(mut self, record_index: usize, source: Option<&str>) -> Self {
        self.location.record_index = Some(record_index);
        self.location.source = source.map(str::to_string);
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.location, self.kind, self.message)
    }
}

/// Result of validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff there are no error-class findings.
    pub is_valid: bool,
    /// Every finding, in rule evaluation order.
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// Build a result from findings, deriving `is_valid`.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        Self {
            is_valid: !findings.iter().any(Finding::is_error),
            findings,
        }
    }

    /// Error-class findings.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    /// Warning-class findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_error())
    }

    /// Number of findings of the given kind.
    pub fn count_kind(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }

    /// True if any finding has the given kind.
    pub fn has_kind(&self, kind: FindingKind) -> bool {
        self.count_kind(kind) > 0
    }
}

/// Result of validating a batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchValidationReport {
    /// True iff no record has an error-class finding.
    pub is_valid: bool,
    /// Every record's findings, concatenated in input order.
    pub errors: Vec<Finding>,
    /// Number of records validated.
    pub records_checked: usize,
    /// Indices of records with at least one error-class finding.
    pub invalid_records: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_partition() {
        assert!(FindingKind::MissingRequiredField.is_error());
        assert!(FindingKind::UnsupportedMediaType.is_error());
        assert!(!FindingKind::RedundantKey.is_error());
        assert!(!FindingKind::DuplicateTraitType.is_error());
        assert!(!FindingKind::UnrecognizedFormat.is_error());
    }

    #[test]
    fn warnings_alone_keep_result_valid() {
        let result = ValidationResult::from_findings(vec![Finding::new(
            FindingKind::RedundantKey,
            Some("edition".into()),
            [("key", "edition".to_string())],
        )]);
        assert!(result.is_valid);
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn an_error_invalidates_result() {
        let result = ValidationResult::from_findings(vec![Finding::new(
            FindingKind::MissingRequiredField,
            Some("name".into()),
            [("field", "name".to_string())],
        )]);
        assert!(!result.is_valid);
        assert!(result.has_kind(FindingKind::MissingRequiredField));
    }

    #[test]
    fn location_display() {
        let root = FindingLocation::default();
        assert_eq!(root.to_string(), "(root)");

        let full = FindingLocation {
            record_index: Some(3),
            source: Some("collection.csv".into()),
            path: Some("attributes[0].value".into()),
        };
        assert_eq!(full.to_string(), "collection.csv: record 3: attributes[0].value");
    }

    #[test]
    fn finding_carries_params_and_message() {
        let finding = Finding::new(
            FindingKind::MissingRequiredField,
            Some("image".into()),
            [("field", "image".to_string())],
        );
        assert_eq!(finding.params["field"], "image");
        assert!(finding.message.contains("\"image\""));
        assert_eq!(finding.severity, Severity::Error);
    }
}
