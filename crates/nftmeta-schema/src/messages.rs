//! # Finding Message Catalog
//!
//! English templates for every [`FindingKind`]. Templates use `{name}`
//! placeholders; a finding stores both the rendered message and the raw
//! parameters, so a caller holding a catalog for another locale can render
//! `kind.code()` + `params` itself.
//!
//! Missing parameters are left as their literal `{name}` placeholder.

use std::collections::BTreeMap;

use crate::finding::FindingKind;

/// Returns the English template for a finding kind.
pub fn template(kind: FindingKind) -> &'static str {
    match kind {
        FindingKind::MissingRequiredField => "Required field \"{field}\" is missing.",
        FindingKind::RequiredTypeFieldMissing => "The required \"type\" field is missing.",
        FindingKind::WrongType => "Field \"{field}\" has the wrong type: {detail}",
        FindingKind::MalformedAttribute => "Attribute {index} is malformed: {detail}",
        FindingKind::UnsupportedMediaType => "Unsupported media MIME type \"{mime}\".",
        FindingKind::ValueExceedsMaximum => {
            "Attribute {index} (\"{trait_type}\") value {value} exceeds max_value {max}."
        }
        FindingKind::RedundantKey => "Redundant key detected: '{key}'.",
        FindingKind::DuplicateTraitType => {
            "Attribute {index} repeats trait_type \"{trait_type}\"."
        }
        FindingKind::UnrecognizedFormat => "Unrecognized schema format \"{format}\".",
    }
}

/// Render the template for `kind` with the given parameters.
pub fn render(kind: FindingKind, params: &BTreeMap<String, String>) -> String {
    fill(template(kind), params)
}

/// Substitute `{name}` placeholders in `template`.
///
/// Single left-to-right pass over the template: substituted values are
/// never scanned again, so a value containing `{field}` is emitted as is.
pub fn fill(template: &str, params: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail[1..].find(|c: char| c == '{' || c == '}').map(|i| i + 1) else {
            out.push_str(tail);
            return out;
        };
        if tail[close..].starts_with('{') {
            // Unclosed brace; the next `{` may still open a placeholder.
            out.push_str(&tail[..close]);
            rest = &tail[close..];
            continue;
        }
        match params.get(&tail[1..close]) {
            Some(value) => out.push_str(value),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}
