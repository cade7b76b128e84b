//! # Error Types
//!
//! Usage and setup errors for the schema crate. Schema violations in a record
//! are never errors; they are [`Finding`](crate::finding::Finding)s.

use thiserror::Error;

/// The embedded HIP-412 schema document could not be prepared.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema document is not valid JSON.
    #[error("schema load error: {reason}")]
    SchemaLoad {
        /// Why the document could not be parsed.
        reason: String,
    },

    /// The schema document parsed but could not be compiled.
    #[error("validator build error: {reason}")]
    ValidatorBuild {
        /// Compiler error reported by `jsonschema`.
        reason: String,
    },
}

/// Misuse of the [`MetadataBuilder`](crate::builder::MetadataBuilder)
/// set-once protocol. Fatal to the construction in progress.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A field setter was called twice.
    #[error("{field} can only be set once")]
    FieldAlreadySet {
        /// Wire name of the field, e.g. `creatorDID`.
        field: &'static str,
    },

    /// A property key was set twice.
    #[error("property '{key}' can only be set once")]
    PropertyAlreadySet {
        /// The repeated property key.
        key: String,
    },
}
