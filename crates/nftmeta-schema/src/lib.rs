//! # nftmeta-schema — HIP-412 Validation & Metadata Builder
//!
//! Validates NFT metadata records against the HIP-412 shape and assembles
//! new records through a set-once builder.
//!
//! ## Runtime Validation (`validate`)
//!
//! The [`validate`] module compiles the embedded `hip412.schema.json` type
//! layer once and applies the semantic HIP-412 rules on top of it. Key
//! entry points:
//!
//! - [`Hip412Validator::validate_one`] for a typed [`MetadataRecord`].
//! - [`Hip412Validator::validate_value`] for a raw JSON document that may not
//!   even deserialize.
//! - [`Hip412Validator::validate_many`] for a batch, with findings tagged by
//!   record index and a caller-supplied source label.
//!
//! ## Findings (`finding`, `messages`)
//!
//! Every problem is a [`Finding`] with a kind, severity, rendered English
//! message, message parameters, and location. Error-class findings make a
//! record invalid; warnings never do.
//!
//! ## Builder (`builder`)
//!
//! [`MetadataBuilder`] enforces set-once fields and validates on `build`.
//!
//! ## Crate Policy
//!
//! - Depends only on `nftmeta-core` internally.
//! - Validation never short-circuits and never panics on malformed input.
//! - Record-level problems are findings, never `Err`. Only schema setup and
//!   builder misuse return errors.
//!
//! [`MetadataRecord`]: nftmeta_core::MetadataRecord

pub mod builder;
pub mod error;
pub mod finding;
pub mod messages;
pub mod validate;

pub use builder::{BuiltMetadata, MetadataBuilder};
pub use error::{BuilderError, SchemaError};
pub use finding::{
    BatchValidationReport, Finding, FindingKind, FindingLocation, Severity, ValidationResult,
};
pub use validate::{Hip412Validator, REQUIRED_FIELDS};
