//! # nftmeta-core — Foundational Types for NFT Metadata
//!
//! This crate defines the data model every other `nftmeta-*` crate operates
//! on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Records tolerate absence.** Every [`MetadataRecord`] field is optional
//!    so that a document missing required fields can still be represented and
//!    reported on by the schema validator instead of failing deserialization.
//!
//! 2. **Single `DisplayType` enum.** Categorical and numeric display types are
//!    a closed set. Every `match` on [`DisplayType`] is exhaustive.
//!
//! 3. **One notion of numeric equality.** [`numeric::parse_numeric`] and
//!    [`NormalizedValue`] are the only places a trait value is interpreted as
//!    a number. The validator and the rarity engine both go through them, so
//!    `"5"` and `"5.0"` are the same trait value everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `nftmeta-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod attribute;
pub mod display;
pub mod error;
pub mod file;
pub mod media;
pub mod numeric;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use attribute::{Attribute, AttributeValue};
pub use display::DisplayType;
pub use error::NftMetaError;
pub use file::{Localization, MetadataFile};
pub use media::{is_supported_media_type, SUPPORTED_MEDIA_TYPES};
pub use numeric::{parse_numeric, NormalizedValue};
pub use record::{MetadataRecord, DEFAULT_FORMAT, KNOWN_FIELDS, RECOGNIZED_FORMATS};
