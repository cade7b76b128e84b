//! # Error Types
//!
//! Errors raised while interpreting core data-model values. Content problems
//! in a metadata record are never errors at this layer; they are reported as
//! findings by `nftmeta-schema`.

use thiserror::Error;

/// Top-level error type for the core data model.
#[derive(Error, Debug)]
pub enum NftMetaError {
    /// A display type string is not one of the recognized variants.
    #[error("unknown display type: {0:?}")]
    UnknownDisplayType(String),

    /// A value could not be converted to or from its JSON form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
