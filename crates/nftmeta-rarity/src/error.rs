use thiserror::Error;

/// Errors returned by [`compute_rarity`](crate::compute_rarity).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RarityError {
    /// Rarity is undefined over zero records.
    #[error("cannot compute rarity over an empty collection")]
    EmptyCollection,
}
