//! # Rarity Statistics
//!
//! Trait frequency counting and per-record rarity scoring over one
//! collection.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use nftmeta_core::{MetadataRecord, NormalizedValue};
use serde::{Serialize, Serializer};

use crate::error::RarityError;

/// A `(trait_type, normalized value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TraitKey {
    /// The attribute's `trait_type`.
    pub trait_type: String,
    /// The attribute's value after normalization.
    pub value: NormalizedValue,
}

impl TraitKey {
    pub fn new(trait_type: impl Into<String>, value: NormalizedValue) -> Self {
        Self {
            trait_type: trait_type.into(),
            value,
        }
    }
}

/// How often one trait pair occurs in the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitOccurrence {
    pub trait_type: String,
    pub value: NormalizedValue,
    /// Number of records carrying this pair.
    pub count: usize,
    /// `count / collection_size`, in (0, 1].
    pub probability: f64,
}

/// Rarity of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRarity {
    /// Position of the record in the input collection.
    pub index: usize,
    /// Sum of `1 / probability` over the record's declared attributes.
    pub score: f64,
    /// Number of declared attributes that contributed to `score`.
    pub attribute_count: usize,
}

/// Collection-wide rarity statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RarityReport {
    /// Number of records the statistics were computed over. Always ≥ 1.
    pub collection_size: usize,
    /// One entry per input record, in input order.
    pub per_record: Vec<RecordRarity>,
    /// Occurrence of every trait pair seen in the collection.
    #[serde(serialize_with = "serialize_occurrences")]
    pub per_trait: BTreeMap<TraitKey, TraitOccurrence>,
}

// Struct keys are not valid JSON object keys; emit the entries as a list.
fn serialize_occurrences<S: Serializer>(
    per_trait: &BTreeMap<TraitKey, TraitOccurrence>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(per_trait.values())
}

impl RarityReport {
    /// Records ordered rarest first. Equal scores keep input order.
    pub fn ranking(&self) -> Vec<&RecordRarity> {
        let mut ranked: Vec<&RecordRarity> = self.per_record.iter().collect();
        ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
            Ordering::Equal => a.index.cmp(&b.index),
            other => other,
        });
        ranked
    }

    /// Probability of a trait pair, or `None` if no record carries it.
    pub fn probability_of(&self, trait_type: &str, value: &NormalizedValue) -> Option<f64> {
        self.per_trait
            .get(&TraitKey::new(trait_type, value.clone()))
            .map(|occurrence| occurrence.probability)
    }

    /// Rarity entry for the record at `index`.
    pub fn record(&self, index: usize) -> Option<&RecordRarity> {
        self.per_record.get(index)
    }
}

/// Compute trait frequencies and rarity scores for a collection.
///
/// # Errors
///
/// Returns [`RarityError::EmptyCollection`] if `records` is empty.
pub fn compute_rarity(records: &[MetadataRecord]) -> Result<RarityReport, RarityError> {
    if records.is_empty() {
        return Err(RarityError::EmptyCollection);
    }
    let collection_size = records.len();

    let mut counts: BTreeMap<TraitKey, usize> = BTreeMap::new();
    for record in records {
        let distinct: BTreeSet<TraitKey> = record
            .attributes()
            .iter()
            .map(|attr| TraitKey::new(attr.trait_type.clone(), NormalizedValue::of(attr)))
            .collect();
        for key in distinct {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let per_trait: BTreeMap<TraitKey, TraitOccurrence> = counts
        .into_iter()
        .map(|(key, count)| {
            let occurrence = TraitOccurrence {
                trait_type: key.trait_type.clone(),
                value: key.value.clone(),
                count,
                probability: count as f64 / collection_size as f64,
            };
            (key, occurrence)
        })
        .collect();

    let per_record = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut score = 0.0;
            for attr in record.attributes() {
                let key = TraitKey::new(attr.trait_type.clone(), NormalizedValue::of(attr));
                // Every key was inserted in the counting pass above.
                if let Some(occurrence) = per_trait.get(&key) {
                    score += 1.0 / occurrence.probability;
                }
            }
            RecordRarity {
                index,
                score,
                attribute_count: record.attributes().len(),
            }
        })
        .collect();

    tracing::debug!(
        collection_size,
        distinct_traits = per_trait.len(),
        "computed collection rarity"
    );

    Ok(RarityReport {
        collection_size,
        per_record,
        per_trait,
    })
}
