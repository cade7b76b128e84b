//! # Trait Occurrence Summaries
//!
//! Groups the per-pair statistics of a [`RarityReport`] by `trait_type` and
//! expresses each value's share of the collection as a percentage.

use nftmeta_core::NormalizedValue;
use serde::Serialize;

use crate::rarity::RarityReport;

/// One value of a trait type and how much of the collection carries it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueOccurrence {
    pub value: NormalizedValue,
    pub count: usize,
    /// `probability * 100`.
    pub percentage: f64,
}

/// Distribution of values for one trait type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitOccurrenceSummary {
    pub trait_type: String,
    /// Values sorted by their normalized form.
    pub values: Vec<ValueOccurrence>,
}

impl RarityReport {
    /// Per-trait-type value distributions, sorted by trait type then value.
    pub fn trait_occurrences(&self) -> Vec<TraitOccurrenceSummary> {
        let mut summaries: Vec<TraitOccurrenceSummary> = Vec::new();
        // per_trait is ordered by (trait_type, value), so groups are contiguous.
        for (key, occurrence) in &self.per_trait {
            let entry = ValueOccurrence {
                value: key.value.clone(),
                count: occurrence.count,
                percentage: occurrence.probability * 100.0,
            };
            match summaries.last_mut() {
                Some(summary) if summary.trait_type == key.trait_type => {
                    summary.values.push(entry);
                }
                _ => summaries.push(TraitOccurrenceSummary {
                    trait_type: key.trait_type.clone(),
                    values: vec![entry],
                }),
            }
        }
        summaries
    }
}

#[cfg(test)]
mod tests {
    use crate::compute_rarity;
    use nftmeta_core::{Attribute, MetadataRecord, NormalizedValue};

    fn record(attrs: &[(&str, &str)]) -> MetadataRecord {
        MetadataRecord {
            attributes: Some(attrs.iter().map(|(t, v)| Attribute::new(*t, *v)).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn groups_by_trait_type() {
        let records = [
            record(&[("color", "red"), ("size", "L")]),
            record(&[("color", "blue"), ("size", "L")]),
            record(&[("color", "red")]),
            record(&[("color", "red"), ("size", "S")]),
        ];
        let report = compute_rarity(&records).unwrap();
        let summaries = report.trait_occurrences();

        let names: Vec<_> = summaries.iter().map(|s| s.trait_type.as_str()).collect();
        assert_eq!(names, vec!["color", "size"]);

        let color = &summaries[0];
        assert_eq!(color.values.len(), 2);
        assert_eq!(color.values[0].value, NormalizedValue::text("blue"));
        assert_eq!(color.values[0].percentage, 25.0);
        assert_eq!(color.values[1].value, NormalizedValue::text("red"));
        assert_eq!(color.values[1].count, 3);
        assert_eq!(color.values[1].percentage, 75.0);

        let size = &summaries[1];
        assert_eq!(size.values[0].percentage, 50.0);
        assert_eq!(size.values[1].percentage, 25.0);
    }

    #[test]
    fn no_attributes_no_summaries() {
        let report = compute_rarity(&[MetadataRecord::default()]).unwrap();
        assert!(report.trait_occurrences().is_empty());
    }
}
