//! Integration tests: risk scoring with and without collection context,
//! and weight overrides.

use std::collections::BTreeMap;

use nftmeta_core::{Attribute, MetadataRecord};
use nftmeta_rarity::compute_rarity;
use nftmeta_risk::{compute_risk, RiskConfig, RiskEngine, RiskFactor, RiskWeights};
use proptest::prelude::*;

fn record(name: Option<&str>, checksum: Option<&str>, traits: &[(&str, &str)]) -> MetadataRecord {
    MetadataRecord {
        name: name.map(str::to_string),
        image: Some("ipfs://bafy/item.png".into()),
        media_type: Some("image/png".into()),
        format: Some("HIP412@2.0.0".into()),
        checksum: checksum.map(str::to_string),
        attributes: Some(traits.iter().map(|(t, v)| Attribute::new(*t, *v)).collect()),
        ..Default::default()
    }
}

#[test]
fn omitted_override_key_zeroes_factor_for_that_call_only() {
    let item = record(Some("Item"), None, &[("color", "red")]);

    let map = BTreeMap::from([("structural_validity".to_string(), 50.0)]);
    let weights = RiskWeights::from_map(&map).unwrap();
    let overridden = compute_risk(&item, Some(&weights), None, None).unwrap();
    assert_eq!(overridden.breakdown[&RiskFactor::ChecksumMissing], 0.0);
    assert_eq!(overridden.score, 0.0);
    assert_eq!(overridden.level, "normal");

    let default = compute_risk(&item, None, None, None).unwrap();
    assert_eq!(default.breakdown[&RiskFactor::ChecksumMissing], 10.0);
    assert_eq!(RiskWeights::default().checksum_missing, 10.0);
}

#[test]
fn collection_context_raises_common_records() {
    let records: Vec<_> = (0..5)
        .map(|_| record(Some("Same"), Some("abc"), &[("bg", "plain")]))
        .collect();
    let rarity = compute_rarity(&records).unwrap();
    let engine = RiskEngine::with_defaults().unwrap();

    let without = engine.assess(&records[0], None);
    let with = engine.assess(&records[0], Some(&rarity));
    assert_eq!(without.score, 0.0);
    assert_eq!(with.breakdown[&RiskFactor::TraitConcentration], 30.0);
    assert_eq!(with.score, 30.0);
    assert_eq!(with.level, "medium");
}

#[test]
fn result_serializes_with_factor_keys() {
    let result = compute_risk(&record(None, None, &[]), None, None, None).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["breakdown"]["structural_validity"], 50.0);
    assert_eq!(json["breakdown"]["checksum_missing"], 10.0);
    assert_eq!(json["score"], 60.0);
    assert_eq!(json["level"], "medium");
}

fn arb_record() -> impl Strategy<Value = MetadataRecord> {
    (
        proptest::option::of("[a-z]{0,6}"),
        proptest::option::of("[a-z]{0,6}"),
        proptest::option::of("[a-z]{0,6}"),
        proptest::option::of("did:[a-z]{1,6}"),
        proptest::collection::vec(
            (prop_oneof![Just("a"), Just("b"), Just("c")], prop_oneof![Just("x"), Just("y")]),
            0..5,
        ),
    )
        .prop_map(|(name, checksum, creator, creator_did, traits)| MetadataRecord {
            name,
            image: Some("ipfs://x".into()),
            media_type: Some("image/png".into()),
            format: Some("HIP412@2.0.0".into()),
            checksum,
            creator,
            creator_did,
            attributes: Some(
                traits
                    .into_iter()
                    .map(|(t, v)| Attribute::new(t, v))
                    .collect(),
            ),
            ..Default::default()
        })
}

fn arb_weights() -> impl Strategy<Value = RiskWeights> {
    proptest::array::uniform5(0.0_f64..200.0).prop_map(|w| RiskWeights {
        structural_validity: w[0],
        creator_without_did: w[1],
        checksum_missing: w[2],
        trait_concentration: w[3],
        duplicate_traits: w[4],
    })
}

proptest! {
    #[test]
    fn score_is_sum_of_breakdown(
        records in proptest::collection::vec(arb_record(), 1..6),
        weights in arb_weights(),
    ) {
        let rarity = compute_rarity(&records).unwrap();
        let engine = RiskEngine::new(RiskConfig { weights, ..RiskConfig::default() }).unwrap();
        for item in &records {
            for context in [None, Some(&rarity)] {
                let result = engine.assess(item, context);
                let sum: f64 = result.breakdown.values().sum();
                prop_assert_eq!(result.score, sum);
                prop_assert!(result.score >= 0.0);
                prop_assert_eq!(result.breakdown.len(), RiskFactor::all().len());
                for (factor, contribution) in &result.breakdown {
                    prop_assert!(*contribution <= weights.get(*factor));
                }
            }
        }
    }
}
