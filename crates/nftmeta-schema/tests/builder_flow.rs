//! Integration test: assemble a complete record with the builder and check
//! that the output round-trips through the validator unchanged.

use nftmeta_core::{AttributeValue, DisplayType, MetadataRecord};
use nftmeta_schema::{BuilderError, FindingKind, Hip412Validator, MetadataBuilder};

fn complete_builder() -> Result<MetadataBuilder, BuilderError> {
    MetadataBuilder::new()
        .set_name("Example NFT 1")?
        .set_image("ipfs://bafybeigdyrzt/1.png")?
        .set_type("image/png")?
        .set_creator("Hedera")?
        .set_creator_did("did:hedera:mainnet:z6Mk;hedera:mainnet:fid=0.0.1")?
        .set_description("This is an example NFT 1")?
        .set_checksum("9defaf5e3b1f")?
        .set_property("external_url", "https://nft.com/mycollection/1")
}

#[test]
fn complete_build_is_valid() {
    let validator = Hip412Validator::new().unwrap();
    let built = complete_builder()
        .unwrap()
        .add_attribute("color", "red", None, None)
        .add_attribute(
            "stamina",
            "65",
            Some(DisplayType::BoostNumber),
            Some(AttributeValue::from(100_i64)),
        )
        .build(&validator);

    assert!(built.is_valid(), "findings: {:?}", built.validation.findings);
    assert!(built.validation.findings.is_empty());

    let json = serde_json::to_value(&built.metadata).unwrap();
    assert_eq!(json["format"], "HIP412@2.0.0");
    assert_eq!(json["creatorDID"], "did:hedera:mainnet:z6Mk;hedera:mainnet:fid=0.0.1");
    assert_eq!(json["attributes"][1]["display_type"], "boost_number");

    let reloaded = MetadataRecord::from_json(json).unwrap();
    assert_eq!(reloaded, built.metadata);
    assert_eq!(validator.validate_one(&reloaded), built.validation);
}

#[test]
fn failed_setter_ends_construction() {
    let result = complete_builder().and_then(|b| b.set_image("ipfs://other"));
    assert_eq!(
        result.unwrap_err(),
        BuilderError::FieldAlreadySet { field: "image" }
    );
}

#[test]
fn build_surfaces_content_problems() {
    let validator = Hip412Validator::new().unwrap();
    let built = complete_builder()
        .unwrap()
        .add_attribute("level", "max", Some(DisplayType::Number), None)
        .add_attribute("level", "2", Some(DisplayType::Number), None)
        .build(&validator);

    assert!(!built.is_valid());
    assert!(built.validation.has_kind(FindingKind::WrongType));
    assert!(built.validation.has_kind(FindingKind::DuplicateTraitType));
}
