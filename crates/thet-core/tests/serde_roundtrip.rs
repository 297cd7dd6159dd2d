use thet_core::{
    PloidyState, PopulationFractions, PopulationMixture, ThetError, VariantProfile,
    VariantProfileCollection,
};

#[test]
fn mixture_survives_json_roundtrip() {
    let fractions = PopulationFractions::new(vec![0.2, 0.3, 0.5]).unwrap();
    let profiles = VariantProfileCollection::new(vec![
        VariantProfile::new(vec![PloidyState::new(0, 1), PloidyState::new(1, 2)]),
        VariantProfile::new(vec![PloidyState::new(2, 2), PloidyState::new(0, 0)]),
    ])
    .unwrap();
    let mixture = PopulationMixture::new(fractions, profiles, PloidyState::new(1, 1)).unwrap();

    let json = serde_json::to_string(&mixture).unwrap();
    let restored: PopulationMixture = serde_json::from_str(&json).unwrap();
    assert_eq!(mixture, restored);
}

#[test]
fn invalid_fractions_are_rejected_on_deserialize() {
    let result: Result<PopulationFractions, _> = serde_json::from_str("[0.5, 0.6]");
    assert!(result.is_err());
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = ThetError::structure("empty-profile-collection", "no profiles");
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Structure");
    assert_eq!(json["detail"]["code"], "empty-profile-collection");
    let restored: ThetError = serde_json::from_value(json).unwrap();
    assert_eq!(restored, err);
}
