use std::sync::Arc;

use thet_core::{
    HyperparameterValues, NoiseParameters, PloidyState, PloidyStatePrior, PloidyStateSets,
    PopulationFractions, PopulationMixture, Priors, ThetError, TotalCopyNumberProductStates,
    TumorHeterogeneityData, TumorHeterogeneityState, VariantProfile, VariantProfileCollection,
};

const NORMAL: PloidyState = PloidyState::new(1, 1);

#[derive(Debug)]
struct FlatPrior;

impl PloidyStatePrior for FlatPrior {
    fn log_probability(&self, _state: &PloidyState) -> f64 {
        0.0
    }
}

struct WeightedSegments {
    weights: Vec<f64>,
}

impl TumorHeterogeneityData for WeightedSegments {
    fn num_segments(&self) -> usize {
        self.weights.len()
    }

    fn fractional_length(&self, segment_index: usize) -> f64 {
        self.weights[segment_index]
    }

    fn log_density(&self, _: usize, _: f64, _: f64, _: &NoiseParameters) -> f64 {
        0.0
    }

    fn copy_ratio_log_density(&self, _: usize, _: f64, _: &NoiseParameters) -> f64 {
        0.0
    }
}

struct UniformSegments(usize);

impl TumorHeterogeneityData for UniformSegments {
    fn num_segments(&self) -> usize {
        self.0
    }

    fn log_density(&self, _: usize, _: f64, _: f64, _: &NoiseParameters) -> f64 {
        0.0
    }

    fn copy_ratio_log_density(&self, _: usize, _: f64, _: &NoiseParameters) -> f64 {
        0.0
    }
}

fn two_segment_mixture() -> PopulationMixture {
    let fractions = PopulationFractions::new(vec![0.25, 0.75]).unwrap();
    let profiles = VariantProfileCollection::new(vec![VariantProfile::new(vec![
        PloidyState::new(0, 3),
        PloidyState::new(0, 1),
    ])])
    .unwrap();
    PopulationMixture::new(fractions, profiles, NORMAL).unwrap()
}

fn priors() -> Arc<Priors> {
    let hp = HyperparameterValues::new(1.0, 1.0).unwrap();
    Arc::new(Priors::new(NORMAL, Arc::new(FlatPrior), hp, hp, hp, hp))
}

fn noise() -> NoiseParameters {
    NoiseParameters {
        copy_ratio_noise_floor: 0.01,
        copy_ratio_noise_factor: 1.2,
        minor_allele_fraction_noise_factor: 1.1,
    }
}

#[test]
fn fractions_must_sum_to_one() {
    let err = PopulationFractions::new(vec![0.4, 0.4]).unwrap_err();
    assert_eq!(err.info().code, "fraction-sum");
}

#[test]
fn fractions_must_lie_in_unit_interval() {
    let err = PopulationFractions::new(vec![1.5, -0.5]).unwrap_err();
    assert_eq!(err.info().code, "fraction-out-of-range");
    let err = PopulationFractions::new(vec![f64::NAN, 1.0]).unwrap_err();
    assert_eq!(err.info().code, "fraction-out-of-range");
}

#[test]
fn boundary_fractions_are_rejected() {
    let err = PopulationFractions::new(vec![0.5, 0.5, 0.0]).unwrap_err();
    assert_eq!(err.info().code, "fraction-out-of-range");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("2"));
    let err = PopulationFractions::new(vec![0.0, 1.0]).unwrap_err();
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("0"));
}

#[test]
fn single_population_is_rejected() {
    let err = PopulationFractions::new(vec![1.0]).unwrap_err();
    assert_eq!(err.info().code, "too-few-populations");
}

#[test]
fn ragged_profiles_are_rejected() {
    let err = VariantProfileCollection::new(vec![
        VariantProfile::new(vec![NORMAL, NORMAL]),
        VariantProfile::new(vec![NORMAL]),
    ])
    .unwrap_err();
    assert_eq!(err.info().code, "ragged-profiles");
}

#[test]
fn mixture_requires_one_profile_per_variant_population() {
    let fractions = PopulationFractions::new(vec![0.2, 0.3, 0.5]).unwrap();
    let profiles = VariantProfileCollection::new(vec![VariantProfile::new(vec![NORMAL])]).unwrap();
    let err = PopulationMixture::new(fractions, profiles, NORMAL).unwrap_err();
    assert!(matches!(err, ThetError::Structure(_)));
    assert_eq!(err.info().context["expected"], "2");
}

#[test]
fn population_averaged_copy_numbers_include_the_reference() {
    let mixture = two_segment_mixture();
    let total = mixture.population_averaged_copy_number(0, PloidyState::total);
    let m = mixture.population_averaged_copy_number(0, PloidyState::m);
    let n = mixture.population_averaged_copy_number(0, PloidyState::n);
    assert!((total - (3.0 * 0.25 + 2.0 * 0.75)).abs() < 1e-12);
    assert!((m - 0.75).abs() < 1e-12);
    assert!((n - (0.75 + 0.75)).abs() < 1e-12);
}

#[test]
fn ploidy_uses_equal_weights_by_default() {
    let mixture = two_segment_mixture();
    let ploidy = mixture.ploidy(&UniformSegments(2)).unwrap();
    let expected = 0.5 * (0.75 + 1.5) + 0.5 * (0.25 + 1.5);
    assert!((ploidy - expected).abs() < 1e-12);
}

#[test]
fn ploidy_honours_fractional_lengths() {
    let mixture = two_segment_mixture();
    let data = WeightedSegments {
        weights: vec![0.9, 0.1],
    };
    let ploidy = mixture.ploidy(&data).unwrap();
    let expected = 0.9 * 2.25 + 0.1 * 1.75;
    assert!((ploidy - expected).abs() < 1e-12);
}

#[test]
fn ploidy_rejects_segment_count_mismatch() {
    let err = two_segment_mixture().ploidy(&UniformSegments(3)).unwrap_err();
    assert_eq!(err.info().code, "dimension-mismatch");
}

#[test]
fn state_rejects_noise_factor_below_one() {
    let mut bad = noise();
    bad.copy_ratio_noise_factor = 0.9;
    let err = TumorHeterogeneityState::new(1.0, bad, two_segment_mixture(), priors()).unwrap_err();
    assert!(matches!(err, ThetError::Config(_)));
    assert_eq!(err.info().context["name"], "copy_ratio_noise_factor");
}

#[test]
fn state_rejects_foreign_reference_state() {
    let hp = HyperparameterValues::new(1.0, 1.0).unwrap();
    let triploid = Arc::new(Priors::new(
        PloidyState::new(1, 2),
        Arc::new(FlatPrior),
        hp,
        hp,
        hp,
        hp,
    ));
    let err = TumorHeterogeneityState::new(1.0, noise(), two_segment_mixture(), triploid).unwrap_err();
    assert_eq!(err.info().code, "normal-state-mismatch");
}

#[test]
fn state_updates_return_new_values() {
    let state = TumorHeterogeneityState::new(1.0, noise(), two_segment_mixture(), priors()).unwrap();
    let updated = state.with_concentration(2.5).unwrap();
    assert_eq!(state.concentration(), 1.0);
    assert_eq!(updated.concentration(), 2.5);
    assert!(state.with_concentration(0.0).is_err());
}

#[test]
fn hyperparameters_must_be_positive() {
    assert!(HyperparameterValues::new(0.0, 1.0).is_err());
    assert!(HyperparameterValues::new(1.0, f64::INFINITY).is_err());
}

#[test]
fn ploidy_state_sets_group_by_total() {
    let sets = PloidyStateSets::from_states([
        PloidyState::new(1, 1),
        PloidyState::new(0, 2),
        PloidyState::new(0, 1),
        PloidyState::new(0, 2),
    ]);
    assert_eq!(
        sets.get(2).unwrap(),
        &[PloidyState::new(0, 2), PloidyState::new(1, 1)]
    );
    assert_eq!(sets.get(1).unwrap(), &[PloidyState::new(0, 1)]);
    assert_eq!(sets.get(5).unwrap_err().info().code, "missing-ploidy-states");
    assert_eq!(sets.total_copy_numbers().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn product_states_must_cover_every_variant_population() {
    let err = TotalCopyNumberProductStates::new(2, vec![vec![1, 2], vec![3]]).unwrap_err();
    assert_eq!(err.info().code, "product-state-width");
    assert_eq!(err.info().context["index"], "1");

    let table = TotalCopyNumberProductStates::new(2, vec![vec![1, 2], vec![3, 0]]).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(1), Some(&[3, 0][..]));
}
