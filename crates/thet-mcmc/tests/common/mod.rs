#![allow(dead_code)]

use std::sync::Arc;

use thet_core::{
    HyperparameterValues, NoiseParameters, PloidyState, PloidyStatePrior, PloidyStateSets,
    PopulationFractions, PopulationMixture, Priors, TotalCopyNumberProductStates,
    TumorHeterogeneityData, TumorHeterogeneityState, VariantProfile, VariantProfileCollection,
};
use thet_mcmc::{ProposalConfig, SegmentObservables};

pub const NORMAL: PloidyState = PloidyState::new(1, 1);

#[derive(Debug)]
pub struct FlatPloidyStatePrior;

impl PloidyStatePrior for FlatPloidyStatePrior {
    fn log_probability(&self, _state: &PloidyState) -> f64 {
        0.0
    }
}

/// Penalises each allele's distance from one copy.
#[derive(Debug)]
pub struct DistancePloidyStatePrior;

impl PloidyStatePrior for DistancePloidyStatePrior {
    fn log_probability(&self, state: &PloidyState) -> f64 {
        -(state.m().abs_diff(1) as f64 + state.n().abs_diff(1) as f64)
    }
}

/// Observations scored with Gaussian kernels around the expected values.
pub struct GaussianSegments {
    pub copy_ratios: Vec<f64>,
    pub minor_allele_fractions: Vec<f64>,
    pub copy_ratio_scale: f64,
    pub minor_allele_fraction_scale: f64,
}

impl GaussianSegments {
    pub fn from_observables(observables: &[SegmentObservables], scale: f64) -> Self {
        Self {
            copy_ratios: observables.iter().map(|o| o.copy_ratio).collect(),
            minor_allele_fractions: observables.iter().map(|o| o.minor_allele_fraction).collect(),
            copy_ratio_scale: scale,
            minor_allele_fraction_scale: scale,
        }
    }
}

fn gaussian(x: f64, mean: f64, sd: f64) -> f64 {
    let z = (x - mean) / sd;
    -0.5 * z * z - sd.ln()
}

impl TumorHeterogeneityData for GaussianSegments {
    fn num_segments(&self) -> usize {
        self.copy_ratios.len()
    }

    fn log_density(
        &self,
        segment_index: usize,
        copy_ratio: f64,
        minor_allele_fraction: f64,
        noise: &NoiseParameters,
    ) -> f64 {
        self.copy_ratio_log_density(segment_index, copy_ratio, noise)
            + gaussian(
                minor_allele_fraction,
                self.minor_allele_fractions[segment_index],
                self.minor_allele_fraction_scale * noise.minor_allele_fraction_noise_factor,
            )
    }

    fn copy_ratio_log_density(
        &self,
        segment_index: usize,
        copy_ratio: f64,
        noise: &NoiseParameters,
    ) -> f64 {
        let sd = noise.copy_ratio_noise_floor + self.copy_ratio_scale * noise.copy_ratio_noise_factor;
        gaussian(copy_ratio, self.copy_ratios[segment_index], sd)
    }
}

pub fn ploidy_state_sets(max_total_copy_number: u32) -> PloidyStateSets {
    PloidyStateSets::from_states((0..=max_total_copy_number).flat_map(|total| {
        (0..=total).map(move |m| PloidyState::new(m, total - m))
    }))
}

pub fn total_copy_number_product_states(
    num_variant_populations: usize,
    max_total_copy_number: u32,
) -> TotalCopyNumberProductStates {
    let mut states: Vec<Vec<u32>> = vec![Vec::new()];
    for _ in 0..num_variant_populations {
        states = states
            .into_iter()
            .flat_map(|prefix| {
                (0..=max_total_copy_number).map(move |total| {
                    let mut next = prefix.clone();
                    next.push(total);
                    next
                })
            })
            .collect();
    }
    TotalCopyNumberProductStates::new(num_variant_populations, states).unwrap()
}

pub fn noise() -> NoiseParameters {
    NoiseParameters {
        copy_ratio_noise_floor: 0.0,
        copy_ratio_noise_factor: 1.0,
        minor_allele_fraction_noise_factor: 1.0,
    }
}

pub fn priors(prior: Arc<dyn PloidyStatePrior>) -> Arc<Priors> {
    let hp = HyperparameterValues::new(1.0, 1.0).unwrap();
    Arc::new(Priors::new(NORMAL, prior, hp, hp, hp, hp))
}

pub fn config() -> ProposalConfig {
    ProposalConfig {
        transformed_population_fraction_proposal_width: 0.05,
        ploidy_proposal_width: 0.05,
        max_ploidy_step_iterations: 25,
        max_total_copy_number: 4,
    }
}

pub fn mixture(fractions: Vec<f64>, profiles: Vec<Vec<PloidyState>>) -> PopulationMixture {
    PopulationMixture::new(
        PopulationFractions::new(fractions).unwrap(),
        VariantProfileCollection::new(profiles.into_iter().map(VariantProfile::new).collect())
            .unwrap(),
        NORMAL,
    )
    .unwrap()
}

pub fn state(fractions: Vec<f64>, profiles: Vec<Vec<PloidyState>>) -> TumorHeterogeneityState {
    TumorHeterogeneityState::new(
        1.0,
        noise(),
        mixture(fractions, profiles),
        priors(Arc::new(FlatPloidyStatePrior)),
    )
    .unwrap()
}
