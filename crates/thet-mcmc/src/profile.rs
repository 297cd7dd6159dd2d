//! Per-segment redraw of the variant profiles.
//!
//! Given proposed population fractions and a freshly proposed ploidy, every
//! segment is sampled independently in two categorical stages: first a
//! total-copy-number combination across the variant populations, weighted by
//! the copy-ratio likelihood alone; then an allele-specific split of that
//! combination, weighted by the joint likelihood at the copy ratio fixed in
//! the first stage. This avoids enumerating the joint allele-specific space of
//! every population at once.

use log::{info, trace};
use thet_core::{
    ErrorInfo, NoiseParameters, PloidyState, PloidyStateSets, PopulationFractions, RandomSource,
    ThetError, TotalCopyNumberProductStates, TumorHeterogeneityData, TumorHeterogeneityState,
    VariantProfile, VariantProfileCollection,
};

use crate::categorical::{normalize_log_probabilities, random_select};
use crate::config::ProposalConfig;
use crate::posterior::minor_allele_fraction;
use crate::product::PloidyStateProduct;
use crate::proposals::propose_ploidy;
use crate::EPSILON;

/// Discrete-state tables the proposer enumerates.
#[derive(Debug, Clone, Copy)]
pub struct DiscreteStateTables<'a> {
    /// Candidate total-copy-number combinations across variant populations.
    pub total_copy_number_product_states: &'a TotalCopyNumberProductStates,
    /// Allele-specific states realising each total copy number.
    pub ploidy_state_sets: &'a PloidyStateSets,
}

/// Draws a new variant profile for every non-reference population.
pub fn propose_variant_profile_collection<R, D>(
    rng: &mut R,
    current_state: &TumorHeterogeneityState,
    data: &D,
    proposed_population_fractions: &PopulationFractions,
    config: &ProposalConfig,
    tables: DiscreteStateTables<'_>,
) -> Result<VariantProfileCollection, ThetError>
where
    R: RandomSource + ?Sized,
    D: TumorHeterogeneityData + ?Sized,
{
    let mixture = current_state.population_mixture();
    let num_populations = mixture.num_populations();
    if proposed_population_fractions.len() != num_populations {
        return Err(ThetError::dimension_mismatch(
            "proposed population fractions",
            num_populations,
            proposed_population_fractions.len(),
        ));
    }
    let num_variant_populations = num_populations - 1;
    if tables.total_copy_number_product_states.num_variant_populations() != num_variant_populations
    {
        return Err(ThetError::dimension_mismatch(
            "total-copy-number combination",
            num_variant_populations,
            tables.total_copy_number_product_states.num_variant_populations(),
        ));
    }

    let current_ploidy = mixture.ploidy(data)?;
    info!(
        "Current population fractions: {:?}",
        mixture.population_fractions().as_slice()
    );
    info!("Current ploidy: {current_ploidy}");
    let proposed_ploidy = propose_ploidy(
        rng,
        current_ploidy,
        config.ploidy_proposal_width,
        config.max_total_copy_number,
        config.max_ploidy_step_iterations,
    );
    info!("Proposed initial ploidy: {proposed_ploidy}");

    let sampler = SegmentSampler {
        data,
        noise: current_state.noise(),
        fractions: proposed_population_fractions,
        normal_ploidy_state: current_state.priors().normal_ploidy_state(),
        ploidy: proposed_ploidy,
        tables,
    };
    let num_segments = data.num_segments();
    let mut profiles = vec![Vec::with_capacity(num_segments); num_variant_populations];
    for segment_index in 0..num_segments {
        let states = sampler.sample(rng, segment_index)?;
        for (profile, state) in profiles.iter_mut().zip(states) {
            profile.push(state);
        }
    }
    VariantProfileCollection::new(profiles.into_iter().map(VariantProfile::new).collect())
}

struct SegmentSampler<'a, D: ?Sized> {
    data: &'a D,
    noise: &'a NoiseParameters,
    fractions: &'a PopulationFractions,
    normal_ploidy_state: PloidyState,
    ploidy: f64,
    tables: DiscreteStateTables<'a>,
}

impl<D> SegmentSampler<'_, D>
where
    D: TumorHeterogeneityData + ?Sized,
{
    fn sample<R>(&self, rng: &mut R, segment_index: usize) -> Result<Vec<PloidyState>, ThetError>
    where
        R: RandomSource + ?Sized,
    {
        let product_states = self.tables.total_copy_number_product_states;
        let copy_ratio_log_densities: Vec<f64> = product_states
            .iter()
            .map(|totals| {
                self.data
                    .copy_ratio_log_density(segment_index, self.copy_ratio(totals), self.noise)
            })
            .collect();
        let probabilities = normalize_log_probabilities(&copy_ratio_log_densities)
            .map_err(|err| at_segment(err, segment_index))?;
        let selected = random_select(&probabilities, rng);
        let totals = product_states.get(selected).ok_or_else(|| {
            ThetError::Structure(
                ErrorInfo::new("product-state-index", "selected combination out of range")
                    .with_context("index", selected),
            )
        })?;
        let copy_ratio = self.copy_ratio(totals);
        trace!("Segment {segment_index}: total copy numbers {totals:?}, copy ratio {copy_ratio}");

        let choices = totals
            .iter()
            .map(|&total| self.tables.ploidy_state_sets.get(total))
            .collect::<Result<Vec<_>, _>>()?;
        let product = PloidyStateProduct::new(choices)?;
        let log_densities: Vec<f64> = product
            .iter()
            .map(|combination| {
                self.data.log_density(
                    segment_index,
                    copy_ratio,
                    self.minor_allele_fraction(&combination),
                    self.noise,
                )
            })
            .collect();
        let probabilities =
            normalize_log_probabilities(&log_densities).map_err(|err| at_segment(err, segment_index))?;
        let selected = random_select(&probabilities, rng);
        product.combination_at(selected).ok_or_else(|| {
            ThetError::Structure(
                ErrorInfo::new("ploidy-product-index", "selected combination out of range")
                    .with_context("index", selected),
            )
        })
    }

    fn copy_ratio(&self, totals: &[u32]) -> f64 {
        let total = self.averaged(totals.iter().copied(), self.normal_ploidy_state.total());
        total / (self.ploidy + EPSILON)
    }

    fn minor_allele_fraction(&self, combination: &[PloidyState]) -> f64 {
        let m = self.averaged(combination.iter().map(PloidyState::m), self.normal_ploidy_state.m());
        let n = self.averaged(combination.iter().map(PloidyState::n), self.normal_ploidy_state.n());
        minor_allele_fraction(m, n)
    }

    fn averaged(&self, variant_copy_numbers: impl Iterator<Item = u32>, normal_copy_number: u32) -> f64 {
        let variant: f64 = variant_copy_numbers
            .zip(self.fractions.as_slice())
            .map(|(copy_number, fraction)| f64::from(copy_number) * fraction)
            .sum();
        variant + f64::from(normal_copy_number) * self.fractions.normal_fraction()
    }
}

fn at_segment(err: ThetError, segment_index: usize) -> ThetError {
    match err {
        ThetError::Numeric(info) => ThetError::Numeric(info.with_context("segment", segment_index)),
        other => other,
    }
}
