use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;
use thet_core::{
    ErrorInfo, HyperparameterValues, PloidyState, PloidyStatePrior, PopulationFractions,
    PopulationMixture, ThetError, TumorHeterogeneityData, TumorHeterogeneityState,
    VariantProfileCollection,
};

use crate::EPSILON;

/// Additive terms of the log-posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogPosteriorBreakdown {
    /// Gamma prior on the concentration.
    pub concentration_prior: f64,
    /// Gamma prior on the copy-ratio noise floor.
    pub copy_ratio_noise_floor_prior: f64,
    /// Gamma prior on the copy-ratio noise factor minus one.
    pub copy_ratio_noise_factor_prior: f64,
    /// Gamma prior on the minor-allele-fraction noise factor minus one.
    pub minor_allele_fraction_noise_factor_prior: f64,
    /// Symmetric Dirichlet prior on the population fractions.
    pub population_fractions_prior: f64,
    /// Ploidy-state prior summed over variant populations and segments.
    pub variant_profiles_prior: f64,
    /// Copy-ratio / minor-allele-fraction likelihood summed over segments.
    pub segments_likelihood: f64,
    /// Sum of all terms.
    pub total: f64,
}

/// Copy ratio and minor allele fraction a mixture predicts at one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentObservables {
    /// Population-averaged total copy number over the ploidy.
    pub copy_ratio: f64,
    /// Lesser over total population-averaged allelic copy number.
    pub minor_allele_fraction: f64,
}

/// Unnormalised log-posterior of `state` given `data`.
pub fn calculate_log_posterior<D>(state: &TumorHeterogeneityState, data: &D) -> Result<f64, ThetError>
where
    D: TumorHeterogeneityData + ?Sized,
{
    calculate_log_posterior_breakdown(state, data).map(|breakdown| breakdown.total)
}

/// Computes every term of the log-posterior separately.
///
/// Fails fast when the variant profiles do not cover `data`'s segments, and
/// with [`ThetError::Numeric`] when the total is NaN.
pub fn calculate_log_posterior_breakdown<D>(
    state: &TumorHeterogeneityState,
    data: &D,
) -> Result<LogPosteriorBreakdown, ThetError>
where
    D: TumorHeterogeneityData + ?Sized,
{
    let mixture = state.population_mixture();
    if mixture.num_segments() != data.num_segments() {
        return Err(ThetError::dimension_mismatch(
            "variant profile",
            data.num_segments(),
            mixture.num_segments(),
        ));
    }
    let priors = state.priors();

    let concentration_prior = gamma_log_density(priors.concentration(), state.concentration());
    let copy_ratio_noise_floor_prior =
        gamma_log_density(priors.copy_ratio_noise_floor(), state.copy_ratio_noise_floor());
    let copy_ratio_noise_factor_prior = gamma_log_density(
        priors.copy_ratio_noise_factor(),
        state.copy_ratio_noise_factor() - 1.0,
    );
    let minor_allele_fraction_noise_factor_prior = gamma_log_density(
        priors.minor_allele_fraction_noise_factor(),
        state.minor_allele_fraction_noise_factor() - 1.0,
    );
    let population_fractions_prior =
        population_fractions_log_prior(state.concentration(), mixture.population_fractions());
    let variant_profiles_prior = variant_profiles_log_prior(
        mixture.variant_profile_collection(),
        priors.ploidy_state_prior(),
    );

    let ploidy = mixture.ploidy(data)?;
    let segments_likelihood: f64 = (0..data.num_segments())
        .map(|segment_index| {
            let observables = segment_observables(mixture, ploidy, segment_index);
            data.log_density(
                segment_index,
                observables.copy_ratio,
                observables.minor_allele_fraction,
                state.noise(),
            )
        })
        .sum();

    let total = concentration_prior
        + copy_ratio_noise_floor_prior
        + copy_ratio_noise_factor_prior
        + minor_allele_fraction_noise_factor_prior
        + population_fractions_prior
        + variant_profiles_prior
        + segments_likelihood;
    let breakdown = LogPosteriorBreakdown {
        concentration_prior,
        copy_ratio_noise_floor_prior,
        copy_ratio_noise_factor_prior,
        minor_allele_fraction_noise_factor_prior,
        population_fractions_prior,
        variant_profiles_prior,
        segments_likelihood,
        total,
    };
    if total.is_nan() {
        return Err(ThetError::Numeric(
            ErrorInfo::new("nan-log-posterior", "log-posterior evaluated to NaN")
                .with_context("breakdown", format!("{breakdown:?}")),
        ));
    }
    Ok(breakdown)
}

/// Predicted observables at `segment_index` for a mixture of the given ploidy.
pub fn segment_observables(
    mixture: &PopulationMixture,
    ploidy: f64,
    segment_index: usize,
) -> SegmentObservables {
    let total = mixture.population_averaged_copy_number(segment_index, PloidyState::total);
    let m = mixture.population_averaged_copy_number(segment_index, PloidyState::m);
    let n = mixture.population_averaged_copy_number(segment_index, PloidyState::n);
    SegmentObservables {
        copy_ratio: total / (ploidy + EPSILON),
        minor_allele_fraction: minor_allele_fraction(m, n),
    }
}

/// `min(m, n) / (m + n)`, regularised at zero copy number.
pub fn minor_allele_fraction(m: f64, n: f64) -> f64 {
    m.min(n) / (m + n + EPSILON)
}

/// Gamma log-density with shape `alpha` and rate `beta` at `x`.
pub fn gamma_log_density(hyperparameters: HyperparameterValues, x: f64) -> f64 {
    let HyperparameterValues { alpha, beta } = hyperparameters;
    alpha * (beta + EPSILON).ln() + (alpha - 1.0) * (x + EPSILON).ln() - beta * x - ln_gamma(alpha)
}

fn population_fractions_log_prior(concentration: f64, fractions: &PopulationFractions) -> f64 {
    let num_populations = fractions.len() as f64;
    let log_fraction_sum: f64 = fractions
        .as_slice()
        .iter()
        .map(|fraction| (concentration - 1.0) * (fraction + EPSILON).ln())
        .sum();
    ln_gamma(concentration * num_populations) - num_populations * ln_gamma(concentration)
        + log_fraction_sum
}

fn variant_profiles_log_prior(
    profiles: &VariantProfileCollection,
    prior: &dyn PloidyStatePrior,
) -> f64 {
    profiles
        .iter()
        .flat_map(|profile| profile.as_slice())
        .map(|state| prior.log_probability(state))
        .sum()
}
