use thet_core::{
    ErrorInfo, PopulationMixture, RandomSource, ThetError, TumorHeterogeneityData,
    TumorHeterogeneityState,
};

use crate::config::ProposalConfig;
use crate::profile::{propose_variant_profile_collection, DiscreteStateTables};
use crate::proposals::propose_transformed_population_fractions;
use crate::transform::{
    log_jacobian_factor, population_fractions_from_transformed,
    transformed_from_population_fractions,
};

/// Candidate mixture produced by [`propose_population_mixture`].
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationMixtureProposal {
    /// Proposed fractions paired with freshly drawn variant profiles.
    pub population_mixture: PopulationMixture,
    /// Unconstrained coordinates the proposed fractions were mapped from.
    pub transformed_population_fractions: Vec<f64>,
    /// `log_jacobian_factor(proposed) - log_jacobian_factor(current)`; add it
    /// to the log-posterior difference when forming the acceptance ratio.
    pub log_jacobian_correction: f64,
}

/// Proposes a whole population mixture: a random walk on every transformed
/// fraction coordinate, then a redraw of the variant profiles conditional on
/// the new fractions. Acceptance is left to the caller.
pub fn propose_population_mixture<R, D>(
    rng: &mut R,
    current_state: &TumorHeterogeneityState,
    data: &D,
    config: &ProposalConfig,
    tables: DiscreteStateTables<'_>,
) -> Result<PopulationMixtureProposal, ThetError>
where
    R: RandomSource + ?Sized,
    D: TumorHeterogeneityData + ?Sized,
{
    let mixture = current_state.population_mixture();
    let current_fractions = mixture.population_fractions();
    let transformed_population_fractions = propose_transformed_population_fractions(
        rng,
        &transformed_from_population_fractions(current_fractions),
        config.transformed_population_fraction_proposal_width,
    );
    let proposed_fractions =
        population_fractions_from_transformed(&transformed_population_fractions)?;
    let variant_profile_collection = propose_variant_profile_collection(
        rng,
        current_state,
        data,
        &proposed_fractions,
        config,
        tables,
    )?;
    let log_jacobian_correction =
        log_jacobian_factor(&proposed_fractions) - log_jacobian_factor(current_fractions);
    if !log_jacobian_correction.is_finite() {
        return Err(ThetError::Numeric(
            ErrorInfo::new("non-finite-jacobian", "log-Jacobian correction is not finite")
                .with_context("value", log_jacobian_correction),
        ));
    }
    Ok(PopulationMixtureProposal {
        population_mixture: mixture.with_parts(proposed_fractions, variant_profile_collection)?,
        transformed_population_fractions,
        log_jacobian_correction,
    })
}
