//! Hyperparameters, priors and the sampler state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::NoiseParameters;
use crate::errors::{ErrorInfo, ThetError};
use crate::mixture::PopulationMixture;
use crate::ploidy::{PloidyState, PloidyStatePrior};

/// Shape/rate pair of a Gamma prior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperparameterValues {
    /// Shape.
    pub alpha: f64,
    /// Rate.
    pub beta: f64,
}

impl HyperparameterValues {
    /// Validates that both values are finite and strictly positive.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, ThetError> {
        for (name, value) in [("alpha", alpha), ("beta", beta)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThetError::Config(
                    ErrorInfo::new("invalid-hyperparameter", "hyperparameters must be positive")
                        .with_context("name", name)
                        .with_context("value", value),
                ));
            }
        }
        Ok(Self { alpha, beta })
    }
}

/// Priors of the tumor-heterogeneity model.
#[derive(Debug, Clone)]
pub struct Priors {
    normal_ploidy_state: PloidyState,
    ploidy_state_prior: Arc<dyn PloidyStatePrior>,
    concentration: HyperparameterValues,
    copy_ratio_noise_floor: HyperparameterValues,
    copy_ratio_noise_factor: HyperparameterValues,
    minor_allele_fraction_noise_factor: HyperparameterValues,
}

impl Priors {
    /// Bundles the reference state, the discrete ploidy-state prior and the
    /// four Gamma hyperparameter pairs.
    pub fn new(
        normal_ploidy_state: PloidyState,
        ploidy_state_prior: Arc<dyn PloidyStatePrior>,
        concentration: HyperparameterValues,
        copy_ratio_noise_floor: HyperparameterValues,
        copy_ratio_noise_factor: HyperparameterValues,
        minor_allele_fraction_noise_factor: HyperparameterValues,
    ) -> Self {
        Self {
            normal_ploidy_state,
            ploidy_state_prior,
            concentration,
            copy_ratio_noise_floor,
            copy_ratio_noise_factor,
            minor_allele_fraction_noise_factor,
        }
    }

    /// Fixed state of the reference population.
    pub fn normal_ploidy_state(&self) -> PloidyState {
        self.normal_ploidy_state
    }

    /// Discrete prior over ploidy states.
    pub fn ploidy_state_prior(&self) -> &dyn PloidyStatePrior {
        self.ploidy_state_prior.as_ref()
    }

    /// Concentration prior hyperparameters.
    pub fn concentration(&self) -> HyperparameterValues {
        self.concentration
    }

    /// Copy-ratio noise-floor prior hyperparameters.
    pub fn copy_ratio_noise_floor(&self) -> HyperparameterValues {
        self.copy_ratio_noise_floor
    }

    /// Copy-ratio noise-factor prior hyperparameters.
    pub fn copy_ratio_noise_factor(&self) -> HyperparameterValues {
        self.copy_ratio_noise_factor
    }

    /// Minor-allele-fraction noise-factor prior hyperparameters.
    pub fn minor_allele_fraction_noise_factor(&self) -> HyperparameterValues {
        self.minor_allele_fraction_noise_factor
    }
}

/// One point of the Markov chain. Values are never mutated in place; the
/// `with_*` methods return a new validated state.
#[derive(Debug, Clone)]
pub struct TumorHeterogeneityState {
    concentration: f64,
    noise: NoiseParameters,
    population_mixture: PopulationMixture,
    priors: Arc<Priors>,
}

impl TumorHeterogeneityState {
    /// Validates parameter ranges and that the mixture uses the priors'
    /// reference state.
    pub fn new(
        concentration: f64,
        noise: NoiseParameters,
        population_mixture: PopulationMixture,
        priors: Arc<Priors>,
    ) -> Result<Self, ThetError> {
        check_range("concentration", concentration, f64::MIN_POSITIVE)?;
        check_range("copy_ratio_noise_floor", noise.copy_ratio_noise_floor, 0.0)?;
        check_range("copy_ratio_noise_factor", noise.copy_ratio_noise_factor, 1.0)?;
        check_range(
            "minor_allele_fraction_noise_factor",
            noise.minor_allele_fraction_noise_factor,
            1.0,
        )?;
        if population_mixture.normal_ploidy_state() != priors.normal_ploidy_state() {
            return Err(ThetError::Structure(
                ErrorInfo::new(
                    "normal-state-mismatch",
                    "mixture and priors disagree on the reference ploidy state",
                )
                .with_context("mixture", format!("{:?}", population_mixture.normal_ploidy_state()))
                .with_context("priors", format!("{:?}", priors.normal_ploidy_state())),
            ));
        }
        Ok(Self {
            concentration,
            noise,
            population_mixture,
            priors,
        })
    }

    /// Concentration of the population-fraction prior.
    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    /// Copy-ratio noise floor.
    pub fn copy_ratio_noise_floor(&self) -> f64 {
        self.noise.copy_ratio_noise_floor
    }

    /// Copy-ratio noise factor.
    pub fn copy_ratio_noise_factor(&self) -> f64 {
        self.noise.copy_ratio_noise_factor
    }

    /// Minor-allele-fraction noise factor.
    pub fn minor_allele_fraction_noise_factor(&self) -> f64 {
        self.noise.minor_allele_fraction_noise_factor
    }

    /// All three noise parameters.
    pub fn noise(&self) -> &NoiseParameters {
        &self.noise
    }

    /// Current population mixture.
    pub fn population_mixture(&self) -> &PopulationMixture {
        &self.population_mixture
    }

    /// Priors shared by every state of the chain.
    pub fn priors(&self) -> &Priors {
        &self.priors
    }

    /// Returns a copy of this state with a different concentration.
    pub fn with_concentration(&self, concentration: f64) -> Result<Self, ThetError> {
        Self::new(
            concentration,
            self.noise,
            self.population_mixture.clone(),
            Arc::clone(&self.priors),
        )
    }

    /// Returns a copy of this state with different noise parameters.
    pub fn with_noise(&self, noise: NoiseParameters) -> Result<Self, ThetError> {
        Self::new(
            self.concentration,
            noise,
            self.population_mixture.clone(),
            Arc::clone(&self.priors),
        )
    }

    /// Returns a copy of this state with a different population mixture.
    pub fn with_population_mixture(
        &self,
        population_mixture: PopulationMixture,
    ) -> Result<Self, ThetError> {
        Self::new(
            self.concentration,
            self.noise,
            population_mixture,
            Arc::clone(&self.priors),
        )
    }
}

fn check_range(name: &str, value: f64, lower: f64) -> Result<(), ThetError> {
    if value.is_finite() && value >= lower {
        Ok(())
    } else {
        Err(ThetError::Config(
            ErrorInfo::new("parameter-out-of-range", "state parameter outside its support")
                .with_context("name", name)
                .with_context("value", value)
                .with_context("lower_bound", lower),
        ))
    }
}
