#![deny(missing_docs)]
//! Data model, collaborator traits and RNG capability shared by the
//! tumor-heterogeneity samplers.

pub mod data;
pub mod errors;
pub mod mixture;
pub mod ploidy;
pub mod rng;
pub mod state;

pub use data::{NoiseParameters, TumorHeterogeneityData};
pub use errors::{ErrorInfo, ThetError};
pub use mixture::{PopulationFractions, PopulationMixture, VariantProfile, VariantProfileCollection};
pub use ploidy::{PloidyState, PloidyStatePrior, PloidyStateSets, TotalCopyNumberProductStates};
pub use rng::{RandomSource, RngHandle};
pub use state::{HyperparameterValues, Priors, TumorHeterogeneityState};
