#![deny(missing_docs)]

//! Log-posterior evaluation and Metropolis proposals for the
//! tumor-heterogeneity mixture model.
//!
//! Nothing here decides acceptance. The outer chain driver scores states with
//! [`calculate_log_posterior`], moves between simplex and unconstrained
//! coordinates with the [`transform`] functions, and draws candidates with
//! the proposal functions.

/// Categorical sampling over log-weighted candidates.
pub mod categorical;
/// Proposal tuning parameters.
pub mod config;
/// Whole-mixture proposal bundling fractions, profiles and Jacobian.
pub mod mixture_move;
/// Log-posterior of a sampler state.
pub mod posterior;
/// Lazy Cartesian product of ploidy-state choices.
pub mod product;
/// Two-stage per-segment variant-profile sampler.
pub mod profile;
/// Scale-mixture random walks.
pub mod proposals;
/// Stick-breaking map between the simplex and unconstrained coordinates.
pub mod transform;

/// Regulariser added to logarithms and denominators that may reach zero.
pub const EPSILON: f64 = 1e-10;

pub use categorical::{normalize_log_probabilities, random_select};
pub use config::ProposalConfig;
pub use mixture_move::{propose_population_mixture, PopulationMixtureProposal};
pub use posterior::{
    calculate_log_posterior, calculate_log_posterior_breakdown, LogPosteriorBreakdown,
    SegmentObservables,
};
pub use product::PloidyStateProduct;
pub use profile::{propose_variant_profile_collection, DiscreteStateTables};
pub use proposals::{propose_ploidy, propose_transformed_population_fraction};
pub use transform::{
    log_jacobian_factor, population_fractions_from_transformed,
    transformed_from_population_fractions,
};
