//! Boundary with the segment-data collaborator.

use serde::{Deserialize, Serialize};

/// Noise parameters of the copy-ratio and minor-allele-fraction likelihoods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    /// Additive copy-ratio noise floor (non-negative).
    pub copy_ratio_noise_floor: f64,
    /// Multiplicative copy-ratio noise factor (at least one).
    pub copy_ratio_noise_factor: f64,
    /// Multiplicative minor-allele-fraction noise factor (at least one).
    pub minor_allele_fraction_noise_factor: f64,
}

/// Per-segment copy-ratio and minor-allele-fraction evidence.
///
/// Loading and validating the underlying segments is the implementor's
/// concern; the samplers only evaluate densities through this trait.
pub trait TumorHeterogeneityData {
    /// Number of genomic segments.
    fn num_segments(&self) -> usize;

    /// Weight of a segment when averaging copy number into a ploidy.
    ///
    /// Weights are expected to sum to one. The default weighs every segment
    /// equally; length-aware collaborators override it.
    fn fractional_length(&self, segment_index: usize) -> f64 {
        let _ = segment_index;
        1.0 / self.num_segments() as f64
    }

    /// Joint log-density of a copy ratio and minor allele fraction at a segment.
    fn log_density(
        &self,
        segment_index: usize,
        copy_ratio: f64,
        minor_allele_fraction: f64,
        noise: &NoiseParameters,
    ) -> f64;

    /// Marginal copy-ratio log-density at a segment. Only the copy-ratio noise
    /// terms of `noise` are consulted.
    fn copy_ratio_log_density(&self, segment_index: usize, copy_ratio: f64, noise: &NoiseParameters)
        -> f64;
}
