//! Scale-mixture Gaussian random walks.
//!
//! Each step draws its scale first: `width` with probability one half,
//! otherwise `10 * width`, so most steps stay local while a few reach
//! further modes.

use log::debug;
use thet_core::RandomSource;

const WIDE_STEP_MULTIPLIER: f64 = 10.0;

/// Perturbs one unconstrained population-fraction coordinate.
pub fn propose_transformed_population_fraction<R>(rng: &mut R, current: f64, width: f64) -> f64
where
    R: RandomSource + ?Sized,
{
    current + mixture_step(rng, width)
}

/// Perturbs every coordinate of an unconstrained population-fraction vector.
pub fn propose_transformed_population_fractions<R>(
    rng: &mut R,
    current: &[f64],
    width: f64,
) -> Vec<f64>
where
    R: RandomSource + ?Sized,
{
    current
        .iter()
        .map(|&coordinate| propose_transformed_population_fraction(rng, coordinate, width))
        .collect()
}

/// Proposes a ploidy in `(0, max_total_copy_number]`.
///
/// Draws up to `max_iterations` steps from `current` and returns the first one
/// inside the range. When every draw falls outside, `current` is returned
/// unchanged and the Metropolis step sees a null move.
pub fn propose_ploidy<R>(
    rng: &mut R,
    current: f64,
    width: f64,
    max_total_copy_number: u32,
    max_iterations: usize,
) -> f64
where
    R: RandomSource + ?Sized,
{
    let upper = f64::from(max_total_copy_number);
    for _ in 0..max_iterations {
        let proposed = current + mixture_step(rng, width);
        if 0.0 < proposed && proposed <= upper {
            return proposed;
        }
    }
    debug!("Ploidy random walk exhausted {max_iterations} draws; keeping {current}");
    current
}

fn mixture_step<R>(rng: &mut R, width: f64) -> f64
where
    R: RandomSource + ?Sized,
{
    let scale = if rng.uniform() < 0.5 {
        width
    } else {
        WIDE_STEP_MULTIPLIER * width
    };
    scale * rng.standard_normal()
}
