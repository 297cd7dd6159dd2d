//! Stick-breaking reparameterisation of the population-fraction simplex.
//!
//! With `K` populations, fractions map to `K - 1` break proportions
//! (`fraction_i / (1 - sum_{j<i} fraction_j)`) and each break proportion to an
//! unconstrained coordinate `logit(b_i) - ln(1 / (K - i - 1))`. The offset
//! centres every coordinate on the break proportion of an even split so a
//! fixed-width random walk behaves alike across indices.
//!
//! Remaining stick mass is carried as the tail sum of the fractions rather
//! than `1 - cumulative_sum`, so tiny trailing fractions never cancel to zero.

use thet_core::{PopulationFractions, ThetError};

/// Break proportions are kept this far inside `(0, 1)`. A saturated sigmoid
/// would otherwise put the inverse image on the simplex boundary.
pub const BREAK_PROPORTION_BOUND: f64 = f64::EPSILON;

/// Maps population fractions to their unconstrained coordinates.
pub fn transformed_from_population_fractions(fractions: &PopulationFractions) -> Vec<f64> {
    let num_populations = fractions.len();
    let tails = tail_sums(fractions.as_slice());
    fractions.as_slice()[..num_populations - 1]
        .iter()
        .enumerate()
        .map(|(i, fraction)| {
            (fraction.ln() - tails[i + 1].ln()) - centring_offset(num_populations, i)
        })
        .collect()
}

/// Maps unconstrained coordinates back onto the simplex interior.
pub fn population_fractions_from_transformed(
    transformed: &[f64],
) -> Result<PopulationFractions, ThetError> {
    population_fractions_from_break_proportions(&break_proportions_from_transformed(transformed))
}

/// Jacobian correction `sum_i ln(fraction_i) + ln(1 - b_i)` over the first
/// `K - 1` populations.
///
/// This is `ln |d fractions / d coordinates|`, the negated log-determinant of
/// the fractions-to-coordinates map. Adding it to the log-posterior gives the
/// density of the chain in unconstrained space.
pub fn log_jacobian_factor(fractions: &PopulationFractions) -> f64 {
    let tails = tail_sums(fractions.as_slice());
    fractions.as_slice()[..fractions.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, fraction)| fraction.ln() + tails[i + 1].ln() - tails[i].ln())
        .sum()
}

/// Break proportions of the first `K - 1` populations.
pub fn break_proportions_from_population_fractions(fractions: &PopulationFractions) -> Vec<f64> {
    let tails = tail_sums(fractions.as_slice());
    fractions.as_slice()[..fractions.len() - 1]
        .iter()
        .zip(&tails)
        .map(|(fraction, tail)| fraction / tail)
        .collect()
}

/// Rebuilds fractions from break proportions. The reference population takes
/// whatever stick is left, so the result sums to one by construction.
pub fn population_fractions_from_break_proportions(
    break_proportions: &[f64],
) -> Result<PopulationFractions, ThetError> {
    let mut fractions = Vec::with_capacity(break_proportions.len() + 1);
    let mut remaining = 1.0;
    for &proportion in break_proportions {
        fractions.push(remaining * proportion);
        remaining *= 1.0 - proportion;
    }
    fractions.push(remaining);
    PopulationFractions::new(fractions)
}

/// Unconstrained coordinates of the given break proportions.
pub fn transformed_from_break_proportions(break_proportions: &[f64]) -> Vec<f64> {
    let num_populations = break_proportions.len() + 1;
    break_proportions
        .iter()
        .enumerate()
        .map(|(i, &b)| logit(b) - centring_offset(num_populations, i))
        .collect()
}

/// Break proportions of the given unconstrained coordinates, clamped to
/// `[BREAK_PROPORTION_BOUND, 1 - BREAK_PROPORTION_BOUND]`.
pub fn break_proportions_from_transformed(transformed: &[f64]) -> Vec<f64> {
    let num_populations = transformed.len() + 1;
    transformed
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            sigmoid(x + centring_offset(num_populations, i))
                .clamp(BREAK_PROPORTION_BOUND, 1.0 - BREAK_PROPORTION_BOUND)
        })
        .collect()
}

// tails[i] = sum_{j >= i} fractions[j]
fn tail_sums(fractions: &[f64]) -> Vec<f64> {
    let mut tails = vec![0.0; fractions.len()];
    let mut sum = 0.0;
    for (i, fraction) in fractions.iter().enumerate().rev() {
        sum += fraction;
        tails[i] = sum;
    }
    tails
}

fn centring_offset(num_populations: usize, index: usize) -> f64 {
    (1.0 / (num_populations - index - 1) as f64).ln()
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
