//! Categorical draws over enumerated candidates weighted in log space.

use thet_core::{ErrorInfo, RandomSource, ThetError};

/// Converts log-weights into probabilities with a log-sum-exp shift.
///
/// Fails if a weight is NaN or if no candidate has a finite weight. Candidates
/// at `-inf` receive probability zero.
pub fn normalize_log_probabilities(log_probabilities: &[f64]) -> Result<Vec<f64>, ThetError> {
    if let Some(index) = log_probabilities.iter().position(|lp| lp.is_nan()) {
        return Err(ThetError::Numeric(
            ErrorInfo::new("nan-log-probability", "candidate log-weight is NaN")
                .with_context("index", index),
        ));
    }
    let max = log_probabilities
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(ThetError::Numeric(
            ErrorInfo::new(
                "degenerate-log-probabilities",
                "no candidate carries a finite log-weight",
            )
            .with_context("candidates", log_probabilities.len())
            .with_context("max", max),
        ));
    }
    let weights: Vec<f64> = log_probabilities.iter().map(|lp| (lp - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    Ok(weights.into_iter().map(|w| w / total).collect())
}

/// Picks an index by comparing one uniform draw against cumulative weights.
///
/// Rounding slack past the final cumulative weight goes to the last candidate
/// with non-zero probability.
///
/// # Panics
/// Panics if `probabilities` is empty.
pub fn random_select<R>(probabilities: &[f64], rng: &mut R) -> usize
where
    R: RandomSource + ?Sized,
{
    let draw = rng.uniform();
    let mut cumulative = 0.0;
    for (index, &probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if draw < cumulative {
            return index;
        }
    }
    probabilities
        .iter()
        .rposition(|&probability| probability > 0.0)
        .unwrap_or(probabilities.len() - 1)
}
