//! Lazy Cartesian product over per-population ploidy-state choices.

use thet_core::{ErrorInfo, PloidyState, ThetError};

/// All ways of picking one ploidy state per population.
///
/// Combinations are never materialised together: [`Self::iter`] yields them
/// one at a time in odometer order (last population varies fastest) and can
/// be called again to restart, while [`Self::combination_at`] decodes any
/// position directly.
#[derive(Debug, Clone)]
pub struct PloidyStateProduct<'a> {
    choices: Vec<&'a [PloidyState]>,
    len: usize,
}

impl<'a> PloidyStateProduct<'a> {
    /// Builds the product of `choices`, one slice per population.
    pub fn new(choices: Vec<&'a [PloidyState]>) -> Result<Self, ThetError> {
        let len = choices.iter().try_fold(1usize, |acc, states| {
            acc.checked_mul(states.len())
        });
        match len {
            Some(len) => Ok(Self { choices, len }),
            None => Err(ThetError::Structure(
                ErrorInfo::new(
                    "product-overflow",
                    "number of ploidy-state combinations overflows usize",
                )
                .with_context("populations", choices.len()),
            )),
        }
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when some population has no choice at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Combination at `index` in iteration order.
    pub fn combination_at(&self, index: usize) -> Option<Vec<PloidyState>> {
        if index >= self.len {
            return None;
        }
        let mut combination = vec![PloidyState::new(0, 0); self.choices.len()];
        let mut remainder = index;
        for (slot, states) in combination.iter_mut().zip(&self.choices).rev() {
            *slot = states[remainder % states.len()];
            remainder /= states.len();
        }
        Some(combination)
    }

    /// Iterates every combination from the start.
    pub fn iter(&self) -> Combinations<'_, 'a> {
        Combinations {
            product: self,
            position: 0,
        }
    }
}

/// Iterator returned by [`PloidyStateProduct::iter`].
#[derive(Debug, Clone)]
pub struct Combinations<'p, 'a> {
    product: &'p PloidyStateProduct<'a>,
    position: usize,
}

impl Iterator for Combinations<'_, '_> {
    type Item = Vec<PloidyState>;

    fn next(&mut self) -> Option<Self::Item> {
        let combination = self.product.combination_at(self.position)?;
        self.position += 1;
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.product.len - self.position.min(self.product.len);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_, '_> {}
