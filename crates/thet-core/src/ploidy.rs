//! Allele-specific ploidy states and the discrete-state tables injected by
//! the caller.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ThetError};

/// Allele-specific copy numbers `(m, n)` of one population at one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PloidyState {
    m: u32,
    n: u32,
}

impl PloidyState {
    /// Creates a ploidy state from its two allele-specific copy numbers.
    pub const fn new(m: u32, n: u32) -> Self {
        Self { m, n }
    }

    /// Copy number of the m allele.
    pub fn m(&self) -> u32 {
        self.m
    }

    /// Copy number of the n allele.
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Total copy number `m + n`.
    pub fn total(&self) -> u32 {
        self.m + self.n
    }
}

/// Discrete prior over ploidy states, supplied by the caller.
pub trait PloidyStatePrior: std::fmt::Debug + Send + Sync {
    /// Log-probability assigned to `state`.
    fn log_probability(&self, state: &PloidyState) -> f64;
}

/// Candidate total-copy-number combinations across the variant populations.
///
/// Every combination holds one total copy number per non-reference population,
/// in population order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCopyNumberProductStates {
    num_variant_populations: usize,
    states: Vec<Vec<u32>>,
}

impl TotalCopyNumberProductStates {
    /// Wraps the caller-enumerated combinations, checking their widths.
    pub fn new(num_variant_populations: usize, states: Vec<Vec<u32>>) -> Result<Self, ThetError> {
        if states.is_empty() {
            return Err(ThetError::Structure(ErrorInfo::new(
                "empty-product-states",
                "at least one total-copy-number combination is required",
            )));
        }
        if let Some((index, state)) = states
            .iter()
            .enumerate()
            .find(|(_, state)| state.len() != num_variant_populations)
        {
            return Err(ThetError::Structure(
                ErrorInfo::new(
                    "product-state-width",
                    "total-copy-number combination does not cover every variant population",
                )
                .with_context("index", index)
                .with_context("expected", num_variant_populations)
                .with_context("actual", state.len()),
            ));
        }
        Ok(Self {
            num_variant_populations,
            states,
        })
    }

    /// Number of non-reference populations each combination covers.
    pub fn num_variant_populations(&self) -> usize {
        self.num_variant_populations
    }

    /// Number of candidate combinations.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the combination at `index`.
    pub fn get(&self, index: usize) -> Option<&[u32]> {
        self.states.get(index).map(Vec::as_slice)
    }

    /// Iterates the combinations in table order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.states.iter().map(Vec::as_slice)
    }
}

/// Mapping from a total copy number to the ploidy states that realise it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PloidyStateSets {
    sets: BTreeMap<u32, Vec<PloidyState>>,
}

impl PloidyStateSets {
    /// Builds the mapping by grouping `states` on their total copy number.
    ///
    /// Duplicates are dropped and each group is kept in `(m, n)` order.
    pub fn from_states(states: impl IntoIterator<Item = PloidyState>) -> Self {
        let mut grouped: BTreeMap<u32, BTreeSet<PloidyState>> = BTreeMap::new();
        for state in states {
            grouped.entry(state.total()).or_default().insert(state);
        }
        Self {
            sets: grouped
                .into_iter()
                .map(|(total, set)| (total, set.into_iter().collect()))
                .collect(),
        }
    }

    /// Ploidy states whose total copy number equals `total_copy_number`.
    pub fn get(&self, total_copy_number: u32) -> Result<&[PloidyState], ThetError> {
        match self.sets.get(&total_copy_number) {
            Some(states) if !states.is_empty() => Ok(states),
            _ => Err(ThetError::Structure(
                ErrorInfo::new(
                    "missing-ploidy-states",
                    "no ploidy state realises the requested total copy number",
                )
                .with_context("total_copy_number", total_copy_number),
            )),
        }
    }

    /// Total copy numbers covered by the mapping, ascending.
    pub fn total_copy_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.sets.keys().copied()
    }
}
