//! Population fractions, variant profiles and their aggregate.

use serde::{Deserialize, Serialize};

use crate::data::TumorHeterogeneityData;
use crate::errors::{ErrorInfo, ThetError};
use crate::ploidy::PloidyState;

const FRACTION_SUM_TOLERANCE: f64 = 1e-6;

/// Weights of the populations, the reference (normal) population last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PopulationFractions(Vec<f64>);

impl PopulationFractions {
    /// Validates and wraps the fractions.
    ///
    /// At least two populations are required, every entry must lie strictly
    /// inside `(0, 1)` and the entries must sum to one.
    pub fn new(fractions: Vec<f64>) -> Result<Self, ThetError> {
        if fractions.len() < 2 {
            return Err(ThetError::Structure(
                ErrorInfo::new(
                    "too-few-populations",
                    "a mixture needs at least one variant and the reference population",
                )
                .with_context("num_populations", fractions.len()),
            ));
        }
        if let Some((index, value)) = fractions
            .iter()
            .enumerate()
            .find(|(_, value)| !(**value > 0.0 && **value < 1.0))
        {
            return Err(ThetError::Structure(
                ErrorInfo::new("fraction-out-of-range", "population fraction outside (0, 1)")
                    .with_context("index", index)
                    .with_context("value", value),
            ));
        }
        let sum: f64 = fractions.iter().sum();
        if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE {
            return Err(ThetError::Structure(
                ErrorInfo::new("fraction-sum", "population fractions do not sum to one")
                    .with_context("sum", sum),
            ));
        }
        Ok(Self(fractions))
    }

    /// Number of populations, the reference included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fraction of population `index`.
    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    /// Fraction of the reference population.
    pub fn normal_fraction(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Borrows the fractions as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for PopulationFractions {
    type Error = ThetError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PopulationFractions> for Vec<f64> {
    fn from(value: PopulationFractions) -> Self {
        value.0
    }
}

/// Per-segment ploidy states of one variant population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProfile(Vec<PloidyState>);

impl VariantProfile {
    /// Wraps the per-segment states.
    pub fn new(states: Vec<PloidyState>) -> Self {
        Self(states)
    }

    /// Number of segments covered.
    pub fn num_segments(&self) -> usize {
        self.0.len()
    }

    /// State at `segment_index`.
    pub fn ploidy_state(&self, segment_index: usize) -> PloidyState {
        self.0[segment_index]
    }

    /// Borrows the states as a slice.
    pub fn as_slice(&self) -> &[PloidyState] {
        &self.0
    }
}

/// Profiles of every variant population; all share one segment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VariantProfile>", into = "Vec<VariantProfile>")]
pub struct VariantProfileCollection(Vec<VariantProfile>);

impl VariantProfileCollection {
    /// Validates that the collection is non-empty and rectangular.
    pub fn new(profiles: Vec<VariantProfile>) -> Result<Self, ThetError> {
        let Some(first) = profiles.first() else {
            return Err(ThetError::structure(
                "empty-profile-collection",
                "at least one variant profile is required",
            ));
        };
        let num_segments = first.num_segments();
        if let Some((index, profile)) = profiles
            .iter()
            .enumerate()
            .find(|(_, profile)| profile.num_segments() != num_segments)
        {
            return Err(ThetError::Structure(
                ErrorInfo::new("ragged-profiles", "variant profiles differ in segment count")
                    .with_context("population", index)
                    .with_context("expected", num_segments)
                    .with_context("actual", profile.num_segments()),
            ));
        }
        Ok(Self(profiles))
    }

    /// Number of variant (non-reference) populations.
    pub fn num_variant_populations(&self) -> usize {
        self.0.len()
    }

    /// Number of segments shared by every profile.
    pub fn num_segments(&self) -> usize {
        self.0[0].num_segments()
    }

    /// State of population `population_index` at `segment_index`.
    pub fn ploidy_state(&self, population_index: usize, segment_index: usize) -> PloidyState {
        self.0[population_index].ploidy_state(segment_index)
    }

    /// Iterates the profiles in population order.
    pub fn iter(&self) -> std::slice::Iter<'_, VariantProfile> {
        self.0.iter()
    }
}

impl TryFrom<Vec<VariantProfile>> for VariantProfileCollection {
    type Error = ThetError;

    fn try_from(value: Vec<VariantProfile>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariantProfileCollection> for Vec<VariantProfile> {
    fn from(value: VariantProfileCollection) -> Self {
        value.0
    }
}

/// Population fractions together with the variant profiles they weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationMixture {
    population_fractions: PopulationFractions,
    variant_profile_collection: VariantProfileCollection,
    normal_ploidy_state: PloidyState,
}

impl PopulationMixture {
    /// Pairs fractions with profiles; there must be one profile per
    /// non-reference population.
    pub fn new(
        population_fractions: PopulationFractions,
        variant_profile_collection: VariantProfileCollection,
        normal_ploidy_state: PloidyState,
    ) -> Result<Self, ThetError> {
        let expected = population_fractions.len() - 1;
        if variant_profile_collection.num_variant_populations() != expected {
            return Err(ThetError::dimension_mismatch(
                "variant profile collection",
                expected,
                variant_profile_collection.num_variant_populations(),
            ));
        }
        Ok(Self {
            population_fractions,
            variant_profile_collection,
            normal_ploidy_state,
        })
    }

    /// Number of populations, the reference included.
    pub fn num_populations(&self) -> usize {
        self.population_fractions.len()
    }

    /// Number of segments covered by the variant profiles.
    pub fn num_segments(&self) -> usize {
        self.variant_profile_collection.num_segments()
    }

    /// Fraction of population `population_index`.
    pub fn population_fraction(&self, population_index: usize) -> f64 {
        self.population_fractions.get(population_index)
    }

    /// Borrows the population fractions.
    pub fn population_fractions(&self) -> &PopulationFractions {
        &self.population_fractions
    }

    /// Borrows the variant profiles.
    pub fn variant_profile_collection(&self) -> &VariantProfileCollection {
        &self.variant_profile_collection
    }

    /// Fixed state of the reference population.
    pub fn normal_ploidy_state(&self) -> PloidyState {
        self.normal_ploidy_state
    }

    /// Fraction-weighted average of `copy_number` over all populations at a
    /// segment, the reference population contributing its fixed state.
    ///
    /// # Panics
    /// Panics if `segment_index` is not below [`Self::num_segments`].
    pub fn population_averaged_copy_number<F>(&self, segment_index: usize, copy_number: F) -> f64
    where
        F: Fn(&PloidyState) -> u32,
    {
        let variant: f64 = self
            .variant_profile_collection
            .iter()
            .enumerate()
            .map(|(population_index, profile)| {
                f64::from(copy_number(&profile.ploidy_state(segment_index)))
                    * self.population_fractions.get(population_index)
            })
            .sum();
        variant
            + f64::from(copy_number(&self.normal_ploidy_state))
                * self.population_fractions.normal_fraction()
    }

    /// Average total copy number of the sample, segments weighted by the
    /// collaborator's fractional lengths.
    pub fn ploidy<D>(&self, data: &D) -> Result<f64, ThetError>
    where
        D: TumorHeterogeneityData + ?Sized,
    {
        if data.num_segments() != self.num_segments() {
            return Err(ThetError::dimension_mismatch(
                "variant profile",
                data.num_segments(),
                self.num_segments(),
            ));
        }
        Ok((0..self.num_segments())
            .map(|segment_index| {
                data.fractional_length(segment_index)
                    * self.population_averaged_copy_number(segment_index, PloidyState::total)
            })
            .sum())
    }

    /// Returns a mixture sharing this one's reference state with new parts.
    pub fn with_parts(
        &self,
        population_fractions: PopulationFractions,
        variant_profile_collection: VariantProfileCollection,
    ) -> Result<Self, ThetError> {
        Self::new(
            population_fractions,
            variant_profile_collection,
            self.normal_ploidy_state,
        )
    }
}
