use serde::{Deserialize, Serialize};
use thet_core::{ErrorInfo, ThetError};

/// Proposal tuning supplied by the sampler coordinator.
///
/// Every field is required; there are no built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProposalConfig {
    /// Width of the narrow component of the transformed population-fraction random walk.
    pub transformed_population_fraction_proposal_width: f64,
    /// Width of the narrow component of the ploidy random walk.
    pub ploidy_proposal_width: f64,
    /// Number of draws the ploidy random walk attempts before keeping the current value.
    pub max_ploidy_step_iterations: usize,
    /// Largest total copy number any population may carry.
    pub max_total_copy_number: u32,
}

impl ProposalConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ThetError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|err| {
            ThetError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that widths are finite and positive and the copy-number cap is non-zero.
    pub fn validate(&self) -> Result<(), ThetError> {
        for (name, width) in [
            (
                "transformed_population_fraction_proposal_width",
                self.transformed_population_fraction_proposal_width,
            ),
            ("ploidy_proposal_width", self.ploidy_proposal_width),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(ThetError::Config(
                    ErrorInfo::new("invalid-width", "proposal widths must be positive")
                        .with_context("name", name)
                        .with_context("value", width),
                ));
            }
        }
        if self.max_total_copy_number == 0 {
            return Err(ThetError::Config(
                ErrorInfo::new(
                    "invalid-max-total-copy-number",
                    "maximum total copy number must be at least one",
                )
                .with_hint("the ploidy random walk accepts values in (0, max_total_copy_number]"),
            ));
        }
        Ok(())
    }
}
