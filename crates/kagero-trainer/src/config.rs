//! Configuration for Baum–Welch refinement.

use kagero_core::{KageroError, Result};
use serde::{Deserialize, Serialize};

/// What happens to the initial state distribution during refinement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorPolicy {
    /// Leave the seed priors untouched.
    #[default]
    Keep,
    /// Replace the priors with the expected first-state occupancy, averaged
    /// over the training sequences.
    Reestimate,
}

/// Configuration for [`train_unsupervised`](crate::HiddenMarkovModelTrainer::train_unsupervised).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaumWelchConfig {
    /// Upper bound on EM iterations
    pub max_iterations: usize,
    /// Stop once the training log-probability changes by less than this
    pub convergence_threshold: f64,
    /// Prior update policy
    pub prior_policy: PriorPolicy,
}

impl Default for BaumWelchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            convergence_threshold: 1e-6,
            prior_policy: PriorPolicy::Keep,
        }
    }
}

impl BaumWelchConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold on the change in log-probability.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set the prior update policy.
    pub fn with_prior_policy(mut self, policy: PriorPolicy) -> Self {
        self.prior_policy = policy;
        self
    }

    /// Rejects a zero iteration cap and negative or non-finite thresholds.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(KageroError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(KageroError::InvalidConfig(format!(
                "convergence_threshold must be finite and non-negative, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}
