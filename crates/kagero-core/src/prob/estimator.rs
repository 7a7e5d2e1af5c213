//! # Estimators
//!
//! Turn a [`FreqDist`] into a [`ProbDist`]. Supervised training is
//! parameterised over an [`Estimator`] so callers can swap plain maximum
//! likelihood for additive smoothing.

use super::{BoxedProbDist, FreqDist, ProbDist};
use crate::types::Identifier;

/// Maximum-likelihood estimate: `count / total`.
#[derive(Debug, Clone, PartialEq)]
pub struct MleProbDist<E: Identifier> {
    freq: FreqDist<E>,
}

impl<E: Identifier> MleProbDist<E> {
    pub fn new(freq: FreqDist<E>) -> Self {
        Self { freq }
    }
}

impl<E: Identifier> ProbDist<E> for MleProbDist<E> {
    fn prob(&self, event: &E) -> f64 {
        self.freq.freq(event)
    }

    fn samples(&self) -> Vec<&E> {
        self.freq.events().iter().collect()
    }
}

/// Additive smoothing: `(count + γ) / (total + bins·γ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LidstoneProbDist<E: Identifier> {
    freq: FreqDist<E>,
    gamma: f64,
    bins: usize,
}

impl<E: Identifier> LidstoneProbDist<E> {
    /// `bins` is the number of possible events; it is raised to the number of
    /// distinct events already seen if smaller.
    pub fn new(freq: FreqDist<E>, gamma: f64, bins: usize) -> Self {
        let bins = bins.max(freq.bins());
        Self { freq, gamma, bins }
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl<E: Identifier> ProbDist<E> for LidstoneProbDist<E> {
    fn prob(&self, event: &E) -> f64 {
        let denom = self.freq.total() as f64 + self.bins as f64 * self.gamma;
        if denom <= 0.0 {
            return 0.0;
        }
        (self.freq.count(event) as f64 + self.gamma) / denom
    }

    fn samples(&self) -> Vec<&E> {
        self.freq.events().iter().collect()
    }
}

/// Builds a distribution from counts and the number of possible outcomes.
pub trait Estimator {
    fn estimate<E: Identifier>(&self, freq: &FreqDist<E>, bins: usize) -> BoxedProbDist<E>;
}

/// Unsmoothed relative frequencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MleEstimator;

impl Estimator for MleEstimator {
    fn estimate<E: Identifier>(&self, freq: &FreqDist<E>, _bins: usize) -> BoxedProbDist<E> {
        Box::new(MleProbDist::new(freq.clone()))
    }
}

/// Lidstone smoothing with a caller-chosen `gamma`.
#[derive(Debug, Clone, Copy)]
pub struct LidstoneEstimator {
    pub gamma: f64,
}

impl LidstoneEstimator {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl Estimator for LidstoneEstimator {
    fn estimate<E: Identifier>(&self, freq: &FreqDist<E>, bins: usize) -> BoxedProbDist<E> {
        Box::new(LidstoneProbDist::new(freq.clone(), self.gamma, bins))
    }
}

/// Add-one smoothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceEstimator;

impl Estimator for LaplaceEstimator {
    fn estimate<E: Identifier>(&self, freq: &FreqDist<E>, bins: usize) -> BoxedProbDist<E> {
        LidstoneEstimator::new(1.0).estimate(freq, bins)
    }
}

/// Expected likelihood estimate (add one half).
#[derive(Debug, Clone, Copy, Default)]
pub struct EleEstimator;

impl Estimator for EleEstimator {
    fn estimate<E: Identifier>(&self, freq: &FreqDist<E>, bins: usize) -> BoxedProbDist<E> {
        LidstoneEstimator::new(0.5).estimate(freq, bins)
    }
}
