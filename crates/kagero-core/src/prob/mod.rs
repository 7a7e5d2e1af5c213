//! # Discrete Probability Distributions
//!
//! The HMM engine only ever asks a distribution for the (log-)probability of
//! an event, so everything it consumes goes through the [`ProbDist`] trait.
//! Concrete distributions:
//!
//! - [`DictionaryProbDist`] / [`UniformProbDist`]: hand-specified parameters
//! - [`MleProbDist`] / [`LidstoneProbDist`]: estimates built from a [`FreqDist`]
//! - [`MutableProbDist`]: dense log-probability slots, rewritten during training
//!
//! [`ConditionalProbDist`] keys one distribution per condition (per source
//! state for transitions, per emitting state for outputs).

pub mod conditional;
pub mod dist;
pub mod estimator;
pub mod freq;
pub mod mutable;

use std::fmt::Debug;

use crate::logspace::safe_ln;

pub use conditional::ConditionalProbDist;
pub use dist::{DictionaryProbDist, UniformProbDist};
pub use estimator::{
    EleEstimator, Estimator, LaplaceEstimator, LidstoneEstimator, LidstoneProbDist, MleEstimator,
    MleProbDist,
};
pub use freq::{ConditionalFreqDist, FreqDist};
pub use mutable::MutableProbDist;

/// A read-only discrete probability distribution over events of type `E`.
pub trait ProbDist<E>: Debug + Send + Sync {
    /// Probability mass of `event`; zero for events outside the support.
    fn prob(&self, event: &E) -> f64;

    /// Natural log of [`prob`](Self::prob), with `ln(0)` reported as
    /// [`LOG_ZERO`](crate::logspace::LOG_ZERO).
    fn log_prob(&self, event: &E) -> f64 {
        safe_ln(self.prob(event))
    }

    /// Events the distribution knows about, in its enumeration order.
    fn samples(&self) -> Vec<&E>;
}

/// Owned, type-erased distribution as stored by the HMM engine.
pub type BoxedProbDist<E> = Box<dyn ProbDist<E>>;

impl<E, D> ProbDist<E> for Box<D>
where
    D: ProbDist<E> + ?Sized,
{
    fn prob(&self, event: &E) -> f64 {
        (**self).prob(event)
    }

    fn log_prob(&self, event: &E) -> f64 {
        (**self).log_prob(event)
    }

    fn samples(&self) -> Vec<&E> {
        (**self).samples()
    }
}
