//! # Sequence Sampling
//!
//! Draws labelled sequences from a model by inverse-CDF sampling over each
//! distribution in alphabet order.

use super::model::HiddenMarkovModel;
use crate::error::{KageroError, Result};
use crate::prob::ProbDist;
use crate::types::{Alphabet, Identifier, Token};

/// Source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl UniformSource for oorandom::Rand64 {
    fn next_uniform(&mut self) -> f64 {
        self.rand_float()
    }
}

impl UniformSource for oorandom::Rand32 {
    fn next_uniform(&mut self) -> f64 {
        f64::from(self.rand_float())
    }
}

impl<S: Identifier, O: Identifier> HiddenMarkovModel<S, O> {
    /// Samples a labelled sequence of `length` tokens.
    ///
    /// The first state is drawn from the priors, each later state from the
    /// transition distribution of its predecessor, and every symbol from the
    /// emitting state's output distribution.
    ///
    /// # Errors
    /// [`KageroError::MalformedDistribution`] if a draw falls outside the
    /// cumulative mass of the distribution it was taken from.
    pub fn random_sample<R>(&self, rng: &mut R, length: usize) -> Result<Vec<Token<S, O>>>
    where
        R: UniformSource + ?Sized,
    {
        let mut tokens = Vec::with_capacity(length);
        let mut previous: Option<S> = None;

        for _ in 0..length {
            let state = match &previous {
                None => sample_from(self.priors(), rng.next_uniform(), self.states(), || {
                    "priors".to_string()
                })?,
                Some(from) => {
                    let dist = self.transitions().get(from);
                    sample_conditional(dist, rng.next_uniform(), self.states(), || {
                        format!("transitions from {from:?}")
                    })?
                }
            };
            let symbol = sample_conditional(
                self.emissions().get(&state),
                rng.next_uniform(),
                self.symbols(),
                || format!("emissions of {state:?}"),
            )?;

            tokens.push(Token::labelled(symbol, state.clone()));
            previous = Some(state);
        }

        Ok(tokens)
    }
}

fn sample_conditional<E, D>(
    dist: Option<&D>,
    p: f64,
    samples: &Alphabet<E>,
    context: impl FnOnce() -> String,
) -> Result<E>
where
    E: Identifier,
    D: ProbDist<E> + ?Sized,
{
    match dist {
        Some(dist) => sample_from(dist, p, samples, context),
        None => Err(KageroError::MalformedDistribution {
            context: context(),
            reason: "no distribution defined".to_string(),
        }),
    }
}

/// Returns the first sample whose cumulative bracket `[cum, cum + mass]`
/// contains `p`.
fn sample_from<E, D>(
    dist: &D,
    p: f64,
    samples: &Alphabet<E>,
    context: impl FnOnce() -> String,
) -> Result<E>
where
    E: Identifier,
    D: ProbDist<E> + ?Sized,
{
    let mut cumulative = 0.0;
    for sample in samples {
        let mass = dist.prob(sample);
        if cumulative <= p && p <= cumulative + mass {
            return Ok(sample.clone());
        }
        cumulative += mass;
    }
    Err(KageroError::MalformedDistribution {
        context: context(),
        reason: format!("draw {p} exceeds cumulative mass {cumulative}"),
    })
}
