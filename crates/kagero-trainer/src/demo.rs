//! Demo data for the `market` command: the market regime model and
//! unlabelled samples drawn from it.

use kagero_core::Result;
use kagero_core::hmm::{HiddenMarkovModel, UniformSource};
use kagero_core::types::{Token, strip_labels};

pub use kagero_core::demo::{MARKET_STATES, MARKET_SYMBOLS, market_model};

/// Samples `count` sequences of `length` tokens and strips their labels.
pub fn sample_unlabelled<R>(
    model: &HiddenMarkovModel<&'static str, &'static str>,
    rng: &mut R,
    count: usize,
    length: usize,
) -> Result<Vec<Vec<Token<&'static str, &'static str>>>>
where
    R: UniformSource + ?Sized,
{
    (0..count)
        .map(|_| Ok(strip_labels(&model.random_sample(rng, length)?)))
        .collect()
}
