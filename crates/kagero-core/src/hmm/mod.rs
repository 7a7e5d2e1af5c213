//! # HMM Engine
//!
//! [`HiddenMarkovModel`] holds the five parameters of a discrete HMM and
//! answers queries about observation sequences: probability, decoding,
//! posterior entropy and sampling. The recursions themselves live on
//! [`Trellis`], which the trainer reuses while parameters are being
//! re-estimated.

pub mod entropy;
pub mod matrix;
pub mod model;
pub mod sampling;
pub mod trellis;
pub mod viterbi;

#[cfg(test)]
pub(crate) mod test_models;

pub use matrix::LogMatrix;
pub use model::{EmissionDist, HiddenMarkovModel, TransitionDist};
pub use sampling::UniformSource;
pub use trellis::{Trellis, log_likelihood};
pub use viterbi::ViterbiDecoder;
