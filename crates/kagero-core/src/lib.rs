//! # Kagero Core
//!
//! Discrete hidden Markov models over arbitrary state and symbol identifiers.
//! Provides sequence probability, Viterbi decoding, posterior entropy and
//! sampling, all computed in log space.
//!
//! ## Quick Start
//!
//! ```rust
//! use kagero_core::hmm::HiddenMarkovModel;
//! use kagero_core::prob::{BoxedProbDist, ConditionalProbDist, DictionaryProbDist};
//! use kagero_core::types::unlabelled_sequence;
//!
//! let states = ["rain", "sun"];
//! let symbols = ["umbrella", "none"];
//!
//! let transitions: ConditionalProbDist<_, BoxedProbDist<&str>> = [
//!     ("rain", Box::new(DictionaryProbDist::new([("rain", 0.7), ("sun", 0.3)])) as BoxedProbDist<&str>),
//!     ("sun", Box::new(DictionaryProbDist::new([("rain", 0.3), ("sun", 0.7)]))),
//! ]
//! .into_iter()
//! .collect();
//! let emissions: ConditionalProbDist<_, BoxedProbDist<&str>> = [
//!     ("rain", Box::new(DictionaryProbDist::new([("umbrella", 0.9), ("none", 0.1)])) as BoxedProbDist<&str>),
//!     ("sun", Box::new(DictionaryProbDist::new([("umbrella", 0.2), ("none", 0.8)]))),
//! ]
//! .into_iter()
//! .collect();
//! let priors = Box::new(DictionaryProbDist::new([("rain", 0.5), ("sun", 0.5)]));
//!
//! let model = HiddenMarkovModel::new(symbols, states, transitions, emissions, priors);
//! let days = unlabelled_sequence(["umbrella", "umbrella", "none"]);
//!
//! assert_eq!(model.best_path(&days).unwrap(), vec!["rain", "rain", "sun"]);
//! assert!(model.log_probability(&days).unwrap() < 0.0);
//! ```
pub mod demo;
pub mod error;
pub mod hmm;
pub mod logspace;
pub mod prob;
pub mod types;

// Re-export primary API
pub use error::{KageroError, Result};
pub use hmm::{HiddenMarkovModel, LogMatrix, Trellis, UniformSource, ViterbiDecoder};
pub use logspace::{LOG_ZERO, log_add, log_add_pair};
pub use prob::{
    BoxedProbDist, ConditionalProbDist, DictionaryProbDist, Estimator, FreqDist, MutableProbDist,
    ProbDist, UniformProbDist,
};
pub use types::{Alphabet, AlphabetBuilder, Identifier, Token};
