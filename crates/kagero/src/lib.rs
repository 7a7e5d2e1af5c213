//! # Kagero
//!
//! Hidden Markov models for sequence labelling. Re-exports the inference
//! engine from `kagero-core` and the training routines from
//! `kagero-trainer`.
//!
//! ```rust
//! use kagero::{BaumWelchConfig, HiddenMarkovModelTrainer, MleEstimator, Token};
//!
//! let labelled = vec![vec![
//!     Token::labelled("the", "DT"),
//!     Token::labelled("dog", "NN"),
//! ]];
//! let mut trainer = HiddenMarkovModelTrainer::default();
//! let (model, report) = trainer
//!     .train(&labelled, &[], &MleEstimator, &BaumWelchConfig::default())
//!     .unwrap();
//!
//! assert!(report.is_none());
//! let tagged = model.tag(&[Token::unlabelled("the"), Token::unlabelled("dog")]).unwrap();
//! assert_eq!(tagged[1].state, Some("NN"));
//! ```

pub use kagero_core::hmm::{HiddenMarkovModel, LogMatrix, UniformSource};
pub use kagero_core::prob::{
    BoxedProbDist, ConditionalProbDist, DictionaryProbDist, EleEstimator, Estimator,
    LaplaceEstimator, LidstoneEstimator, MleEstimator, ProbDist, UniformProbDist,
};
pub use kagero_core::types::{Alphabet, Token};
pub use kagero_core::{KageroError, LOG_ZERO, Result, log_add};
pub use kagero_trainer::{
    BaumWelchConfig, HiddenMarkovModelTrainer, PriorPolicy, TrainingOutcome, TrainingReport,
};
