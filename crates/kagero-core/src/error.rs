use thiserror::Error;

/// Errors that can occur during Kagero model queries and training.
#[derive(Debug, Error)]
pub enum KageroError {
    /// A distribution whose masses do not sum to one was detected.
    ///
    /// Raised lazily by sampling (no cumulative bracket holds the draw) or
    /// eagerly by [`HiddenMarkovModel::validate`](crate::hmm::HiddenMarkovModel::validate).
    #[error("malformed distribution ({context}): {reason}")]
    MalformedDistribution {
        /// Which distribution failed, e.g. `transitions from "bull"`.
        context: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A labelled operation met a token without a state label.
    #[error("token at position {position} of sequence {sequence} has no state label")]
    MissingLabel {
        /// Index of the sequence within the input; `0` for single-sequence queries.
        sequence: usize,
        /// Index of the offending token within its sequence.
        position: usize,
    },

    /// An observed symbol is not part of the symbol alphabet.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A state label is not part of the state space.
    #[error("unknown state: {0}")]
    UnknownState(String),

    /// A mutable distribution has no slot for the event being updated.
    #[error("event has no slot in mutable distribution: {0}")]
    UnknownEvent(String),

    /// The model has no states, so no path exists.
    #[error("state space is empty")]
    EmptyStateSpace,

    /// A score table does not match the decoder's number of states.
    #[error("dimension mismatch: expected {expected} states, found {found}")]
    DimensionMismatch {
        /// States the decoder was built for.
        expected: usize,
        /// States present in the input.
        found: usize,
    },

    /// Training was requested without any usable sequences.
    #[error("no training data supplied")]
    NoTrainingData,

    /// A training configuration value is out of range.
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Kagero operations.
pub type Result<T> = std::result::Result<T, KageroError>;
