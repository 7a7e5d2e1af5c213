//! Tagging accuracy against gold-labelled sequences.

use kagero_core::hmm::HiddenMarkovModel;
use kagero_core::types::{Identifier, Token, strip_labels};
use kagero_core::Result;
use serde::Serialize;
use tracing::debug;

/// Token-level tagging accuracy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub sequences: usize,
    pub tokens: usize,
    pub correct: usize,
    /// `correct / tokens`, or `0.0` when there are no tokens
    pub accuracy: f64,
}

/// Tags each gold sequence with `model` and counts matching states.
pub fn accuracy<S, O, Q>(model: &HiddenMarkovModel<S, O>, gold: &[Q]) -> Result<AccuracyReport>
where
    S: Identifier,
    O: Identifier,
    Q: AsRef<[Token<S, O>]>,
{
    let mut tokens = 0;
    let mut correct = 0;

    for sequence in gold {
        let sequence = sequence.as_ref();
        let predicted = model.best_path(&strip_labels(sequence))?;
        for (token, state) in sequence.iter().zip(&predicted) {
            tokens += 1;
            if token.state.as_ref() == Some(state) {
                correct += 1;
            }
        }
    }

    let accuracy = if tokens > 0 {
        correct as f64 / tokens as f64
    } else {
        0.0
    };
    debug!(tokens, correct, accuracy, "evaluated tagger");

    Ok(AccuracyReport {
        sequences: gold.len(),
        tokens,
        correct,
        accuracy,
    })
}
