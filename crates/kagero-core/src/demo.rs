//! Stock market regime model.
//!
//! Three hidden regimes (`bull`, `bear`, `static`) emit daily price
//! movements (`up`, `down`, `unchanged`). Used by the trainer's `market`
//! command, the benches and the tests.

use crate::hmm::{EmissionDist, HiddenMarkovModel, TransitionDist};
use crate::prob::{BoxedProbDist, DictionaryProbDist};

pub const MARKET_STATES: [&str; 3] = ["bull", "bear", "static"];
pub const MARKET_SYMBOLS: [&str; 3] = ["up", "down", "unchanged"];

const TRANSITIONS: [[f64; 3]; 3] = [[0.6, 0.2, 0.2], [0.5, 0.3, 0.2], [0.4, 0.1, 0.5]];
const EMISSIONS: [[f64; 3]; 3] = [[0.7, 0.1, 0.2], [0.1, 0.6, 0.3], [0.3, 0.3, 0.4]];
const PRIORS: [f64; 3] = [0.5, 0.2, 0.3];

fn row(events: [&'static str; 3], probs: [f64; 3]) -> BoxedProbDist<&'static str> {
    Box::new(DictionaryProbDist::new(events.into_iter().zip(probs)))
}

pub fn market_model() -> HiddenMarkovModel<&'static str, &'static str> {
    let transitions: TransitionDist<&str> = MARKET_STATES
        .into_iter()
        .zip(TRANSITIONS)
        .map(|(state, probs)| (state, row(MARKET_STATES, probs)))
        .collect();
    let emissions: EmissionDist<&str, &str> = MARKET_STATES
        .into_iter()
        .zip(EMISSIONS)
        .map(|(state, probs)| (state, row(MARKET_SYMBOLS, probs)))
        .collect();

    HiddenMarkovModel::new(
        MARKET_SYMBOLS,
        MARKET_STATES,
        transitions,
        emissions,
        row(MARKET_STATES, PRIORS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_model_is_normalised() {
        assert!(market_model().validate(1e-12).is_ok());
    }
}
