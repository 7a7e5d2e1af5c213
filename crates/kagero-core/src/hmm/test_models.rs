//! Fixture models shared by the engine's unit tests.

use super::model::{EmissionDist, HiddenMarkovModel, TransitionDist};
use crate::prob::{BoxedProbDist, DictionaryProbDist};
use crate::types::{Identifier, Token};

pub use crate::demo::market_model;

fn table<S: Identifier, O: Identifier>(
    rows: &[S],
    cols: &[O],
    values: &[&[f64]],
) -> Vec<(S, BoxedProbDist<O>)> {
    rows.iter()
        .zip(values)
        .map(|(row, probs)| {
            let dist = DictionaryProbDist::new(cols.iter().cloned().zip(probs.iter().copied()));
            (row.clone(), Box::new(dist) as BoxedProbDist<O>)
        })
        .collect()
}

/// Fair/loaded coin with sticky transitions.
pub fn coin_model() -> HiddenMarkovModel<&'static str, char> {
    let states = ["fair", "loaded"];
    let symbols = ['H', 'T'];

    let transitions: TransitionDist<&str> =
        table(&states, &states, &[&[0.9, 0.1], &[0.2, 0.8]])
            .into_iter()
            .collect();
    let emissions: EmissionDist<&str, char> =
        table(&states, &symbols, &[&[0.5, 0.5], &[0.8, 0.2]])
            .into_iter()
            .collect();
    let priors = DictionaryProbDist::new(states.into_iter().zip([0.6, 0.4]));

    HiddenMarkovModel::new(symbols, states, transitions, emissions, Box::new(priors))
}

pub fn unlabelled<S, O: Clone>(symbols: &[O]) -> Vec<Token<S, O>> {
    symbols.iter().cloned().map(Token::unlabelled).collect()
}

/// Builds a labelled sequence from `(symbol, state)` pairs.
pub fn labelled<S: Clone, O: Clone>(pairs: &[(O, S)]) -> Vec<Token<S, O>> {
    pairs
        .iter()
        .map(|(symbol, state)| Token::labelled(symbol.clone(), state.clone()))
        .collect()
}
