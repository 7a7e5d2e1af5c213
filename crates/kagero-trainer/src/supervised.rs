//! Supervised estimation from labelled sequences.

use kagero_core::hmm::{EmissionDist, HiddenMarkovModel, TransitionDist};
use kagero_core::prob::{ConditionalFreqDist, Estimator, FreqDist};
use kagero_core::types::{Identifier, Token};
use kagero_core::{KageroError, Result};
use tracing::debug;

use crate::trainer::HiddenMarkovModelTrainer;

impl<S: Identifier, O: Identifier> HiddenMarkovModelTrainer<S, O> {
    /// Estimates a model by counting over fully labelled sequences.
    ///
    /// Start states, adjacent state pairs and (state, symbol) pairs are
    /// counted in one pass, and each table is turned into a distribution by
    /// `estimator`. Unseen states and symbols are added to the trainer's
    /// alphabets in first-seen order once the whole input has been read; a
    /// failed call leaves the alphabets as they were. States never observed as a transition
    /// source or emitter get `estimator` applied to an empty table.
    ///
    /// # Errors
    /// [`KageroError::MissingLabel`] if any token lacks a state.
    pub fn train_supervised<Q, E>(
        &mut self,
        labelled_sequences: &[Q],
        estimator: &E,
    ) -> Result<HiddenMarkovModel<S, O>>
    where
        Q: AsRef<[Token<S, O>]>,
        E: Estimator,
    {
        let mut starting = FreqDist::new();
        let mut transitions = ConditionalFreqDist::new();
        let mut outputs = ConditionalFreqDist::new();
        let mut state_builder = self.states.clone();
        let mut symbol_builder = self.symbols.clone();

        for (index, sequence) in labelled_sequences.iter().enumerate() {
            let mut last_state: Option<&S> = None;
            for (position, token) in sequence.as_ref().iter().enumerate() {
                let state = token.state.as_ref().ok_or(KageroError::MissingLabel {
                    sequence: index,
                    position,
                })?;

                match last_state {
                    None => starting.inc(state.clone()),
                    Some(previous) => transitions.entry(previous.clone()).inc(state.clone()),
                }
                outputs.entry(state.clone()).inc(token.symbol.clone());

                state_builder.insert(state.clone());
                symbol_builder.insert(token.symbol.clone());
                last_state = Some(state);
            }
        }

        let states = state_builder.build();
        let symbols = symbol_builder.build();
        self.states = state_builder;
        self.symbols = symbol_builder;
        let (n, m) = (states.len(), symbols.len());
        let empty_states = FreqDist::new();
        let empty_symbols = FreqDist::new();

        let transition_dists: TransitionDist<S> = states
            .iter()
            .map(|s| {
                let counts = transitions.get(s).unwrap_or(&empty_states);
                (s.clone(), estimator.estimate(counts, n))
            })
            .collect();
        let emission_dists: EmissionDist<S, O> = states
            .iter()
            .map(|s| {
                let counts = outputs.get(s).unwrap_or(&empty_symbols);
                (s.clone(), estimator.estimate(counts, m))
            })
            .collect();
        let priors = estimator.estimate(&starting, n);

        debug!(
            sequences = labelled_sequences.len(),
            tokens = outputs.total(),
            states = n,
            symbols = m,
            "supervised estimation complete"
        );

        Ok(HiddenMarkovModel::new(
            symbols,
            states,
            transition_dists,
            emission_dists,
            priors,
        ))
    }
}
