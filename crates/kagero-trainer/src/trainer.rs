//! Entry point for building models from data.

use kagero_core::hmm::HiddenMarkovModel;
use kagero_core::prob::Estimator;
use kagero_core::types::{AlphabetBuilder, Identifier, Token};
use kagero_core::{KageroError, Result};
use tracing::debug;

use crate::baum_welch::TrainingReport;
use crate::config::BaumWelchConfig;

/// Builds [`HiddenMarkovModel`]s from labelled and unlabelled sequences.
///
/// The trainer owns the state and symbol alphabets. They may be fixed up
/// front; otherwise they grow in first-seen order as training data is read.
#[derive(Debug, Clone)]
pub struct HiddenMarkovModelTrainer<S: Identifier, O: Identifier> {
    pub(crate) states: AlphabetBuilder<S>,
    pub(crate) symbols: AlphabetBuilder<O>,
}

impl<S: Identifier, O: Identifier> HiddenMarkovModelTrainer<S, O> {
    /// Create a trainer, optionally with known states and symbols.
    pub fn new(states: Option<Vec<S>>, symbols: Option<Vec<O>>) -> Self {
        let mut state_builder = AlphabetBuilder::new();
        state_builder.extend(states.unwrap_or_default());
        let mut symbol_builder = AlphabetBuilder::new();
        symbol_builder.extend(symbols.unwrap_or_default());
        Self {
            states: state_builder,
            symbols: symbol_builder,
        }
    }

    /// States known so far, in index order.
    pub fn states(&self) -> &[S] {
        self.states.as_slice()
    }

    /// Symbols known so far, in index order.
    pub fn symbols(&self) -> &[O] {
        self.symbols.as_slice()
    }

    /// Supervised estimation followed by Baum–Welch refinement.
    ///
    /// With labelled data only, returns the supervised model and no report.
    /// With unlabelled data only, refines from uniform parameters. With both,
    /// the supervised model seeds the refinement.
    ///
    /// If either stage fails the trainer's alphabets are restored to what
    /// they were before the call.
    ///
    /// # Errors
    /// [`KageroError::NoTrainingData`] if both collections are empty, plus
    /// anything the individual training stages report.
    pub fn train<E: Estimator>(
        &mut self,
        labelled: &[Vec<Token<S, O>>],
        unlabelled: &[Vec<Token<S, O>>],
        estimator: &E,
        config: &BaumWelchConfig,
    ) -> Result<(HiddenMarkovModel<S, O>, Option<TrainingReport>)> {
        if labelled.is_empty() && unlabelled.is_empty() {
            return Err(KageroError::NoTrainingData);
        }

        let (states, symbols) = (self.states.clone(), self.symbols.clone());
        let trained = self.train_stages(labelled, unlabelled, estimator, config);
        if trained.is_err() {
            self.states = states;
            self.symbols = symbols;
        }
        trained
    }

    fn train_stages<E: Estimator>(
        &mut self,
        labelled: &[Vec<Token<S, O>>],
        unlabelled: &[Vec<Token<S, O>>],
        estimator: &E,
        config: &BaumWelchConfig,
    ) -> Result<(HiddenMarkovModel<S, O>, Option<TrainingReport>)> {
        let seed = if labelled.is_empty() {
            None
        } else {
            Some(self.train_supervised(labelled, estimator)?)
        };

        if unlabelled.is_empty() {
            debug!("no unlabelled sequences, returning supervised model");
            return seed.map(|model| (model, None)).ok_or(KageroError::NoTrainingData);
        }

        let outcome = self.train_unsupervised(unlabelled, seed, config)?;
        Ok((outcome.model, Some(outcome.report)))
    }
}

impl<S: Identifier, O: Identifier> Default for HiddenMarkovModelTrainer<S, O> {
    fn default() -> Self {
        Self::new(None, None)
    }
}
