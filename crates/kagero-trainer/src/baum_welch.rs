//! # Baum–Welch Refinement
//!
//! Expectation-maximisation over unlabelled sequences. Each sequence
//! contributes an [`Accumulator`] of expected transition and emission counts
//! (log space, normalised by the sequence's own probability); accumulators are
//! merged with `log_add` and the merged totals re-estimate the parameters.
//!
//! While training, the model's distributions live in owned
//! [`MutableProbDist`]s over the trainer's alphabets. They are boxed back
//! into a read-only [`HiddenMarkovModel`] when refinement ends.

use kagero_core::hmm::{EmissionDist, HiddenMarkovModel, LogMatrix, TransitionDist, Trellis};
use kagero_core::logspace::{LOG_ZERO, log_add_pair};
use kagero_core::prob::{BoxedProbDist, ConditionalProbDist, MutableProbDist, UniformProbDist};
use kagero_core::types::{Alphabet, Identifier, Token};
use kagero_core::{KageroError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{BaumWelchConfig, PriorPolicy};
use crate::trainer::HiddenMarkovModelTrainer;

/// Summary of a Baum–Welch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Iterations performed
    pub iterations: usize,
    /// Whether the log-probability change fell below the threshold
    pub converged: bool,
    /// Training-set log-probability before the final update
    pub log_likelihood: f64,
    /// Training-set log-probability before each update, oldest first
    pub history: Vec<f64>,
}

/// Refined model plus how refinement went.
#[derive(Debug)]
pub struct TrainingOutcome<S: Identifier, O: Identifier> {
    pub model: HiddenMarkovModel<S, O>,
    pub report: TrainingReport,
}

/// Expected-count sums for one iteration, in log space.
///
/// Numerators and denominators already have the owning sequences'
/// log-probabilities subtracted, so two accumulators combine by
/// element-wise `log_add` regardless of order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Accumulator {
    n_states: usize,
    n_symbols: usize,
    /// `[from * N + to]`
    transition_numer: Vec<f64>,
    transition_denom: Vec<f64>,
    /// `[state * M + symbol]`
    emission_numer: Vec<f64>,
    emission_denom: Vec<f64>,
    /// First-state occupancy, summed over sequences
    prior_numer: Vec<f64>,
    log_probability: f64,
    sequences: usize,
}

impl Accumulator {
    /// Identity element of [`merge`](Self::merge).
    pub(crate) fn empty(n_states: usize, n_symbols: usize) -> Self {
        Self {
            n_states,
            n_symbols,
            transition_numer: vec![LOG_ZERO; n_states * n_states],
            transition_denom: vec![LOG_ZERO; n_states],
            emission_numer: vec![LOG_ZERO; n_states * n_symbols],
            emission_denom: vec![LOG_ZERO; n_states],
            prior_numer: vec![LOG_ZERO; n_states],
            log_probability: 0.0,
            sequences: 0,
        }
    }

    /// Expected counts for one sequence of symbol indices.
    pub(crate) fn from_sequence(trellis: &Trellis, symbols: &[usize], n_symbols: usize) -> Self {
        let n = trellis.n_states();
        let t_len = trellis.len();
        let mut acc = Self::empty(n, n_symbols);
        if t_len == 0 {
            return acc;
        }

        let alpha = trellis.forward();
        let beta = trellis.backward();
        let lpk = kagero_core::hmm::log_likelihood(&alpha);

        for (t, &symbol) in symbols.iter().enumerate() {
            for i in 0..n {
                let occupancy = alpha[(t, i)] + beta[(t, i)];
                if t < t_len - 1 {
                    for j in 0..n {
                        let idx = i * n + j;
                        acc.transition_numer[idx] = log_add_pair(
                            acc.transition_numer[idx],
                            alpha[(t, i)]
                                + trellis.log_transition(i, j)
                                + trellis.log_emission(t + 1, j)
                                + beta[(t + 1, j)],
                        );
                    }
                    acc.transition_denom[i] = log_add_pair(acc.transition_denom[i], occupancy);
                } else {
                    // Final step: the emission denominator extends the
                    // transition denominator summed over t < T-1.
                    acc.emission_denom[i] = log_add_pair(acc.transition_denom[i], occupancy);
                }
                let idx = i * n_symbols + symbol;
                acc.emission_numer[idx] = log_add_pair(acc.emission_numer[idx], occupancy);
            }
        }

        for i in 0..n {
            acc.prior_numer[i] = alpha[(0, i)] + beta[(0, i)];
        }

        for v in acc
            .transition_numer
            .iter_mut()
            .chain(acc.transition_denom.iter_mut())
            .chain(acc.emission_numer.iter_mut())
            .chain(acc.emission_denom.iter_mut())
            .chain(acc.prior_numer.iter_mut())
        {
            *v -= lpk;
        }
        acc.log_probability = lpk;
        acc.sequences = 1;
        acc
    }

    /// Combines two accumulators of the same shape.
    pub(crate) fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.n_states, other.n_states);
        debug_assert_eq!(self.n_symbols, other.n_symbols);
        let pairs = [
            (&mut self.transition_numer, &other.transition_numer),
            (&mut self.transition_denom, &other.transition_denom),
            (&mut self.emission_numer, &other.emission_numer),
            (&mut self.emission_denom, &other.emission_denom),
            (&mut self.prior_numer, &other.prior_numer),
        ];
        for (mine, theirs) in pairs {
            for (a, &b) in mine.iter_mut().zip(theirs) {
                *a = log_add_pair(*a, b);
            }
        }
        self.log_probability += other.log_probability;
        self.sequences += other.sequences;
        self
    }

    pub(crate) fn log_probability(&self) -> f64 {
        self.log_probability
    }
}

/// Parameters under refinement, one mutable row per state.
struct WorkingModel<S: Identifier, O: Identifier> {
    states: Alphabet<S>,
    symbols: Alphabet<O>,
    priors: MutableProbDist<S>,
    transitions: ConditionalProbDist<S, MutableProbDist<S>>,
    emissions: ConditionalProbDist<S, MutableProbDist<O>>,
}

impl<S: Identifier, O: Identifier> WorkingModel<S, O> {
    /// Copies the seed's distributions onto the given alphabets. Rows the
    /// seed does not define start at zero mass.
    fn from_model(
        seed: &HiddenMarkovModel<S, O>,
        states: Alphabet<S>,
        symbols: Alphabet<O>,
    ) -> Self {
        let priors = MutableProbDist::new(seed.priors(), &states);
        let transitions = states
            .iter()
            .map(|s| {
                let row = match seed.transitions().get(s) {
                    Some(dist) => MutableProbDist::new(dist, &states),
                    None => MutableProbDist::zeros(&states),
                };
                (s.clone(), row)
            })
            .collect();
        let emissions = states
            .iter()
            .map(|s| {
                let row = match seed.emissions().get(s) {
                    Some(dist) => MutableProbDist::new(dist, &symbols),
                    None => MutableProbDist::zeros(&symbols),
                };
                (s.clone(), row)
            })
            .collect();
        Self {
            states,
            symbols,
            priors,
            transitions,
            emissions,
        }
    }

    fn uniform(states: Alphabet<S>, symbols: Alphabet<O>) -> Self {
        let over_states = UniformProbDist::new(states.iter().cloned());
        let over_symbols = UniformProbDist::new(symbols.iter().cloned());
        let priors = MutableProbDist::new(&over_states, &states);
        let transitions = states
            .iter()
            .map(|s| (s.clone(), MutableProbDist::new(&over_states, &states)))
            .collect();
        let emissions = states
            .iter()
            .map(|s| (s.clone(), MutableProbDist::new(&over_symbols, &symbols)))
            .collect();
        Self {
            states,
            symbols,
            priors,
            transitions,
            emissions,
        }
    }

    /// Dense copy of the current parameters.
    fn snapshot(&self) -> Snapshot {
        let n = self.states.len();
        let m = self.symbols.len();
        let mut log_transitions = Vec::with_capacity(n * n);
        let mut log_emissions = Vec::with_capacity(n * m);
        for s in &self.states {
            match self.transitions.get(s) {
                Some(row) => log_transitions.extend_from_slice(row.log_probs()),
                None => log_transitions.extend(std::iter::repeat_n(LOG_ZERO, n)),
            }
            match self.emissions.get(s) {
                Some(row) => log_emissions.extend_from_slice(row.log_probs()),
                None => log_emissions.extend(std::iter::repeat_n(LOG_ZERO, m)),
            }
        }
        Snapshot {
            n_symbols: m,
            log_priors: self.priors.log_probs().to_vec(),
            log_transitions,
            log_emissions,
        }
    }

    /// Re-estimates every row as numerator minus denominator.
    fn reestimate(&mut self, acc: &Accumulator, policy: PriorPolicy) {
        let n = self.states.len();
        let m = self.symbols.len();
        for (i, state) in self.states.iter().enumerate() {
            if let Some(row) = self.transitions.get_mut(state) {
                for j in 0..n {
                    row.update_index(j, acc.transition_numer[i * n + j] - acc.transition_denom[i]);
                }
            }
            if let Some(row) = self.emissions.get_mut(state) {
                for k in 0..m {
                    row.update_index(k, acc.emission_numer[i * m + k] - acc.emission_denom[i]);
                }
            }
        }

        if policy == PriorPolicy::Reestimate && acc.sequences > 0 {
            let log_count = (acc.sequences as f64).ln();
            for i in 0..n {
                self.priors.update_index(i, acc.prior_numer[i] - log_count);
            }
        }
    }

    fn into_model(self) -> HiddenMarkovModel<S, O> {
        let transitions: TransitionDist<S> = self
            .transitions
            .into_iter()
            .map(|(s, d)| (s, Box::new(d) as BoxedProbDist<S>))
            .collect();
        let emissions: EmissionDist<S, O> = self
            .emissions
            .into_iter()
            .map(|(s, d)| (s, Box::new(d) as BoxedProbDist<O>))
            .collect();
        HiddenMarkovModel::new(
            self.symbols,
            self.states,
            transitions,
            emissions,
            Box::new(self.priors),
        )
    }
}

/// Parameters flattened for trellis construction.
struct Snapshot {
    n_symbols: usize,
    log_priors: Vec<f64>,
    log_transitions: Vec<f64>,
    /// `[state * M + symbol]`
    log_emissions: Vec<f64>,
}

impl Snapshot {
    fn trellis(&self, sequence: &[usize]) -> Trellis {
        let n = self.log_priors.len();
        let mut emissions = LogMatrix::new(sequence.len(), n, LOG_ZERO);
        for (t, &symbol) in sequence.iter().enumerate() {
            for i in 0..n {
                emissions[(t, i)] = self.log_emissions[i * self.n_symbols + symbol];
            }
        }
        Trellis::new(self.log_priors.clone(), self.log_transitions.clone(), emissions)
    }
}

impl<S: Identifier, O: Identifier> HiddenMarkovModelTrainer<S, O> {
    /// Refines a model on unlabelled sequences with Baum–Welch EM.
    ///
    /// Starts from `seed` if given, else from uniform parameters over the
    /// trainer's alphabets. An empty trainer alphabet is taken from the seed;
    /// without a seed, unseen symbols are added from the data. State labels
    /// in the sequences are ignored and empty sequences are skipped.
    ///
    /// Each iteration records the training-set log-probability under the
    /// current parameters and then updates them. Refinement stops once that
    /// value moves by less than `config.convergence_threshold` between
    /// iterations, or after `config.max_iterations`.
    ///
    /// # Errors
    /// - [`KageroError::InvalidConfig`] for an out-of-range configuration
    /// - [`KageroError::NoTrainingData`] if every sequence is empty
    /// - [`KageroError::EmptyStateSpace`] if no states are known
    /// - [`KageroError::UnknownSymbol`] for a symbol outside the alphabet
    pub fn train_unsupervised<Q>(
        &mut self,
        unlabelled_sequences: &[Q],
        seed: Option<HiddenMarkovModel<S, O>>,
        config: &BaumWelchConfig,
    ) -> Result<TrainingOutcome<S, O>>
    where
        Q: AsRef<[Token<S, O>]>,
    {
        config.validate()?;

        let sequences: Vec<&[Token<S, O>]> = unlabelled_sequences
            .iter()
            .map(|seq| seq.as_ref())
            .filter(|seq| !seq.is_empty())
            .collect();
        if sequences.is_empty() {
            return Err(KageroError::NoTrainingData);
        }

        let mut state_builder = self.states.clone();
        let mut symbol_builder = self.symbols.clone();
        if let Some(model) = &seed {
            if state_builder.is_empty() {
                state_builder.extend(model.states().iter().cloned());
            }
            if symbol_builder.is_empty() {
                symbol_builder.extend(model.symbols().iter().cloned());
            }
        } else {
            for token in sequences.iter().flat_map(|seq| seq.iter()) {
                symbol_builder.insert(token.symbol.clone());
            }
        }
        if state_builder.is_empty() {
            return Err(KageroError::EmptyStateSpace);
        }

        let states = state_builder.build();
        let symbols = symbol_builder.build();
        let encoded = sequences
            .iter()
            .map(|seq| {
                seq.iter()
                    .map(|token| {
                        symbols.index_of(&token.symbol).ok_or_else(|| {
                            KageroError::UnknownSymbol(format!("{:?}", token.symbol))
                        })
                    })
                    .collect::<Result<Vec<usize>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        self.states = state_builder;
        self.symbols = symbol_builder;

        let (n, m) = (states.len(), symbols.len());
        let mut working = match seed {
            Some(model) => WorkingModel::from_model(&model, states, symbols),
            None => WorkingModel::uniform(states, symbols),
        };

        debug!(
            sequences = encoded.len(),
            states = n,
            symbols = m,
            max_iterations = config.max_iterations,
            "starting baum-welch"
        );

        let mut history = Vec::new();
        let mut converged = false;
        let mut iteration = 0;
        let mut last_logprob = 0.0;

        while !converged && iteration < config.max_iterations {
            let snapshot = working.snapshot();
            let totals = encoded
                .iter()
                .map(|seq| Accumulator::from_sequence(&snapshot.trellis(seq), seq, m))
                .fold(Accumulator::empty(n, m), Accumulator::merge);
            let logprob = totals.log_probability();

            working.reestimate(&totals, config.prior_policy);

            if iteration > 0 && (logprob - last_logprob).abs() < config.convergence_threshold {
                converged = true;
            }
            info!(iteration, log_probability = logprob, "baum-welch iteration");

            history.push(logprob);
            iteration += 1;
            last_logprob = logprob;
        }

        let report = TrainingReport {
            iterations: iteration,
            converged,
            log_likelihood: last_logprob,
            history,
        };
        debug!(
            iterations = report.iterations,
            converged = report.converged,
            "baum-welch finished"
        );

        Ok(TrainingOutcome {
            model: working.into_model(),
            report,
        })
    }
}
