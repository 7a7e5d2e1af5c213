//! # Hidden Markov Model
//!
//! The model is parameterised by:
//! - the output symbol alphabet,
//! - the set of hidden states,
//! - transition probabilities `a_ij = P(s_t = j | s_{t-1} = i)`,
//! - output probabilities `b_i(k) = P(o_t = k | s_t = i)`,
//! - the initial state distribution `π_i = P(s_0 = i)`.
//!
//! Every query works in log space. Each call builds a [`Trellis`] for the
//! sequence so the distributions are consulted once per (time, state) cell
//! rather than once per path.

use std::fmt;

use tracing::debug;

use super::matrix::LogMatrix;
use super::trellis::{self, Trellis};
use super::viterbi::ViterbiDecoder;
use crate::error::{KageroError, Result};
use crate::prob::{BoxedProbDist, ConditionalProbDist, ProbDist};
use crate::types::{Alphabet, Identifier, Token};

/// Per-source-state distributions over next states.
pub type TransitionDist<S> = ConditionalProbDist<S, BoxedProbDist<S>>;

/// Per-state distributions over output symbols.
pub type EmissionDist<S, O> = ConditionalProbDist<S, BoxedProbDist<O>>;

/// A discrete first-order hidden Markov model over states `S` and symbols `O`.
#[derive(Debug)]
pub struct HiddenMarkovModel<S: Identifier, O: Identifier> {
    symbols: Alphabet<O>,
    states: Alphabet<S>,
    transitions: TransitionDist<S>,
    emissions: EmissionDist<S, O>,
    priors: BoxedProbDist<S>,
}

impl<S: Identifier, O: Identifier> HiddenMarkovModel<S, O> {
    /// Creates a model from its five parameters.
    ///
    /// No validation is performed; see [`validate`](Self::validate) for an
    /// opt-in check that every distribution is normalised.
    pub fn new(
        symbols: impl IntoIterator<Item = O>,
        states: impl IntoIterator<Item = S>,
        transitions: TransitionDist<S>,
        emissions: EmissionDist<S, O>,
        priors: BoxedProbDist<S>,
    ) -> Self {
        Self {
            symbols: Alphabet::new(symbols),
            states: Alphabet::new(states),
            transitions,
            emissions,
            priors,
        }
    }

    pub fn states(&self) -> &Alphabet<S> {
        &self.states
    }

    pub fn symbols(&self) -> &Alphabet<O> {
        &self.symbols
    }

    pub fn priors(&self) -> &dyn ProbDist<S> {
        self.priors.as_ref()
    }

    pub fn transitions(&self) -> &TransitionDist<S> {
        &self.transitions
    }

    pub fn emissions(&self) -> &EmissionDist<S, O> {
        &self.emissions
    }

    /// `log P(s_0 = state)`.
    pub fn log_prior(&self, state: &S) -> f64 {
        self.priors.log_prob(state)
    }

    /// `log P(s_t = to | s_{t-1} = from)`.
    pub fn log_transition(&self, from: &S, to: &S) -> f64 {
        self.transitions.log_prob(from, to)
    }

    /// `log P(o_t = symbol | s_t = state)`.
    pub fn log_emission(&self, state: &S, symbol: &O) -> f64 {
        self.emissions.log_prob(state, symbol)
    }

    /// Dense log-space view of `sequence` under this model. State labels in
    /// the sequence are ignored.
    pub fn trellis(&self, sequence: &[Token<S, O>]) -> Trellis {
        let n = self.states.len();
        let log_priors = self.states.iter().map(|s| self.log_prior(s)).collect();

        let mut log_transitions = Vec::with_capacity(n * n);
        for from in &self.states {
            for to in &self.states {
                log_transitions.push(self.log_transition(from, to));
            }
        }

        let mut log_emissions = LogMatrix::new(sequence.len(), n, 0.0);
        for (t, token) in sequence.iter().enumerate() {
            for (i, state) in self.states.iter().enumerate() {
                log_emissions[(t, i)] = self.log_emission(state, &token.symbol);
            }
        }

        Trellis::new(log_priors, log_transitions, log_emissions)
    }

    /// Log-probability of `sequence`.
    ///
    /// If the sequence is labelled (its first token carries a state), this is
    /// the joint log-probability of the symbols and that state path.
    /// Otherwise the forward algorithm sums over every state path.
    /// An empty sequence has log-probability `0.0`.
    ///
    /// # Errors
    /// [`KageroError::MissingLabel`] if a labelled sequence has an
    /// unlabelled token after the first, [`KageroError::UnknownState`] if a
    /// label is not one of the model's states.
    pub fn log_probability(&self, sequence: &[Token<S, O>]) -> Result<f64> {
        match sequence.first() {
            Some(Token {
                state: Some(first_state),
                symbol,
            }) => {
                self.check_state(first_state)?;
                let mut p = self.log_prior(first_state) + self.log_emission(first_state, symbol);
                let mut last_state = first_state;
                for (t, token) in sequence.iter().enumerate().skip(1) {
                    let state = token.state.as_ref().ok_or(KageroError::MissingLabel {
                        sequence: 0,
                        position: t,
                    })?;
                    self.check_state(state)?;
                    p += self.log_transition(last_state, state)
                        + self.log_emission(state, &token.symbol);
                    last_state = state;
                }
                Ok(p)
            }
            _ => Ok(trellis::log_likelihood(&self.forward_probability(sequence))),
        }
    }

    fn check_state(&self, state: &S) -> Result<()> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(KageroError::UnknownState(format!("{state:?}")))
        }
    }

    /// Probability of `sequence`; see [`log_probability`](Self::log_probability).
    ///
    /// Long sequences legitimately underflow to `0.0`; use the log-domain
    /// entry point when precision matters.
    pub fn probability(&self, sequence: &[Token<S, O>]) -> Result<f64> {
        Ok(self.log_probability(sequence)?.exp())
    }

    /// Forward lattice α (T×N): `α[t, i] = log P(o_0..o_t, s_t = i)`.
    pub fn forward_probability(&self, sequence: &[Token<S, O>]) -> LogMatrix {
        self.trellis(sequence).forward()
    }

    /// Backward lattice β (T×N): `β[t, i] = log P(o_{t+1}..o_{T-1} | s_t = i)`.
    pub fn backward_probability(&self, sequence: &[Token<S, O>]) -> LogMatrix {
        self.trellis(sequence).backward()
    }

    /// Marginal state posteriors `log P(s_t = i | O)` (T×N).
    pub fn posterior(&self, sequence: &[Token<S, O>]) -> LogMatrix {
        let trellis = self.trellis(sequence);
        let alpha = trellis.forward();
        let beta = trellis.backward();
        let normalisation = trellis::log_likelihood(&alpha);

        let mut gamma = LogMatrix::new(trellis.len(), trellis.n_states(), 0.0);
        for t in 0..trellis.len() {
            for i in 0..trellis.n_states() {
                gamma[(t, i)] = alpha[(t, i)] + beta[(t, i)] - normalisation;
            }
        }
        gamma
    }

    /// Most probable state path (Viterbi). State labels in `sequence` are
    /// ignored; an empty sequence yields an empty path.
    pub fn best_path(&self, sequence: &[Token<S, O>]) -> Result<Vec<S>> {
        Ok(self.best_path_with_score(sequence)?.0)
    }

    /// Like [`best_path`](Self::best_path), also returning the path's joint
    /// log-probability.
    pub fn best_path_with_score(&self, sequence: &[Token<S, O>]) -> Result<(Vec<S>, f64)> {
        let trellis = self.trellis(sequence);
        let (indices, score) = ViterbiDecoder::new(self.states.len()).decode(&trellis)?;
        let path = indices.into_iter().map(|i| self.states[i].clone()).collect();
        Ok((path, score))
    }

    /// Returns a copy of `sequence` labelled with the Viterbi path.
    pub fn tag(&self, sequence: &[Token<S, O>]) -> Result<Vec<Token<S, O>>> {
        let path = self.best_path(sequence)?;
        Ok(sequence
            .iter()
            .zip(path)
            .map(|(token, state)| Token::labelled(token.symbol.clone(), state))
            .collect())
    }

    /// Checks that the priors, every transition row and every emission row
    /// sum to one within `tolerance` over the model's alphabets.
    ///
    /// # Errors
    /// [`KageroError::MalformedDistribution`] naming the first offending
    /// distribution.
    pub fn validate(&self, tolerance: f64) -> Result<()> {
        check_mass(
            "priors".to_string(),
            self.states.iter().map(|s| self.priors.prob(s)).sum(),
            tolerance,
        )?;
        for from in &self.states {
            check_mass(
                format!("transitions from {from:?}"),
                self.states
                    .iter()
                    .map(|to| self.transitions.prob(from, to))
                    .sum(),
                tolerance,
            )?;
        }
        for state in &self.states {
            check_mass(
                format!("emissions of {state:?}"),
                self.symbols
                    .iter()
                    .map(|o| self.emissions.prob(state, o))
                    .sum(),
                tolerance,
            )?;
        }
        debug!(
            states = self.states.len(),
            symbols = self.symbols.len(),
            "model distributions validated"
        );
        Ok(())
    }
}

fn check_mass(context: String, total: f64, tolerance: f64) -> Result<()> {
    if (total - 1.0).abs() > tolerance {
        return Err(KageroError::MalformedDistribution {
            context,
            reason: format!("masses sum to {total}"),
        });
    }
    Ok(())
}

impl<S: Identifier, O: Identifier> fmt::Display for HiddenMarkovModel<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<HiddenMarkovModel {} states and {} output symbols>",
            self.states.len(),
            self.symbols.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::test_models::{labelled, market_model, unlabelled};
    use crate::logspace::log_add;

    #[test]
    fn test_market_probability_up_up() {
        let model = market_model();
        let p = model.probability(&unlabelled(&["up", "up"])).unwrap();
        assert!((p - 0.2234).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn test_market_best_path_up_up() {
        let model = market_model();
        let path = model.best_path(&unlabelled(&["up", "up"])).unwrap();
        assert_eq!(path, vec!["bull", "bull"]);
    }

    #[test]
    fn test_labelled_probability() {
        let model = market_model();
        let seq = labelled(&[("up", "bull"), ("down", "bear")]);
        // 0.5 * 0.7 * 0.2 * 0.6
        let p = model.probability(&seq).unwrap();
        assert!((p - 0.042).abs() < 1e-12);
    }

    #[test]
    fn test_labelled_matches_forward_restricted_to_path() {
        let model = market_model();
        let seq = labelled(&[("up", "bull"), ("unchanged", "static"), ("down", "bear")]);
        let trellis = model.trellis(&seq);
        let path: Vec<usize> = seq
            .iter()
            .map(|t| model.states().index_of(t.state.as_ref().unwrap()).unwrap())
            .collect();

        let joint = model.log_probability(&seq).unwrap();
        assert!((joint - trellis.path_log_probability(&path)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_label_after_first() {
        let model = market_model();
        let seq = vec![Token::labelled("up", "bull"), Token::unlabelled("down")];
        assert!(matches!(
            model.log_probability(&seq),
            Err(KageroError::MissingLabel {
                sequence: 0,
                position: 1
            })
        ));
    }

    #[test]
    fn test_labelled_probability_rejects_unknown_state() {
        let model = market_model();
        let later = labelled(&[("up", "bull"), ("down", "crash")]);
        let err = model.log_probability(&later).unwrap_err();
        assert!(matches!(&err, KageroError::UnknownState(s) if s.contains("crash")));

        let first = labelled(&[("up", "crash")]);
        assert!(matches!(
            model.probability(&first),
            Err(KageroError::UnknownState(_))
        ));
    }

    #[test]
    fn test_best_path_matches_brute_force() {
        let model = market_model();
        let symbols = ["down", "unchanged", "up", "down"];
        let trellis = model.trellis(&unlabelled(&symbols));

        let n = model.states().len();
        let mut best: Option<(f64, Vec<usize>)> = None;
        for code in 0..n.pow(symbols.len() as u32) {
            let path: Vec<usize> = (0..symbols.len())
                .map(|t| code / n.pow((symbols.len() - 1 - t) as u32) % n)
                .collect();
            let lp = trellis.path_log_probability(&path);
            if best.as_ref().is_none_or(|(b, _)| lp > *b) {
                best = Some((lp, path));
            }
        }
        let (best_lp, best_indices) = best.unwrap();

        let (path, score) = model.best_path_with_score(&unlabelled(&symbols)).unwrap();
        let expected: Vec<&str> = best_indices.iter().map(|&i| model.states()[i]).collect();
        assert_eq!(path, expected);
        assert!((score - best_lp).abs() < 1e-12);
    }

    #[test]
    fn test_forward_backward_consistency() {
        let model = market_model();
        let seq = unlabelled(&["unchanged", "unchanged", "down", "up", "up", "down"]);
        let alpha = model.forward_probability(&seq);
        let beta = model.backward_probability(&seq);
        let total = alpha.row_log_sum(alpha.rows() - 1);

        for t in 0..seq.len() {
            let terms: Vec<f64> = (0..3).map(|i| alpha[(t, i)] + beta[(t, i)]).collect();
            assert!((log_add(&terms) - total).abs() < 1e-10, "mismatch at t={t}");
        }
    }

    #[test]
    fn test_posterior_rows_sum_to_one() {
        let model = market_model();
        let gamma = model.posterior(&unlabelled(&["up", "down", "down"]));
        for row in gamma.iter_rows() {
            assert!(log_add(row).abs() < 1e-10);
        }
    }

    #[test]
    fn test_tag_replaces_labels() {
        let model = market_model();
        let seq = labelled(&[("up", "bear"), ("up", "static")]);
        let tagged = model.tag(&seq).unwrap();
        assert_eq!(tagged, labelled(&[("up", "bull"), ("up", "bull")]));
    }

    #[test]
    fn test_empty_sequence() {
        let model = market_model();
        let empty = unlabelled(&[]);
        assert_eq!(model.log_probability(&empty).unwrap(), 0.0);
        assert_eq!(model.probability(&empty).unwrap(), 1.0);
        assert!(model.best_path(&empty).unwrap().is_empty());
        assert!(model.tag(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_long_sequence_underflows_probability_only() {
        let model = market_model();
        let symbols: Vec<&str> = ["up", "down", "unchanged"]
            .iter()
            .cycle()
            .take(1500)
            .copied()
            .collect();
        let seq = unlabelled(&symbols);
        assert_eq!(model.probability(&seq).unwrap(), 0.0);
        let lp = model.log_probability(&seq).unwrap();
        assert!(lp.is_finite() && lp < -1000.0);
    }

    #[test]
    fn test_validate() {
        assert!(market_model().validate(1e-9).is_ok());
    }

    #[test]
    fn test_validate_rejects_unnormalised_rows() {
        use crate::prob::DictionaryProbDist;

        let model = market_model();
        let mut transitions = TransitionDist::new();
        for s in model.states() {
            transitions.insert(
                *s,
                Box::new(DictionaryProbDist::new([("bull", 0.5), ("bear", 0.1)]))
                    as BoxedProbDist<&str>,
            );
        }
        let broken = HiddenMarkovModel::new(
            model.symbols().iter().copied(),
            model.states().iter().copied(),
            transitions,
            EmissionDist::new(),
            Box::new(DictionaryProbDist::new([("bull", 1.0)])) as BoxedProbDist<&str>,
        );

        let err = broken.validate(1e-6).unwrap_err();
        assert!(err.to_string().contains("transitions from \"bull\""));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            market_model().to_string(),
            "<HiddenMarkovModel 3 states and 3 output symbols>"
        );
    }
}
