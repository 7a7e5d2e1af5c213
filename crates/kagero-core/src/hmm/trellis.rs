//! # Trellis
//!
//! Dense log-space view of one observation sequence under fixed parameters:
//! priors (N), transitions (N×N, `[from * N + to]`) and the emission score of
//! each observed symbol for each state (T×N). The forward, backward and
//! Viterbi recursions all run over this view, so they work the same whether
//! the parameters come from a finished model or from distributions being
//! re-estimated by the trainer.

use super::matrix::LogMatrix;
use crate::logspace::log_add;

#[derive(Debug, Clone)]
pub struct Trellis {
    n_states: usize,
    log_priors: Vec<f64>,
    log_transitions: Vec<f64>,
    log_emissions: LogMatrix,
}

impl Trellis {
    /// # Panics
    /// If the parameter shapes disagree on the number of states.
    pub fn new(log_priors: Vec<f64>, log_transitions: Vec<f64>, log_emissions: LogMatrix) -> Self {
        let n_states = log_priors.len();
        assert_eq!(log_transitions.len(), n_states * n_states);
        assert_eq!(log_emissions.cols(), n_states);
        Self {
            n_states,
            log_priors,
            log_transitions,
            log_emissions,
        }
    }

    /// Sequence length T.
    pub fn len(&self) -> usize {
        self.log_emissions.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of states N.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    #[inline]
    pub fn log_prior(&self, state: usize) -> f64 {
        self.log_priors[state]
    }

    #[inline]
    pub fn log_transition(&self, from: usize, to: usize) -> f64 {
        self.log_transitions[from * self.n_states + to]
    }

    #[inline]
    pub fn log_emission(&self, t: usize, state: usize) -> f64 {
        self.log_emissions[(t, state)]
    }

    /// Forward lattice: `α[t, i] = log P(o_0..o_t, s_t = i)`.
    pub fn forward(&self) -> LogMatrix {
        let n = self.n_states;
        let t_len = self.len();
        let mut alpha = LogMatrix::new(t_len, n, 0.0);
        if t_len == 0 {
            return alpha;
        }

        for i in 0..n {
            alpha[(0, i)] = self.log_priors[i] + self.log_emission(0, i);
        }

        let mut terms = vec![0.0; n];
        for t in 1..t_len {
            for i in 0..n {
                for (j, term) in terms.iter_mut().enumerate() {
                    *term = alpha[(t - 1, j)] + self.log_transition(j, i);
                }
                alpha[(t, i)] = log_add(&terms) + self.log_emission(t, i);
            }
        }

        alpha
    }

    /// Backward lattice: `β[t, i] = log P(o_{t+1}..o_{T-1} | s_t = i)`.
    pub fn backward(&self) -> LogMatrix {
        let n = self.n_states;
        let t_len = self.len();
        let mut beta = LogMatrix::new(t_len, n, 0.0);
        if t_len < 2 {
            return beta;
        }

        let mut terms = vec![0.0; n];
        for t in (0..t_len - 1).rev() {
            for i in 0..n {
                for (j, term) in terms.iter_mut().enumerate() {
                    *term = self.log_transition(i, j)
                        + self.log_emission(t + 1, j)
                        + beta[(t + 1, j)];
                }
                beta[(t, i)] = log_add(&terms);
            }
        }

        beta
    }

    /// Joint log-probability of the state path given by indices.
    pub fn path_log_probability(&self, path: &[usize]) -> f64 {
        let Some((&first, rest)) = path.split_first() else {
            return 0.0;
        };
        let mut p = self.log_priors[first] + self.log_emission(0, first);
        let mut last = first;
        for (offset, &state) in rest.iter().enumerate() {
            p += self.log_transition(last, state) + self.log_emission(offset + 1, state);
            last = state;
        }
        p
    }
}

/// Sequence log-likelihood from a forward lattice; `0.0` (probability one)
/// for an empty sequence.
pub fn log_likelihood(alpha: &LogMatrix) -> f64 {
    if alpha.is_empty() {
        0.0
    } else {
        alpha.row_log_sum(alpha.rows() - 1)
    }
}
