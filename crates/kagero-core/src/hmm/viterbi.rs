//! # Viterbi Decoding
//!
//! Finds the single most probable state path for an observation sequence by
//! dynamic programming over a [`Trellis`].

use super::trellis::Trellis;
use crate::error::{KageroError, Result};

/// Viterbi decoder for HMM state sequences.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder {
    num_states: usize,
}

/// Best partial path score and backpointer for one (time, state) cell.
#[derive(Debug, Clone, Copy)]
struct PathState {
    score: f64,
    prev_state: usize,
}

impl ViterbiDecoder {
    /// Create a new Viterbi decoder.
    ///
    /// # Arguments
    /// * `num_states` - Number of hidden states in the model
    pub fn new(num_states: usize) -> Self {
        Self { num_states }
    }

    /// Decode the optimal state sequence.
    ///
    /// Ties are broken in favour of the lowest state index, both when picking
    /// a predecessor and when picking the final state.
    ///
    /// # Returns
    /// The optimal state sequence as indices, and its joint log-probability.
    /// An empty trellis yields an empty path with log-probability `0.0`.
    pub fn decode(&self, trellis: &Trellis) -> Result<(Vec<usize>, f64)> {
        let seq_len = trellis.len();
        if seq_len == 0 {
            return Ok((Vec::new(), 0.0));
        }
        if self.num_states == 0 {
            return Err(KageroError::EmptyStateSpace);
        }
        if trellis.n_states() != self.num_states {
            return Err(KageroError::DimensionMismatch {
                expected: self.num_states,
                found: trellis.n_states(),
            });
        }

        // DP table: [seq_len][num_states]
        let mut dp: Vec<Vec<PathState>> = vec![
            vec![
                PathState {
                    score: 0.0,
                    prev_state: 0,
                };
                self.num_states
            ];
            seq_len
        ];

        for state in 0..self.num_states {
            dp[0][state].score = trellis.log_prior(state) + trellis.log_emission(0, state);
        }

        // Forward pass
        for pos in 1..seq_len {
            for curr in 0..self.num_states {
                let mut best: Option<(f64, usize)> = None;

                for prev in 0..self.num_states {
                    let score = dp[pos - 1][prev].score + trellis.log_transition(prev, curr);
                    if best.is_none_or(|(best_score, _)| score > best_score) {
                        best = Some((score, prev));
                    }
                }

                let (best_score, best_prev) = best.unwrap_or((0.0, 0));
                dp[pos][curr] = PathState {
                    score: best_score + trellis.log_emission(pos, curr),
                    prev_state: best_prev,
                };
            }
        }

        // Find best final state
        let mut best_final: Option<(f64, usize)> = None;
        for (state, cell) in dp[seq_len - 1].iter().enumerate() {
            if best_final.is_none_or(|(best_score, _)| cell.score > best_score) {
                best_final = Some((cell.score, state));
            }
        }
        let (best_score, best_final_state) = best_final.unwrap_or((0.0, 0));

        // Backtrack
        let mut path = Vec::with_capacity(seq_len);
        path.push(best_final_state);
        let mut curr = best_final_state;

        for pos in (1..seq_len).rev() {
            curr = dp[pos][curr].prev_state;
            path.push(curr);
        }

        path.reverse();
        Ok((path, best_score))
    }
}
