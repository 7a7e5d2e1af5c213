//! # Posterior Entropy
//!
//! Entropies (in nats) of the posterior over hidden state paths given an
//! observation sequence. The closed forms run off the forward and backward
//! lattices; the `exhaustive_*` variants enumerate all `N^T` paths and exist
//! to cross-check them on small inputs.

use super::model::HiddenMarkovModel;
use super::trellis::{self, Trellis};
use crate::logspace::{LOG_ZERO, log_add};
use crate::types::{Identifier, Token};

impl<S: Identifier, O: Identifier> HiddenMarkovModel<S, O> {
    /// Entropy of `P(state path | sequence)`.
    ///
    /// Computed as the log-normaliser minus the expected log-prior,
    /// expected log-transition and expected log-emission under the posterior.
    /// An empty sequence has entropy `0.0`.
    pub fn entropy(&self, sequence: &[Token<S, O>]) -> f64 {
        let trellis = self.trellis(sequence);
        if trellis.is_empty() {
            return 0.0;
        }
        let n = trellis.n_states();
        let alpha = trellis.forward();
        let beta = trellis.backward();
        let normalisation = trellis::log_likelihood(&alpha);

        let mut entropy = normalisation;

        for i in 0..n {
            let p = (alpha[(0, i)] + beta[(0, i)] - normalisation).exp();
            entropy -= p * trellis.log_prior(i);
        }

        for t0 in 0..trellis.len() - 1 {
            let t1 = t0 + 1;
            for i0 in 0..n {
                for i1 in 0..n {
                    let log_a = trellis.log_transition(i0, i1);
                    let p = (alpha[(t0, i0)] + log_a + trellis.log_emission(t1, i1)
                        + beta[(t1, i1)]
                        - normalisation)
                        .exp();
                    entropy -= p * log_a;
                }
            }
        }

        for t in 0..trellis.len() {
            for i in 0..n {
                let p = (alpha[(t, i)] + beta[(t, i)] - normalisation).exp();
                entropy -= p * trellis.log_emission(t, i);
            }
        }

        entropy
    }

    /// Shannon entropy of the marginal state posterior at each time step.
    pub fn point_entropy(&self, sequence: &[Token<S, O>]) -> Vec<f64> {
        let trellis = self.trellis(sequence);
        let alpha = trellis.forward();
        let beta = trellis.backward();
        let normalisation = trellis::log_likelihood(&alpha);

        (0..trellis.len())
            .map(|t| {
                (0..trellis.n_states())
                    .map(|i| plogp(alpha[(t, i)] + beta[(t, i)] - normalisation))
                    .sum()
            })
            .collect()
    }

    /// [`entropy`](Self::entropy) by enumerating every state path. O(N^T).
    pub fn exhaustive_entropy(&self, sequence: &[Token<S, O>]) -> f64 {
        let trellis = self.trellis(sequence);
        if trellis.is_empty() {
            return 0.0;
        }
        let normalisation = path_normalisation(&trellis);

        let mut entropy = 0.0;
        for_each_path(&trellis, |_, log_joint| {
            entropy += plogp(log_joint - normalisation);
        });
        entropy
    }

    /// [`point_entropy`](Self::point_entropy) by enumerating every state
    /// path and accumulating marginals. O(N^T).
    pub fn exhaustive_point_entropy(&self, sequence: &[Token<S, O>]) -> Vec<f64> {
        let trellis = self.trellis(sequence);
        let n = trellis.n_states();
        let normalisation = path_normalisation(&trellis);

        let mut marginals = vec![vec![0.0; n]; trellis.len()];
        for_each_path(&trellis, |path, log_joint| {
            let p = (log_joint - normalisation).exp();
            for (t, &state) in path.iter().enumerate() {
                marginals[t][state] += p;
            }
        });

        marginals
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|&&p| p > 0.0)
                    .map(|&p| -p * p.ln())
                    .sum()
            })
            .collect()
    }
}

/// `-p ln p` for `p = exp(log_p)`; zero at or below [`LOG_ZERO`].
fn plogp(log_p: f64) -> f64 {
    if log_p > LOG_ZERO {
        -log_p.exp() * log_p
    } else {
        0.0
    }
}

/// `log P(sequence)` as the `log_add` of every path's joint.
fn path_normalisation(trellis: &Trellis) -> f64 {
    let mut joints = Vec::new();
    for_each_path(trellis, |_, log_joint| joints.push(log_joint));
    log_add(&joints)
}

/// Calls `visit` with every state path of the trellis and its joint
/// log-probability, odometer style. Does nothing for an empty trellis or an
/// empty state space.
fn for_each_path(trellis: &Trellis, mut visit: impl FnMut(&[usize], f64)) {
    let n = trellis.n_states();
    if trellis.is_empty() || n == 0 {
        return;
    }
    let mut path = vec![0usize; trellis.len()];
    loop {
        visit(&path, trellis.path_log_probability(&path));

        let mut pos = path.len();
        loop {
            if pos == 0 {
                return;
            }
            pos -= 1;
            path[pos] += 1;
            if path[pos] < n {
                break;
            }
            path[pos] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hmm::test_models::{coin_model, market_model, unlabelled};

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_entropy_matches_exhaustive_small() {
        let model = coin_model();
        let seq = unlabelled(&['H', 'T', 'T']);
        let closed = model.entropy(&seq);
        let brute = model.exhaustive_entropy(&seq);
        assert!((closed - brute).abs() < TOLERANCE, "{closed} vs {brute}");
        assert!(closed > 0.0);
    }

    #[test]
    fn test_entropy_matches_exhaustive_market() {
        let model = market_model();
        let seq = unlabelled(&["up", "down", "unchanged", "up"]);
        let closed = model.entropy(&seq);
        let brute = model.exhaustive_entropy(&seq);
        assert!((closed - brute).abs() < TOLERANCE, "{closed} vs {brute}");
    }

    #[test]
    fn test_point_entropy_matches_exhaustive() {
        let model = market_model();
        let seq = unlabelled(&["down", "down", "up"]);
        let closed = model.point_entropy(&seq);
        let brute = model.exhaustive_point_entropy(&seq);
        assert_eq!(closed.len(), 3);
        for (t, (a, b)) in closed.iter().zip(&brute).enumerate() {
            assert!((a - b).abs() < TOLERANCE, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn test_point_entropy_matches_exhaustive_small() {
        let model = coin_model();
        let seq = unlabelled(&['H', 'T', 'T']);
        let closed = model.point_entropy(&seq);
        let brute = model.exhaustive_point_entropy(&seq);
        assert_eq!(brute.len(), 3);
        for (t, (a, b)) in closed.iter().zip(&brute).enumerate() {
            assert!((a - b).abs() < TOLERANCE, "t={t}: {a} vs {b}");
            assert!(*a > 0.0 && *a <= 2.0f64.ln() + TOLERANCE);
        }
    }

    #[test]
    fn test_point_entropy_bounded_by_log_n() {
        let model = market_model();
        let max = (3.0f64).ln();
        for h in model.point_entropy(&unlabelled(&["up", "unchanged", "down", "down"])) {
            assert!((-TOLERANCE..=max + TOLERANCE).contains(&h));
        }
    }

    #[test]
    fn test_empty_sequence_has_zero_entropy() {
        let model = market_model();
        let empty = unlabelled(&[]);
        assert_eq!(model.entropy(&empty), 0.0);
        assert_eq!(model.exhaustive_entropy(&empty), 0.0);
        assert!(model.point_entropy(&empty).is_empty());
        assert!(model.exhaustive_point_entropy(&empty).is_empty());
    }
}
