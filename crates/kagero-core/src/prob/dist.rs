use std::collections::HashMap;

use super::ProbDist;
use crate::types::{Alphabet, Identifier};

/// Distribution given by an explicit event → probability table.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryProbDist<E: Identifier> {
    probs: HashMap<E, f64>,
    order: Vec<E>,
}

impl<E: Identifier> DictionaryProbDist<E> {
    /// Takes the masses as given. A repeated event keeps its first position
    /// and its last mass.
    pub fn new(entries: impl IntoIterator<Item = (E, f64)>) -> Self {
        let mut probs = HashMap::new();
        let mut order = Vec::new();
        for (event, p) in entries {
            if probs.insert(event.clone(), p).is_none() {
                order.push(event);
            }
        }
        Self { probs, order }
    }

    /// Like [`new`](Self::new) but rescales the masses to sum to one.
    /// An all-zero table is returned unchanged.
    pub fn normalized(entries: impl IntoIterator<Item = (E, f64)>) -> Self {
        let mut dist = Self::new(entries);
        let total: f64 = dist.probs.values().sum();
        if total > 0.0 {
            for p in dist.probs.values_mut() {
                *p /= total;
            }
        }
        dist
    }
}

impl<E: Identifier> ProbDist<E> for DictionaryProbDist<E> {
    fn prob(&self, event: &E) -> f64 {
        self.probs.get(event).copied().unwrap_or(0.0)
    }

    fn samples(&self) -> Vec<&E> {
        self.order.iter().collect()
    }
}

/// Equal mass on every event of a fixed set.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformProbDist<E: Identifier> {
    support: Alphabet<E>,
    mass: f64,
}

impl<E: Identifier> UniformProbDist<E> {
    pub fn new(samples: impl IntoIterator<Item = E>) -> Self {
        let support = Alphabet::new(samples);
        let mass = if support.is_empty() {
            0.0
        } else {
            1.0 / support.len() as f64
        };
        Self { support, mass }
    }
}

impl<E: Identifier> ProbDist<E> for UniformProbDist<E> {
    fn prob(&self, event: &E) -> f64 {
        if self.support.contains(event) {
            self.mass
        } else {
            0.0
        }
    }

    fn samples(&self) -> Vec<&E> {
        self.support.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logspace::LOG_ZERO;

    #[test]
    fn test_dictionary_lookup() {
        let dist = DictionaryProbDist::new([("up", 0.7), ("down", 0.1), ("unchanged", 0.2)]);
        assert_eq!(dist.prob(&"up"), 0.7);
        assert_eq!(dist.prob(&"sideways"), 0.0);
        assert_eq!(dist.log_prob(&"sideways"), LOG_ZERO);
        assert!((dist.log_prob(&"down") - 0.1f64.ln()).abs() < 1e-12);
        assert_eq!(dist.samples(), vec![&"up", &"down", &"unchanged"]);
    }

    #[test]
    fn test_dictionary_normalized() {
        let dist = DictionaryProbDist::normalized([("a", 2.0), ("b", 6.0)]);
        assert!((dist.prob(&"a") - 0.25).abs() < 1e-12);
        assert!((dist.prob(&"b") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_uniform() {
        let dist = UniformProbDist::new(["bull", "bear", "static", "bull"]);
        assert!((dist.prob(&"bear") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(dist.prob(&"crash"), 0.0);
        assert_eq!(dist.samples().len(), 3);

        let empty: UniformProbDist<&str> = UniformProbDist::new([]);
        assert_eq!(empty.prob(&"bull"), 0.0);
    }
}
