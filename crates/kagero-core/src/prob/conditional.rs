use std::collections::HashMap;

use super::ProbDist;
use crate::logspace::LOG_ZERO;
use crate::types::Identifier;

/// One distribution per condition, e.g. per source state.
///
/// `D` is the stored distribution type: boxed read-only distributions in a
/// finished model, [`MutableProbDist`](super::MutableProbDist) during training.
#[derive(Debug, Clone)]
pub struct ConditionalProbDist<C: Identifier, D> {
    dists: HashMap<C, D>,
    order: Vec<C>,
}

impl<C: Identifier, D> ConditionalProbDist<C, D> {
    pub fn new() -> Self {
        Self {
            dists: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Sets the distribution for `condition`, returning the previous one.
    pub fn insert(&mut self, condition: C, dist: D) -> Option<D> {
        if !self.dists.contains_key(&condition) {
            self.order.push(condition.clone());
        }
        self.dists.insert(condition, dist)
    }

    pub fn get(&self, condition: &C) -> Option<&D> {
        self.dists.get(condition)
    }

    pub fn get_mut(&mut self, condition: &C) -> Option<&mut D> {
        self.dists.get_mut(condition)
    }

    /// Conditions in insertion order.
    pub fn conditions(&self) -> &[C] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(condition, distribution)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&C, &D)> + '_ {
        self.order
            .iter()
            .filter_map(move |c| self.dists.get(c).map(|d| (c, d)))
    }

    /// Log-probability of `event` under `condition`; [`LOG_ZERO`] if the
    /// condition has no distribution.
    pub fn log_prob<E>(&self, condition: &C, event: &E) -> f64
    where
        D: ProbDist<E>,
    {
        self.dists
            .get(condition)
            .map_or(LOG_ZERO, |d| d.log_prob(event))
    }

    /// Probability of `event` under `condition`; zero if the condition has no
    /// distribution.
    pub fn prob<E>(&self, condition: &C, event: &E) -> f64
    where
        D: ProbDist<E>,
    {
        self.dists.get(condition).map_or(0.0, |d| d.prob(event))
    }
}

impl<C: Identifier, D> Default for ConditionalProbDist<C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Identifier, D> FromIterator<(C, D)> for ConditionalProbDist<C, D> {
    fn from_iter<I: IntoIterator<Item = (C, D)>>(iter: I) -> Self {
        let mut cpd = Self::new();
        for (condition, dist) in iter {
            cpd.insert(condition, dist);
        }
        cpd
    }
}

/// Consumes the collection, yielding `(condition, distribution)` pairs in
/// insertion order.
impl<C: Identifier, D> IntoIterator for ConditionalProbDist<C, D> {
    type Item = (C, D);
    type IntoIter = std::vec::IntoIter<(C, D)>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut pairs = Vec::with_capacity(self.order.len());
        for condition in self.order {
            if let Some(dist) = self.dists.remove(&condition) {
                pairs.push((condition, dist));
            }
        }
        pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::{BoxedProbDist, DictionaryProbDist, UniformProbDist};

    #[test]
    fn test_lookup_by_condition() {
        let cpd: ConditionalProbDist<&str, BoxedProbDist<&str>> = [
            (
                "bull",
                Box::new(DictionaryProbDist::new([("bull", 0.6), ("bear", 0.4)]))
                    as BoxedProbDist<&str>,
            ),
            ("bear", Box::new(UniformProbDist::new(["bull", "bear"]))),
        ]
        .into_iter()
        .collect();

        assert_eq!(cpd.conditions(), &["bull", "bear"]);
        assert!((cpd.prob(&"bull", &"bull") - 0.6).abs() < 1e-12);
        assert!((cpd.prob(&"bear", &"bull") - 0.5).abs() < 1e-12);
        assert_eq!(cpd.log_prob(&"static", &"bull"), LOG_ZERO);
        assert_eq!(cpd.iter().count(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut cpd = ConditionalProbDist::new();
        cpd.insert("a", UniformProbDist::new([1, 2]));
        let previous = cpd.insert("a", UniformProbDist::new([1]));
        assert!(previous.is_some());
        assert_eq!(cpd.len(), 1);
        assert_eq!(cpd.prob(&"a", &1), 1.0);
    }

    #[test]
    fn test_into_iter_keeps_order() {
        let cpd: ConditionalProbDist<_, _> = [
            ("z", UniformProbDist::new([1])),
            ("a", UniformProbDist::new([2])),
        ]
        .into_iter()
        .collect();
        let conditions: Vec<_> = cpd.into_iter().map(|(c, _)| c).collect();
        assert_eq!(conditions, vec!["z", "a"]);
    }
}
