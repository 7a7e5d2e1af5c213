//! Frequency tables collected during supervised training.

use std::collections::HashMap;

use crate::types::Identifier;

/// Event counts with first-seen iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqDist<E: Identifier> {
    counts: HashMap<E, u64>,
    order: Vec<E>,
    total: u64,
}

impl<E: Identifier> FreqDist<E> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            order: Vec::new(),
            total: 0,
        }
    }

    /// Records one occurrence of `event`.
    pub fn inc(&mut self, event: E) {
        self.inc_by(event, 1);
    }

    /// Records `count` occurrences of `event`.
    pub fn inc_by(&mut self, event: E, count: u64) {
        match self.counts.get_mut(&event) {
            Some(c) => *c += count,
            None => {
                self.order.push(event.clone());
                self.counts.insert(event, count);
            }
        }
        self.total += count;
    }

    /// Occurrences of `event`.
    pub fn count(&self, event: &E) -> u64 {
        self.counts.get(event).copied().unwrap_or(0)
    }

    /// Total number of recorded occurrences.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct events seen.
    pub fn bins(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Relative frequency of `event`, zero for an empty table.
    pub fn freq(&self, event: &E) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(event) as f64 / self.total as f64
        }
    }

    /// Distinct events in first-seen order.
    pub fn events(&self) -> &[E] {
        &self.order
    }

    /// `(event, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, u64)> + '_ {
        self.order.iter().map(move |e| (e, self.count(e)))
    }
}

impl<E: Identifier> Default for FreqDist<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// One [`FreqDist`] per condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalFreqDist<C: Identifier, E: Identifier> {
    dists: HashMap<C, FreqDist<E>>,
    order: Vec<C>,
}

impl<C: Identifier, E: Identifier> ConditionalFreqDist<C, E> {
    pub fn new() -> Self {
        Self {
            dists: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Table for `condition`, created empty on first access.
    pub fn entry(&mut self, condition: C) -> &mut FreqDist<E> {
        if !self.dists.contains_key(&condition) {
            self.order.push(condition.clone());
        }
        self.dists.entry(condition).or_default()
    }

    pub fn get(&self, condition: &C) -> Option<&FreqDist<E>> {
        self.dists.get(condition)
    }

    /// Conditions in first-seen order.
    pub fn conditions(&self) -> &[C] {
        &self.order
    }

    /// Total count across all conditions.
    pub fn total(&self) -> u64 {
        self.dists.values().map(FreqDist::total).sum()
    }
}

impl<C: Identifier, E: Identifier> Default for ConditionalFreqDist<C, E> {
    fn default() -> Self {
        Self::new()
    }
}
