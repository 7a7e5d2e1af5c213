use super::ProbDist;
use crate::error::{KageroError, Result};
use crate::logspace::LOG_ZERO;
use crate::types::{Alphabet, Identifier};

/// Dense log-probability table that can be rewritten in place.
///
/// Every event of the support has a slot, including events the source
/// distribution gave zero mass, so training can move mass onto them.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableProbDist<E: Identifier> {
    support: Alphabet<E>,
    log_probs: Vec<f64>,
}

impl<E: Identifier> MutableProbDist<E> {
    /// Copies `source` onto `support`.
    pub fn new<D>(source: &D, support: &Alphabet<E>) -> Self
    where
        D: ProbDist<E> + ?Sized,
    {
        let log_probs = support.iter().map(|e| source.log_prob(e)).collect();
        Self {
            support: support.clone(),
            log_probs,
        }
    }

    /// All slots at [`LOG_ZERO`].
    pub fn zeros(support: &Alphabet<E>) -> Self {
        Self {
            support: support.clone(),
            log_probs: vec![LOG_ZERO; support.len()],
        }
    }

    /// Sets the log-probability of `event`.
    pub fn update(&mut self, event: &E, log_prob: f64) -> Result<()> {
        let idx = self
            .support
            .index_of(event)
            .ok_or_else(|| KageroError::UnknownEvent(format!("{event:?}")))?;
        self.log_probs[idx] = log_prob;
        Ok(())
    }

    /// Sets the log-probability of the event at support position `idx`.
    ///
    /// # Panics
    /// If `idx` is outside the support.
    pub fn update_index(&mut self, idx: usize, log_prob: f64) {
        self.log_probs[idx] = log_prob;
    }

    /// Log-probabilities in support order.
    pub fn log_probs(&self) -> &[f64] {
        &self.log_probs
    }

    pub fn support(&self) -> &Alphabet<E> {
        &self.support
    }
}

impl<E: Identifier> ProbDist<E> for MutableProbDist<E> {
    fn prob(&self, event: &E) -> f64 {
        self.log_prob(event).exp()
    }

    fn log_prob(&self, event: &E) -> f64 {
        self.support
            .index_of(event)
            .map_or(LOG_ZERO, |idx| self.log_probs[idx])
    }

    fn samples(&self) -> Vec<&E> {
        self.support.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::DictionaryProbDist;

    #[test]
    fn test_copy_gives_every_event_a_slot() {
        let source = DictionaryProbDist::new([("up", 0.5), ("down", 0.5)]);
        let support = Alphabet::new(["up", "down", "unchanged"]);
        let dist = MutableProbDist::new(&source, &support);

        assert_eq!(dist.log_probs().len(), 3);
        assert!((dist.prob(&"up") - 0.5).abs() < 1e-12);
        assert_eq!(dist.log_prob(&"unchanged"), LOG_ZERO);
        assert_eq!(dist.prob(&"unchanged"), 0.0);
    }

    #[test]
    fn test_update() {
        let support = Alphabet::new(["up", "down"]);
        let mut dist = MutableProbDist::zeros(&support);
        dist.update(&"down", 0.25f64.ln()).unwrap();
        dist.update_index(0, 0.75f64.ln());

        assert!((dist.prob(&"down") - 0.25).abs() < 1e-12);
        assert!((dist.prob(&"up") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_update_unknown_event() {
        let support = Alphabet::new(["up"]);
        let mut dist = MutableProbDist::zeros(&support);
        assert!(matches!(
            dist.update(&"sideways", 0.0),
            Err(KageroError::UnknownEvent(_))
        ));
    }
}
