//! # Log-space Arithmetic
//!
//! Every probability in Kagero is carried as a natural logarithm. Products
//! become sums, and sums of probabilities go through [`log_add`], which
//! subtracts the running maximum before exponentiating so that long sequences
//! neither underflow nor overflow.

/// Stand-in for `ln(0)`.
///
/// A large negative finite value is used instead of `f64::NEG_INFINITY` so
/// that differences such as `LOG_ZERO - LOG_ZERO` stay finite on every
/// numeric back end.
pub const LOG_ZERO: f64 = -1e300;

/// Returns `ln(Σ exp(vᵢ))`.
///
/// If the largest value is at or below [`LOG_ZERO`] it is returned unchanged,
/// so `log_add(&[a, LOG_ZERO]) == a` and an empty slice yields `LOG_ZERO`.
pub fn log_add(values: &[f64]) -> f64 {
    if values.is_empty() {
        return LOG_ZERO;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > LOG_ZERO {
        let sum_diffs: f64 = values.iter().map(|&v| (v - max).exp()).sum();
        max + sum_diffs.ln()
    } else {
        max
    }
}

/// Two-argument [`log_add`] for accumulation loops.
#[inline]
pub fn log_add_pair(a: f64, b: f64) -> f64 {
    let max = a.max(b);
    if max > LOG_ZERO {
        max + ((a - max).exp() + (b - max).exp()).ln()
    } else {
        max
    }
}

/// Natural logarithm that maps non-positive probabilities to [`LOG_ZERO`].
#[inline]
pub fn safe_ln(p: f64) -> f64 {
    if p > 0.0 { p.ln() } else { LOG_ZERO }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_add_matches_direct_sum() {
        let values = [0.1f64.ln(), 0.2f64.ln(), 0.3f64.ln()];
        assert!((log_add(&values) - 0.6f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_log_add_sentinel_identity() {
        assert_eq!(log_add(&[-3.5, LOG_ZERO]), -3.5);
        assert_eq!(log_add_pair(-3.5, LOG_ZERO), -3.5);
        assert_eq!(log_add_pair(LOG_ZERO, -3.5), -3.5);
        assert_eq!(log_add(&[LOG_ZERO, LOG_ZERO]), LOG_ZERO);
    }

    #[test]
    fn test_log_add_empty() {
        assert_eq!(log_add(&[]), LOG_ZERO);
    }

    #[test]
    fn test_log_add_no_overflow() {
        let big = log_add(&[700.0, 700.0]);
        assert!(big.is_finite());
        assert!((big - (700.0 + 2.0f64.ln())).abs() < 1e-10);

        let tiny = log_add(&[-2000.0, -2001.0]);
        assert!(tiny.is_finite());
        assert!(tiny > -2000.0 && tiny < -1999.0);
    }

    #[test]
    fn test_log_add_commutative_and_associative() {
        let (a, b, c) = (-1.25, -7.5, -0.3);
        let left = log_add_pair(log_add_pair(a, b), c);
        let right = log_add_pair(a, log_add_pair(b, c));
        let flat = log_add(&[c, a, b]);
        assert!((left - right).abs() < 1e-12);
        assert!((left - flat).abs() < 1e-12);
        assert_eq!(log_add_pair(a, b), log_add_pair(b, a));
    }

    #[test]
    fn test_safe_ln() {
        assert_eq!(safe_ln(0.0), LOG_ZERO);
        assert_eq!(safe_ln(-1.0), LOG_ZERO);
        assert_eq!(safe_ln(1.0), 0.0);
    }
}
