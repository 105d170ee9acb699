//! Binary classification metrics.

use super::weighted_mean;
use crate::core::constants::EPSILON;
use crate::core::types::*;

use ndarray::ArrayView1;

/// Weighted binary log-loss. Probabilities are clamped to `[ε, 1 - ε]`.
pub fn log_loss(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
) -> f64 {
    weighted_mean(mu, labels, weights, |m, y| {
        let p = m.clamp(EPSILON, 1.0 - EPSILON);
        -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_log_loss() {
        let mu = array![0.5, 0.5];
        let y = array![1.0, 0.0];
        let w = array![1.0, 1.0];
        assert_relative_eq!(log_loss(mu.view(), y.view(), w.view()), 2f64.ln());
    }

    #[test]
    fn test_log_loss_is_finite_at_extremes() {
        let mu = array![0.0, 1.0];
        let y = array![1.0, 0.0];
        let w = array![1.0, 1.0];
        let value = log_loss(mu.view(), y.view(), w.view());
        assert!(value.is_finite());
        assert!(value > 30.0);
    }
}
