//! Evaluation metrics for linear-boost models.
//!
//! Every metric is a weighted mean over observations, computed on projected
//! predictions (after the inverse link). All supported metrics are
//! minimised.
//!
//! ```rust
//! use linear_boost::metrics::evaluate_metric;
//! use linear_boost::MetricType;
//! use ndarray::array;
//!
//! let mu = array![1.0, 2.0, 3.0];
//! let y = array![1.0, 2.0, 5.0];
//! let w = array![1.0, 1.0, 1.0];
//! let mse = evaluate_metric(MetricType::Mse, mu.view(), y.view(), w.view(), 1.5)?;
//! assert!((mse - 4.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), linear_boost::LinearBoostError>(())
//! ```

pub mod classification;
pub mod regression;

pub use classification::log_loss;
pub use regression::{
    gamma_deviance, mean_absolute_error, mean_squared_error, poisson_deviance,
    root_mean_squared_error, tweedie_deviance,
};

use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;

use ndarray::ArrayView1;

/// Whether lower or higher metric values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricDirection {
    /// Lower is better
    Minimize,
    /// Higher is better
    Maximize,
}

impl MetricDirection {
    /// Direction of a built-in metric.
    pub fn of(_metric: MetricType) -> Self {
        MetricDirection::Minimize
    }

    /// Whether `candidate` strictly beats `best`, by at least `tol`.
    pub fn improves(&self, candidate: f64, best: f64, tol: f64) -> bool {
        let improvement = match self {
            MetricDirection::Minimize => best - candidate,
            MetricDirection::Maximize => candidate - best,
        };
        improvement > 0.0 && improvement >= tol
    }
}

/// Evaluate `metric` on projected predictions `mu`.
///
/// `tweedie_power` is only read by [`MetricType::TweedieDeviance`].
pub fn evaluate_metric(
    metric: MetricType,
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
    tweedie_power: f64,
) -> Result<f64> {
    validate_inputs(&mu, &labels, &weights)?;

    let value = match metric {
        MetricType::Mse => mean_squared_error(mu, labels, weights),
        MetricType::Rmse => root_mean_squared_error(mu, labels, weights),
        MetricType::Mae => mean_absolute_error(mu, labels, weights),
        MetricType::Logloss => log_loss(mu, labels, weights),
        MetricType::PoissonDeviance => poisson_deviance(mu, labels, weights)?,
        MetricType::GammaDeviance => gamma_deviance(mu, labels, weights)?,
        MetricType::TweedieDeviance => tweedie_deviance(mu, labels, weights, tweedie_power)?,
    };

    if !value.is_finite() {
        return Err(LinearBoostError::numerical(format!(
            "{} evaluated to {}",
            metric, value
        )));
    }
    Ok(value)
}

fn validate_inputs(
    mu: &ArrayView1<'_, Score>,
    labels: &ArrayView1<'_, Label>,
    weights: &ArrayView1<'_, Weight>,
) -> Result<()> {
    if mu.len() != labels.len() {
        return Err(LinearBoostError::dimension_mismatch(
            format!("predictions: {}", mu.len()),
            format!("targets: {}", labels.len()),
        ));
    }
    if weights.len() != labels.len() {
        return Err(LinearBoostError::dimension_mismatch(
            format!("targets: {}", labels.len()),
            format!("weights: {}", weights.len()),
        ));
    }
    if mu.is_empty() {
        return Err(LinearBoostError::dataset("Cannot evaluate a metric on no observations"));
    }
    Ok(())
}

/// Weighted mean of `f(mu_i, y_i)`. Sums run in index order.
pub(crate) fn weighted_mean<F>(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
    f: F,
) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for ((&m, &y), &w) in mu.iter().zip(labels.iter()).zip(weights.iter()) {
        total += w * f(m, y);
        weight_sum += w;
    }
    total / weight_sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_direction() {
        let dir = MetricDirection::of(MetricType::Logloss);
        assert_eq!(dir, MetricDirection::Minimize);
        assert!(dir.improves(0.5, 0.6, 0.01));
        assert!(!dir.improves(0.595, 0.6, 0.01));
        assert!(MetricDirection::Maximize.improves(0.7, 0.6, 0.01));
    }

    #[test]
    fn test_evaluate_dispatch() {
        let mu = array![1.0, 3.0];
        let y = array![2.0, 1.0];
        let w = array![1.0, 1.0];

        let mse = evaluate_metric(MetricType::Mse, mu.view(), y.view(), w.view(), 1.5).unwrap();
        let rmse = evaluate_metric(MetricType::Rmse, mu.view(), y.view(), w.view(), 1.5).unwrap();
        let mae = evaluate_metric(MetricType::Mae, mu.view(), y.view(), w.view(), 1.5).unwrap();
        assert_relative_eq!(mse, 2.5);
        assert_relative_eq!(rmse, 2.5f64.sqrt());
        assert_relative_eq!(mae, 1.5);
    }

    #[test]
    fn test_weights_are_applied() {
        let mu = array![0.0, 0.0];
        let y = array![1.0, 3.0];
        let w = array![3.0, 1.0];
        let mae = evaluate_metric(MetricType::Mae, mu.view(), y.view(), w.view(), 1.5).unwrap();
        assert_relative_eq!(mae, 1.5);
    }

    #[test]
    fn test_shape_errors() {
        let mu = array![1.0];
        let y = array![1.0, 2.0];
        let w = array![1.0, 1.0];
        let err = evaluate_metric(MetricType::Mse, mu.view(), y.view(), w.view(), 1.5).unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");
    }
}
