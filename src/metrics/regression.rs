//! Regression metrics: squared and absolute error, and the mean deviances of
//! the log-link families.

use super::weighted_mean;
use crate::core::error::Result;
use crate::core::types::*;

use ndarray::ArrayView1;

/// Weighted mean squared error.
pub fn mean_squared_error(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
) -> f64 {
    weighted_mean(mu, labels, weights, |m, y| (m - y).powi(2))
}

/// Square root of [`mean_squared_error`].
pub fn root_mean_squared_error(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
) -> f64 {
    mean_squared_error(mu, labels, weights).sqrt()
}

/// Weighted mean absolute error.
pub fn mean_absolute_error(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
) -> f64 {
    weighted_mean(mu, labels, weights, |m, y| (m - y).abs())
}

/// Mean Poisson deviance `2 (y ln(y/μ) - (y - μ))`, with `y ln y = 0` at zero.
pub fn poisson_deviance(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
) -> Result<f64> {
    require_labels(labels, "poisson_deviance", ">= 0", |y| y >= 0.0)?;
    Ok(weighted_mean(mu, labels, weights, |m, y| {
        let ylogy = if y > 0.0 { y * (y / m).ln() } else { 0.0 };
        2.0 * (ylogy - (y - m))
    }))
}

/// Mean Gamma deviance `2 (-ln(y/μ) + (y - μ)/μ)`.
pub fn gamma_deviance(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
) -> Result<f64> {
    require_labels(labels, "gamma_deviance", "> 0", |y| y > 0.0)?;
    Ok(weighted_mean(mu, labels, weights, |m, y| {
        2.0 * (-(y / m).ln() + (y - m) / m)
    }))
}

/// Mean Tweedie deviance for variance power `rho` in `(1, 2)`.
pub fn tweedie_deviance(
    mu: ArrayView1<'_, Score>,
    labels: ArrayView1<'_, Label>,
    weights: ArrayView1<'_, Weight>,
    rho: f64,
) -> Result<f64> {
    require_labels(labels, "tweedie_deviance", ">= 0", |y| y >= 0.0)?;
    Ok(weighted_mean(mu, labels, weights, |m, y| {
        2.0 * (y.powf(2.0 - rho) / ((1.0 - rho) * (2.0 - rho))
            - y * m.powf(1.0 - rho) / (1.0 - rho)
            + m.powf(2.0 - rho) / (2.0 - rho))
    }))
}

fn require_labels<F>(labels: ArrayView1<'_, Label>, metric: &str, requirement: &str, accept: F) -> Result<()>
where
    F: Fn(f64) -> bool,
{
    match labels.iter().position(|&y| !accept(y)) {
        Some(row) => Err(crate::dataset_error!(
            "{} requires labels {}, found {} at row {}",
            metric,
            requirement,
            labels[row],
            row
        )),
        None => Ok(()),
    }
}
