//! Coordinate updates for linear boosting.
//!
//! One round computes a Newton step for every feature weight from a single
//! snapshot of gradients and hessians, then a separate step for the bias.
//! Feature steps are independent of each other, so they are computed in
//! parallel across features; each feature's sums run sequentially in row
//! order, which keeps the result identical for any thread count.

use crate::config::Config;
use crate::core::constants::MIN_STEP;
use crate::core::types::*;

use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use rayon::prelude::*;

/// Step parameters shared by every coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateConfig {
    /// L1 penalty: steps of at most this size are dropped
    pub l1: f64,
    /// L2 penalty: ridge term on the weight
    pub l2: f64,
    /// Learning rate
    pub eta: f64,
    /// Cap on each step before the learning rate is applied
    pub max_delta_step: Option<f64>,
}

impl UpdateConfig {
    /// Step parameters resolved from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        UpdateConfig {
            l1: config.l1(),
            l2: config.l2(),
            eta: config.eta(),
            max_delta_step: config.effective_max_delta_step(),
        }
    }
}

/// Computes per-round weight and bias steps.
#[derive(Debug, Clone)]
pub struct CoordinateUpdater {
    kind: UpdaterType,
    config: UpdateConfig,
}

impl CoordinateUpdater {
    /// Create an updater of the given kind.
    pub fn new(kind: UpdaterType, config: UpdateConfig) -> Self {
        CoordinateUpdater { kind, config }
    }

    /// Step parameters.
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Weight steps for every feature.
    ///
    /// `gradients` and `hessians` are per observation and must all come from
    /// the same score snapshot. `beta` holds the current weights and
    /// `weight_sum` the total observation weight.
    pub fn compute_weight_deltas(
        &self,
        features: ArrayView2<'_, f64>,
        gradients: ArrayView1<'_, Score>,
        hessians: ArrayView1<'_, Score>,
        obs_weights: ArrayView1<'_, Weight>,
        beta: ArrayView1<'_, f64>,
        weight_sum: f64,
    ) -> Array1<f64> {
        match self.kind {
            UpdaterType::All => {
                let weighted_grad = &obs_weights * &gradients;
                let weighted_hess = &obs_weights * &hessians;

                let deltas: Vec<f64> = (0..features.ncols())
                    .into_par_iter()
                    .map(|j| {
                        let (grad_sum, hess_sum) =
                            feature_sums(features.column(j), weighted_grad.view(), weighted_hess.view());
                        self.feature_step(grad_sum / weight_sum, hess_sum / weight_sum, beta[j])
                    })
                    .collect();

                Array1::from(deltas)
            }
        }
    }

    /// Bias step `-Σwg / Σwh`, capped and scaled. No penalties apply.
    pub fn compute_bias_delta(
        &self,
        gradients: ArrayView1<'_, Score>,
        hessians: ArrayView1<'_, Score>,
        obs_weights: ArrayView1<'_, Weight>,
    ) -> f64 {
        let mut grad_sum = 0.0;
        let mut hess_sum = 0.0;
        for ((&g, &h), &w) in gradients.iter().zip(hessians.iter()).zip(obs_weights.iter()) {
            grad_sum += w * g;
            hess_sum += w * h;
        }

        if hess_sum <= MIN_STEP {
            return 0.0;
        }
        self.limit(-grad_sum / hess_sum)
    }

    /// Proximal Newton step for one coordinate from normalised sums.
    pub fn feature_step(&self, grad: f64, hess: f64, beta: f64) -> f64 {
        let denom = hess + self.config.l2;
        if denom <= 0.0 {
            return 0.0;
        }

        let delta = soft_threshold(-(grad + self.config.l2 * beta) / denom, self.config.l1);
        self.limit(delta)
    }

    fn limit(&self, delta: f64) -> f64 {
        let capped = match self.config.max_delta_step {
            Some(cap) => delta.clamp(-cap, cap),
            None => delta,
        };
        capped * self.config.eta
    }
}

/// `0` when `|delta| <= l1`, otherwise `delta` shrunk towards zero by `l1`.
pub fn soft_threshold(delta: f64, l1: f64) -> f64 {
    if delta.abs() <= l1 {
        0.0
    } else {
        delta - delta.signum() * l1
    }
}

fn feature_sums(
    column: ArrayView1<'_, f64>,
    weighted_grad: ArrayView1<'_, f64>,
    weighted_hess: ArrayView1<'_, f64>,
) -> (f64, f64) {
    let mut grad_sum = 0.0;
    let mut hess_sum = 0.0;
    Zip::from(&column)
        .and(&weighted_grad)
        .and(&weighted_hess)
        .for_each(|&x, &wg, &wh| {
            grad_sum += wg * x;
            hess_sum += wh * x * x;
        });
    (grad_sum, hess_sum)
}
