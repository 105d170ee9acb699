//! Loss functions for linear boosting.
//!
//! A [`LossFunction`] turns the current linear scores into per-observation
//! gradients and hessians with respect to the score. The fitter aggregates
//! those into coordinate steps; see [`crate::boosting`].

pub mod classification;
pub mod regression;

pub use classification::LogisticLoss;
pub use regression::{GammaLoss, MseLoss, PoissonLoss, TweedieLoss};

use crate::config::Config;
use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;
use crate::prediction::Link;

use ndarray::{ArrayView1, ArrayViewMut1};

/// Gradient and hessian provider for one loss family.
pub trait LossFunction: Send + Sync + std::fmt::Debug {
    /// Loss kind
    fn loss_type(&self) -> LossType;

    /// Loss name as used in configuration
    fn name(&self) -> &'static str;

    /// Inverse link used for projected predictions
    fn link(&self) -> Link {
        Link::from_loss(self.loss_type())
    }

    /// Metric tracked when none is requested explicitly
    fn default_metric(&self) -> MetricType;

    /// Reject labels outside the loss's support with a dataset error
    fn validate_labels(&self, labels: ArrayView1<'_, Label>) -> Result<()>;

    /// Fill `gradients` and `hessians` for the given linear scores
    fn compute_gradients(
        &self,
        scores: ArrayView1<'_, Score>,
        labels: ArrayView1<'_, Label>,
        gradients: ArrayViewMut1<'_, Score>,
        hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()>;
}

/// Build the loss function selected by `config`.
pub fn create_loss_function(config: &Config) -> Box<dyn LossFunction> {
    match config.loss() {
        LossType::Mse => Box::new(MseLoss),
        LossType::Logistic => Box::new(LogisticLoss),
        LossType::Poisson => Box::new(PoissonLoss),
        LossType::Gamma => Box::new(GammaLoss),
        LossType::Tweedie => Box::new(TweedieLoss::new(config.tweedie_power())),
    }
}

pub(crate) fn check_lengths(
    scores: &ArrayView1<'_, Score>,
    labels: &ArrayView1<'_, Label>,
    gradients: &ArrayViewMut1<'_, Score>,
    hessians: &ArrayViewMut1<'_, Score>,
) -> Result<()> {
    let n = scores.len();
    if labels.len() != n || gradients.len() != n || hessians.len() != n {
        return Err(LinearBoostError::dimension_mismatch(
            format!("{} scores, labels, gradients and hessians", n),
            format!(
                "labels: {}, gradients: {}, hessians: {}",
                labels.len(),
                gradients.len(),
                hessians.len()
            ),
        ));
    }
    Ok(())
}

/// First label failing `accept`, as a dataset error.
pub(crate) fn check_label_support<F>(
    labels: ArrayView1<'_, Label>,
    loss: &str,
    requirement: &str,
    accept: F,
) -> Result<()>
where
    F: Fn(Label) -> bool,
{
    match labels.iter().position(|&y| !accept(y)) {
        Some(row) => Err(crate::dataset_error!(
            "{} loss requires labels {}, found {} at row {}",
            loss,
            requirement,
            labels[row],
            row
        )),
        None => Ok(()),
    }
}
