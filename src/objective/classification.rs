//! Binary classification loss.

use super::{check_label_support, check_lengths, LossFunction};
use crate::core::constants::EPSILON;
use crate::core::error::Result;
use crate::core::types::*;

use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Logistic log-loss on labels in `[0, 1]`.
///
/// `g = σ(p) - y`, `h = max(σ(p)(1 - σ(p)), ε)`. The floor keeps the Newton
/// denominator positive once the scores saturate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticLoss;

impl LossFunction for LogisticLoss {
    fn loss_type(&self) -> LossType {
        LossType::Logistic
    }

    fn name(&self) -> &'static str {
        "logistic"
    }

    fn default_metric(&self) -> MetricType {
        MetricType::Logloss
    }

    fn validate_labels(&self, labels: ArrayView1<'_, Label>) -> Result<()> {
        check_label_support(labels, self.name(), "in [0, 1]", |y| (0.0..=1.0).contains(&y))
    }

    fn compute_gradients(
        &self,
        scores: ArrayView1<'_, Score>,
        labels: ArrayView1<'_, Label>,
        gradients: ArrayViewMut1<'_, Score>,
        hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        check_lengths(&scores, &labels, &gradients, &hessians)?;

        Zip::from(gradients)
            .and(hessians)
            .and(&scores)
            .and(&labels)
            .par_for_each(|g, h, &p, &y| {
                let prob = 1.0 / (1.0 + (-p).exp());
                *g = prob - y;
                *h = (prob * (1.0 - prob)).max(EPSILON);
            });
        Ok(())
    }
}
