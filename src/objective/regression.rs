//! Regression losses: squared error and the log-link deviances.

use super::{check_label_support, check_lengths, LossFunction};
use crate::core::error::Result;
use crate::core::types::*;

use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Squared error. `g = p - y`, `h = 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss;

impl LossFunction for MseLoss {
    fn loss_type(&self) -> LossType {
        LossType::Mse
    }

    fn name(&self) -> &'static str {
        "mse"
    }

    fn default_metric(&self) -> MetricType {
        MetricType::Mse
    }

    fn validate_labels(&self, _labels: ArrayView1<'_, Label>) -> Result<()> {
        Ok(())
    }

    fn compute_gradients(
        &self,
        scores: ArrayView1<'_, Score>,
        labels: ArrayView1<'_, Label>,
        mut gradients: ArrayViewMut1<'_, Score>,
        mut hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        check_lengths(&scores, &labels, &gradients, &hessians)?;

        Zip::from(&mut gradients)
            .and(&scores)
            .and(&labels)
            .par_for_each(|g, &p, &y| *g = p - y);
        hessians.fill(1.0);
        Ok(())
    }
}

/// Poisson deviance with log link. `g = e^p - y`, `h = e^p`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonLoss;

impl LossFunction for PoissonLoss {
    fn loss_type(&self) -> LossType {
        LossType::Poisson
    }

    fn name(&self) -> &'static str {
        "poisson"
    }

    fn default_metric(&self) -> MetricType {
        MetricType::PoissonDeviance
    }

    fn validate_labels(&self, labels: ArrayView1<'_, Label>) -> Result<()> {
        check_label_support(labels, self.name(), ">= 0", |y| y >= 0.0)
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
                let mu = p.exp();
                *g = mu - y;
                *h = mu;
            });
        Ok(())
    }
}

/// Gamma deviance with log link. `g = 1 - y e^{-p}`, `h = y e^{-p}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaLoss;

impl LossFunction for GammaLoss {
    fn loss_type(&self) -> LossType {
        LossType::Gamma
    }

    fn name(&self) -> &'static str {
        "gamma"
    }

    fn default_metric(&self) -> MetricType {
        MetricType::GammaDeviance
    }

    fn validate_labels(&self, labels: ArrayView1<'_, Label>) -> Result<()> {
        check_label_support(labels, self.name(), "> 0", |y| y > 0.0)
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
                let ratio = y * (-p).exp();
                *g = 1.0 - ratio;
                *h = ratio;
            });
        Ok(())
    }
}

/// Tweedie deviance with log link and variance power `rho` in `(1, 2)`.
#[derive(Debug, Clone, Copy)]
pub struct TweedieLoss {
    rho: f64,
}

impl TweedieLoss {
    /// Create a Tweedie loss with the given variance power.
    pub fn new(rho: f64) -> Self {
        TweedieLoss { rho }
    }

    /// Variance power.
    pub fn power(&self) -> f64 {
        self.rho
    }
}

impl LossFunction for TweedieLoss {
    fn loss_type(&self) -> LossType {
        LossType::Tweedie
    }

    fn name(&self) -> &'static str {
        "tweedie"
    }

    fn default_metric(&self) -> MetricType {
        MetricType::TweedieDeviance
    }

    fn validate_labels(&self, labels: ArrayView1<'_, Label>) -> Result<()> {
        check_label_support(labels, self.name(), ">= 0", |y| y >= 0.0)
    }

    fn compute_gradients(
        &self,
        scores: ArrayView1<'_, Score>,
        labels: ArrayView1<'_, Label>,
        gradients: ArrayViewMut1<'_, Score>,
        hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        check_lengths(&scores, &labels, &gradients, &hessians)?;

        let rho = self.rho;
        Zip::from(gradients)
            .and(hessians)
            .and(&scores)
            .and(&labels)
            .par_for_each(|g, h, &p, &y| {
                let a = ((1.0 - rho) * p).exp();
                let b = ((2.0 - rho) * p).exp();
                *g = -y * a + b;
                *h = -(1.0 - rho) * y * a + (2.0 - rho) * b;
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    fn gradients_of(loss: &dyn LossFunction, scores: &Array1<f64>, labels: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
        let mut g = Array1::zeros(scores.len());
        let mut h = Array1::zeros(scores.len());
        loss.compute_gradients(scores.view(), labels.view(), g.view_mut(), h.view_mut())
            .unwrap();
        (g, h)
    }

    #[test]
    fn test_mse_gradients() {
        let (g, h) = gradients_of(&MseLoss, &array![1.0, 2.0, 3.0], &array![1.5, 2.0, 2.0]);
        assert_eq!(g, array![-0.5, 0.0, 1.0]);
        assert_eq!(h, array![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_poisson_gradients() {
        let (g, h) = gradients_of(&PoissonLoss, &array![0.0, 1.0], &array![2.0, 0.0]);
        assert_relative_eq!(g[0], -1.0);
        assert_relative_eq!(h[0], 1.0);
        assert_relative_eq!(g[1], 1f64.exp());
        assert_relative_eq!(h[1], 1f64.exp());
    }

    #[test]
    fn test_gamma_gradients() {
        let (g, h) = gradients_of(&GammaLoss, &array![0.0, 2f64.ln()], &array![3.0, 1.0]);
        assert_relative_eq!(g[0], -2.0);
        assert_relative_eq!(h[0], 3.0);
        assert_relative_eq!(g[1], 0.5);
        assert_relative_eq!(h[1], 0.5);
    }

    #[test]
    fn test_tweedie_gradients_at_zero_score() {
        let loss = TweedieLoss::new(1.5);
        let (g, h) = gradients_of(&loss, &array![0.0], &array![2.0]);
        assert_relative_eq!(g[0], -1.0);
        assert_relative_eq!(h[0], 0.5 * 2.0 + 0.5);
    }

    #[test]
    fn test_tweedie_gradient_matches_finite_difference() {
        let loss = TweedieLoss::new(1.3);
        let y = 1.7;
        let rho = 1.3;
        let objective = |p: f64| -y * ((1.0 - rho) * p).exp() / (1.0 - rho) + ((2.0 - rho) * p).exp() / (2.0 - rho);

        let p = 0.4;
        let eps = 1e-6;
        let numeric = (objective(p + eps) - objective(p - eps)) / (2.0 * eps);
        let (g, _) = gradients_of(&loss, &array![p], &array![y]);
        assert_relative_eq!(g[0], numeric, epsilon = 1e-6);
    }

    #[test]
    fn test_label_support() {
        assert!(PoissonLoss.validate_labels(array![0.0, 3.0].view()).is_ok());
        assert!(PoissonLoss.validate_labels(array![-1.0].view()).is_err());
        assert!(GammaLoss.validate_labels(array![0.0].view()).is_err());
        assert!(TweedieLoss::new(1.5).validate_labels(array![0.0, 1.0].view()).is_ok());

        let err = GammaLoss.validate_labels(array![1.0, -2.0].view()).unwrap_err();
        assert_eq!(err.category(), "dataset");
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_length_mismatch() {
        let scores = array![0.0, 1.0];
        let labels = array![0.0];
        let mut g = Array1::zeros(2);
        let mut h = Array1::zeros(2);
        assert!(MseLoss
            .compute_gradients(scores.view(), labels.view(), g.view_mut(), h.view_mut())
            .is_err());
    }
}
