//! The fitted linear model.

use crate::core::constants::LINEAR_BOOST_VERSION;
use crate::core::error::Result;
use crate::core::types::*;
use crate::prediction::{self, Link};

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Provenance recorded when a model is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Boosting rounds run before the model was returned
    pub rounds_trained: IterationIndex,
    /// Round whose weights the model holds
    pub best_round: IterationIndex,
    /// Crate version that produced the model
    pub version: String,
}

impl ModelMetadata {
    pub(crate) fn new(rounds_trained: IterationIndex, best_round: IterationIndex) -> Self {
        ModelMetadata {
            created_at: chrono::Utc::now(),
            rounds_trained,
            best_round,
            version: LINEAR_BOOST_VERSION.to_string(),
        }
    }
}

/// Bias plus one weight per feature, and the loss needed to project scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    loss: LossType,
    tweedie_power: f64,
    bias: f64,
    weights: Array1<f64>,
    metadata: ModelMetadata,
}

impl LinearModel {
    /// The untrained model: zero bias and zero weights.
    pub(crate) fn zeros(loss: LossType, tweedie_power: f64, num_features: usize) -> Self {
        LinearModel {
            loss,
            tweedie_power,
            bias: 0.0,
            weights: Array1::zeros(num_features),
            metadata: ModelMetadata::new(0, 0),
        }
    }

    pub(crate) fn with_metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub(crate) fn bias_mut(&mut self) -> &mut f64 {
        &mut self.bias
    }

    pub(crate) fn weights_mut(&mut self) -> &mut Array1<f64> {
        &mut self.weights
    }

    /// Loss the model was fitted with.
    pub fn loss(&self) -> LossType {
        self.loss
    }

    /// Tweedie variance power recorded at fit time.
    pub fn tweedie_power(&self) -> f64 {
        self.tweedie_power
    }

    /// Intercept.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Per-feature weights.
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Number of features the model expects.
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    /// Number of weights that are exactly zero.
    pub fn num_zero_weights(&self) -> usize {
        self.weights.iter().filter(|&&w| w == 0.0).count()
    }

    /// Inverse link of the model's loss.
    pub fn link(&self) -> Link {
        Link::from_loss(self.loss)
    }

    /// Build metadata.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Linear scores when `proj` is false, projected predictions otherwise.
    pub fn predict(&self, features: ArrayView2<'_, f64>, proj: bool) -> Result<Array1<Score>> {
        if proj {
            prediction::predict_proj(self, features)
        } else {
            prediction::predict_linear(self, features)
        }
    }
}

impl PartialEq for LinearModel {
    fn eq(&self, other: &Self) -> bool {
        self.loss == other.loss
            && self.tweedie_power == other.tweedie_power
            && self.bias == other.bias
            && self.weights == other.weights
    }
}

static_assertions::assert_impl_all!(LinearModel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_zero_model() {
        let model = LinearModel::zeros(LossType::Poisson, 1.5, 3);
        assert_eq!(model.num_features(), 3);
        assert_eq!(model.bias(), 0.0);
        assert_eq!(model.num_zero_weights(), 3);
        assert_eq!(model.link(), Link::Exp);
        assert_eq!(model.metadata().rounds_trained, 0);
    }

    #[test]
    fn test_equality_ignores_metadata() {
        let a = LinearModel::zeros(LossType::Mse, 1.5, 2);
        let b = LinearModel::zeros(LossType::Mse, 1.5, 2).with_metadata(ModelMetadata::new(5, 3));
        assert_eq!(a, b);

        let mut c = a.clone();
        c.weights_mut()[0] = 1.0;
        assert_ne!(a, c);
    }

    #[test]
    fn test_predict_switch() {
        let mut model = LinearModel::zeros(LossType::Poisson, 1.5, 1);
        *model.bias_mut() = 1.0;
        let x = array![[0.0]];

        assert_eq!(model.predict(x.view(), false).unwrap()[0], 1.0);
        assert_eq!(model.predict(x.view(), true).unwrap()[0], 1f64.exp());
    }
}
