//! Prediction engine for linear-boost.

use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;
use crate::model::LinearModel;

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Configuration for prediction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Whether to return raw linear scores instead of projected values
    pub raw_score: bool,
}

impl PredictionConfig {
    /// Create a new prediction configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to return raw scores
    pub fn with_raw_score(mut self, raw_score: bool) -> Self {
        self.raw_score = raw_score;
        self
    }
}

/// Binds a fitted model to a prediction configuration.
#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictionConfig,
    model: LinearModel,
}

impl Predictor {
    /// Create a new predictor with the given model and configuration
    pub fn new(model: LinearModel, config: PredictionConfig) -> Self {
        Predictor { config, model }
    }

    /// Make predictions on features
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<Score>> {
        let result = self.model.predict(features, !self.config.raw_score)?;
        log::debug!(
            "Predicted {} rows ({})",
            result.len(),
            if self.config.raw_score { "raw" } else { "projected" }
        );
        Ok(result)
    }

    /// Predict a single observation.
    pub fn predict_row(&self, row: &[f64]) -> Result<Score> {
        let features = ArrayView2::from_shape((1, row.len()), row)
            .map_err(|e| LinearBoostError::prediction(format!("Invalid row shape: {}", e)))?;
        Ok(self.predict(features)?[0])
    }

    /// Prediction configuration
    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// The wrapped model
    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn logistic_model() -> LinearModel {
        let mut model = LinearModel::zeros(LossType::Logistic, 1.5, 2);
        model.weights_mut()[0] = 1.0;
        model.weights_mut()[1] = -1.0;
        model
    }

    #[test]
    fn test_predictor_projects_by_default() {
        let predictor = Predictor::new(logistic_model(), PredictionConfig::new());
        let x = array![[1.0, 1.0], [2.0, 0.0]];
        let preds = predictor.predict(x.view()).unwrap();
        assert_eq!(preds[0], 0.5);
        assert!(preds[1] > 0.5 && preds[1] < 1.0);
    }

    #[test]
    fn test_predictor_raw_score() {
        let predictor = Predictor::new(logistic_model(), PredictionConfig::new().with_raw_score(true));
        let preds = predictor.predict(array![[2.0, 0.0]].view()).unwrap();
        assert_eq!(preds[0], 2.0);
        assert!(predictor.config().raw_score);
    }

    #[test]
    fn test_predict_row() {
        let predictor = Predictor::new(logistic_model(), PredictionConfig::new().with_raw_score(true));
        assert_eq!(predictor.predict_row(&[3.0, 1.0]).unwrap(), 2.0);
        assert!(matches!(
            predictor.predict_row(&[1.0]),
            Err(LinearBoostError::DimensionMismatch { .. })
        ));
    }
}
