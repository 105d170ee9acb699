//! Prediction for fitted linear models.
//!
//! [`predict_linear`] returns `bias + x·w`. [`predict_proj`] passes the same
//! scores through the loss's inverse [`Link`], so the two always agree up to
//! that transform.

pub mod link;
pub mod predictor;

pub use link::Link;
pub use predictor::{PredictionConfig, Predictor};

use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;
use crate::model::LinearModel;

use ndarray::{Array1, ArrayView2};

/// Linear scores `bias + x·weights`, with no link applied.
pub fn predict_linear(model: &LinearModel, features: ArrayView2<'_, f64>) -> Result<Array1<Score>> {
    if features.ncols() != model.num_features() {
        return Err(LinearBoostError::dimension_mismatch(
            format!("{} feature columns", model.num_features()),
            format!("{} feature columns", features.ncols()),
        ));
    }

    let mut scores = features.dot(&model.weights());
    scores += model.bias();
    Ok(scores)
}

/// Projected predictions: [`predict_linear`] followed by the inverse link.
pub fn predict_proj(model: &LinearModel, features: ArrayView2<'_, f64>) -> Result<Array1<Score>> {
    let link = model.link();
    let mut scores = predict_linear(model, features)?;
    scores.mapv_inplace(|s| link.apply(s));
    Ok(scores)
}
