//! Core dataset structure for linear-boost.
//!
//! A [`Dataset`] owns a dense `f64` feature matrix, the target vector and the
//! observation weights. Shapes and values are checked once on construction so
//! the fitter can index freely afterwards.

use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Training or evaluation data: `x`, `y` and `w`.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix (num_data × num_features)
    features: Array2<f64>,
    /// Target values (num_data,)
    labels: Array1<Label>,
    /// Observation weights, all ones when not supplied
    weights: Array1<Weight>,
    /// Whether weights were supplied by the caller
    weighted: bool,
    /// Total weight, cached
    weight_sum: f64,
    /// Optional column names
    feature_names: Option<Vec<String>>,
}

impl Dataset {
    /// Create a new dataset from arrays.
    ///
    /// Fails with `DimensionMismatch` when `labels` or `weights` do not have
    /// one entry per row, and with a dataset error for empty input,
    /// non-finite values, negative weights or a zero weight sum.
    pub fn new(
        features: Array2<f64>,
        labels: Array1<Label>,
        weights: Option<Array1<Weight>>,
    ) -> Result<Self> {
        let num_data = features.nrows();
        let num_features = features.ncols();

        if labels.len() != num_data {
            return Err(LinearBoostError::dimension_mismatch(
                format!("features rows: {}", num_data),
                format!("labels length: {}", labels.len()),
            ));
        }

        if let Some(ref weights) = weights {
            if weights.len() != num_data {
                return Err(LinearBoostError::dimension_mismatch(
                    format!("features rows: {}", num_data),
                    format!("weights length: {}", weights.len()),
                ));
            }
        }

        if num_data == 0 {
            return Err(LinearBoostError::dataset("Dataset has no observations"));
        }
        if num_features == 0 {
            return Err(LinearBoostError::dataset("Dataset has no features"));
        }

        if let Some(((row, col), _)) = features.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(crate::dataset_error!(
                "Non-finite feature value at row {}, column {}",
                row,
                col
            ));
        }
        if let Some(row) = labels.iter().position(|v| !v.is_finite()) {
            return Err(crate::dataset_error!("Non-finite label at row {}", row));
        }

        let weighted = weights.is_some();
        let weights = weights.unwrap_or_else(|| Array1::ones(num_data));

        if let Some(row) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(crate::dataset_error!(
                "Weight at row {} must be finite and non-negative, got {}",
                row,
                weights[row]
            ));
        }

        let weight_sum = weights.sum();
        if weight_sum <= 0.0 {
            return Err(LinearBoostError::dataset("Weights must have a positive sum"));
        }

        Ok(Dataset {
            features,
            labels,
            weights,
            weighted,
            weight_sum,
            feature_names: None,
        })
    }

    /// Attach column names. The name count must match the feature count.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.num_features() {
            return Err(LinearBoostError::dimension_mismatch(
                format!("features columns: {}", self.num_features()),
                format!("feature names length: {}", names.len()),
            ));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Number of observations
    pub fn num_data(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Feature matrix view
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Target view
    pub fn labels(&self) -> ArrayView1<'_, Label> {
        self.labels.view()
    }

    /// Weight view (all ones when none were supplied)
    pub fn weights(&self) -> ArrayView1<'_, Weight> {
        self.weights.view()
    }

    /// Whether the caller supplied weights
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Sum of weights, always positive
    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// Column names, if attached
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Check that another dataset can be scored against models fitted on
    /// this one.
    pub fn check_compatible(&self, other: &Dataset) -> Result<()> {
        if other.num_features() != self.num_features() {
            return Err(LinearBoostError::dimension_mismatch(
                format!("{} features", self.num_features()),
                format!("{} features in evaluation data", other.num_features()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dataset_creation() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let labels = array![1.0, 0.0, 1.0];
        let dataset = Dataset::new(features, labels, None).unwrap();

        assert_eq!(dataset.num_data(), 3);
        assert_eq!(dataset.num_features(), 2);
        assert!(!dataset.is_weighted());
        assert_eq!(dataset.weight_sum(), 3.0);
        assert!(dataset.weights().iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_label_length_mismatch() {
        let features = array![[1.0], [2.0]];
        let labels = array![1.0, 2.0, 3.0];
        let err = Dataset::new(features, labels, None).unwrap_err();
        assert!(matches!(err, LinearBoostError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_weight_length_mismatch() {
        let features = array![[1.0], [2.0]];
        let labels = array![1.0, 2.0];
        let err = Dataset::new(features, labels, Some(array![1.0])).unwrap_err();
        assert!(matches!(err, LinearBoostError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_empty_dataset() {
        let features = Array2::<f64>::zeros((0, 3));
        let labels = Array1::<f64>::zeros(0);
        let err = Dataset::new(features, labels, None).unwrap_err();
        assert_eq!(err.category(), "dataset");
    }

    #[test]
    fn test_non_finite_values() {
        let features = array![[1.0, f64::NAN], [2.0, 3.0]];
        assert!(Dataset::new(features, array![0.0, 1.0], None).is_err());

        let features = array![[1.0], [2.0]];
        assert!(Dataset::new(features, array![f64::INFINITY, 1.0], None).is_err());
    }

    #[test]
    fn test_bad_weights() {
        let features = array![[1.0], [2.0]];
        let labels = array![1.0, 2.0];
        assert!(Dataset::new(features.clone(), labels.clone(), Some(array![1.0, -1.0])).is_err());
        assert!(Dataset::new(features.clone(), labels.clone(), Some(array![0.0, 0.0])).is_err());

        let dataset = Dataset::new(features, labels, Some(array![0.0, 2.0])).unwrap();
        assert!(dataset.is_weighted());
        assert_eq!(dataset.weight_sum(), 2.0);
    }

    #[test]
    fn test_feature_names() {
        let features = array![[1.0, 2.0]];
        let dataset = Dataset::new(features, array![1.0], None).unwrap();
        assert!(dataset
            .clone()
            .with_feature_names(vec!["a".to_string()])
            .is_err());

        let named = dataset
            .with_feature_names(vec!["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(named.feature_names().unwrap()[1], "b");
    }

    #[test]
    fn test_compatibility() {
        let train = Dataset::new(array![[1.0, 2.0]], array![1.0], None).unwrap();
        let eval = Dataset::new(array![[1.0]], array![1.0], None).unwrap();
        assert!(matches!(
            train.check_compatible(&eval),
            Err(LinearBoostError::DimensionMismatch { .. })
        ));
    }
}
