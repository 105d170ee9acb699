//! Common test utilities and helpers

#![allow(dead_code)]

use linear_boost::*;
use ndarray::{Array1, Array2, Axis};
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// Uniform features in `[low, high)`.
pub fn create_test_features(
    num_samples: usize,
    num_features: usize,
    low: f64,
    high: f64,
    seed: u64,
) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Array2::zeros((num_samples, num_features));

    for i in 0..num_samples {
        for j in 0..num_features {
            features[[i, j]] = rng.gen_range(low..high);
        }
    }

    features
}

/// Subtract each column's mean.
pub fn center_columns(features: &Array2<f64>) -> Array2<f64> {
    let means = features.mean_axis(Axis(0)).expect("non-empty features");
    features - &means
}

/// `bias + x . coef` for every row.
pub fn linear_scores(features: &Array2<f64>, coef: &[f64], bias: f64) -> Array1<f64> {
    features.dot(&Array1::from(coef.to_vec())) + bias
}

/// Uniform noise in `[-scale, scale)` added to `labels`.
pub fn add_noise(labels: &Array1<f64>, scale: f64, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    labels.mapv(|y| y + rng.gen_range(-scale..scale))
}

/// 0/1 labels drawn with probability `sigmoid(bias + x . coef)`.
pub fn create_binary_labels(features: &Array2<f64>, coef: &[f64], bias: f64, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    linear_scores(features, coef, bias).mapv(|s| {
        let p = 1.0 / (1.0 + (-s).exp());
        if rng.gen::<f64>() < p {
            1.0
        } else {
            0.0
        }
    })
}

/// Exact log-link means `exp(bias + x . coef)`.
pub fn create_log_link_targets(features: &Array2<f64>, coef: &[f64], bias: f64) -> Array1<f64> {
    linear_scores(features, coef, bias).mapv(f64::exp)
}

/// Observation weights in `[0.1, 2.0)`.
pub fn create_test_weights(num_samples: usize, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from_shape_fn(num_samples, |_| rng.gen_range(0.1..2.0))
}

/// Regression set with `y = 1 + 2 x0 - x1 + 0.5 x2 + noise`.
pub fn create_regression_dataset(num_samples: usize, seed: u64) -> Dataset {
    let features = create_test_features(num_samples, 3, -1.0, 1.0, seed);
    let labels = linear_scores(&features, &REGRESSION_COEF, REGRESSION_BIAS);
    let labels = add_noise(&labels, 0.05, seed + 1);
    Dataset::new(features, labels, None).expect("valid regression dataset")
}

/// True coefficients behind [`create_regression_dataset`].
pub const REGRESSION_COEF: [f64; 3] = [2.0, -1.0, 0.5];

/// True intercept behind [`create_regression_dataset`].
pub const REGRESSION_BIAS: f64 = 1.0;

/// Write a CSV with `feature_i` columns followed by `target` and, when
/// given, `weight`.
pub fn create_test_csv<P: AsRef<Path>>(
    path: P,
    features: &Array2<f64>,
    labels: &Array1<f64>,
    weights: Option<&Array1<f64>>,
) -> std::io::Result<()> {
    let num_features = features.ncols();
    let mut content = String::new();

    let names: Vec<String> = (0..num_features).map(|i| format!("feature_{}", i)).collect();
    content.push_str(&names.join(","));
    content.push_str(",target");
    if weights.is_some() {
        content.push_str(",weight");
    }
    content.push('\n');

    for i in 0..features.nrows() {
        let row: Vec<String> = (0..num_features).map(|j| features[[i, j]].to_string()).collect();
        content.push_str(&row.join(","));
        content.push(',');
        content.push_str(&labels[i].to_string());
        if let Some(w) = weights {
            content.push(',');
            content.push_str(&w[i].to_string());
        }
        content.push('\n');
    }

    fs::write(path, content)
}

/// Fit options that keep test output quiet.
pub fn quiet_options() -> FitOptions {
    FitOptions::new().with_print_every_n(0)
}

/// Mean squared error of `predictions` against `labels`.
pub fn mse(predictions: &Array1<f64>, labels: &Array1<f64>) -> f64 {
    let diff = predictions - labels;
    diff.dot(&diff) / diff.len() as f64
}
