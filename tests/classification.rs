//! Logistic loss tests

use approx::assert_relative_eq;
use linear_boost::*;
use ndarray::{array, Array2};

mod common;
use common::*;

const LOGISTIC_COEF: [f64; 3] = [1.5, -1.0, 0.0];

fn binary_dataset(num_samples: usize, seed: u64) -> Dataset {
    let features = create_test_features(num_samples, 3, -2.0, 2.0, seed);
    let labels = create_binary_labels(&features, &LOGISTIC_COEF, 0.3, seed + 1);
    Dataset::new(features, labels, None).unwrap()
}

fn logistic_config(nrounds: usize) -> Config {
    ConfigBuilder::new()
        .loss(LossType::Logistic)
        .nrounds(nrounds)
        .eta(0.5)
        .build()
        .unwrap()
}

#[test]
fn test_logistic_learns_signal() {
    let train = binary_dataset(1000, 42);
    let options = quiet_options().with_metric(MetricType::Logloss);

    let outcome = Fitter::new(logistic_config(100), options)
        .unwrap()
        .fit_with_trace(&train, None)
        .unwrap();
    let model = outcome.model;

    let trace = outcome.trace.unwrap();
    assert_relative_eq!(trace.records()[0].train, std::f64::consts::LN_2, epsilon = 1e-12);
    assert!(trace.records()[outcome.best_round].train < 0.6);

    assert!(model.weights()[0] > 0.5);
    assert!(model.weights()[1] < -0.3);
    assert!(model.weights()[2].abs() < model.weights()[1].abs());

    let proba = predict_proj(&model, train.features()).unwrap();
    let correct = proba
        .iter()
        .zip(train.labels().iter())
        .filter(|(&p, &y)| (p >= 0.5) == (y == 1.0))
        .count();
    assert!(correct as f64 / train.num_data() as f64 > 0.7);
}

#[test]
fn test_probabilities_are_sigmoid_of_scores() {
    let train = binary_dataset(300, 7);
    let model = linear_boost::fit(&logistic_config(10), &train, None, &quiet_options()).unwrap();

    let scores = predict_linear(&model, train.features()).unwrap();
    let proba = predict_proj(&model, train.features()).unwrap();
    for (&s, &p) in scores.iter().zip(proba.iter()) {
        assert!(p > 0.0 && p < 1.0);
        assert_eq!(p, 1.0 / (1.0 + (-s).exp()));
    }
}

#[test]
fn test_eval_logloss_is_tracked() {
    let train = binary_dataset(600, 11);
    let eval = binary_dataset(300, 13);
    let options = quiet_options().with_metric(MetricType::Logloss);

    let outcome = Fitter::new(logistic_config(100), options)
        .unwrap()
        .fit_with_trace(&train, Some(&eval))
        .unwrap();

    let trace = outcome.trace.unwrap();
    let best = trace.records()[outcome.best_round];
    assert!(best.eval.unwrap() < trace.records()[0].eval.unwrap());
    assert_eq!(outcome.model.metadata().best_round, outcome.best_round);
}

#[test]
fn test_rejects_labels_outside_unit_interval() {
    let x = array![[0.0], [1.0], [2.0]];
    let train = Dataset::new(x, array![0.0, 1.0, 2.0], None).unwrap();

    let err = linear_boost::fit(&logistic_config(5), &train, None, &quiet_options()).unwrap_err();
    assert_eq!(err.category(), "dataset");
}

#[test]
fn test_rejects_eval_labels_outside_unit_interval() {
    let train = binary_dataset(50, 17);
    let eval = Dataset::new(Array2::zeros((2, 3)), array![0.0, 1.5], None).unwrap();

    let err = linear_boost::fit(&logistic_config(5), &train, Some(&eval), &quiet_options()).unwrap_err();
    assert_eq!(err.category(), "dataset");
}

#[test]
fn test_predictor_raw_and_projected() {
    let train = binary_dataset(200, 19);
    let model = linear_boost::fit(&logistic_config(5), &train, None, &quiet_options()).unwrap();

    let row = [0.5, -0.25, 1.0];
    let raw = Predictor::new(model.clone(), PredictionConfig::new().with_raw_score(true));
    let proj = Predictor::new(model, PredictionConfig::new());

    let s = raw.predict_row(&row).unwrap();
    let p = proj.predict_row(&row).unwrap();
    assert_eq!(p, Link::Sigmoid.apply(s));
}
