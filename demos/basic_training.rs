//! Basic training example for linear-boost.
//!
//! Fits squared-error, logistic and Poisson models on small synthetic data,
//! prints the metric trace summary, and saves and reloads a model.
//!
//! Run with: `cargo run --example basic_training`

use linear_boost::*;
use ndarray::{Array1, Array2};

fn main() -> Result<()> {
    linear_boost::init()?;

    println!("linear-boost {} - Basic Training Example", VERSION);
    println!("=========================================");

    run_regression_example()?;
    run_classification_example()?;
    run_poisson_example()?;

    println!("All examples completed successfully!");
    Ok(())
}

/// Deterministic features in `[-1, 1)` without a random number generator.
fn synthetic_features(num_samples: usize, num_features: usize) -> Array2<f64> {
    Array2::from_shape_fn((num_samples, num_features), |(i, j)| {
        let k = (i * 7919 + j * 104_729) % 1000;
        k as f64 / 500.0 - 1.0
    })
}

fn run_regression_example() -> Result<()> {
    println!("1. Squared-error regression");
    println!("---------------------------");

    let x = synthetic_features(500, 3);
    let y: Array1<f64> = x
        .rows()
        .into_iter()
        .map(|r| 0.5 + 2.0 * r[0] - 1.0 * r[1] + 0.25 * r[2])
        .collect();
    let train = Dataset::new(x, y, None)?;

    let config = ConfigBuilder::new().nrounds(50).l2(0.001).build()?;
    let options = FitOptions::new().with_metric(MetricType::Rmse).with_print_every_n(10);
    let outcome = Fitter::new(config, options)?.fit_with_trace(&train, None)?;

    print_outcome(&outcome);
    Ok(())
}

fn run_classification_example() -> Result<()> {
    println!("2. Logistic regression");
    println!("----------------------");

    let x = synthetic_features(500, 2);
    let y: Array1<f64> = x
        .rows()
        .into_iter()
        .map(|r| if 1.5 * r[0] - r[1] > 0.0 { 1.0 } else { 0.0 })
        .collect();
    let train = Dataset::new(x, y, None)?;

    let config = ConfigBuilder::new()
        .loss(LossType::Logistic)
        .nrounds(30)
        .eta(0.5)
        .l2(0.01)
        .build()?;
    let options = FitOptions::new().with_metric(MetricType::Logloss).with_print_every_n(10);
    let outcome = Fitter::new(config, options)?.fit_with_trace(&train, None)?;
    print_outcome(&outcome);

    let predictor = Predictor::new(outcome.model, PredictionConfig::new());
    println!("  P(y = 1 | x = [0.8, -0.2]) = {:.4}", predictor.predict_row(&[0.8, -0.2])?);
    println!();
    Ok(())
}

fn run_poisson_example() -> Result<()> {
    println!("3. Poisson regression with model persistence");
    println!("--------------------------------------------");

    let x = synthetic_features(400, 2);
    let y = x.column(0).mapv(|v| (0.3 + 0.6 * v).exp());
    let train = Dataset::new(x.clone(), y, None)?;

    let config = ConfigBuilder::new()
        .loss(LossType::Poisson)
        .nrounds(100)
        .metric(MetricType::PoissonDeviance)
        .build()?;
    let model = linear_boost::fit(&config, &train, None, &FitOptions::new().with_print_every_n(25))?;

    let path = std::env::temp_dir().join("linear_boost_poisson.json");
    save_model(&model, &path)?;
    let loaded = load_model(&path)?;
    std::fs::remove_file(&path)?;

    let mu = predict_proj(&loaded, x.view())?;
    println!("  bias = {:.4}, weights = {}", loaded.bias(), loaded.weights());
    println!("  first predicted means: {:.4}", mu.slice(ndarray::s![..3]));
    println!();
    Ok(())
}

fn print_outcome(outcome: &FitOutcome) {
    let model = &outcome.model;
    println!("  bias = {:.4}", model.bias());
    println!("  weights = {:.4}", model.weights());
    if let Some(trace) = &outcome.trace {
        if let (Some(first), Some(best)) = (trace.records().first(), trace.records().get(outcome.best_round)) {
            println!(
                "  {}: {:.6} -> {:.6} (best round {}{})",
                trace.metric(),
                first.train,
                best.train,
                outcome.best_round,
                if outcome.stopped_early { ", stopped early" } else { "" }
            );
        }
    }
    println!();
}
