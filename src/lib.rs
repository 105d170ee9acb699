//! # linear-boost
//!
//! Linear boosting for generalised linear models. Each round refines one set
//! of per-feature weights and a bias with proximal Newton steps, under
//! squared-error, logistic, Poisson, Gamma or Tweedie loss, with optional L1
//! and L2 penalties.
//!
//! ## Quick Start
//!
//! ```rust
//! use linear_boost::{ConfigBuilder, Dataset, FitOptions, LossType, MetricType};
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> linear_boost::Result<()> {
//! let x = Array2::from_shape_fn((100, 2), |(i, j)| ((i * (j + 3)) % 17) as f64 / 17.0 - 0.5);
//! let y: Array1<f64> = x.rows().into_iter().map(|r| 1.0 + 2.0 * r[0] - r[1]).collect();
//! let train = Dataset::new(x.clone(), y, None)?;
//!
//! let config = ConfigBuilder::new()
//!     .loss(LossType::Mse)
//!     .nrounds(50)
//!     .l2(0.01)
//!     .build()?;
//! let options = FitOptions::new().with_metric(MetricType::Mse).with_print_every_n(0);
//!
//! let model = linear_boost::fit(&config, &train, None, &options)?;
//! let scores = linear_boost::predict_linear(&model, x.view())?;
//! let response = linear_boost::predict_proj(&model, x.view())?;
//! assert_eq!(scores, response);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: scalar types, enums, constants and the error type
//! - [`config`]: hyperparameters, builder, file/environment loading, validation
//! - [`dataset`]: feature matrix, targets and weights
//! - [`objective`]: gradients and hessians per loss
//! - [`metrics`]: weighted evaluation metrics
//! - [`boosting`]: the fitting loop, coordinate updater and early stopping
//! - [`model`]: the fitted linear model
//! - [`prediction`]: linear and projected prediction
//! - [`io`]: model persistence

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

pub mod core;

pub mod config;

pub mod dataset;

pub mod objective;

pub mod metrics;

pub mod model;

pub mod prediction;

pub mod boosting;

pub mod io;

// Re-export core functionality for convenience
pub use self::core::{
    constants::*,
    error::{LinearBoostError, Result},
    types::*,
};

pub use config::{Config, ConfigBuilder, ConfigValidator, ValidationResult};

pub use dataset::{Dataset, DatasetConfig};

pub use objective::{create_loss_function, LossFunction};

pub use metrics::{evaluate_metric, MetricDirection};

pub use model::{LinearModel, ModelMetadata};

pub use prediction::{predict_linear, predict_proj, Link, PredictionConfig, Predictor};

pub use boosting::{FitOptions, FitOutcome, Fitter, MetricRecord, MetricTrace};

pub use io::{load_model, save_model};

/// Crate version.
pub use self::core::constants::LINEAR_BOOST_VERSION as VERSION;

/// Initialise logging for the library.
///
/// Installs `env_logger` (defaulting `RUST_LOG` to `info`) unless another
/// logger is already registered. Calling it again is a no-op.
///
/// ```rust
/// fn main() -> linear_boost::Result<()> {
///     linear_boost::init()?;
///     assert!(linear_boost::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    self::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    self::core::is_core_initialized()
}

/// Fit a linear model.
///
/// `train` carries `x`, `y` and optional weights; `eval` is an optional
/// held-out set scored with the tracked metric after every round and used
/// for early stopping. See [`Fitter`] for the algorithm.
pub fn fit(
    config: &Config,
    train: &Dataset,
    eval: Option<&Dataset>,
    options: &FitOptions,
) -> Result<LinearModel> {
    Fitter::new(config.clone(), options.clone())?.fit(train, eval)
}
