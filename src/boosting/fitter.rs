//! The linear boosting loop.
//!
//! [`Fitter`] starts from the zero model and, each round, takes one
//! coordinate step for every feature weight and then one for the bias.
//! When a metric is available it evaluates train (and eval) data after every
//! round, records a [`MetricTrace`] and stops early once the monitored value
//! stalls, returning the best model seen.

use super::early_stopping::{EarlyStopping, EarlyStoppingConfig};
use super::updater::{CoordinateUpdater, UpdateConfig};
use crate::config::{Config, ConfigValidator, DatasetInfo, ValidationContext};
use crate::core::constants::*;
use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;
use crate::dataset::Dataset;
use crate::metrics::{evaluate_metric, MetricDirection};
use crate::model::{LinearModel, ModelMetadata};
use crate::objective::{create_loss_function, LossFunction};
use crate::prediction;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Per-call fitting options.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Metric to track; falls back to the configuration's metric
    pub metric: Option<MetricType>,
    /// Log progress every this many rounds (0 disables)
    pub print_every_n: usize,
    /// Minimum improvement of the monitored metric
    pub tol: f64,
    /// Non-improving rounds tolerated before stopping
    pub early_stopping_rounds: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            metric: None,
            print_every_n: DEFAULT_PRINT_EVERY_N,
            tol: DEFAULT_TOLERANCE,
            early_stopping_rounds: DEFAULT_EARLY_STOPPING_ROUNDS,
        }
    }
}

impl FitOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `metric`.
    pub fn with_metric(mut self, metric: MetricType) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the progress logging period.
    pub fn with_print_every_n(mut self, n: usize) -> Self {
        self.print_every_n = n;
        self
    }

    /// Set the minimum improvement.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the early stopping patience.
    pub fn with_early_stopping_rounds(mut self, rounds: usize) -> Self {
        self.early_stopping_rounds = rounds;
        self
    }

    /// Reject a negative or non-finite `tol` and a zero patience.
    pub fn validate(&self) -> Result<()> {
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(LinearBoostError::invalid_parameter(
                "tol",
                self.tol.to_string(),
                "must be finite and non-negative",
            ));
        }
        crate::ensure!(
            self.early_stopping_rounds > 0,
            LinearBoostError::invalid_parameter("early_stopping_rounds", "0", "must be a positive integer")
        );
        Ok(())
    }
}

/// Metric values after one round. Round 0 is the untrained baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Round number
    pub round: IterationIndex,
    /// Metric on the training data
    pub train: f64,
    /// Metric on the evaluation data, when given
    pub eval: Option<f64>,
}

impl MetricRecord {
    /// The value early stopping watches: eval when present, else train.
    pub fn monitored(&self) -> f64 {
        self.eval.unwrap_or(self.train)
    }
}

/// Ordered metric history of one fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrace {
    metric: MetricType,
    records: Vec<MetricRecord>,
}

impl MetricTrace {
    fn new(metric: MetricType) -> Self {
        MetricTrace {
            metric,
            records: Vec::new(),
        }
    }

    /// Metric being tracked.
    pub fn metric(&self) -> MetricType {
        self.metric
    }

    /// Records in round order.
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Number of records, including the baseline.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&MetricRecord> {
        self.records.last()
    }
}

/// Everything a fit produces.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    /// Model from the best round (the last round when no metric is tracked)
    pub model: LinearModel,
    /// Metric history, when a metric was tracked
    pub trace: Option<MetricTrace>,
    /// Round whose weights `model` holds
    pub best_round: IterationIndex,
    /// Whether early stopping ended the fit
    pub stopped_early: bool,
}

/// Runs linear boosting for one configuration.
#[derive(Debug)]
pub struct Fitter {
    config: Config,
    options: FitOptions,
    objective: Box<dyn LossFunction>,
    updater: CoordinateUpdater,
}

impl Fitter {
    /// Validate `config` and `options` and prepare a fitter.
    pub fn new(config: Config, options: FitOptions) -> Result<Self> {
        config.validate()?;
        options.validate()?;

        if let Some(metric) = options.metric.or(config.metric()) {
            crate::ensure!(
                metric.supports_loss(config.loss()),
                LinearBoostError::invalid_parameter(
                    "metric",
                    metric.to_string(),
                    format!("is undefined for the {} loss", config.loss()),
                )
            );
        }

        let objective = create_loss_function(&config);
        let updater = CoordinateUpdater::new(config.updater(), UpdateConfig::from_config(&config));

        Ok(Fitter {
            config,
            options,
            objective,
            updater,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Options in use.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit for the configured number of rounds and return the model.
    pub fn fit(&self, train: &Dataset, eval: Option<&Dataset>) -> Result<LinearModel> {
        Ok(self.fit_with_trace(train, eval)?.model)
    }

    /// Fit for the configured number of rounds.
    pub fn fit_with_trace(&self, train: &Dataset, eval: Option<&Dataset>) -> Result<FitOutcome> {
        self.fit_rounds(train, eval, self.config.nrounds())
    }

    /// Fit for an explicit number of rounds. Zero rounds yields the zero
    /// model.
    pub fn fit_rounds(
        &self,
        train: &Dataset,
        eval: Option<&Dataset>,
        rounds: usize,
    ) -> Result<FitOutcome> {
        self.check_inputs(train, eval)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.effective_num_threads())
            .build()
            .map_err(|e| LinearBoostError::threading(format!("Failed to build thread pool: {}", e)))?;

        pool.install(|| self.run(train, eval, rounds))
    }

    fn check_inputs(&self, train: &Dataset, eval: Option<&Dataset>) -> Result<()> {
        self.objective.validate_labels(train.labels())?;
        if let Some(eval) = eval {
            train.check_compatible(eval)?;
            self.objective.validate_labels(eval.labels())?;
        }

        let context = ValidationContext {
            dataset_info: Some(DatasetInfo {
                num_samples: train.num_data(),
                num_features: train.num_features(),
            }),
        };
        ConfigValidator::new()
            .with_context(context)
            .log_warnings(&self.config)?;
        Ok(())
    }

    fn run(&self, train: &Dataset, eval: Option<&Dataset>, rounds: usize) -> Result<FitOutcome> {
        let metric = self.options.metric.or(self.config.metric());
        if metric.is_none() && eval.is_some() {
            log::warn!("Evaluation data supplied without a metric; it will not be scored");
        }

        let verbosity = self.config.verbosity();
        if verbosity.shows_progress() {
            log::info!(
                "Fitting {} loss on {} observations x {} features for up to {} rounds",
                self.objective.name(),
                train.num_data(),
                train.num_features(),
                rounds
            );
        }

        let mut model = LinearModel::zeros(
            self.config.loss(),
            self.config.tweedie_power(),
            train.num_features(),
        );
        let mut state = RoundState::new(train.num_data());
        state.scores = prediction::predict_linear(&model, train.features())?;

        let mut trace = metric.map(MetricTrace::new);
        let mut monitor = metric.map(|m| {
            EarlyStopping::new(EarlyStoppingConfig {
                patience: self.options.early_stopping_rounds,
                min_delta: self.options.tol,
                direction: MetricDirection::of(m),
                verbose: verbosity.shows_progress(),
            })
        });

        let mut best_model = model.clone();
        let mut rounds_trained = 0;
        let mut stopped_early = false;

        if let (Some(metric), Some(trace), Some(monitor)) = (metric, trace.as_mut(), monitor.as_mut()) {
            let record = self.evaluate(metric, 0, &model, &state, train, eval)?;
            self.log_record(metric, &record);
            trace.records.push(record);
            monitor.update(record.monitored(), 0);
        }

        for round in 1..=rounds {
            self.boost_round(&mut model, &mut state, train, round)?;
            rounds_trained = round;

            if let (Some(metric), Some(trace), Some(monitor)) = (metric, trace.as_mut(), monitor.as_mut()) {
                let record = self.evaluate(metric, round, &model, &state, train, eval)?;
                self.log_record(metric, &record);
                trace.records.push(record);

                let stop = monitor.update(record.monitored(), round);
                if monitor.best_iteration() == round {
                    best_model = model.clone();
                }
                if stop {
                    stopped_early = true;
                    break;
                }
            }
        }

        let (mut model, best_round) = match monitor {
            Some(ref monitor) => (best_model, monitor.best_iteration()),
            None => (model, rounds_trained),
        };
        model = model.with_metadata(ModelMetadata::new(rounds_trained, best_round));

        if verbosity.shows_progress() {
            log::info!(
                "Finished after {} rounds, keeping round {}{}",
                rounds_trained,
                best_round,
                if stopped_early { " (early stop)" } else { "" }
            );
        }

        Ok(FitOutcome {
            model,
            trace,
            best_round,
            stopped_early,
        })
    }

    /// One feature pass followed by one bias step.
    fn boost_round(
        &self,
        model: &mut LinearModel,
        state: &mut RoundState,
        train: &Dataset,
        round: IterationIndex,
    ) -> Result<()> {
        self.objective.compute_gradients(
            state.scores.view(),
            train.labels(),
            state.gradients.view_mut(),
            state.hessians.view_mut(),
        )?;

        let deltas = self.updater.compute_weight_deltas(
            train.features(),
            state.gradients.view(),
            state.hessians.view(),
            train.weights(),
            model.weights(),
            train.weight_sum(),
        );
        if deltas.iter().any(|d| !d.is_finite()) {
            return Err(LinearBoostError::numerical(format!(
                "Non-finite weight step in round {}",
                round
            )));
        }
        *model.weights_mut() += &deltas;
        state.scores = prediction::predict_linear(model, train.features())?;

        self.objective.compute_gradients(
            state.scores.view(),
            train.labels(),
            state.gradients.view_mut(),
            state.hessians.view_mut(),
        )?;
        let bias_delta =
            self.updater
                .compute_bias_delta(state.gradients.view(), state.hessians.view(), train.weights());
        *model.bias_mut() += bias_delta;
        state.scores = prediction::predict_linear(model, train.features())?;

        if state.scores.iter().any(|s| !s.is_finite()) {
            return Err(LinearBoostError::numerical(format!(
                "Scores became non-finite in round {}",
                round
            )));
        }

        if self.config.verbosity().shows_internals() {
            log::debug!(
                "Round {}: |dw| = {:.6e}, db = {:.6e}, zero weights = {}",
                round,
                deltas.dot(&deltas).sqrt(),
                bias_delta,
                model.num_zero_weights()
            );
        }
        Ok(())
    }

    fn evaluate(
        &self,
        metric: MetricType,
        round: IterationIndex,
        model: &LinearModel,
        state: &RoundState,
        train: &Dataset,
        eval: Option<&Dataset>,
    ) -> Result<MetricRecord> {
        let link = model.link();
        let mu = state.scores.mapv(|s| link.apply(s));
        let train_value = evaluate_metric(
            metric,
            mu.view(),
            train.labels(),
            train.weights(),
            self.config.tweedie_power(),
        )?;

        let eval_value = match eval {
            Some(eval) => {
                let mu = prediction::predict_proj(model, eval.features())?;
                Some(evaluate_metric(
                    metric,
                    mu.view(),
                    eval.labels(),
                    eval.weights(),
                    self.config.tweedie_power(),
                )?)
            }
            None => None,
        };

        Ok(MetricRecord {
            round,
            train: train_value,
            eval: eval_value,
        })
    }

    fn log_record(&self, metric: MetricType, record: &MetricRecord) {
        let n = self.options.print_every_n;
        if n == 0 || record.round % n != 0 || !self.config.verbosity().shows_progress() {
            return;
        }
        match record.eval {
            Some(eval) => log::info!(
                "[{}] train-{}: {:.6}  eval-{}: {:.6}",
                record.round,
                metric,
                record.train,
                metric,
                eval
            ),
            None => log::info!("[{}] train-{}: {:.6}", record.round, metric, record.train),
        }
    }
}

/// Per-observation buffers reused across rounds.
struct RoundState {
    scores: Array1<Score>,
    gradients: Array1<Score>,
    hessians: Array1<Score>,
}

impl RoundState {
    fn new(num_data: usize) -> Self {
        RoundState {
            scores: Array1::zeros(num_data),
            gradients: Array1::zeros(num_data),
            hessians: Array1::zeros(num_data),
        }
    }
}
