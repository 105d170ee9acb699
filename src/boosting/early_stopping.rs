//! Early stopping for the boosting loop.
//!
//! The monitor is fed one metric value per round, starting with the
//! untrained baseline at round 0. It tracks the best value and the round it
//! was seen at, and trips once `patience` consecutive rounds fail to improve
//! on it by at least `min_delta`.

use crate::core::constants::{DEFAULT_EARLY_STOPPING_ROUNDS, DEFAULT_TOLERANCE};
use crate::core::types::IterationIndex;
use crate::metrics::MetricDirection;

/// Configuration for early stopping behavior.
#[derive(Debug, Clone)]
pub struct EarlyStoppingConfig {
    /// Number of non-improving rounds tolerated before stopping
    pub patience: usize,
    /// Minimum improvement over the best value that counts
    pub min_delta: f64,
    /// Whether lower or higher values are better
    pub direction: MetricDirection,
    /// Log when stopping triggers
    pub verbose: bool,
}

impl Default for EarlyStoppingConfig {
    fn default() -> Self {
        EarlyStoppingConfig {
            patience: DEFAULT_EARLY_STOPPING_ROUNDS,
            min_delta: DEFAULT_TOLERANCE,
            direction: MetricDirection::Minimize,
            verbose: true,
        }
    }
}

/// Tracks the monitored metric and decides when to stop training.
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    config: EarlyStoppingConfig,
    best_metric: Option<f64>,
    best_iteration: IterationIndex,
    patience_counter: usize,
    metric_history: Vec<f64>,
    stopped: bool,
}

impl EarlyStopping {
    /// Creates a new early stopping monitor with the given configuration.
    pub fn new(config: EarlyStoppingConfig) -> Self {
        EarlyStopping {
            config,
            best_metric: None,
            best_iteration: 0,
            patience_counter: 0,
            metric_history: Vec::new(),
            stopped: false,
        }
    }

    /// Record the metric for `iteration`. Returns true once stopping has
    /// been triggered.
    pub fn update(&mut self, metric: f64, iteration: IterationIndex) -> bool {
        if self.stopped {
            return true;
        }

        self.metric_history.push(metric);

        let improved = match self.best_metric {
            None => true,
            Some(best) => self
                .config
                .direction
                .improves(metric, best, self.config.min_delta),
        };

        if improved {
            self.best_metric = Some(metric);
            self.best_iteration = iteration;
            self.patience_counter = 0;
        } else {
            self.patience_counter += 1;
        }

        if self.patience_counter >= self.config.patience {
            self.stopped = true;
            if self.config.verbose {
                log::info!(
                    "Early stopping triggered at round {} (best was {} at round {})",
                    iteration,
                    self.best_metric.unwrap_or(metric),
                    self.best_iteration
                );
            }
        }

        self.stopped
    }

    /// Returns true if early stopping has been triggered.
    pub fn should_stop(&self) -> bool {
        self.stopped
    }

    /// Best value observed so far, if any.
    pub fn best_metric(&self) -> Option<f64> {
        self.best_metric
    }

    /// Round at which the best value was observed.
    pub fn best_iteration(&self) -> IterationIndex {
        self.best_iteration
    }

    /// Consecutive non-improving rounds.
    pub fn patience_counter(&self) -> usize {
        self.patience_counter
    }

    /// Every value passed to [`update`](Self::update), in order.
    pub fn metric_history(&self) -> &[f64] {
        &self.metric_history
    }

    /// Current configuration.
    pub fn config(&self) -> &EarlyStoppingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(patience: usize, min_delta: f64) -> EarlyStopping {
        EarlyStopping::new(EarlyStoppingConfig {
            patience,
            min_delta,
            direction: MetricDirection::Minimize,
            verbose: false,
        })
    }

    #[test]
    fn test_baseline_seeds_best() {
        let mut es = monitor(1, 0.0);
        assert!(!es.update(1.0, 0));
        assert_eq!(es.best_metric(), Some(1.0));
        assert_eq!(es.best_iteration(), 0);
    }

    #[test]
    fn test_stops_after_patience() {
        let mut es = monitor(2, 0.01);
        assert!(!es.update(1.0, 0));
        assert!(!es.update(0.5, 1));
        assert!(!es.update(0.495, 2));
        assert!(es.update(0.6, 3));

        assert!(es.should_stop());
        assert_eq!(es.best_iteration(), 1);
        assert_eq!(es.best_metric(), Some(0.5));
        assert_eq!(es.metric_history().len(), 4);
    }

    #[test]
    fn test_improvement_resets_patience() {
        let mut es = monitor(2, 0.0);
        es.update(1.0, 0);
        es.update(1.0, 1);
        assert_eq!(es.patience_counter(), 1);
        es.update(0.9, 2);
        assert_eq!(es.patience_counter(), 0);
        assert!(!es.should_stop());
    }

    #[test]
    fn test_maximize_direction() {
        let mut es = EarlyStopping::new(EarlyStoppingConfig {
            patience: 1,
            min_delta: 0.0,
            direction: MetricDirection::Maximize,
            verbose: false,
        });
        es.update(0.5, 0);
        assert!(!es.update(0.6, 1));
        assert!(es.update(0.55, 2));
        assert_eq!(es.best_iteration(), 1);
    }

    #[test]
    fn test_stays_stopped() {
        let mut es = monitor(1, 0.0);
        es.update(1.0, 0);
        assert!(es.update(2.0, 1));
        assert!(es.update(0.0, 2));
        assert_eq!(es.best_iteration(), 0);
    }
}
