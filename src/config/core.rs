//! Core configuration structure and builder for linear-boost.
//!
//! A [`Config`] is an immutable value: its fields are private and it is
//! produced either by [`ConfigBuilder::build`] or by one of the loaders, all
//! of which validate before handing the value out.

use crate::core::constants::*;
use crate::core::error::{LinearBoostError, Result};
use crate::core::types::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Hyperparameters for linear boosting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loss family
    loss: LossType,
    /// Number of boosting rounds
    nrounds: usize,
    /// L1 penalty (soft-threshold on each coordinate step)
    #[serde(rename = "L1", alias = "l1")]
    l1: f64,
    /// L2 penalty (ridge term on each coordinate step)
    #[serde(rename = "L2", alias = "l2")]
    l2: f64,
    /// Learning rate applied to every step
    eta: f64,
    /// Metric tracked during fitting when the fit call names none
    #[serde(skip_serializing_if = "Option::is_none")]
    metric: Option<MetricType>,
    /// Random seed
    #[serde(alias = "rng")]
    seed: u64,
    /// Coordinate updater mode
    updater: UpdaterType,
    /// Compute device
    device: DeviceType,
    /// Tweedie variance power
    tweedie_power: f64,
    /// Per-coordinate step cap, resolved per loss when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    max_delta_step: Option<f64>,
    /// Worker threads for the per-feature reduction (0 = all cores)
    num_threads: usize,
    /// Logging verbosity
    verbosity: VerbosityLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            loss: LossType::Mse,
            nrounds: DEFAULT_NROUNDS,
            l1: DEFAULT_L1,
            l2: DEFAULT_L2,
            eta: DEFAULT_ETA,
            metric: None,
            seed: DEFAULT_RANDOM_SEED,
            updater: UpdaterType::All,
            device: DeviceType::CPU,
            tweedie_power: DEFAULT_TWEEDIE_POWER,
            max_delta_step: None,
            num_threads: DEFAULT_NUM_THREADS,
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loss family.
    pub fn loss(&self) -> LossType {
        self.loss
    }

    /// Number of boosting rounds.
    pub fn nrounds(&self) -> usize {
        self.nrounds
    }

    /// L1 penalty.
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// L2 penalty.
    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Learning rate.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Configured evaluation metric, if any.
    pub fn metric(&self) -> Option<MetricType> {
        self.metric
    }

    /// Random seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Coordinate updater mode.
    pub fn updater(&self) -> UpdaterType {
        self.updater
    }

    /// Compute device.
    pub fn device(&self) -> DeviceType {
        self.device
    }

    /// Tweedie variance power.
    pub fn tweedie_power(&self) -> f64 {
        self.tweedie_power
    }

    /// Raw step cap setting.
    pub fn max_delta_step(&self) -> Option<f64> {
        self.max_delta_step
    }

    /// Step cap in effect for this loss. `None` means unbounded.
    pub fn effective_max_delta_step(&self) -> Option<f64> {
        match self.max_delta_step {
            Some(step) if step > 0.0 => Some(step),
            Some(_) => None,
            None if self.loss.is_log_link() => Some(DEFAULT_LOG_LINK_MAX_DELTA_STEP),
            None => None,
        }
    }

    /// Configured thread count.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Get the effective number of threads (0 means use all available cores)
    pub fn effective_num_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }

    /// Logging verbosity.
    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.nrounds == 0 {
            return Err(LinearBoostError::invalid_parameter(
                "nrounds",
                "0",
                "must be a positive integer",
            ));
        }

        if !self.l1.is_finite() || self.l1 < 0.0 {
            return Err(LinearBoostError::invalid_parameter(
                "L1",
                self.l1.to_string(),
                "must be finite and non-negative",
            ));
        }

        if !self.l2.is_finite() || self.l2 < 0.0 {
            return Err(LinearBoostError::invalid_parameter(
                "L2",
                self.l2.to_string(),
                "must be finite and non-negative",
            ));
        }

        if !(self.eta > 0.0 && self.eta <= 1.0) {
            return Err(LinearBoostError::invalid_parameter(
                "eta",
                self.eta.to_string(),
                "must be in range (0.0, 1.0]",
            ));
        }

        if !(self.tweedie_power > 1.0 && self.tweedie_power < 2.0) {
            return Err(LinearBoostError::invalid_parameter(
                "tweedie_power",
                self.tweedie_power.to_string(),
                "must be in range (1.0, 2.0)",
            ));
        }

        if let Some(step) = self.max_delta_step {
            if !step.is_finite() || step < 0.0 {
                return Err(LinearBoostError::invalid_parameter(
                    "max_delta_step",
                    step.to_string(),
                    "must be finite and non-negative",
                ));
            }
        }

        if self.device == DeviceType::GPU {
            return Err(LinearBoostError::invalid_parameter(
                "device",
                self.device.to_string(),
                "no GPU backend is available, use cpu",
            ));
        }

        if self.num_threads > num_cpus::get() * 2 {
            log::warn!(
                "num_threads ({}) is much larger than available cores ({})",
                self.num_threads,
                num_cpus::get()
            );
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::config_error!("Failed to read config file: {}", e))?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| crate::config_error!("Failed to parse JSON config: {}", e))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| crate::config_error!("Failed to parse TOML config: {}", e))?,
            _ => {
                return Err(LinearBoostError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| crate::config_error!("Failed to serialize to JSON: {}", e))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| crate::config_error!("Failed to serialize to TOML: {}", e))?,
            _ => {
                return Err(LinearBoostError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| crate::config_error!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// Load configuration from `LINEAR_BOOST_*` environment variables on top
    /// of the defaults.
    pub fn load_from_environment() -> Result<Self> {
        let mut params = HashMap::new();
        for (var, key) in ENVIRONMENT_KEYS {
            if let Ok(val) = std::env::var(var) {
                params.insert(key.to_string(), val);
            }
        }
        ConfigBuilder::from_params(&params)?.build()
    }

    /// Get configuration as a parameter map (for logging/serialization)
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("loss".to_string(), self.loss.to_string());
        map.insert("nrounds".to_string(), self.nrounds.to_string());
        map.insert("L1".to_string(), self.l1.to_string());
        map.insert("L2".to_string(), self.l2.to_string());
        map.insert("eta".to_string(), self.eta.to_string());
        map.insert("seed".to_string(), self.seed.to_string());
        map.insert("updater".to_string(), self.updater.to_string());
        map.insert("device".to_string(), self.device.to_string());
        map.insert("num_threads".to_string(), self.num_threads.to_string());

        if let Some(metric) = self.metric {
            map.insert("metric".to_string(), metric.to_string());
        }
        if self.loss == LossType::Tweedie {
            map.insert("tweedie_power".to_string(), self.tweedie_power.to_string());
        }
        if let Some(step) = self.effective_max_delta_step() {
            map.insert("max_delta_step".to_string(), step.to_string());
        }

        map
    }
}

const ENVIRONMENT_KEYS: [(&str, &str); 9] = [
    ("LINEAR_BOOST_LOSS", "loss"),
    ("LINEAR_BOOST_NROUNDS", "nrounds"),
    ("LINEAR_BOOST_L1", "L1"),
    ("LINEAR_BOOST_L2", "L2"),
    ("LINEAR_BOOST_ETA", "eta"),
    ("LINEAR_BOOST_METRIC", "metric"),
    ("LINEAR_BOOST_SEED", "seed"),
    ("LINEAR_BOOST_DEVICE", "device"),
    ("LINEAR_BOOST_NUM_THREADS", "num_threads"),
];

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Set the loss family
    pub fn loss(mut self, loss: LossType) -> Self {
        self.config.loss = loss;
        self
    }

    /// Set the number of boosting rounds
    pub fn nrounds(mut self, nrounds: usize) -> Self {
        self.config.nrounds = nrounds;
        self
    }

    /// Set the L1 penalty
    pub fn l1(mut self, l1: f64) -> Self {
        self.config.l1 = l1;
        self
    }

    /// Set the L2 penalty
    pub fn l2(mut self, l2: f64) -> Self {
        self.config.l2 = l2;
        self
    }

    /// Set the learning rate
    pub fn eta(mut self, eta: f64) -> Self {
        self.config.eta = eta;
        self
    }

    /// Set the default evaluation metric
    pub fn metric(mut self, metric: MetricType) -> Self {
        self.config.metric = Some(metric);
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the updater mode
    pub fn updater(mut self, updater: UpdaterType) -> Self {
        self.config.updater = updater;
        self
    }

    /// Set the device
    pub fn device(mut self, device: DeviceType) -> Self {
        self.config.device = device;
        self
    }

    /// Set the Tweedie variance power
    pub fn tweedie_power(mut self, power: f64) -> Self {
        self.config.tweedie_power = power;
        self
    }

    /// Cap each coordinate step; `0.0` disables the cap for every loss
    pub fn max_delta_step(mut self, step: f64) -> Self {
        self.config.max_delta_step = Some(step);
        self
    }

    /// Set number of threads
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.config.num_threads = threads;
        self
    }

    /// Set verbosity level
    pub fn verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    /// Create a builder from string parameters, as read from the
    /// environment or a command line.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut builder = Self::new();

        for (param, value) in params {
            builder = match param.as_str() {
                "loss" => builder.loss(value.parse()?),
                "nrounds" => builder.nrounds(parse_value(param, value)?),
                "L1" | "l1" => builder.l1(parse_value(param, value)?),
                "L2" | "l2" => builder.l2(parse_value(param, value)?),
                "eta" => builder.eta(parse_value(param, value)?),
                "metric" => builder.metric(value.parse()?),
                "seed" | "rng" => builder.seed(parse_value(param, value)?),
                "updater" => builder.updater(value.parse()?),
                "device" => builder.device(value.parse()?),
                "tweedie_power" => builder.tweedie_power(parse_value(param, value)?),
                "max_delta_step" => builder.max_delta_step(parse_value(param, value)?),
                "num_threads" => builder.num_threads(parse_value(param, value)?),
                other => {
                    log::warn!("Ignoring unknown parameter '{}'", other);
                    builder
                }
            };
        }

        Ok(builder)
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_value<T: std::str::FromStr>(param: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        LinearBoostError::invalid_parameter(param, value, "could not be parsed")
    })
}
