//! Configuration validation for linear-boost.
//!
//! [`Config::validate`] rejects values that cannot be trained with. The
//! [`ConfigValidator`] goes further and reports values that are legal but
//! likely unintended, optionally taking the shape of the training data into
//! account.

use crate::config::core::Config;
use crate::core::error::Result;
use crate::core::types::*;

use serde::{Deserialize, Serialize};

/// Validation result enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationResult {
    /// Parameter is valid
    Valid,
    /// Parameter has a warning (non-fatal)
    Warning(ValidationWarning),
    /// Parameter has an error (fatal)
    Error(ValidationError),
}

impl ValidationResult {
    /// Whether this result is fatal.
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationResult::Error(_))
    }
}

/// Validation warning structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Parameter name
    pub parameter: String,
    /// Parameter value
    pub value: String,
    /// Warning message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parameter '{}' = '{}': {}", self.parameter, self.value, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

/// Validation error structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Parameter name
    pub parameter: String,
    /// Parameter value
    pub value: String,
    /// Error message
    pub message: String,
    /// Valid range or options
    pub valid_range: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parameter '{}' = '{}': {}",
            self.parameter, self.value, self.message
        )?;
        if let Some(ref range) = self.valid_range {
            write!(f, " (valid range: {})", range)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Shape of the training data, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetInfo {
    /// Number of observations
    pub num_samples: usize,
    /// Number of features
    pub num_features: usize,
}

/// Validation context
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Dataset information (if available)
    pub dataset_info: Option<DatasetInfo>,
}

/// Validation rule trait
pub trait ValidationRule: Send + Sync {
    /// Rule name
    fn name(&self) -> &'static str;

    /// Validate configuration
    fn validate(&self, config: &Config, context: &ValidationContext) -> Vec<ValidationResult>;
}

/// Configuration validator
pub struct ConfigValidator {
    rules: Vec<Box<dyn ValidationRule>>,
    context: ValidationContext,
}

impl std::fmt::Debug for ConfigValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|rule| rule.name()).collect();
        f.debug_struct("ConfigValidator")
            .field("rules", &rules)
            .field("context", &self.context)
            .finish()
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    /// Create a validator with the built-in rules.
    pub fn new() -> Self {
        ConfigValidator {
            rules: vec![
                Box::new(HardLimitsRule),
                Box::new(LearningRateRule),
                Box::new(RegularizationRule),
                Box::new(MetricRule),
                Box::new(DatasetShapeRule),
            ],
            context: ValidationContext::default(),
        }
    }

    /// Set validation context
    pub fn with_context(mut self, context: ValidationContext) -> Self {
        self.context = context;
        self
    }

    /// Add custom validation rule
    pub fn add_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Run every rule. Rules that find nothing contribute a single `Valid`.
    pub fn validate(&self, config: &Config) -> Result<Vec<ValidationResult>> {
        let mut results = Vec::new();

        for rule in &self.rules {
            let found = rule.validate(config, &self.context);
            if found.is_empty() {
                results.push(ValidationResult::Valid);
            } else {
                log::trace!("Validation rule '{}' reported {} issue(s)", rule.name(), found.len());
                results.extend(found);
            }
        }

        Ok(results)
    }

    /// Validate and log every warning. Returns the warnings that were logged.
    pub fn log_warnings(&self, config: &Config) -> Result<Vec<ValidationWarning>> {
        let warnings: Vec<ValidationWarning> = self
            .validate(config)?
            .into_iter()
            .filter_map(|result| match result {
                ValidationResult::Warning(w) => Some(w),
                _ => None,
            })
            .collect();

        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Ok(warnings)
    }
}

/// Mirrors [`Config::validate`] as validation results.
struct HardLimitsRule;

impl ValidationRule for HardLimitsRule {
    fn name(&self) -> &'static str {
        "hard_limits"
    }

    fn validate(&self, config: &Config, _context: &ValidationContext) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        if config.nrounds() == 0 {
            results.push(error("nrounds", "0", "Must be positive", "1 or more"));
        }
        if !(config.l1() >= 0.0 && config.l1().is_finite()) {
            results.push(error("L1", config.l1(), "Must be non-negative", "[0.0, inf)"));
        }
        if !(config.l2() >= 0.0 && config.l2().is_finite()) {
            results.push(error("L2", config.l2(), "Must be non-negative", "[0.0, inf)"));
        }
        if !(config.tweedie_power() > 1.0 && config.tweedie_power() < 2.0) {
            results.push(error(
                "tweedie_power",
                config.tweedie_power(),
                "Must lie strictly between 1 and 2",
                "(1.0, 2.0)",
            ));
        }
        if config.device() == DeviceType::GPU {
            results.push(error("device", config.device(), "No GPU backend is available", "cpu"));
        }

        results
    }
}

struct LearningRateRule;

impl ValidationRule for LearningRateRule {
    fn name(&self) -> &'static str {
        "learning_rate"
    }

    fn validate(&self, config: &Config, _context: &ValidationContext) -> Vec<ValidationResult> {
        let eta = config.eta();
        if eta <= 0.0 || eta > 1.0 {
            return vec![error("eta", eta, "Must be in range (0.0, 1.0]", "(0.0, 1.0]")];
        }

        if eta < 0.01 && config.nrounds() < 100 {
            return vec![warning(
                "eta",
                eta,
                "Very small learning rate with few rounds will barely move the model",
                "Increase nrounds or eta",
            )];
        }

        Vec::new()
    }
}

struct RegularizationRule;

impl ValidationRule for RegularizationRule {
    fn name(&self) -> &'static str {
        "regularization"
    }

    fn validate(&self, config: &Config, _context: &ValidationContext) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        if config.l1() > 10.0 {
            results.push(warning(
                "L1",
                config.l1(),
                "Large L1 penalty will likely zero every weight",
                "Try values below 1.0",
            ));
        }
        if config.l2() > 1e3 {
            results.push(warning(
                "L2",
                config.l2(),
                "Large L2 penalty will shrink weights to almost nothing",
                "Try values below 10.0",
            ));
        }
        if let Some(step) = config.max_delta_step() {
            if step == 0.0 && config.loss().is_log_link() {
                results.push(warning(
                    "max_delta_step",
                    step,
                    "Unbounded steps with a log link can overflow the scores",
                    "Leave max_delta_step unset",
                ));
            }
        }

        results
    }
}

struct MetricRule;

impl ValidationRule for MetricRule {
    fn name(&self) -> &'static str {
        "metric"
    }

    fn validate(&self, config: &Config, _context: &ValidationContext) -> Vec<ValidationResult> {
        let metric = match config.metric() {
            Some(metric) => metric,
            None => return Vec::new(),
        };

        if !metric.supports_loss(config.loss()) {
            vec![warning(
                "metric",
                metric,
                &format!("Metric is undefined for the {} loss; fitting will reject it", config.loss()),
                "Use the loss's default metric",
            )]
        } else {
            Vec::new()
        }
    }
}

struct DatasetShapeRule;

impl ValidationRule for DatasetShapeRule {
    fn name(&self) -> &'static str {
        "dataset_shape"
    }

    fn validate(&self, config: &Config, context: &ValidationContext) -> Vec<ValidationResult> {
        let info = match context.dataset_info {
            Some(info) => info,
            None => return Vec::new(),
        };

        if info.num_features >= info.num_samples && config.l1() == 0.0 && config.l2() == 0.0 {
            vec![warning(
                "L2",
                config.l2(),
                &format!(
                    "{} features for {} observations without regularization",
                    info.num_features, info.num_samples
                ),
                "Set L1 or L2 to a positive value",
            )]
        } else {
            Vec::new()
        }
    }
}

fn error<V: ToString>(parameter: &str, value: V, message: &str, range: &str) -> ValidationResult {
    ValidationResult::Error(ValidationError {
        parameter: parameter.to_string(),
        value: value.to_string(),
        message: message.to_string(),
        valid_range: Some(range.to_string()),
    })
}

fn warning<V: ToString>(parameter: &str, value: V, message: &str, suggestion: &str) -> ValidationResult {
    ValidationResult::Warning(ValidationWarning {
        parameter: parameter.to_string(),
        value: value.to_string(),
        message: message.to_string(),
        suggestion: Some(suggestion.to_string()),
    })
}
