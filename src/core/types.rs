//! Core data types for linear-boost.
//!
//! Scalar aliases and the enumerations that select a loss, an evaluation
//! metric, the coordinate updater and the compute device. Every enum
//! round-trips through its lower-case name, both with `serde` and with
//! [`std::str::FromStr`], so configuration files and environment variables
//! share one vocabulary.

use crate::core::error::LinearBoostError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear score, gradient and prediction value type.
pub type Score = f64;

/// Target value type.
pub type Label = f64;

/// Sample weight type.
pub type Weight = f64;

/// Feature index type for identifying columns of the feature matrix.
pub type FeatureIndex = usize;

/// Boosting round number. Round 0 is the untrained baseline.
pub type IterationIndex = usize;

/// Loss families supported by the fitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossType {
    /// Squared error, identity link
    Mse,
    /// Binary log-loss, logit link
    Logistic,
    /// Poisson deviance, log link
    Poisson,
    /// Gamma deviance, log link
    Gamma,
    /// Tweedie deviance, log link
    Tweedie,
}

impl Default for LossType {
    fn default() -> Self {
        LossType::Mse
    }
}

impl LossType {
    /// All supported losses, in declaration order.
    pub const ALL: [LossType; 5] = [
        LossType::Mse,
        LossType::Logistic,
        LossType::Poisson,
        LossType::Gamma,
        LossType::Tweedie,
    ];

    /// Whether the loss uses the log link.
    pub fn is_log_link(&self) -> bool {
        matches!(self, LossType::Poisson | LossType::Gamma | LossType::Tweedie)
    }
}

impl fmt::Display for LossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossType::Mse => write!(f, "mse"),
            LossType::Logistic => write!(f, "logistic"),
            LossType::Poisson => write!(f, "poisson"),
            LossType::Gamma => write!(f, "gamma"),
            LossType::Tweedie => write!(f, "tweedie"),
        }
    }
}

impl FromStr for LossType {
    type Err = LinearBoostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mse" => Ok(LossType::Mse),
            "logistic" => Ok(LossType::Logistic),
            "poisson" => Ok(LossType::Poisson),
            "gamma" => Ok(LossType::Gamma),
            "tweedie" => Ok(LossType::Tweedie),
            other => Err(LinearBoostError::invalid_parameter(
                "loss",
                other,
                "expected one of mse, logistic, poisson, gamma, tweedie",
            )),
        }
    }
}

/// Evaluation metrics tracked during fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// Mean squared error
    Mse,
    /// Root mean squared error
    Rmse,
    /// Mean absolute error
    Mae,
    /// Binary log-loss
    Logloss,
    /// Mean Poisson deviance
    PoissonDeviance,
    /// Mean Gamma deviance
    GammaDeviance,
    /// Mean Tweedie deviance
    TweedieDeviance,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Mse => write!(f, "mse"),
            MetricType::Rmse => write!(f, "rmse"),
            MetricType::Mae => write!(f, "mae"),
            MetricType::Logloss => write!(f, "logloss"),
            MetricType::PoissonDeviance => write!(f, "poisson_deviance"),
            MetricType::GammaDeviance => write!(f, "gamma_deviance"),
            MetricType::TweedieDeviance => write!(f, "tweedie_deviance"),
        }
    }
}

impl FromStr for MetricType {
    type Err = LinearBoostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mse" => Ok(MetricType::Mse),
            "rmse" => Ok(MetricType::Rmse),
            "mae" => Ok(MetricType::Mae),
            "logloss" => Ok(MetricType::Logloss),
            "poisson_deviance" | "poisson" => Ok(MetricType::PoissonDeviance),
            "gamma_deviance" | "gamma" => Ok(MetricType::GammaDeviance),
            "tweedie_deviance" | "tweedie" => Ok(MetricType::TweedieDeviance),
            other => Err(LinearBoostError::invalid_parameter(
                "metric",
                other,
                "expected one of mse, rmse, mae, logloss, poisson_deviance, gamma_deviance, tweedie_deviance",
            )),
        }
    }
}

impl MetricType {
    /// Whether the metric is defined on the projected predictions of `loss`.
    ///
    /// The deviances need a positive mean and log-loss needs one in `(0, 1)`.
    pub fn supports_loss(&self, loss: LossType) -> bool {
        match self {
            MetricType::Mse | MetricType::Rmse | MetricType::Mae => true,
            MetricType::Logloss => loss == LossType::Logistic,
            MetricType::PoissonDeviance | MetricType::GammaDeviance | MetricType::TweedieDeviance => {
                loss.is_log_link()
            }
        }
    }
}

/// Coordinate updater mode.
///
/// Only `All` exists: every feature weight of a round is computed from the
/// same prediction snapshot and applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdaterType {
    /// Update all features simultaneously from one snapshot
    All,
}

impl Default for UpdaterType {
    fn default() -> Self {
        UpdaterType::All
    }
}

impl fmt::Display for UpdaterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdaterType::All => write!(f, "all"),
        }
    }
}

impl FromStr for UpdaterType {
    type Err = LinearBoostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(UpdaterType::All),
            other => Err(LinearBoostError::invalid_parameter(
                "updater",
                other,
                "only the \"all\" updater is supported",
            )),
        }
    }
}

/// Configuration enumeration for device selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// CPU-based computation
    CPU,
    /// GPU-based computation (recognised, rejected by validation)
    GPU,
}

impl Default for DeviceType {
    fn default() -> Self {
        DeviceType::CPU
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::CPU => write!(f, "cpu"),
            DeviceType::GPU => write!(f, "gpu"),
        }
    }
}

impl FromStr for DeviceType {
    type Err = LinearBoostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(DeviceType::CPU),
            "gpu" => Ok(DeviceType::GPU),
            other => Err(LinearBoostError::invalid_parameter(
                "device",
                other,
                "expected cpu or gpu",
            )),
        }
    }
}

/// Verbosity levels for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Nothing beyond errors
    Silent = -1,
    /// Warnings and errors
    Warning = 0,
    /// Progress, warnings and errors
    Info = 1,
    /// Per-round internals
    Debug = 2,
}

impl Default for VerbosityLevel {
    fn default() -> Self {
        VerbosityLevel::Info
    }
}

impl VerbosityLevel {
    /// Whether fit progress (start, per-round metrics, early stop, finish) is logged.
    pub fn shows_progress(self) -> bool {
        self >= VerbosityLevel::Info
    }

    /// Whether per-round step sizes are logged.
    pub fn shows_internals(self) -> bool {
        self >= VerbosityLevel::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_type_display_round_trip() {
        for loss in LossType::ALL {
            let parsed: LossType = loss.to_string().parse().unwrap();
            assert_eq!(parsed, loss);
        }
    }

    #[test]
    fn test_unsupported_names_are_invalid_parameters() {
        let err = "huber".parse::<LossType>().unwrap_err();
        assert_eq!(err.category(), "invalid_parameter");

        let err = "random".parse::<UpdaterType>().unwrap_err();
        assert_eq!(err.category(), "invalid_parameter");

        let err = "tpu".parse::<DeviceType>().unwrap_err();
        assert_eq!(err.category(), "invalid_parameter");

        assert!("auc".parse::<MetricType>().is_err());
    }

    #[test]
    fn test_metric_aliases() {
        assert_eq!("poisson".parse::<MetricType>().unwrap(), MetricType::PoissonDeviance);
        assert_eq!(" RMSE ".parse::<MetricType>().unwrap(), MetricType::Rmse);
    }

    #[test]
    fn test_log_link_losses() {
        assert!(!LossType::Mse.is_log_link());
        assert!(!LossType::Logistic.is_log_link());
        assert!(LossType::Poisson.is_log_link());
        assert!(LossType::Gamma.is_log_link());
        assert!(LossType::Tweedie.is_log_link());
    }

    #[test]
    fn test_verbosity_gates() {
        assert!(!VerbosityLevel::Silent.shows_progress());
        assert!(!VerbosityLevel::Warning.shows_progress());
        assert!(VerbosityLevel::Info.shows_progress());
        assert!(!VerbosityLevel::Info.shows_internals());
        assert!(VerbosityLevel::Debug.shows_internals());
    }

    #[test]
    fn test_metric_loss_support() {
        for loss in LossType::ALL {
            assert!(MetricType::Mse.supports_loss(loss));
            assert!(MetricType::Mae.supports_loss(loss));
        }
        assert!(MetricType::Logloss.supports_loss(LossType::Logistic));
        assert!(!MetricType::Logloss.supports_loss(LossType::Poisson));
        assert!(!MetricType::GammaDeviance.supports_loss(LossType::Mse));
        assert!(!MetricType::PoissonDeviance.supports_loss(LossType::Logistic));
        assert!(MetricType::TweedieDeviance.supports_loss(LossType::Gamma));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(LossType::default(), LossType::Mse);
        assert_eq!(UpdaterType::default(), UpdaterType::All);
        assert_eq!(DeviceType::default(), DeviceType::CPU);
        assert_eq!(VerbosityLevel::default(), VerbosityLevel::Info);
    }

    #[test]
    fn test_serialization() {
        let serialized = serde_json::to_string(&LossType::Tweedie).unwrap();
        assert_eq!(serialized, "\"tweedie\"");
        let deserialized: LossType = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, LossType::Tweedie);

        let serialized = serde_json::to_string(&MetricType::GammaDeviance).unwrap();
        assert_eq!(serialized, "\"gamma_deviance\"");

        let serialized = serde_json::to_string(&DeviceType::CPU).unwrap();
        assert_eq!(serialized, "\"cpu\"");
    }
}
