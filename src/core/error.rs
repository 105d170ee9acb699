//! Error handling and error types for linear-boost.
//!
//! Every fallible operation in the crate returns [`Result`], and every
//! failure is surfaced synchronously to the caller. Nothing is retried
//! internally.

use std::io;
use thiserror::Error;

/// Main error type for the linear-boost library.
#[derive(Error, Debug)]
pub enum LinearBoostError {
    /// Configuration errors not tied to a single parameter
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid or unsupported parameter values
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dataset content errors (empty data, non-finite values, bad labels)
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Shape mismatch between inputs
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Numerical breakdown (overflow, NaN scores)
    #[error("Numerical error: {message}")]
    Numerical { message: String },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction { message: String },

    /// Model serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Thread pool construction errors
    #[error("Threading error: {message}")]
    Threading { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },

    /// CSV parsing errors
    #[cfg(feature = "csv")]
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// Type alias for Results using LinearBoostError
pub type Result<T> = std::result::Result<T, LinearBoostError>;

impl LinearBoostError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        LinearBoostError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        LinearBoostError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        LinearBoostError::Dataset {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        LinearBoostError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        LinearBoostError::Numerical {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        LinearBoostError::Prediction {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        LinearBoostError::Serialization {
            message: message.into(),
        }
    }

    /// Create a threading error
    pub fn threading<S: Into<String>>(message: S) -> Self {
        LinearBoostError::Threading {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LinearBoostError::Config { .. } => false,
            LinearBoostError::InvalidParameter { .. } => false,
            LinearBoostError::Dataset { .. } => false,
            LinearBoostError::DimensionMismatch { .. } => false,
            LinearBoostError::Numerical { .. } => true,
            LinearBoostError::Prediction { .. } => true,
            LinearBoostError::Serialization { .. } => false,
            LinearBoostError::Threading { .. } => true,
            LinearBoostError::IO { .. } => false,
            LinearBoostError::Json { .. } => false,
            LinearBoostError::Bincode { .. } => false,
            #[cfg(feature = "csv")]
            LinearBoostError::Csv { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            LinearBoostError::Config { .. } => "config",
            LinearBoostError::InvalidParameter { .. } => "invalid_parameter",
            LinearBoostError::Dataset { .. } => "dataset",
            LinearBoostError::DimensionMismatch { .. } => "dimension_mismatch",
            LinearBoostError::Numerical { .. } => "numerical",
            LinearBoostError::Prediction { .. } => "prediction",
            LinearBoostError::Serialization { .. } => "serialization",
            LinearBoostError::Threading { .. } => "threading",
            LinearBoostError::IO { .. } => "io",
            LinearBoostError::Json { .. } => "json",
            LinearBoostError::Bincode { .. } => "bincode",
            #[cfg(feature = "csv")]
            LinearBoostError::Csv { .. } => "csv",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::LinearBoostError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::LinearBoostError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! dataset_error {
    ($msg:expr) => {
        $crate::core::error::LinearBoostError::dataset($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::LinearBoostError::dataset(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
