//! Configuration management for linear-boost.
//!
//! [`Config`] holds the boosting hyperparameters. It is created through
//! [`ConfigBuilder`], read from a `.json`/`.toml` file, or assembled from
//! `LINEAR_BOOST_*` environment variables. [`ConfigValidator`] reports
//! settings that are legal but suspicious.

pub mod core;
pub mod validation;

pub use self::core::{Config, ConfigBuilder};
pub use validation::{
    ConfigValidator, DatasetInfo, ValidationContext, ValidationError, ValidationResult,
    ValidationRule, ValidationWarning,
};

