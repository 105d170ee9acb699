//! Dataset management for linear-boost.
//!
//! [`Dataset`] bundles the feature matrix, targets and observation weights.
//! With the `csv` feature enabled, [`Dataset::from_csv`] reads one from a
//! delimited text file described by a [`DatasetConfig`].

#[cfg(feature = "csv")]
pub mod csv;
pub mod dataset;

#[cfg(feature = "csv")]
pub use self::csv::CsvLoader;
pub use dataset::Dataset;

use serde::{Deserialize, Serialize};

#[cfg(feature = "csv")]
use crate::core::error::Result;
#[cfg(feature = "csv")]
use std::path::Path;

/// Describes how to read a dataset from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Target column, by header name or zero-based index
    pub target_column: String,
    /// Weight column, by header name or zero-based index
    pub weight_column: Option<String>,
    /// First row holds column names
    pub has_header: bool,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            target_column: "target".to_string(),
            weight_column: None,
            has_header: true,
            delimiter: b',',
        }
    }
}

impl DatasetConfig {
    /// Create a new dataset configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target column name
    pub fn with_target_column<S: Into<String>>(mut self, target: S) -> Self {
        self.target_column = target.into();
        self
    }

    /// Set weight column name
    pub fn with_weight_column<S: Into<String>>(mut self, weight: S) -> Self {
        self.weight_column = Some(weight.into());
        self
    }

    /// Set whether the file has a header row
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[cfg(feature = "csv")]
impl Dataset {
    /// Load a dataset from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P, config: DatasetConfig) -> Result<Dataset> {
        CsvLoader::new(config).load_csv(path)
    }
}
