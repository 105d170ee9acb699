//! CSV loading for linear-boost.
//!
//! Every column is parsed as `f64`. The target column and an optional weight
//! column are selected by header name or by index; everything else becomes a
//! feature.

use crate::core::error::{LinearBoostError, Result};
use crate::dataset::{Dataset, DatasetConfig};

use csv::{ReaderBuilder, StringRecord};
use ndarray::{Array1, Array2};
use std::fs::File;
use std::path::Path;

/// CSV data loader
#[derive(Debug, Clone)]
pub struct CsvLoader {
    dataset_config: DatasetConfig,
}

impl CsvLoader {
    /// Create a new CSV loader
    pub fn new(dataset_config: DatasetConfig) -> Self {
        CsvLoader { dataset_config }
    }

    /// Load CSV file
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        log::info!("Loading CSV file: {}", path.display());

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.dataset_config.delimiter)
            .has_headers(self.dataset_config.has_header)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = if self.dataset_config.has_header {
            Some(reader.headers()?.clone())
        } else {
            None
        };

        let mut records = Vec::new();
        for result in reader.records() {
            records.push(result?);
        }

        if records.is_empty() {
            return Err(LinearBoostError::dataset(format!(
                "CSV file {} contains no data rows",
                path.display()
            )));
        }

        log::info!("Loaded {} rows with {} columns", records.len(), records[0].len());
        self.convert_to_dataset(&records, headers.as_ref())
    }

    fn convert_to_dataset(
        &self,
        records: &[StringRecord],
        headers: Option<&StringRecord>,
    ) -> Result<Dataset> {
        let num_rows = records.len();
        let num_cols = records[0].len();

        let target_idx = self.resolve_column(&self.dataset_config.target_column, headers, num_cols)?;
        let weight_idx = match self.dataset_config.weight_column {
            Some(ref column) => Some(self.resolve_column(column, headers, num_cols)?),
            None => None,
        };

        let feature_cols: Vec<usize> = (0..num_cols)
            .filter(|&i| i != target_idx && Some(i) != weight_idx)
            .collect();
        if feature_cols.is_empty() {
            return Err(LinearBoostError::dataset(
                "No feature columns left after removing target and weight columns",
            ));
        }

        let mut features = Array2::<f64>::zeros((num_rows, feature_cols.len()));
        let mut labels = Array1::<f64>::zeros(num_rows);
        let mut weights = weight_idx.map(|_| Array1::<f64>::zeros(num_rows));

        for (row, record) in records.iter().enumerate() {
            labels[row] = parse_field(record, target_idx, row)?;
            if let (Some(idx), Some(w)) = (weight_idx, weights.as_mut()) {
                w[row] = parse_field(record, idx, row)?;
            }
            for (j, &col) in feature_cols.iter().enumerate() {
                features[[row, j]] = parse_field(record, col, row)?;
            }
        }

        let dataset = Dataset::new(features, labels, weights)?;
        match headers {
            Some(headers) => {
                let names = feature_cols.iter().map(|&i| headers[i].to_string()).collect();
                dataset.with_feature_names(names)
            }
            None => Ok(dataset),
        }
    }

    fn resolve_column(
        &self,
        column: &str,
        headers: Option<&StringRecord>,
        num_cols: usize,
    ) -> Result<usize> {
        if let Some(headers) = headers {
            if let Some(idx) = headers.iter().position(|h| h == column) {
                return Ok(idx);
            }
        }

        match column.parse::<usize>() {
            Ok(idx) if idx < num_cols => Ok(idx),
            _ => Err(LinearBoostError::dataset(format!(
                "Column '{}' not found among {} columns",
                column, num_cols
            ))),
        }
    }
}

fn parse_field(record: &StringRecord, col: usize, row: usize) -> Result<f64> {
    let raw = record.get(col).ok_or_else(|| {
        LinearBoostError::dimension_mismatch(
            format!("at least {} columns", col + 1),
            format!("{} columns at row {}", record.len(), row + 1),
        )
    })?;
    raw.parse::<f64>().map_err(|_| {
        LinearBoostError::dataset(format!(
            "Cannot parse '{}' as a number at row {}, column {}",
            raw,
            row + 1,
            col
        ))
    })
}
