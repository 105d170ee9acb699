//! Model persistence.
//!
//! Models are stored either as pretty-printed JSON or as bincode. The format
//! follows the file extension: `.json` for JSON, `.bin` or `.bincode` for
//! bincode.

use crate::core::error::{LinearBoostError, Result};
use crate::model::LinearModel;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk model encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    /// Human-readable JSON
    Json,
    /// Compact binary
    Bincode,
}

impl std::fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationFormat::Json => write!(f, "json"),
            SerializationFormat::Bincode => write!(f, "bincode"),
        }
    }
}

impl SerializationFormat {
    /// Detect serialization format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(SerializationFormat::Json),
            Some("bin") | Some("bincode") => Ok(SerializationFormat::Bincode),
            other => Err(LinearBoostError::serialization(format!(
                "Cannot infer model format from extension {:?}; use .json or .bin",
                other.unwrap_or("")
            ))),
        }
    }
}

/// Encode a model in memory.
pub fn model_to_bytes(model: &LinearModel, format: SerializationFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        SerializationFormat::Json => serde_json::to_vec_pretty(model)?,
        SerializationFormat::Bincode => bincode::serialize(model)?,
    };
    Ok(bytes)
}

/// Decode a model from memory.
pub fn model_from_bytes(bytes: &[u8], format: SerializationFormat) -> Result<LinearModel> {
    let model: LinearModel = match format {
        SerializationFormat::Json => serde_json::from_slice(bytes)?,
        SerializationFormat::Bincode => bincode::deserialize(bytes)?,
    };
    Ok(model)
}

/// Write `model` to `path`, choosing the format from the extension.
pub fn save_model<P: AsRef<Path>>(model: &LinearModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = SerializationFormat::from_path(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        SerializationFormat::Json => serde_json::to_writer_pretty(&mut writer, model)?,
        SerializationFormat::Bincode => bincode::serialize_into(&mut writer, model)?,
    }
    writer.flush()?;

    log::info!("Saved {} model to {}", format, path.display());
    Ok(())
}

/// Read a model from `path`, choosing the format from the extension.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<LinearModel> {
    let path = path.as_ref();
    let format = SerializationFormat::from_path(path)?;

    let reader = BufReader::new(File::open(path)?);
    let model: LinearModel = match format {
        SerializationFormat::Json => serde_json::from_reader(reader)?,
        SerializationFormat::Bincode => bincode::deserialize_from(reader)?,
    };

    log::debug!(
        "Loaded {} model with {} features from {}",
        model.loss(),
        model.num_features(),
        path.display()
    );
    Ok(model)
}
