//! Fitted model representation.

pub mod linear;

pub use linear::{LinearModel, ModelMetadata};
