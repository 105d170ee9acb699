//! Linear boosting: the fitting loop, its coordinate updater and early
//! stopping.
//!
//! [`Fitter`] drives training. Each round the [`CoordinateUpdater`]
//! computes a proximal Newton step for every feature weight from one score
//! snapshot, applies them together, then steps the bias. [`EarlyStopping`]
//! watches the tracked metric and returns the best round's model.

pub mod early_stopping;
pub mod fitter;
pub mod updater;

pub use early_stopping::{EarlyStopping, EarlyStoppingConfig};
pub use fitter::{FitOptions, FitOutcome, Fitter, MetricRecord, MetricTrace};
pub use updater::{soft_threshold, CoordinateUpdater, UpdateConfig};
