//! Core infrastructure module for linear-boost.
//!
//! - [`types`]: scalar aliases and the loss/metric/updater/device enums
//! - [`constants`]: configuration defaults and numerical floors
//! - [`error`]: the library error type and helper macros
//!
//! ```rust
//! use linear_boost::core::{
//!     types::{LossType, Score},
//!     constants::DEFAULT_NROUNDS,
//!     error::{Result, LinearBoostError},
//! };
//!
//! let loss: LossType = "poisson".parse()?;
//! assert!(loss.is_log_link());
//! assert!(DEFAULT_NROUNDS > 0);
//! # let _: Score = 0.0;
//! # Ok::<(), LinearBoostError>(())
//! ```

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{LinearBoostError, Result};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialise logging. Safe to call more than once.
pub(crate) fn initialize_core() -> Result<()> {
    if CORE_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    // Another logger may already be installed by the host application.
    let _ = env_logger::try_init();

    CORE_INITIALIZED.store(true, Ordering::Release);
    log::debug!("linear-boost {} initialized", LINEAR_BOOST_VERSION);
    Ok(())
}

pub(crate) fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        assert!(initialize_core().is_ok());
        assert!(initialize_core().is_ok());
        assert!(is_core_initialized());
    }
}
