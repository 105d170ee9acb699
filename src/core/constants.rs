//! System constants and configuration defaults for linear-boost.

use crate::core::types::*;

/// Default number of boosting rounds.
pub const DEFAULT_NROUNDS: usize = 10;

/// Default L1 penalty. Steps whose magnitude is at most this are dropped.
pub const DEFAULT_L1: f64 = 0.0;

/// Default L2 penalty.
pub const DEFAULT_L2: f64 = 0.0;

/// Default learning rate applied to every coordinate step.
pub const DEFAULT_ETA: f64 = 1.0;

/// Default Tweedie variance power.
pub const DEFAULT_TWEEDIE_POWER: f64 = 1.5;

/// Step cap used by the log-link losses when none is configured.
pub const DEFAULT_LOG_LINK_MAX_DELTA_STEP: f64 = 0.7;

/// Default random seed for reproducibility.
pub const DEFAULT_RANDOM_SEED: u64 = 123;

/// Default number of threads for parallel processing.
/// 0 means use all available cores.
pub const DEFAULT_NUM_THREADS: usize = 0;

/// Default verbosity level for logging.
pub const DEFAULT_VERBOSITY: VerbosityLevel = VerbosityLevel::Info;

/// Default minimum improvement for the monitored metric.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Default number of non-improving rounds tolerated before stopping.
pub const DEFAULT_EARLY_STOPPING_ROUNDS: usize = 1;

/// Default progress logging period, in rounds.
pub const DEFAULT_PRINT_EVERY_N: usize = 1;

/// Floor for hessians and probabilities to keep divisions finite.
pub const EPSILON: f64 = 1e-15;

/// Smallest total hessian for which a bias step is taken.
pub const MIN_STEP: f64 = 1e-12;

/// Library version string.
pub const LINEAR_BOOST_VERSION: &str = env!("CARGO_PKG_VERSION");

// Compile-time checks on the defaults.
mod compile_time_checks {
    use super::*;
    use static_assertions::*;

    const_assert!(DEFAULT_NROUNDS > 0);
    const_assert!(DEFAULT_EARLY_STOPPING_ROUNDS > 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        assert!(DEFAULT_L1 >= 0.0);
        assert!(DEFAULT_L2 >= 0.0);
        assert!(DEFAULT_ETA > 0.0 && DEFAULT_ETA <= 1.0);
        assert!(DEFAULT_TWEEDIE_POWER > 1.0 && DEFAULT_TWEEDIE_POWER < 2.0);
        assert!(DEFAULT_TOLERANCE >= 0.0);
    }

    #[test]
    fn test_version() {
        assert!(!LINEAR_BOOST_VERSION.is_empty());
    }
}
