//! Error taxonomy for baseline construction and regression checks
//!
//! Statistical edge cases (too few samples, noisy data, degenerate
//! distributions) are recovered locally and surface as `None` at the public
//! API; the typed variants exist for the internal pipeline and logging.
//! Configuration violations are the only errors callers must handle.

use thiserror::Error;

/// Errors for engine construction and baseline building
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Excessive noise: outlier filter removed {removed} of {total} samples")]
    ExcessiveNoise { removed: usize, total: usize },

    #[error("Degenerate statistics: {0}")]
    DegenerateStatistics(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
