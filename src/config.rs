// Configuration for the performance-baseline engine
//
// Explicitly constructed and passed in - no global singleton. Runtime updates
// apply only to subsequently built baselines; stored baselines are never
// mutated retroactively.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for baseline construction and regression detection
///
/// # Example
/// ```
/// use perfbase::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum clean (post-filter) sample count required to build a baseline
    ///
    /// Below this the builder returns no baseline rather than a degenerate one.
    pub min_sample_size: usize,

    /// Confidence level for the baseline's interval around the mean
    ///
    /// Must lie strictly inside (0, 1). 0.95 maps to the 1.96 normal constant
    /// for large samples; 0.90 and 0.80 have their own constants.
    pub confidence_level: f64,

    /// Outlier rejection bound in IQR multiples
    ///
    /// Values outside `[Q1 - k*IQR, Q3 + k*IQR]` are trimmed before any
    /// statistic is computed. 1.5 is the textbook Tukey fence; 2.5 keeps more
    /// of the tail, which suits skewed timing distributions.
    pub outlier_threshold: f64,

    /// Samples older than this are pruned from the store after each
    /// successful baseline build
    pub retention_period: Duration,

    /// Execution environments this engine is expected to track
    pub environments: Vec<String>,

    /// Statistical significance level (alpha) for regression verdicts
    ///
    /// - 0.05 (default): 95% confidence, <5% false positive rate
    /// - 0.01: stricter, fewer false positives, more false negatives
    pub significance_level: f64,

    /// Resample count for the bootstrap test
    pub bootstrap_resamples: usize,

    /// Seed for bootstrap resampling; fixed so repeated checks over the same
    /// inputs produce identical p-values
    pub bootstrap_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 10,
            confidence_level: 0.95,
            outlier_threshold: 2.5,
            retention_period: Duration::from_secs(30 * 24 * 60 * 60),
            environments: vec!["local".to_string()],
            significance_level: 0.05,
            bootstrap_resamples: 1000,
            bootstrap_seed: 0x5EED,
        }
    }
}

impl EngineConfig {
    /// Strict preset: fewer false positives, more false negatives
    ///
    /// Use when a red CI run is expensive.
    pub fn strict() -> Self {
        Self {
            min_sample_size: 20,
            significance_level: 0.01,
            outlier_threshold: 1.5,
            ..Self::default()
        }
    }

    /// Permissive preset: catch potential regressions early
    pub fn permissive() -> Self {
        Self {
            min_sample_size: 5,
            significance_level: 0.10,
            outlier_threshold: 3.0,
            ..Self::default()
        }
    }

    /// Validate configuration
    ///
    /// Rejected at engine construction; fatal to the offending call only.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "confidence_level must be in (0, 1), got {}",
                    self.confidence_level
                ),
            });
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "significance_level must be in (0, 1), got {}",
                    self.significance_level
                ),
            });
        }

        if self.min_sample_size < 2 {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "min_sample_size must be >= 2, got {}",
                    self.min_sample_size
                ),
            });
        }

        if !self.outlier_threshold.is_finite() || self.outlier_threshold <= 0.0 {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "outlier_threshold must be positive and finite, got {}",
                    self.outlier_threshold
                ),
            });
        }

        if self.bootstrap_resamples == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "bootstrap_resamples must be > 0".to_string(),
            });
        }

        Ok(())
    }
}
