// Regression verdict value object shared by the four hypothesis tests

use crate::descriptive::mean;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which two-sample hypothesis test produced a verdict
///
/// A tagged variant instead of stringly-typed test names, so selection logic
/// and dispatch are exhaustively checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    MannWhitney,
    KolmogorovSmirnov,
    Welch,
    Bootstrap,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MannWhitney => f.write_str("mann-whitney-u"),
            Self::KolmogorovSmirnov => f.write_str("kolmogorov-smirnov"),
            Self::Welch => f.write_str("welch-t"),
            Self::Bootstrap => f.write_str("bootstrap"),
        }
    }
}

/// Result of one regression check
///
/// Ephemeral - produced per invocation, persisted only if the caller
/// chooses to. `p_value` comes from the documented approximations in
/// `approx`, not exact distribution tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionOutcome {
    pub test: TestKind,
    pub p_value: f64,
    /// Scale-free difference magnitude: Cohen's d, rank-biserial
    /// correlation, or the KS statistic depending on the test
    pub effect_size: f64,
    pub confidence_level: f64,
    pub critical_value: f64,
    pub is_significant: bool,
    pub baseline_mean: f64,
    pub sample_mean: f64,
    /// `(sample_mean - baseline_mean) / baseline_mean`; positive means the
    /// new samples are slower
    pub relative_difference: f64,
    pub recommendation: String,
}

impl RegressionOutcome {
    /// Assemble a verdict from a test's raw numbers
    pub(crate) fn from_parts(
        test: TestKind,
        p_value: f64,
        effect_size: f64,
        critical_value: f64,
        baseline: &[f64],
        sample: &[f64],
        significance_level: f64,
        confidence_level: f64,
    ) -> Self {
        let baseline_mean = mean(baseline);
        let sample_mean = mean(sample);
        let relative_difference = if baseline_mean != 0.0 {
            (sample_mean - baseline_mean) / baseline_mean
        } else {
            0.0
        };
        let is_significant = p_value < significance_level;

        Self {
            test,
            p_value,
            effect_size,
            confidence_level,
            critical_value,
            is_significant,
            baseline_mean,
            sample_mean,
            relative_difference,
            recommendation: recommend(is_significant, effect_size, relative_difference),
        }
    }
}

/// Tiered human-readable recommendation
///
/// Effect-size thresholds at 0.2 and 0.5; direction from the sign of the
/// relative difference (higher values are slower).
fn recommend(is_significant: bool, effect_size: f64, relative_difference: f64) -> String {
    if !is_significant {
        return "No significant change detected; no action needed.".to_string();
    }

    let direction = if relative_difference >= 0.0 {
        "regression"
    } else {
        "improvement"
    };
    let magnitude = effect_size.abs();

    if magnitude < 0.2 {
        format!(
            "Statistically significant {} with negligible effect size; monitor the next runs.",
            direction
        )
    } else if magnitude < 0.5 {
        format!(
            "Moderate {} detected; review recent changes to this operation.",
            direction
        )
    } else {
        format!(
            "Large {} detected; investigate before merging or releasing.",
            direction
        )
    }
}
