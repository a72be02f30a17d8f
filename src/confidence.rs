// Confidence interval around the sample mean
//
// Sample variance (n - 1) and the simplified t lookup from `approx`. The
// interval is what report consumers display next to the baseline mean.

use crate::approx::t_critical;
use crate::descriptive::{mean, sample_variance};
use serde::{Deserialize, Serialize};

/// A symmetric interval around the mean at a configured confidence level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// `mean ± t * s / sqrt(n)` with df = n - 1
///
/// A single sample (or an empty slice) degenerates to a zero-width interval
/// at the mean rather than an error.
pub fn confidence_interval(values: &[f64], level: f64) -> ConfidenceInterval {
    let m = mean(values);
    if values.len() < 2 {
        return ConfidenceInterval {
            level,
            lower: m,
            upper: m,
        };
    }

    let n = values.len();
    let s = sample_variance(values).sqrt();
    let standard_error = s / (n as f64).sqrt();
    let t = t_critical(n - 1, level);
    let margin = t * standard_error;

    ConfidenceInterval {
        level,
        lower: m - margin,
        upper: m + margin,
    }
}
