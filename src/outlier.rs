// IQR-based outlier trimming
//
// Applied before any statistic is computed. Timing distributions are
// right-skewed, so the fence multiplier defaults to 2.5 rather than the
// textbook 1.5 (see EngineConfig::outlier_threshold).

/// Result of one filtering pass
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Surviving values, relative order preserved
    pub kept: Vec<f64>,
    /// Number of values trimmed
    pub removed: usize,
}

impl FilterOutcome {
    /// Fraction of the input that was trimmed, in [0, 1]
    pub fn removed_fraction(&self) -> f64 {
        let total = self.kept.len() + self.removed;
        if total == 0 {
            return 0.0;
        }
        self.removed as f64 / total as f64
    }
}

/// Trim values outside `[Q1 - k*IQR, Q3 + k*IQR]`
///
/// Quartiles come from sorted-order indexing (`floor(n*0.25)` /
/// `floor(n*0.75)`), matching the percentile convention used everywhere else
/// in this crate. Relative order of survivors is preserved. Callers building
/// baselines must treat removal of more than 30% of the input as
/// untrustworthy data (see `baseline::BaselineBuilder`).
pub fn filter_outliers(values: &[f64], iqr_multiplier: f64) -> FilterOutcome {
    if values.len() < 2 {
        return FilterOutcome {
            kept: values.to_vec(),
            removed: 0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = sorted[(sorted.len() as f64 * 0.25).floor() as usize];
    let q3 = sorted[(sorted.len() as f64 * 0.75).floor() as usize];
    let iqr = q3 - q1;

    let lower = q1 - iqr_multiplier * iqr;
    let upper = q3 + iqr_multiplier * iqr;

    let kept: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| *v >= lower && *v <= upper)
        .collect();
    let removed = values.len() - kept.len();

    FilterOutcome { kept, removed }
}
