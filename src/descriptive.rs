//! Descriptive statistics over a cleaned measurement sequence
//!
//! All functions operate on plain `&[f64]` slices that have already been
//! through the outlier filter. Degenerate inputs (zero variance, too few
//! points for the shape statistics) produce defined zero defaults rather
//! than NaN, so nothing downstream has to NaN-guard.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Percentile table carried by every baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Full descriptive summary of one sample set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    /// Population variance (divide by n) - internal dispersion reporting
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub skewness: f64,
    /// Excess kurtosis; 0 below the n >= 4 the estimator needs
    pub kurtosis: f64,
    pub percentiles: PercentileTable,
    pub iqr: f64,
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median on a sorted copy: middle element for odd n, average of the two
/// middle elements for even n
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value after rounding to 2 decimal places
///
/// Ties break to the first value (in data order) reaching the maximum
/// frequency - an arbitrary but deterministic choice.
pub fn mode(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let rounded: Vec<i64> = values.iter().map(|v| (v * 100.0).round() as i64).collect();
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for r in &rounded {
        *counts.entry(*r).or_insert(0) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);

    for (i, r) in rounded.iter().enumerate() {
        if counts[r] == max_count {
            return values[i];
        }
    }
    values[0]
}

/// Population variance (divide by n)
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Sample variance (divide by n - 1); used by the confidence interval
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Percentile by sorted-order indexing: `sorted[ceil(p/100 * n) - 1]`,
/// index clamped to `[0, n-1]`
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let raw = (p / 100.0 * n as f64).ceil() as isize - 1;
    let idx = raw.clamp(0, n as isize - 1) as usize;
    sorted[idx]
}

/// Interquartile range, p75 - p25 via the same percentile indexing
pub fn iqr(values: &[f64]) -> f64 {
    percentile(values, 75.0) - percentile(values, 25.0)
}

/// Adjusted Fisher-Pearson skewness
///
/// `(n / ((n-1)(n-2))) * sum(((x - mean) / s)^3)` with the sample standard
/// deviation. Returns 0 below n = 3 or at zero variance.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let m = mean(values);
    let s = sample_variance(values).sqrt();
    if s == 0.0 {
        return 0.0;
    }
    let sum_cubed: f64 = values.iter().map(|v| ((v - m) / s).powi(3)).sum();
    let nf = n as f64;
    nf / ((nf - 1.0) * (nf - 2.0)) * sum_cubed
}

/// Excess kurtosis via the standard unbiased estimator
///
/// Requires n >= 4; returns 0 below that and at zero variance.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let m = mean(values);
    let s = sample_variance(values).sqrt();
    if s == 0.0 {
        return 0.0;
    }
    let sum_fourth: f64 = values.iter().map(|v| ((v - m) / s).powi(4)).sum();
    let nf = n as f64;
    let lead = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
    let correction = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    lead * sum_fourth - correction
}

/// Compute the full descriptive summary; `None` on an empty slice
pub fn summarize(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let percentiles = PercentileTable {
        p5: percentile_sorted(&sorted, 5.0),
        p10: percentile_sorted(&sorted, 10.0),
        p25: percentile_sorted(&sorted, 25.0),
        p50: percentile_sorted(&sorted, 50.0),
        p75: percentile_sorted(&sorted, 75.0),
        p90: percentile_sorted(&sorted, 90.0),
        p95: percentile_sorted(&sorted, 95.0),
        p99: percentile_sorted(&sorted, 99.0),
    };

    Some(DescriptiveStats {
        n: values.len(),
        mean: mean(values),
        median: median(values),
        mode: mode(values),
        variance: population_variance(values),
        std_dev: std_dev(values),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        skewness: skewness(values),
        kurtosis: kurtosis(values),
        percentiles,
        iqr: percentiles.p75 - percentiles.p25,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[2.0, 4.0, 6.0, 8.0]), 5.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
    }

    #[test]
    fn test_mode_first_found_tie_break() {
        // 1.0 and 2.0 both occur twice; 1.0 appears first
        assert_eq!(mode(&[1.0, 2.0, 1.0, 2.0, 3.0]), 1.0);
        // Rounding to 2 decimals merges 1.001 and 1.004
        assert_eq!(mode(&[1.001, 1.004, 7.0]), 1.001);
    }

    #[test]
    fn test_population_variance() {
        // mean=5, sum of squared deviations=20, n=4
        assert!((population_variance(&[2.0, 4.0, 6.0, 8.0]) - 5.0).abs() < 1e-12);
        assert_eq!(population_variance(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_sample_variance_uses_n_minus_one() {
        let v = sample_variance(&[2.0, 4.0, 6.0, 8.0]);
        assert!((v - 20.0 / 3.0).abs() < 1e-12);
        assert_eq!(sample_variance(&[42.0]), 0.0);
    }

    #[test]
    fn test_percentile_indexing() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        // ceil(0.5 * 10) - 1 = 4 -> sorted[4]
        assert_eq!(percentile(&values, 50.0), 5.0);
        // ceil(0.99 * 10) - 1 = 9
        assert_eq!(percentile(&values, 99.0), 10.0);
        // p=0 clamps to the first element
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 10.0);
    }

    #[test]
    fn test_percentile_50_matches_median_odd_n() {
        let values = vec![12.0, 7.0, 19.0, 3.0, 8.0];
        assert_eq!(percentile(&values, 50.0), median(&values));
    }

    #[test]
    fn test_iqr_from_percentiles() {
        let values: Vec<f64> = (1..=8).map(|v| v as f64).collect();
        // p75: ceil(6)-1=5 -> 6.0; p25: ceil(2)-1=1 -> 2.0
        assert_eq!(iqr(&values), 4.0);
    }

    #[test]
    fn test_skewness_symmetric_near_zero() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&values).abs() < 1e-9);
    }

    #[test]
    fn test_skewness_right_tail_positive() {
        let values = vec![1.0, 1.0, 1.0, 1.0, 10.0];
        assert!(skewness(&values) > 0.0);
    }

    #[test]
    fn test_constant_samples_safe() {
        // stddev = 0; the shape statistics must not produce NaN
        let values = vec![10.0, 10.0, 10.0, 10.0];
        assert_eq!(std_dev(&values), 0.0);
        assert_eq!(skewness(&values), 0.0);
        assert_eq!(kurtosis(&values), 0.0);

        let stats = summarize(&values).unwrap();
        assert!(stats.skewness.is_finite());
        assert!(stats.kurtosis.is_finite());
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.iqr, 0.0);
    }

    #[test]
    fn test_kurtosis_needs_four_points() {
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), 0.0);
        // Heavy-tailed sample should report positive excess kurtosis
        let heavy = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0];
        assert!(kurtosis(&heavy) > 0.0);
    }

    #[test]
    fn test_summarize_populates_everything() {
        let values = vec![10.0, 12.0, 11.0, 13.0, 10.0, 11.5, 12.5, 10.5];
        let stats = summarize(&values).unwrap();
        assert_eq!(stats.n, 8);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 13.0);
        assert_eq!(stats.median, median(&values));
        assert_eq!(stats.percentiles.p50, percentile(&values, 50.0));
        assert!(stats.variance > 0.0);
        assert!(summarize(&[]).is_none());
    }
}
