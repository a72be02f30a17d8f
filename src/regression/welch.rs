// Welch's t-test (unequal variances)
//
// Parametric workhorse for normal baselines with enough new samples.
// Welch-Satterthwaite degrees of freedom; the p-value uses the normal CDF
// at any df - a documented approximation the stored verdict baselines were
// tuned against, so it is not upgraded to an exact t-CDF.

use crate::approx::{t_critical, two_sided_p};
use crate::config::EngineConfig;
use crate::descriptive::{mean, sample_variance};

use super::outcome::{RegressionOutcome, TestKind};

/// Run Welch's t-test on baseline vs new samples
pub fn run(baseline: &[f64], sample: &[f64], config: &EngineConfig) -> RegressionOutcome {
    let n1 = baseline.len() as f64;
    let n2 = sample.len() as f64;
    let m1 = mean(baseline);
    let m2 = mean(sample);
    let v1 = sample_variance(baseline);
    let v2 = sample_variance(sample);

    let se_sq = v1 / n1 + v2 / n2;
    // Zero-variance guard keeps the statistic finite; identical constant
    // groups come out at t = 0, separated ones at an enormous |t|
    let se = se_sq.sqrt().max(1e-12);
    let t = (m2 - m1) / se;

    let df = if se_sq > 0.0 && n1 > 1.0 && n2 > 1.0 {
        let denom = (v1 / n1).powi(2) / (n1 - 1.0) + (v2 / n2).powi(2) / (n2 - 1.0);
        if denom > 0.0 {
            se_sq.powi(2) / denom
        } else {
            (n1 + n2 - 2.0).max(1.0)
        }
    } else {
        (n1 + n2 - 2.0).max(1.0)
    };

    let p_value = two_sided_p(t);

    // Cohen's d with pooled standard deviation
    let pooled_sd = if n1 + n2 > 2.0 {
        (((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / (n1 + n2 - 2.0)).sqrt()
    } else {
        0.0
    };
    // Zero pooled variance with distinct means: report a large finite
    // effect instead of infinity
    let effect_size = if pooled_sd > 0.0 {
        (m2 - m1) / pooled_sd
    } else if m2 == m1 {
        0.0
    } else {
        1e6_f64.copysign(m2 - m1)
    };

    RegressionOutcome::from_parts(
        TestKind::Welch,
        p_value,
        effect_size,
        t_critical(df as usize, config.confidence_level),
        baseline,
        sample,
        config.significance_level,
        config.confidence_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_shift_detected() {
        let baseline = vec![100.0, 102.0, 98.0, 101.0, 99.0, 100.5, 99.5, 101.5];
        let sample = vec![150.0, 152.0, 148.0, 151.0, 149.0, 150.5, 149.5, 151.5];
        let outcome = run(&baseline, &sample, &EngineConfig::default());

        assert!(outcome.is_significant, "p={}", outcome.p_value);
        assert!(outcome.effect_size > 5.0); // enormous standardized difference
        assert!((outcome.relative_difference - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_same_distribution_not_significant() {
        let baseline = vec![100.0, 102.0, 98.0, 101.0, 99.0, 100.5, 99.5, 101.5];
        let sample = vec![100.2, 101.8, 98.4, 100.8, 99.2, 100.6, 99.4, 101.2];
        let outcome = run(&baseline, &sample, &EngineConfig::default());
        assert!(!outcome.is_significant, "p={}", outcome.p_value);
    }

    #[test]
    fn test_identical_constant_groups() {
        let values = vec![10.0; 10];
        let outcome = run(&values, &values, &EngineConfig::default());
        assert!(!outcome.is_significant);
        assert_eq!(outcome.effect_size, 0.0);
        assert!(outcome.p_value > 0.99);
    }

    #[test]
    fn test_separated_constant_groups() {
        // Zero variance on both sides with different means: the guard keeps
        // everything finite and the verdict lands significant
        let outcome = run(&[10.0; 10], &[20.0; 10], &EngineConfig::default());
        assert!(outcome.is_significant);
        assert!(outcome.p_value < 1e-6);
        assert!(outcome.effect_size.is_finite());
    }

    #[test]
    fn test_unequal_variances_handled() {
        let tight: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64 * 0.1).collect();
        let wide: Vec<f64> = (0..20).map(|i| 100.0 + (i % 10) as f64 * 4.0).collect();
        let outcome = run(&tight, &wide, &EngineConfig::default());
        // Means differ (wide centers at 118); Welch must pick it up despite
        // the variance imbalance
        assert!(outcome.sample_mean > outcome.baseline_mean);
        assert!(outcome.p_value.is_finite());
    }
}
