// Two-sample Kolmogorov-Smirnov test
//
// Maximum absolute distance between the two empirical CDFs, evaluated over
// the union of observed values. The critical value is the 5%-level
// approximation 1.36 * sqrt((n1+n2)/(n1*n2)); the p-value is a coarse
// two-valued stand-in (0.02 significant / 0.8 not) rather than the exact
// KS distribution - a documented limitation kept for verdict parity.

use crate::config::EngineConfig;

use super::outcome::{RegressionOutcome, TestKind};

const NOMINAL_P_SIGNIFICANT: f64 = 0.02;
const NOMINAL_P_NOT_SIGNIFICANT: f64 = 0.8;

/// Run the KS test on baseline vs new samples
pub fn run(baseline: &[f64], sample: &[f64], config: &EngineConfig) -> RegressionOutcome {
    let n1 = baseline.len() as f64;
    let n2 = sample.len() as f64;

    let mut sorted1 = baseline.to_vec();
    sorted1.sort_by(f64::total_cmp);
    let mut sorted2 = sample.to_vec();
    sorted2.sort_by(f64::total_cmp);

    let mut union: Vec<f64> = sorted1.iter().chain(sorted2.iter()).copied().collect();
    union.sort_by(f64::total_cmp);
    union.dedup();

    let mut d_max: f64 = 0.0;
    for v in &union {
        let f1 = ecdf(&sorted1, *v);
        let f2 = ecdf(&sorted2, *v);
        d_max = d_max.max((f1 - f2).abs());
    }

    let critical_value = 1.36 * ((n1 + n2) / (n1 * n2)).sqrt();
    let significant = d_max > critical_value;
    let p_value = if significant {
        NOMINAL_P_SIGNIFICANT
    } else {
        NOMINAL_P_NOT_SIGNIFICANT
    };

    RegressionOutcome::from_parts(
        TestKind::KolmogorovSmirnov,
        p_value,
        d_max,
        critical_value,
        baseline,
        sample,
        config.significance_level,
        config.confidence_level,
    )
}

/// Fraction of `sorted` at or below `v`
fn ecdf(sorted: &[f64], v: f64) -> f64 {
    let count = sorted.partition_point(|x| *x <= v);
    count as f64 / sorted.len() as f64
}
