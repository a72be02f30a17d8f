//! Property-based invariants for the statistics core
//!
//! These pin the structural guarantees the engine's verdicts rest on:
//! filter idempotence, percentile/median agreement, NaN-free degenerate
//! paths, and verdict determinism.

use proptest::prelude::*;

use perfbase::config::EngineConfig;
use perfbase::descriptive;
use perfbase::outlier::filter_outliers;
use perfbase::regression::{run_test, TestKind};
use perfbase::trend::{analyze_trend, TrendDirection};

fn measurement_values(len: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..10_000.0, len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Repeated filtering only ever shrinks and reaches a fixpoint that
    /// further filtering leaves untouched
    #[test]
    fn prop_outlier_filter_converges(values in measurement_values(1..100), k in 1.5f64..4.0) {
        let mut current = values;
        for _ in 0..100 {
            let pass = filter_outliers(&current, k);
            prop_assert!(pass.kept.len() <= current.len());
            if pass.removed == 0 {
                break;
            }
            current = pass.kept;
        }
        // At the fixpoint the filter is the identity
        let last = filter_outliers(&current, k);
        prop_assert_eq!(&last.kept, &current);
        prop_assert_eq!(last.removed, 0);
    }

    /// Survivors preserve relative order and are a subsequence of the input
    #[test]
    fn prop_outlier_filter_preserves_order(values in measurement_values(1..100)) {
        let outcome = filter_outliers(&values, 2.5);
        let mut cursor = values.iter();
        for kept in &outcome.kept {
            prop_assert!(cursor.any(|v| v == kept));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// percentile(50) must agree with the median wherever the sorted-order
    /// indexing pins a single element (odd lengths)
    #[test]
    fn prop_percentile_50_is_median_odd_n(values in measurement_values(1..50)) {
        let mut values = values;
        if values.len() % 2 == 0 {
            values.pop();
        }
        prop_assume!(!values.is_empty());
        let p50 = descriptive::percentile(&values, 50.0);
        let med = descriptive::median(&values);
        prop_assert!((p50 - med).abs() < 1e-9, "p50={} median={}", p50, med);
    }

    /// Every statistic stays finite, whatever the input
    #[test]
    fn prop_statistics_never_nan(values in measurement_values(1..60)) {
        let stats = descriptive::summarize(&values).unwrap();
        prop_assert!(stats.mean.is_finite());
        prop_assert!(stats.median.is_finite());
        prop_assert!(stats.variance.is_finite());
        prop_assert!(stats.std_dev.is_finite());
        prop_assert!(stats.skewness.is_finite());
        prop_assert!(stats.kurtosis.is_finite());
        prop_assert!(stats.iqr >= 0.0);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
    }

    /// Percentiles are monotone in p
    #[test]
    fn prop_percentiles_monotone(values in measurement_values(1..60)) {
        let stats = descriptive::summarize(&values).unwrap();
        let table = [
            stats.percentiles.p5,
            stats.percentiles.p10,
            stats.percentiles.p25,
            stats.percentiles.p50,
            stats.percentiles.p75,
            stats.percentiles.p90,
            stats.percentiles.p95,
            stats.percentiles.p99,
        ];
        for pair in table.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Monotone series classify by sign of the step
    #[test]
    fn prop_monotone_trend_direction(start in 100.0f64..1000.0, step in 0.5f64..50.0, len in 5usize..40) {
        let decreasing: Vec<f64> = (0..len).map(|i| start - i as f64 * step).collect();
        prop_assert_eq!(analyze_trend(&decreasing).direction, TrendDirection::Improving);

        let increasing: Vec<f64> = (0..len).map(|i| start + i as f64 * step).collect();
        prop_assert_eq!(analyze_trend(&increasing).direction, TrendDirection::Degrading);
    }

    /// Identical inputs give identical verdicts for every test kind -
    /// nothing in the suite depends on ambient randomness
    #[test]
    fn prop_verdicts_deterministic(
        baseline in measurement_values(5..30),
        sample in measurement_values(5..30),
    ) {
        let config = EngineConfig::default();
        for kind in [
            TestKind::MannWhitney,
            TestKind::KolmogorovSmirnov,
            TestKind::Welch,
            TestKind::Bootstrap,
        ] {
            let a = run_test(kind, &baseline, &sample, &config);
            let b = run_test(kind, &baseline, &sample, &config);
            prop_assert_eq!(a, b);
        }
    }

    /// p-values stay inside [0, 1] across arbitrary pairings
    #[test]
    fn prop_p_values_bounded(
        baseline in measurement_values(5..30),
        sample in measurement_values(5..30),
    ) {
        let config = EngineConfig::default();
        for kind in [
            TestKind::MannWhitney,
            TestKind::KolmogorovSmirnov,
            TestKind::Welch,
            TestKind::Bootstrap,
        ] {
            let outcome = run_test(kind, &baseline, &sample, &config);
            prop_assert!((0.0..=1.0).contains(&outcome.p_value), "{} p={}", kind, outcome.p_value);
        }
    }
}
