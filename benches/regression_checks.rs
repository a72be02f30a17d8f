//! Regression-check benchmarks
//!
//! The bootstrap is the CPU-heavy path (1,000 resamples per check); the
//! analytic tests should stay orders of magnitude cheaper. These benches
//! keep that gap visible when the suite evolves.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use perfbase::config::EngineConfig;
use perfbase::regression::{run_test, TestKind};

fn sample_series(len: usize, base: f64) -> Vec<f64> {
    (0..len)
        .map(|i| base + [0.0, 1.5, -1.5, 0.7, -0.7][i % 5])
        .collect()
}

fn bench_test_kinds(c: &mut Criterion) {
    let config = EngineConfig::default();
    let baseline = sample_series(50, 100.0);
    let sample = sample_series(50, 104.0);

    let mut group = c.benchmark_group("regression_tests");
    for kind in [
        TestKind::Welch,
        TestKind::MannWhitney,
        TestKind::KolmogorovSmirnov,
        TestKind::Bootstrap,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, kind| {
            b.iter(|| run_test(*kind, black_box(&baseline), black_box(&sample), &config));
        });
    }
    group.finish();
}

fn bench_bootstrap_resample_counts(c: &mut Criterion) {
    let baseline = sample_series(20, 100.0);
    let sample = sample_series(20, 103.0);

    let mut group = c.benchmark_group("bootstrap_resamples");
    for resamples in [100usize, 1000, 5000] {
        let config = EngineConfig {
            bootstrap_resamples: resamples,
            ..EngineConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(resamples),
            &config,
            |b, config| {
                b.iter(|| {
                    run_test(
                        TestKind::Bootstrap,
                        black_box(&baseline),
                        black_box(&sample),
                        config,
                    )
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_test_kinds, bench_bootstrap_resample_counts);
criterion_main!(benches);
