// Bootstrap mean-difference test
//
// The fallback when either side is too small for the analytic
// approximations to be trusted. Each round draws a with-replacement
// resample from both groups independently and records the difference of
// resampled means. The resampling distribution is centered on the observed
// difference, so the null distribution is recovered by recentering: a
// round counts as "at least as extreme" when its recentered difference
// matches or exceeds the observed one in magnitude. The whole procedure is
// driven by a configured seed so repeated checks over the same inputs are
// bit-identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::descriptive::{mean, percentile, sample_variance};

use super::outcome::{RegressionOutcome, TestKind};

// Decorrelates the two groups' RNG streams from a single configured seed
const GROUP_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Run the bootstrap test on baseline vs new samples
pub fn run(baseline: &[f64], sample: &[f64], config: &EngineConfig) -> RegressionOutcome {
    let observed = mean(sample) - mean(baseline);

    let mut rng_baseline = StdRng::seed_from_u64(config.bootstrap_seed);
    let mut rng_sample = StdRng::seed_from_u64(config.bootstrap_seed ^ GROUP_STREAM_SALT);

    let resamples = config.bootstrap_resamples;
    let mut centered_diffs = Vec::with_capacity(resamples);
    let mut at_least_as_extreme = 0usize;

    for _ in 0..resamples {
        let mean_baseline = resample_mean(baseline, &mut rng_baseline);
        let mean_sample = resample_mean(sample, &mut rng_sample);
        let centered = (mean_sample - mean_baseline) - observed;
        if centered.abs() >= observed.abs() {
            at_least_as_extreme += 1;
        }
        centered_diffs.push(centered.abs());
    }

    let p_value = at_least_as_extreme as f64 / resamples as f64;
    // (1 - alpha) quantile of the null-centered difference magnitudes: the
    // smallest observed shift this seed/sample pairing would call
    // significant
    let critical_value = percentile(&centered_diffs, (1.0 - config.significance_level) * 100.0);

    // Cohen's d for comparability with the parametric path
    let n1 = baseline.len() as f64;
    let n2 = sample.len() as f64;
    let pooled_sd = if n1 + n2 > 2.0 {
        (((n1 - 1.0) * sample_variance(baseline) + (n2 - 1.0) * sample_variance(sample))
            / (n1 + n2 - 2.0))
            .sqrt()
    } else {
        0.0
    };
    let effect_size = if pooled_sd > 0.0 {
        observed / pooled_sd
    } else if observed == 0.0 {
        0.0
    } else {
        1e6_f64.copysign(observed)
    };

    RegressionOutcome::from_parts(
        TestKind::Bootstrap,
        p_value,
        effect_size,
        critical_value,
        baseline,
        sample,
        config.significance_level,
        config.confidence_level,
    )
}

fn resample_mean(values: &[f64], rng: &mut StdRng) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len();
    let sum: f64 = (0..n).map(|_| values[rng.gen_range(0..n)]).sum();
    sum / n as f64
}
