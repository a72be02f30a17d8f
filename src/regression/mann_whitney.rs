// Mann-Whitney U test (rank sum, normal approximation)
//
// Non-parametric: compares rank distributions, so it tolerates the heavy
// right tail of timing data. Ties receive average ranks. The z-score uses
// the large-sample normal approximation without the tie correction term -
// consistent with the rest of the crate's documented approximations.

use crate::approx::{t_critical, two_sided_p};
use crate::config::EngineConfig;

use super::outcome::{RegressionOutcome, TestKind};

/// Run the U test on baseline vs new samples
pub fn run(baseline: &[f64], sample: &[f64], config: &EngineConfig) -> RegressionOutcome {
    let n1 = baseline.len() as f64;
    let n2 = sample.len() as f64;

    // Rank the combined values, remembering group membership
    let mut combined: Vec<(f64, bool)> = baseline
        .iter()
        .map(|v| (*v, true))
        .chain(sample.iter().map(|v| (*v, false)))
        .collect();
    combined.sort_by(|a, b| a.0.total_cmp(&b.0));

    let ranks = average_ranks(&combined);

    let rank_sum_baseline: f64 = combined
        .iter()
        .zip(&ranks)
        .filter(|((_, is_baseline), _)| *is_baseline)
        .map(|(_, rank)| *rank)
        .sum();

    let u1 = rank_sum_baseline - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;
    let u = u1.min(u2);

    let mu = n1 * n2 / 2.0;
    let sigma = (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();
    let z = if sigma > 0.0 { (u - mu) / sigma } else { 0.0 };
    let p_value = two_sided_p(z);

    // Rank-biserial correlation: 0 = indistinguishable, +/-1 = full
    // separation of the two groups
    let effect_size = if n1 > 0.0 && n2 > 0.0 {
        1.0 - 2.0 * u / (n1 * n2)
    } else {
        0.0
    };

    RegressionOutcome::from_parts(
        TestKind::MannWhitney,
        p_value,
        effect_size,
        t_critical(30, config.confidence_level),
        baseline,
        sample,
        config.significance_level,
        config.confidence_level,
    )
}

/// 1-based ranks over sorted values, ties averaged
fn average_ranks(sorted: &[(f64, bool)]) -> Vec<f64> {
    let mut ranks = vec![0.0; sorted.len()];
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j + 1 < sorted.len() && sorted[j + 1].0 == sorted[i].0 {
            j += 1;
        }
        // Positions i..=j share the same value; average their ranks
        let avg = (i + 1 + j + 1) as f64 / 2.0;
        for rank in ranks.iter_mut().take(j + 1).skip(i) {
            *rank = avg;
        }
        i = j + 1;
    }
    ranks
}
