// Test selection
//
// Ordered decision rules; the order is load-bearing:
// 1. A normal baseline with >= 30 new samples justifies the parametric
//    Welch test, which is the most powerful of the four when its
//    assumptions hold.
// 2. With >= 20 points on both sides the rank-based Mann-Whitney U is
//    robust to the skew timing data usually has.
// 3. Below 10 points on either side the asymptotic approximations are
//    unreliable, so resampling wins.
// 4. Kolmogorov-Smirnov covers the middle ground.

use super::outcome::TestKind;

/// Sample-size floor below which analytic approximations give way to
/// resampling
pub const SMALL_SAMPLE_FLOOR: usize = 10;

/// Pick the hypothesis test for a baseline/new-sample pairing
pub fn select_test(baseline_is_normal: bool, baseline_n: usize, new_n: usize) -> TestKind {
    if baseline_is_normal && new_n >= 30 {
        TestKind::Welch
    } else if baseline_n >= 20 && new_n >= 20 {
        TestKind::MannWhitney
    } else if baseline_n < SMALL_SAMPLE_FLOOR || new_n < SMALL_SAMPLE_FLOOR {
        TestKind::Bootstrap
    } else {
        TestKind::KolmogorovSmirnov
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_large_sample_prefers_welch() {
        assert_eq!(select_test(true, 50, 30), TestKind::Welch);
        assert_eq!(select_test(true, 15, 100), TestKind::Welch);
    }

    #[test]
    fn test_non_normal_large_samples_prefer_mann_whitney() {
        assert_eq!(select_test(false, 20, 20), TestKind::MannWhitney);
        assert_eq!(select_test(false, 100, 25), TestKind::MannWhitney);
    }

    #[test]
    fn test_normal_baseline_small_new_sample_falls_through() {
        // Rule 1 needs >= 30 new samples; rule 2 catches 20/20
        assert_eq!(select_test(true, 20, 20), TestKind::MannWhitney);
    }

    #[test]
    fn test_small_samples_prefer_bootstrap() {
        assert_eq!(select_test(false, 5, 50), TestKind::Bootstrap);
        assert_eq!(select_test(false, 50, 5), TestKind::Bootstrap);
        assert_eq!(select_test(true, 8, 9), TestKind::Bootstrap);
    }

    #[test]
    fn test_middle_ground_uses_ks() {
        assert_eq!(select_test(false, 12, 15), TestKind::KolmogorovSmirnov);
        assert_eq!(select_test(true, 15, 15), TestKind::KolmogorovSmirnov);
    }
}
