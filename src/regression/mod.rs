// Two-sample regression testing with automatic test selection
//
// Four interchangeable hypothesis tests behind one verdict type, plus a
// selector that picks among them from the stored baseline's normality and
// the sample sizes on both sides. P-values come from the documented
// approximations in `approx` and are comparators, not calibrated
// probabilities.

mod bootstrap;
mod ks;
mod mann_whitney;
mod outcome;
mod selector;
mod welch;

pub use outcome::{RegressionOutcome, TestKind};
pub use selector::select_test;

use crate::config::EngineConfig;

/// Minimum new-sample count for any regression check
pub const MIN_NEW_SAMPLES: usize = 5;

/// Run one specific hypothesis test
pub fn run_test(
    kind: TestKind,
    baseline: &[f64],
    sample: &[f64],
    config: &EngineConfig,
) -> RegressionOutcome {
    match kind {
        TestKind::MannWhitney => mann_whitney::run(baseline, sample, config),
        TestKind::KolmogorovSmirnov => ks::run(baseline, sample, config),
        TestKind::Welch => welch::run(baseline, sample, config),
        TestKind::Bootstrap => bootstrap::run(baseline, sample, config),
    }
}

/// Select and run the appropriate test for this pairing
pub fn run_selected(
    baseline_is_normal: bool,
    baseline: &[f64],
    sample: &[f64],
    config: &EngineConfig,
) -> RegressionOutcome {
    let kind = select_test(baseline_is_normal, baseline.len(), sample.len());
    tracing::debug!(
        %kind,
        baseline_n = baseline.len(),
        sample_n = sample.len(),
        "selected regression test"
    );
    run_test(kind, baseline, sample, config)
}
