// Documented statistical approximations
//
// These deliberately stand in for exact distribution functions. The
// regression verdicts consumed by CI were tuned against these curves, so
// swapping in exact CDFs would shift p-values and flip borderline verdicts.
// Callers must treat the outputs as consistent comparators, not calibrated
// probabilities.

/// Standard normal CDF via the Abramowitz-Stegun rational approximation
/// (formula 26.2.17, |error| < 7.5e-8)
pub fn normal_cdf(z: f64) -> f64 {
    if z < -8.0 {
        return 0.0;
    }
    if z > 8.0 {
        return 1.0;
    }

    let b1 = 0.319381530;
    let b2 = -0.356563782;
    let b3 = 1.781477937;
    let b4 = -1.821255978;
    let b5 = 1.330274429;
    let p = 0.2316419;

    let x = z.abs();
    let t = 1.0 / (1.0 + p * x);
    let poly = t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))));
    let pdf = (-x * x / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    let tail = pdf * poly;

    if z >= 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Two-sided p-value for a standard-normal test statistic
pub fn two_sided_p(z: f64) -> f64 {
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Simplified t critical value
///
/// For df >= 30 the normal-approximation constants for the three supported
/// confidence levels (nearest match wins); below 30 a linear fallback
/// `2.0 + (30 - df) * 0.1` widens the interval as df shrinks. Not a t-table;
/// the widening is monotone and reproducible, which is all the interval
/// consumers need.
pub fn t_critical(df: usize, confidence_level: f64) -> f64 {
    if df >= 30 {
        if confidence_level >= 0.95 {
            1.96
        } else if confidence_level >= 0.90 {
            1.645
        } else {
            1.282
        }
    } else {
        2.0 + (30 - df) as f64 * 0.1
    }
}
