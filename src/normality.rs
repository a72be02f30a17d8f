// Normality heuristic standing in for Shapiro-Wilk
//
// Normal iff |skewness| < 2 and |excess kurtosis| < 7. The p-value is a
// fixed nominal constant (0.8 normal / 0.02 otherwise) that exists purely to
// drive test selection downstream - it is not a calibrated probability and
// callers must not report it as one.

use crate::descriptive::{kurtosis, skewness};
use serde::{Deserialize, Serialize};

const SKEWNESS_BOUND: f64 = 2.0;
const KURTOSIS_BOUND: f64 = 7.0;

const NOMINAL_P_NORMAL: f64 = 0.8;
const NOMINAL_P_NON_NORMAL: f64 = 0.02;

/// Verdict of the skewness/kurtosis normality heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityVerdict {
    pub is_normal: bool,
    /// Fixed nominal p-value, selection-driving only
    pub p_value: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Classify a sample set as plausibly normal
pub fn test_normality(values: &[f64]) -> NormalityVerdict {
    let skew = skewness(values);
    let kurt = kurtosis(values);
    let is_normal = skew.abs() < SKEWNESS_BOUND && kurt.abs() < KURTOSIS_BOUND;

    NormalityVerdict {
        is_normal,
        p_value: if is_normal {
            NOMINAL_P_NORMAL
        } else {
            NOMINAL_P_NON_NORMAL
        },
        skewness: skew,
        kurtosis: kurt,
    }
}
