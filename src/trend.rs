//! Linear trend analysis over a time-ordered measurement series
//!
//! Ordinary least squares over (sample index, value) pairs. Lower values are
//! better (execution time), so a negative slope classifies as improving.

use serde::{Deserialize, Serialize};

/// Minimum points before a fit is attempted; below this the summary
/// defaults to stable with zero slope rather than erroring
pub const MIN_TREND_POINTS: usize = 5;

/// Slope magnitude below which a series counts as stable
const STABLE_SLOPE_BOUND: f64 = 0.1;

/// Window length for the change-point scan
const CHANGE_POINT_WINDOW: usize = 5;

/// Direction of a fitted performance trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Times are shrinking
    Improving,
    Stable,
    /// Times are growing
    Degrading,
}

/// Linear-fit summary of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    /// OLS slope in value units per sample step
    pub slope: f64,
    /// Squared Pearson correlation of the fit
    pub r_squared: f64,
    /// Indices where the series jumps more than 3 sigma from the mean of the
    /// preceding window; empty when undetectable
    pub change_points: Vec<usize>,
}

impl TrendSummary {
    /// Stable zero-slope default for series too short to fit
    pub fn stable() -> Self {
        Self {
            direction: TrendDirection::Stable,
            slope: 0.0,
            r_squared: 0.0,
            change_points: Vec::new(),
        }
    }
}

/// Fit a linear trend to `values` in series order
pub fn analyze_trend(values: &[f64]) -> TrendSummary {
    if values.len() < MIN_TREND_POINTS {
        return TrendSummary::stable();
    }

    let n = values.len() as f64;
    let mean_x = (values.len() - 1) as f64 / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        ss_xy += dx * dy;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
    }

    let slope = if ss_xx > 0.0 { ss_xy / ss_xx } else { 0.0 };
    let r_squared = if ss_xx > 0.0 && ss_yy > 0.0 {
        let r = ss_xy / (ss_xx * ss_yy).sqrt();
        r * r
    } else {
        0.0
    };

    let direction = if slope.abs() < STABLE_SLOPE_BOUND {
        TrendDirection::Stable
    } else if slope < 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Degrading
    };

    TrendSummary {
        direction,
        slope,
        r_squared,
        change_points: find_change_points(values),
    }
}

/// Flag indices whose value sits more than 3 population-sigma away from the
/// mean of the preceding window
///
/// A steady ramp stays within the bound; a genuine level shift exceeds it.
fn find_change_points(values: &[f64]) -> Vec<usize> {
    let mut points = Vec::new();
    if values.len() <= CHANGE_POINT_WINDOW {
        return points;
    }

    for i in CHANGE_POINT_WINDOW..values.len() {
        let window = &values[i - CHANGE_POINT_WINDOW..i];
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window.len() as f64;
        let sigma = var.sqrt();
        if sigma > 0.0 && (values[i] - mean).abs() > 3.0 * sigma {
            points.push(i);
        }
    }
    points
}
