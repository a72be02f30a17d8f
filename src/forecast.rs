// Short-horizon linear extrapolation with naive confidence bands
//
// Deliberately simple: the trend slope applied to the most recent value,
// band = +/- 1.96 * sigma of the residuals around that value. Not an ARIMA
// or seasonal model; the horizons are short enough that a line is honest.

use serde::{Deserialize, Serialize};

/// Days covered by the short forecast horizon
pub const WEEK_HORIZON_DAYS: f64 = 7.0;
/// Days covered by the long forecast horizon
pub const MONTH_HORIZON_DAYS: f64 = 30.0;

const BAND_Z: f64 = 1.96;

/// One forecast horizon: projected mean with a symmetric band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub horizon_days: f64,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Next-week and next-month projections for one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendForecast {
    pub next_week: ForecastPoint,
    pub next_month: ForecastPoint,
}

/// Extrapolate from the last observed value along the fitted slope
///
/// The slope is treated as value units per day. Sigma is the standard
/// deviation of the series' residuals from the last value, so a volatile
/// recent history widens both bands. Empty input projects zeroes.
pub fn forecast(values: &[f64], slope: f64) -> TrendForecast {
    let last = values.last().copied().unwrap_or(0.0);
    let sigma = residual_sigma(values, last);

    TrendForecast {
        next_week: horizon(last, slope, sigma, WEEK_HORIZON_DAYS),
        next_month: horizon(last, slope, sigma, MONTH_HORIZON_DAYS),
    }
}

fn horizon(last: f64, slope: f64, sigma: f64, days: f64) -> ForecastPoint {
    let mean = last + slope * days;
    let margin = BAND_Z * sigma;
    ForecastPoint {
        horizon_days: days,
        mean,
        lower: mean - margin,
        upper: mean + margin,
    }
}

fn residual_sigma(values: &[f64], reference: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean_sq = values
        .iter()
        .map(|v| (v - reference).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    mean_sq.sqrt()
}
