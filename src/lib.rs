//! Perfbase - statistical performance-baseline and regression-detection engine
//!
//! Builds robust statistical baselines from streams of timed measurements,
//! detects statistically significant regressions or improvements in new
//! measurements via automatically selected hypothesis tests, and produces
//! short-horizon linear trend forecasts.

pub mod approx;
pub mod baseline;
pub mod clock;
pub mod config;
pub mod confidence;
pub mod descriptive;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod normality;
pub mod outlier;
pub mod regression;
pub mod sample;
pub mod trend;

pub use baseline::PerformanceBaseline;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{EngineSnapshot, PerformanceEngine, PerformanceTrend};
pub use error::EngineError;
pub use regression::{RegressionOutcome, TestKind};
pub use sample::{MeasurementSample, SampleContext, SeriesKey};
pub use trend::TrendDirection;
