//! Engine facade: the explicitly constructed, dependency-injected entry
//! point owning the sample store, baseline store, and configuration
//!
//! One engine instance per isolated context (test run, CI shard); no
//! module-level singleton. All statistical edge cases surface as `None`
//! plus a warning - the only error a caller must handle is an invalid
//! configuration.

use crate::baseline::{build_baseline, BaselineStore, PerformanceBaseline};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::forecast::{forecast, TrendForecast};
use crate::outlier::filter_outliers;
use crate::regression::{run_selected, run_test, RegressionOutcome, TestKind, MIN_NEW_SAMPLES};
use crate::sample::{MeasurementSample, SampleContext, SampleStore, SeriesKey};
use crate::trend::{analyze_trend, TrendSummary};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Minimum in-window points for a trend query
pub const MIN_TREND_WINDOW_POINTS: usize = 10;

const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Schema version stamped into exported snapshots
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// One (timestamp, value) point of a trend window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp_ms: u64,
    pub value: f64,
}

/// Time-windowed trend view with forecasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTrend {
    pub operation: String,
    pub environment: String,
    pub window_days: u64,
    pub points: Vec<TrendPoint>,
    pub summary: TrendSummary,
    pub forecast: TrendForecast,
}

/// JSON-serializable snapshot of engine state for external persistence
///
/// Baselines are keyed `"<operation>_<environment>"` - the compatibility
/// contract for any external store. BTreeMaps keep the serialized form
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub schema_version: u32,
    pub baselines: BTreeMap<String, PerformanceBaseline>,
    pub config: EngineConfig,
    pub sample_counts: BTreeMap<String, usize>,
}

impl EngineSnapshot {
    /// Deterministic pretty JSON for external stores
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize engine snapshot")
    }

    /// Parse a snapshot previously produced by `to_json`
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse engine snapshot")
    }
}

/// Statistical performance-baseline and regression-detection engine
pub struct PerformanceEngine {
    config: RwLock<EngineConfig>,
    samples: SampleStore,
    baselines: BaselineStore,
    clock: Arc<dyn Clock>,
}

impl PerformanceEngine {
    /// Construct with the system clock
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Construct with an injected clock (deterministic tests, replay)
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config: RwLock::new(config),
            samples: SampleStore::new(),
            baselines: BaselineStore::new(),
            clock,
        })
    }

    /// Current configuration (cloned)
    pub fn config(&self) -> EngineConfig {
        self.config.read().expect("config poisoned").clone()
    }

    /// Swap the configuration; applies to subsequently built baselines
    /// only, never retroactively to stored ones
    pub fn update_config(&self, config: EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        *self.config.write().expect("config poisoned") = config;
        Ok(())
    }

    /// Record one measurement stamped with the engine clock
    ///
    /// Negative or non-finite values are logged and dropped.
    pub fn record_measurement(
        &self,
        operation: &str,
        environment: &str,
        value: f64,
        context: Option<SampleContext>,
    ) {
        self.record_measurement_at(operation, environment, value, self.clock.now_ms(), context);
    }

    /// Record one measurement with an explicit timestamp
    pub fn record_measurement_at(
        &self,
        operation: &str,
        environment: &str,
        value: f64,
        timestamp_ms: u64,
        context: Option<SampleContext>,
    ) {
        let config = self.config();
        if !config.environments.is_empty()
            && !config.environments.iter().any(|e| e == environment)
        {
            tracing::debug!(
                environment,
                "measurement from an environment outside the configured set"
            );
        }
        self.samples.record(MeasurementSample {
            operation: operation.to_string(),
            environment: environment.to_string(),
            value,
            timestamp_ms,
            context,
        });
    }

    /// Build (or rebuild) the baseline for one series
    ///
    /// Returns `None` when there are not enough clean samples or the data
    /// is too noisy to trust; the reason is logged. A successful build
    /// replaces the stored baseline wholesale, preserves its original
    /// `created_at_ms`, and triggers retention pruning for the key.
    pub fn build_baseline(&self, operation: &str, environment: &str) -> Option<PerformanceBaseline> {
        let key = SeriesKey::new(operation, environment);
        let config = self.config();
        let now_ms = self.clock.now_ms();
        let samples = self.samples.query(&key, None);

        match build_baseline(&key, &samples, &config, now_ms, self.baselines.created_at(&key)) {
            Ok(baseline) => {
                self.baselines.insert(baseline.clone());
                let retention_ms = config.retention_period.as_millis() as u64;
                self.samples.prune(&key, now_ms.saturating_sub(retention_ms));
                Some(baseline)
            }
            Err(err) => {
                tracing::warn!(key = %key.storage_key(), %err, "baseline build skipped");
                None
            }
        }
    }

    /// Stored baseline for one series, if any
    pub fn baseline(&self, operation: &str, environment: &str) -> Option<PerformanceBaseline> {
        self.baselines
            .get(&SeriesKey::new(operation, environment))
    }

    /// Test new samples against the stored baseline
    ///
    /// `None` when no baseline exists, the series has no retained samples
    /// to compare against, or fewer than 5 new samples were supplied.
    /// `test: None` auto-selects per the baseline's normality and the
    /// sample sizes.
    pub fn detect_regression(
        &self,
        operation: &str,
        environment: &str,
        new_samples: &[f64],
        test: Option<TestKind>,
    ) -> Option<RegressionOutcome> {
        let key = SeriesKey::new(operation, environment);

        if new_samples.len() < MIN_NEW_SAMPLES {
            tracing::warn!(
                key = %key.storage_key(),
                supplied = new_samples.len(),
                required = MIN_NEW_SAMPLES,
                "too few new samples for a regression check"
            );
            return None;
        }

        let Some(baseline) = self.baselines.get(&key) else {
            tracing::warn!(key = %key.storage_key(), "no baseline for regression check");
            return None;
        };

        let config = self.config();
        let raw: Vec<f64> = self
            .samples
            .query(&key, None)
            .iter()
            .map(|s| s.value)
            .collect();
        let baseline_values = filter_outliers(&raw, config.outlier_threshold).kept;
        if baseline_values.is_empty() {
            tracing::warn!(
                key = %key.storage_key(),
                "baseline exists but no retained samples to compare against"
            );
            return None;
        }

        let outcome = match test {
            Some(kind) => run_test(kind, &baseline_values, new_samples, &config),
            None => run_selected(
                baseline.normality.is_normal,
                &baseline_values,
                new_samples,
                &config,
            ),
        };
        Some(outcome)
    }

    /// Trend over the trailing `window_days` of samples
    ///
    /// `None` below 10 in-window points.
    pub fn get_trend(
        &self,
        operation: &str,
        environment: &str,
        window_days: u64,
    ) -> Option<PerformanceTrend> {
        let key = SeriesKey::new(operation, environment);
        let now_ms = self.clock.now_ms();
        let since_ms = now_ms.saturating_sub(window_days.saturating_mul(MS_PER_DAY));
        let samples = self.samples.query(&key, Some(since_ms));

        if samples.len() < MIN_TREND_WINDOW_POINTS {
            tracing::debug!(
                key = %key.storage_key(),
                in_window = samples.len(),
                "not enough points for a trend"
            );
            return None;
        }

        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        let summary = analyze_trend(&values);
        let fc = forecast(&values, summary.slope);

        Some(PerformanceTrend {
            operation: operation.to_string(),
            environment: environment.to_string(),
            window_days,
            points: samples
                .iter()
                .map(|s| TrendPoint {
                    timestamp_ms: s.timestamp_ms,
                    value: s.value,
                })
                .collect(),
            summary,
            forecast: fc,
        })
    }

    /// Snapshot baselines, configuration, and per-series sample counts
    pub fn export_state(&self) -> EngineSnapshot {
        let baselines = self
            .baselines
            .all()
            .into_iter()
            .map(|b| (b.key().storage_key(), b))
            .collect();
        let sample_counts = self
            .samples
            .stats()
            .into_iter()
            .map(|(key, stats)| (key.storage_key(), stats.recorded))
            .collect();

        EngineSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            baselines,
            config: self.config(),
            sample_counts,
        }
    }

    /// Merge a snapshot's baselines into the current state
    ///
    /// Additive/overwrite per key, not transactional across keys. The
    /// snapshot's config is ignored - configuration has its own lifecycle
    /// via `update_config`.
    pub fn import_state(&self, snapshot: EngineSnapshot) {
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            tracing::warn!(
                found = snapshot.schema_version,
                expected = SNAPSHOT_SCHEMA_VERSION,
                "importing snapshot with a different schema version"
            );
        }
        for (key, baseline) in snapshot.baselines {
            if SeriesKey::parse_storage_key(&key).is_none() {
                tracing::warn!(%key, "snapshot key is not in <operation>_<environment> form");
            }
            self.baselines.insert(baseline);
        }
    }
}
