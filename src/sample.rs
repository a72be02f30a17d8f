//! Measurement samples and the per-series sample store
//!
//! Samples are keyed by (operation, environment) and append in time order.
//! The store serializes writers to the same series on a per-key mutex while
//! leaving independent series free to proceed; the outer map lock is held
//! only long enough to look up or insert the series entry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// Optional context attached to a measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleContext {
    /// Input size the operation ran against (elements, bytes, nodes...)
    pub input_size: Option<u64>,
    /// Complexity class tag supplied by the producer (e.g. "O(n log n)")
    pub complexity_class: Option<String>,
    /// Platform the measurement was taken on
    pub platform: Option<String>,
}

/// One timed observation of a named operation
///
/// Immutable once recorded; owned exclusively by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    pub operation: String,
    pub environment: String,
    /// Execution time or resource metric; must be finite and >= 0
    pub value: f64,
    /// Wall-clock instant in epoch milliseconds
    pub timestamp_ms: u64,
    pub context: Option<SampleContext>,
}

/// Composite key for one measurement series
///
/// Replaces string-concatenation keys; the joined form survives only at the
/// snapshot boundary as the persistence compatibility contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub operation: String,
    pub environment: String,
}

impl SeriesKey {
    pub fn new(operation: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            environment: environment.into(),
        }
    }

    /// Stable `"<operation>_<environment>"` form used by external stores
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.operation, self.environment)
    }

    /// Parse the storage form back into a key
    ///
    /// Splits on the last underscore, since operation names may themselves
    /// contain underscores while environment tags by convention do not.
    pub fn parse_storage_key(key: &str) -> Option<Self> {
        let (operation, environment) = key.rsplit_once('_')?;
        if operation.is_empty() || environment.is_empty() {
            return None;
        }
        Some(Self::new(operation, environment))
    }
}

#[derive(Debug, Default)]
struct Series {
    /// Samples in recording order (time order for a well-behaved producer)
    samples: Vec<MeasurementSample>,
    /// Count of samples dropped for negative/non-finite values
    rejected: u64,
}

/// Per-series sample counts exposed for snapshots and diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub recorded: usize,
    pub rejected: u64,
}

/// Append-only store of measurement series with retention pruning
#[derive(Debug, Default)]
pub struct SampleStore {
    series: RwLock<HashMap<SeriesKey, Arc<Mutex<Series>>>>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, key: &SeriesKey) -> Arc<Mutex<Series>> {
        if let Some(series) = self.series.read().expect("series map poisoned").get(key) {
            return Arc::clone(series);
        }
        let mut map = self.series.write().expect("series map poisoned");
        Arc::clone(map.entry(key.clone()).or_default())
    }

    /// Record a sample; O(1) amortized
    ///
    /// Negative or non-finite values are logged and dropped - the only
    /// rejection the store performs.
    pub fn record(&self, sample: MeasurementSample) {
        let key = SeriesKey::new(sample.operation.clone(), sample.environment.clone());
        let entry = self.entry(&key);
        let mut series = entry.lock().expect("series poisoned");

        if !sample.value.is_finite() || sample.value < 0.0 {
            tracing::warn!(
                operation = %sample.operation,
                environment = %sample.environment,
                value = sample.value,
                "dropping invalid measurement value"
            );
            series.rejected += 1;
            return;
        }

        series.samples.push(sample);
    }

    /// Samples for a series in time order, optionally restricted to
    /// `timestamp_ms >= since_ms`
    pub fn query(&self, key: &SeriesKey, since_ms: Option<u64>) -> Vec<MeasurementSample> {
        let Some(entry) = self
            .series
            .read()
            .expect("series map poisoned")
            .get(key)
            .map(Arc::clone)
        else {
            return Vec::new();
        };
        let series = entry.lock().expect("series poisoned");

        let mut samples: Vec<MeasurementSample> = match since_ms {
            Some(cutoff) => series
                .samples
                .iter()
                .filter(|s| s.timestamp_ms >= cutoff)
                .cloned()
                .collect(),
            None => series.samples.clone(),
        };
        samples.sort_by_key(|s| s.timestamp_ms);
        samples
    }

    /// Drop samples older than `cutoff_ms`; returns the number removed
    pub fn prune(&self, key: &SeriesKey, cutoff_ms: u64) -> usize {
        let Some(entry) = self
            .series
            .read()
            .expect("series map poisoned")
            .get(key)
            .map(Arc::clone)
        else {
            return 0;
        };
        let mut series = entry.lock().expect("series poisoned");
        let before = series.samples.len();
        series.samples.retain(|s| s.timestamp_ms >= cutoff_ms);
        let removed = before - series.samples.len();
        if removed > 0 {
            tracing::debug!(key = %key.storage_key(), removed, "pruned expired samples");
        }
        removed
    }

    /// Recorded/rejected counts per series
    pub fn stats(&self) -> HashMap<SeriesKey, SeriesStats> {
        let map = self.series.read().expect("series map poisoned");
        map.iter()
            .map(|(key, entry)| {
                let series = entry.lock().expect("series poisoned");
                (
                    key.clone(),
                    SeriesStats {
                        recorded: series.samples.len(),
                        rejected: series.rejected,
                    },
                )
            })
            .collect()
    }

    /// All series keys currently tracked
    pub fn keys(&self) -> Vec<SeriesKey> {
        self.series
            .read()
            .expect("series map poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
