//! Performance baselines: the derived, versioned statistical snapshot for
//! one (operation, environment) series
//!
//! The builder orchestrates the outlier filter, descriptive statistics,
//! normality heuristic, confidence interval, and trend fit. A baseline is
//! replaced wholesale on rebuild - never partially mutated - with the
//! original `created_at_ms` preserved as provenance.

use crate::config::EngineConfig;
use crate::confidence::{confidence_interval, ConfidenceInterval};
use crate::descriptive::{summarize, DescriptiveStats};
use crate::error::EngineError;
use crate::normality::{test_normality, NormalityVerdict};
use crate::outlier::filter_outliers;
use crate::sample::{MeasurementSample, SeriesKey};
use crate::trend::{analyze_trend, TrendSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Baseline attempts abort when the outlier filter removes more than this
/// fraction of the raw samples
pub const MAX_OUTLIER_FRACTION: f64 = 0.30;

/// Descriptive metadata distilled from sample contexts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetadata {
    /// Platform tag, when the producers supplied a consistent one
    pub platform: Option<String>,
    /// (min, max) input size seen across the samples
    pub input_size_range: Option<(u64, u64)>,
    /// Most frequent complexity-class tag
    pub dominant_complexity_class: Option<String>,
}

/// Statistical snapshot of historical performance for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBaseline {
    pub operation: String,
    pub environment: String,
    /// Clean (post-filter) sample count the statistics were computed from
    pub sample_size: usize,
    pub stats: DescriptiveStats,
    pub confidence_interval: ConfidenceInterval,
    pub normality: NormalityVerdict,
    pub trend: TrendSummary,
    pub metadata: BaselineMetadata,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl PerformanceBaseline {
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.operation.clone(), self.environment.clone())
    }
}

/// Build a baseline from raw samples for one series
///
/// Returns the typed failure rather than a degenerate baseline when the
/// cleaned sample count is below `min_sample_size` or the filter removed
/// more than 30% of the input. The engine converts these to `None` and a
/// warning at the API boundary.
pub fn build_baseline(
    key: &SeriesKey,
    samples: &[MeasurementSample],
    config: &EngineConfig,
    now_ms: u64,
    created_at_ms: Option<u64>,
) -> Result<PerformanceBaseline, EngineError> {
    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();

    let outcome = filter_outliers(&values, config.outlier_threshold);
    if !values.is_empty() && outcome.removed_fraction() > MAX_OUTLIER_FRACTION {
        return Err(EngineError::ExcessiveNoise {
            removed: outcome.removed,
            total: values.len(),
        });
    }

    if outcome.kept.len() < config.min_sample_size {
        return Err(EngineError::InsufficientData {
            required: config.min_sample_size,
            actual: outcome.kept.len(),
        });
    }

    let stats = summarize(&outcome.kept).ok_or_else(|| {
        EngineError::DegenerateStatistics("empty sample set after filtering".to_string())
    })?;

    Ok(PerformanceBaseline {
        operation: key.operation.clone(),
        environment: key.environment.clone(),
        sample_size: outcome.kept.len(),
        confidence_interval: confidence_interval(&outcome.kept, config.confidence_level),
        normality: test_normality(&outcome.kept),
        trend: analyze_trend(&outcome.kept),
        stats,
        metadata: distill_metadata(samples),
        created_at_ms: created_at_ms.unwrap_or(now_ms),
        updated_at_ms: now_ms,
    })
}

fn distill_metadata(samples: &[MeasurementSample]) -> BaselineMetadata {
    let mut platform = None;
    let mut min_size: Option<u64> = None;
    let mut max_size: Option<u64> = None;
    let mut class_counts: HashMap<&str, usize> = HashMap::new();

    for sample in samples {
        let Some(ctx) = &sample.context else { continue };
        if platform.is_none() {
            platform = ctx.platform.clone();
        }
        if let Some(size) = ctx.input_size {
            min_size = Some(min_size.map_or(size, |m| m.min(size)));
            max_size = Some(max_size.map_or(size, |m| m.max(size)));
        }
        if let Some(class) = &ctx.complexity_class {
            *class_counts.entry(class.as_str()).or_insert(0) += 1;
        }
    }

    // Highest count wins; ties break lexicographically for determinism
    let mut dominant: Option<(&str, usize)> = None;
    for (class, count) in &class_counts {
        let better = match dominant {
            None => true,
            Some((best_class, best_count)) => {
                *count > best_count || (*count == best_count && *class < best_class)
            }
        };
        if better {
            dominant = Some((class, *count));
        }
    }

    BaselineMetadata {
        platform,
        input_size_range: min_size.zip(max_size),
        dominant_complexity_class: dominant.map(|(class, _)| class.to_string()),
    }
}

/// Keyed in-memory store of the latest baseline per series
#[derive(Debug, Default)]
pub struct BaselineStore {
    baselines: RwLock<HashMap<SeriesKey, PerformanceBaseline>>,
}

impl BaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SeriesKey) -> Option<PerformanceBaseline> {
        self.baselines
            .read()
            .expect("baseline map poisoned")
            .get(key)
            .cloned()
    }

    /// Replace the baseline for its key wholesale
    pub fn insert(&self, baseline: PerformanceBaseline) {
        let key = baseline.key();
        self.baselines
            .write()
            .expect("baseline map poisoned")
            .insert(key, baseline);
    }

    /// `created_at_ms` of the stored baseline, for provenance-preserving
    /// rebuilds
    pub fn created_at(&self, key: &SeriesKey) -> Option<u64> {
        self.baselines
            .read()
            .expect("baseline map poisoned")
            .get(key)
            .map(|b| b.created_at_ms)
    }

    pub fn all(&self) -> Vec<PerformanceBaseline> {
        self.baselines
            .read()
            .expect("baseline map poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.baselines.read().expect("baseline map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
