// ============================================================
// Domain — Training History
// ============================================================
// The record a fit function returns: for every metric name an
// ordered list of per-epoch values, plus free-form run params.
//
// Example:
//   metrics: { "accuracy": [0.71, 0.83], "loss": [0.92, 0.48] }
//   params:  { "epochs": 2, "steps": 1875 }
//
// Both maps are BTreeMaps so chart series and saved files come
// out in the same order on every run.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metric name → per-epoch values
pub type MetricMap = BTreeMap<String, Vec<f64>>;

/// Run parameter name → value
pub type ParamMap = BTreeMap<String, Value>;

/// Metrics and parameters produced by one training run.
///
/// Series produced by a single fit call normally share a length
/// (one entry per epoch), but nothing here enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub metrics: MetricMap,
    pub params:  ParamMap,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from already-collected maps
    pub fn from_parts(metrics: MetricMap, params: ParamMap) -> Self {
        Self { metrics, params }
    }

    /// Replace (or add) a whole metric series
    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.metrics.insert(name.into(), values);
        self
    }

    /// Record a run parameter, e.g. `("epochs", 10)`
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Append one epoch's worth of values.
    /// Metrics not seen before get a fresh series.
    pub fn push_epoch<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (name, value) in values {
            self.metrics.entry(name.to_string()).or_default().push(value);
        }
    }

    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(Vec::as_slice)
    }

    /// All series whose name contains `needle` (case-sensitive).
    /// `"loss"` matches both `loss` and `val_loss`.
    pub fn matching(&self, needle: &str) -> Vec<(&str, &[f64])> {
        self.metrics
            .iter()
            .filter(|(name, _)| name.contains(needle))
            .map(|(name, values)| (name.as_str(), values.as_slice()))
            .collect()
    }

    /// Number of epochs recorded (length of the longest series)
    pub fn epochs(&self) -> usize {
        self.metrics.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
