// ============================================================
// Infra — History Store
// ============================================================
// Saves and restores the companion history file written next
// to a trained artifact.
//
// File naming convention (relative to the base directory):
//   {name}.mpk.gz          ← the artifact (written elsewhere)
//   {name}_history.pkl     ← this store's file
//
// The file is a pickled two-element tuple:
//   ( {metric: [values...]}, {param: value} )
// so histories pickled by Python notebooks load as well, as
// long as they hold plain floats, ints, strings and None.
//
// A missing file means "no history", not an error. A file that
// exists but cannot be parsed is reported as PtmError::Pickle.

use serde_pickle::{DeOptions, SerOptions};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::history::{MetricMap, ParamMap, TrainingHistory};
use crate::error::Result;

/// Suffix appended to the artifact name
pub const HISTORY_SUFFIX: &str = "_history.pkl";

/// Reads and writes `{name}_history.pkl` files under one directory.
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Path of the companion file for `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{HISTORY_SUFFIX}"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Write the history as a `(metrics, params)` tuple.
    /// An existing file for the same name is overwritten.
    pub fn save(&self, name: &str, history: &TrainingHistory) -> Result<PathBuf> {
        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_pickle::to_vec(&(&history.metrics, &history.params), SerOptions::new())?;
        fs::write(&path, bytes)?;

        tracing::debug!("Saved training history to '{}'", path.display());
        Ok(path)
    }

    /// Load the history for `name`, or `None` if no file exists
    pub fn load(&self, name: &str) -> Result<Option<TrainingHistory>> {
        let path = self.path_for(name);
        if !path.exists() {
            tracing::debug!("No training history at '{}'", path.display());
            return Ok(None);
        }

        let history = Self::load_file(&path)?;
        tracing::debug!("Loaded training history from '{}'", path.display());
        Ok(Some(history))
    }

    /// Read a history file from an arbitrary path
    pub fn load_file(path: impl AsRef<Path>) -> Result<TrainingHistory> {
        let bytes = fs::read(path.as_ref())?;
        let (metrics, params): (MetricMap, ParamMap) =
            serde_pickle::from_slice(&bytes, DeOptions::new())?;
        Ok(TrainingHistory::from_parts(metrics, params))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PtmError;

    fn history() -> TrainingHistory {
        TrainingHistory::new()
            .with_series("accuracy", vec![0.61, 0.78, 0.85])
            .with_series("loss",     vec![1.05, 0.62, 0.41])
            .with_param("epochs", 3)
            .with_param("verbose", "auto")
    }

    #[test]
    fn test_save_then_load_gives_same_maps() {
        let dir   = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let h     = history();

        store.save("mnist", &h).unwrap();
        let loaded = store.load("mnist").unwrap().expect("history should exist");

        assert_eq!(loaded.metrics, h.metrics);
        assert_eq!(loaded.params,  h.params);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir   = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        assert!(!store.exists("nothing"));
        assert!(store.load("nothing").unwrap().is_none());
    }

    #[test]
    fn test_companion_file_name() {
        let store = HistoryStore::new("runs");
        assert_eq!(store.path_for("cv_1"), PathBuf::from("runs/cv_1_history.pkl"));
    }

    #[test]
    fn test_corrupt_file_is_pickle_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        fs::write(store.path_for("broken"), b"not a pickle").unwrap();

        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, PtmError::Pickle(_)), "got {err:?}");
    }

    #[test]
    fn test_file_is_a_pickled_pair() {
        let dir   = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let path  = store.save("shape", &history()).unwrap();

        let raw = serde_pickle::value_from_slice(&fs::read(path).unwrap(), DeOptions::new()).unwrap();
        let serde_pickle::Value::Tuple(parts) = raw else {
            panic!("top level should be a tuple, got {raw:?}");
        };
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], serde_pickle::Value::Dict(_)));
        assert!(matches!(parts[1], serde_pickle::Value::Dict(_)));
    }

    #[test]
    fn test_params_keep_null_and_nested_values() {
        let dir   = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let h = TrainingHistory::new()
            .with_series("loss", vec![0.5])
            .with_param("steps", serde_json::Value::Null)
            .with_param("shape", serde_json::json!([28, 28]));

        store.save("params", &h).unwrap();
        let loaded = store.load("params").unwrap().unwrap();
        assert_eq!(loaded.params["steps"], serde_json::Value::Null);
        assert_eq!(loaded.params["shape"], serde_json::json!([28, 28]));
    }
}
