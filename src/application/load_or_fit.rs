// ============================================================
// Application — Load or Fit
// ============================================================
// "Train once, reuse afterwards" for experiment drivers.
//
// Cache hit ({base_dir}/{name}{ext} exists):
//   Step 1: load the model with the caller's load function
//   Step 2: load {name}_history.pkl if present
//   Step 3: re-display saved charts {metric}-{name}.png; a chart
//           that cannot be shown is logged and skipped
//
// Cache miss:
//   Step 1: start the stopwatch
//   Step 2: fit with the caller's fit function
//   Step 3: stop the stopwatch (prints elapsed time, alert)
//   Step 4: save the model artifact
//   Step 5: save {name}_history.pkl
//   Step 6: render and save one chart per metric, plus "loss"
//
// The cache key is the name alone. Changing training code or data
// without changing the name reuses the old artifact.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::charts::{ChartRenderer, FigureSize};
use crate::domain::artifact::{Artifact, ArtifactFormat, ArtifactPath};
use crate::domain::history::TrainingHistory;
use crate::error::{PtmError, Result};
use crate::infra::history_store::HistoryStore;
use crate::timer::Stopwatch;

/// Metric that is always charted alongside the requested ones
pub const LOSS_METRIC: &str = "loss";

// ─── Configuration ───────────────────────────────────────────────────────────
// Serialisable so a driver can keep it next to its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Directory for artifacts, history files, and charts
    pub base_dir:       PathBuf,
    pub epochs:         usize,
    /// Metric substrings to chart; "loss" is always added
    pub metrics:        Vec<String>,
    pub format:         ArtifactFormat,
    pub charts_enabled: bool,
    /// Skip the stopwatch completion sound
    pub silent:         bool,
    pub fig_size:       FigureSize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            base_dir:       PathBuf::from("."),
            epochs:         1,
            metrics:        vec!["accuracy".to_string()],
            format:         ArtifactFormat::Compact,
            charts_enabled: true,
            silent:         false,
            fig_size:       FigureSize::default(),
        }
    }
}

impl PersistenceConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Requested metrics followed by "loss", without duplicates
    pub fn chart_metrics(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for m in self.metrics.iter().map(String::as_str).chain([LOSS_METRIC]) {
            if !out.contains(&m) {
                out.push(m);
            }
        }
        out
    }
}

// ─── Fit inputs ──────────────────────────────────────────────────────────────
/// Borrowed training inputs handed to the fit function.
///
/// `y` is optional for inputs that already carry labels (e.g. a
/// dataset of (x, y) pairs); `validation` is optional throughout.
pub struct FitData<'a, X, Y = (), V = ()> {
    pub x:          &'a X,
    pub y:          Option<&'a Y>,
    pub validation: Option<&'a V>,
}

impl<'a, X> FitData<'a, X> {
    pub fn new(x: &'a X) -> Self {
        Self { x, y: None, validation: None }
    }
}

impl<'a, X, Y, V> FitData<'a, X, Y, V> {
    pub fn with_labels<Y2>(self, y: &'a Y2) -> FitData<'a, X, Y2, V> {
        FitData { x: self.x, y: Some(y), validation: self.validation }
    }

    pub fn with_validation<V2>(self, validation: &'a V2) -> FitData<'a, X, Y, V2> {
        FitData { x: self.x, y: self.y, validation: Some(validation) }
    }
}

// ─── ModelPersistence ────────────────────────────────────────────────────────
pub struct ModelPersistence {
    config:    PersistenceConfig,
    renderer:  ChartRenderer,
    stopwatch: Stopwatch,
    histories: HistoryStore,
}

impl ModelPersistence {
    pub fn new(config: PersistenceConfig) -> Self {
        let renderer  = ChartRenderer::new(&config.base_dir).with_fig_size(config.fig_size);
        let histories = HistoryStore::new(&config.base_dir);
        Self { config, renderer, stopwatch: Stopwatch::new(), histories }
    }

    /// Replace the chart renderer (e.g. to plug in a custom viewer)
    pub fn with_renderer(mut self, renderer: ChartRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_stopwatch(mut self, stopwatch: Stopwatch) -> Self {
        self.stopwatch = stopwatch;
        self
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    pub fn artifact_path(&self, name: &str) -> ArtifactPath {
        ArtifactPath::for_name(&self.config.base_dir, name, self.config.format)
    }

    /// True if an artifact for `name` exists on disk
    pub fn is_cached(&self, name: &str) -> bool {
        self.artifact_path(name).exists()
    }

    /// Load the model saved under `name`, or fit and save it.
    ///
    /// Returns the model and its history. On a cache hit the
    /// history is None when no companion file exists.
    pub fn load_or_fit<M, X, Y, V, L, F>(
        &mut self,
        model:   M,
        name:    &str,
        data:    FitData<'_, X, Y, V>,
        load_fn: L,
        fit_fn:  F,
    ) -> Result<(M, Option<TrainingHistory>)>
    where
        M: Artifact,
        L: FnOnce(&ArtifactPath) -> anyhow::Result<M>,
        F: FnOnce(M, &FitData<'_, X, Y, V>, usize) -> anyhow::Result<(M, TrainingHistory)>,
    {
        let artifact = self.artifact_path(name);

        if artifact.exists() {
            tracing::info!("Cache hit for '{}' at '{}'", name, artifact.path().display());
            return self.load_cached(&artifact, load_fn);
        }

        tracing::info!("Cache miss for '{}', fitting {} epoch(s)", name, self.config.epochs);
        fs::create_dir_all(&self.config.base_dir)?;

        self.stopwatch.start();
        let (model, history) = fit_fn(model, &data, self.config.epochs)?;
        self.stopwatch.stop(self.config.silent, None)?;

        model.save(&artifact)?;
        println!("Model saved to '{}'", artifact.path().display());

        let history_path = self.histories.save(name, &history)?;
        println!("History saved to '{}'", history_path.display());

        if self.config.charts_enabled {
            for metric in self.config.chart_metrics() {
                self.renderer.render(&history, metric, true, Some(name))?;
            }
        }

        Ok((model, Some(history)))
    }

    fn load_cached<M, L>(
        &self,
        artifact: &ArtifactPath,
        load_fn:  L,
    ) -> Result<(M, Option<TrainingHistory>)>
    where
        L: FnOnce(&ArtifactPath) -> anyhow::Result<M>,
    {
        // adapters report their own PtmError inside the anyhow chain
        let model = load_fn(artifact).map_err(|e| match e.downcast::<PtmError>() {
            Ok(err) => err,
            Err(e)  => PtmError::Model(e),
        })?;
        println!("Model loaded from '{}'", artifact.path().display());

        let history = self.histories.load(artifact.name())?;
        if history.is_none() {
            println!("No saved history for '{}'", artifact.name());
        }

        if self.config.charts_enabled {
            for metric in self.config.chart_metrics() {
                let chart = self.renderer.chart_path(metric, artifact.name());
                if let Err(e) = self.renderer.show_saved(&chart, None) {
                    tracing::warn!("Cannot show saved chart '{}': {e}", chart.display());
                }
            }
        }

        Ok((model, history))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_metrics_adds_loss_once() {
        let mut cfg = PersistenceConfig::default();
        assert_eq!(cfg.chart_metrics(), vec!["accuracy", "loss"]);

        cfg.metrics = vec!["loss".into(), "mae".into()];
        assert_eq!(cfg.chart_metrics(), vec!["loss", "mae"]);

        cfg.metrics.clear();
        assert_eq!(cfg.chart_metrics(), vec!["loss"]);
    }

    #[test]
    fn test_config_round_trips_through_json_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("persistence.json");

        let cfg = PersistenceConfig {
            epochs: 12,
            format: ArtifactFormat::Directory,
            metrics: vec!["mae".into()],
            ..PersistenceConfig::default()
        };
        cfg.save(&path).unwrap();

        let loaded = PersistenceConfig::load(&path).unwrap();
        assert_eq!(loaded.epochs, 12);
        assert_eq!(loaded.format, ArtifactFormat::Directory);
        assert_eq!(loaded.metrics, vec!["mae".to_string()]);
    }

    #[test]
    fn test_fit_data_builders() {
        let x = vec![1.0, 2.0];
        let y = vec![0u8, 1];
        let v = "holdout";
        let data = FitData::new(&x).with_labels(&y).with_validation(&v);
        assert_eq!(data.x.len(), 2);
        assert_eq!(data.y, Some(&y));
        assert_eq!(data.validation, Some(&"holdout"));
    }

    #[test]
    fn test_artifact_path_follows_config() {
        let cfg = PersistenceConfig {
            base_dir: PathBuf::from("runs"),
            format:   ArtifactFormat::Directory,
            ..PersistenceConfig::default()
        };
        let p = ModelPersistence::new(cfg);
        assert_eq!(p.artifact_path("cv_1").path(), Path::new("runs/cv_1"));
        assert!(!p.is_cached("cv_1"));
    }
}
