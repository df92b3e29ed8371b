// ============================================================
// Charts — Renderer
// ============================================================
// Draws training-history charts and re-displays saved ones.
//
// render(history, "accuracy", save, Some("cv_1")):
//   1. keep only series whose name contains "accuracy"
//      (accuracy, val_accuracy, ...)
//   2. draw them on one set of axes
//   3. if save: write {out_dir}/accuracy-cv_1.png
//      (timestamp suffix when no name is given)
//   4. hand the image to the viewer
//
// No matching series is not an error: a diagnostic is printed
// and nothing is drawn or written.

use image::{imageops::FilterType, ImageFormat, RgbImage};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::charts::figure::FigureSize;
use crate::charts::line_chart::draw_chart;
use crate::charts::viewer::default_viewer;
use crate::domain::history::TrainingHistory;
use crate::domain::traits::ChartViewer;
use crate::error::Result;
use crate::infra::clock::time_string;

/// `{metric}-{suffix}.png`, or `{metric}-{YYYYmmdd-HHMMSS}.png`
pub fn chart_file_name(metric: &str, suffix: Option<&str>) -> String {
    let suffix = suffix.map(str::to_string).unwrap_or_else(time_string);
    format!("{metric}-{suffix}.png")
}

pub struct ChartRenderer {
    out_dir:  PathBuf,
    fig_size: FigureSize,
    viewer:   Box<dyn ChartViewer>,
}

impl ChartRenderer {
    /// Renderer writing into `out_dir`, default figure size and viewer
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir:  out_dir.as_ref().to_path_buf(),
            fig_size: FigureSize::default(),
            viewer:   default_viewer(),
        }
    }

    pub fn with_fig_size(mut self, fig_size: FigureSize) -> Self {
        self.fig_size = fig_size;
        self
    }

    pub fn with_viewer(mut self, viewer: Box<dyn ChartViewer>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path a saved chart for `metric`/`suffix` would use
    pub fn chart_path(&self, metric: &str, suffix: &str) -> PathBuf {
        self.out_dir.join(chart_file_name(metric, Some(suffix)))
    }

    /// Draw every series matching `metric` and show it.
    /// Returns the PNG path when `save` is set and something was drawn.
    pub fn render(
        &self,
        history: &TrainingHistory,
        metric:  &str,
        save:    bool,
        suffix:  Option<&str>,
    ) -> Result<Option<PathBuf>> {
        let series = history.matching(metric);
        if series.is_empty() {
            println!("No history data found for '{metric}'; chart skipped");
            tracing::warn!(
                "No series matching '{}' (available: {:?})",
                metric,
                history.metrics.keys().collect::<Vec<_>>()
            );
            return Ok(None);
        }

        let image = draw_chart(metric, &series, self.fig_size)?;

        let saved = if save {
            fs::create_dir_all(&self.out_dir)?;
            let path = self.out_dir.join(chart_file_name(metric, suffix));
            image.save_with_format(&path, ImageFormat::Png)?;
            tracing::debug!("Saved chart to '{}'", path.display());
            Some(path)
        } else {
            None
        };

        self.display(metric, &image);
        Ok(saved)
    }

    /// Show a previously saved PNG without axes, fitted into
    /// `fig_size` (or the renderer's size). Returns false if the
    /// file does not exist.
    pub fn show_saved(&self, path: impl AsRef<Path>, fig_size: Option<FigureSize>) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No saved chart at '{}'", path.display());
            return Ok(false);
        }

        let image = image::open(path)?.to_rgb8();
        let image = fit_within(&image, fig_size.unwrap_or(self.fig_size));

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.display(&title, &image);
        Ok(true)
    }

    fn display(&self, title: &str, image: &RgbImage) {
        if let Err(e) = self.viewer.show(title, image) {
            tracing::warn!("Cannot display chart '{}': {e:#}", title);
        }
    }
}

/// Scale `image` to fit the figure while keeping its aspect ratio
fn fit_within(image: &RgbImage, fig_size: FigureSize) -> RgbImage {
    let (max_w, max_h) = fig_size.pixels();
    let (w, h) = image.dimensions();
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let new_w = ((w as f64 * scale).round() as u32).max(1);
    let new_h = ((h as f64 * scale).round() as u32).max(1);
    if (new_w, new_h) == (w, h) {
        return image.clone();
    }
    image::imageops::resize(image, new_w, new_h, FilterType::Triangle)
}
