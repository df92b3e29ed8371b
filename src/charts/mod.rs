// ============================================================
// Charts Layer
// ============================================================
// Turns a TrainingHistory into a PNG line chart.
//
//   figure.rs     — figure size in inches, series palette
//   line_chart.rs — plotters drawing: title, axes, grids, legend
//   renderer.rs   — metric filtering, saving, re-display of
//                   previously saved charts
//   viewer.rs     — ChartViewer implementations

/// Figure size and colours
pub mod figure;

/// plotters line chart into an RgbImage
pub mod line_chart;

/// History → chart → PNG / viewer
pub mod renderer;

/// Where rendered charts are shown
pub mod viewer;

pub use figure::FigureSize;
pub use renderer::ChartRenderer;
pub use viewer::{default_viewer, LogViewer, NullViewer};

#[cfg(feature = "gui")]
pub use viewer::WindowViewer;
