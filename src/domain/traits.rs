// ============================================================
// Domain — Core Traits
// ============================================================
// Two side-effecting capabilities are kept behind traits so the
// rest of the library never touches a window or a speaker
// directly:
//
//   ChartViewer  → "show this chart to the user"
//   AlertPlayer  → "play a short completion tone"
//
// Implementations live in the charts and timer layers.

use image::RgbImage;
use std::path::Path;

// ─── ChartViewer ──────────────────────────────────────────────────────────────
/// Anything that can present a rendered chart.
pub trait ChartViewer {
    /// Present `image`; `title` names the chart (metric or file name).
    fn show(&self, title: &str, image: &RgbImage) -> anyhow::Result<()>;
}

// ─── AlertPlayer ──────────────────────────────────────────────────────────────
/// One way of making a completion sound.
///
/// Players are tried in order; the first one that returns Ok wins.
pub trait AlertPlayer {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Play `sound` if given, or this player's own tone.
    /// Players that need a file return an error when `sound` is None.
    fn play(&self, sound: Option<&Path>) -> anyhow::Result<()>;
}
