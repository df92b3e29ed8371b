// ============================================================
// Charts — Figure Geometry
// ============================================================
// Figure sizes are given in inches, like a notebook plot, and
// turned into pixels at a fixed 100 dots per inch.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Pixels per inch of figure size
pub const DPI: f32 = 100.0;

/// Series colours, cycled in order
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Figure size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width:  f32,
    pub height: f32,
}

impl FigureSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at `DPI`
    pub fn pixels(&self) -> (u32, u32) {
        let w = (self.width * DPI).round().max(1.0) as u32;
        let h = (self.height * DPI).round().max(1.0) as u32;
        (w, h)
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self { width: 10.0, height: 6.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_by_six_inches() {
        assert_eq!(FigureSize::default().pixels(), (1000, 600));
    }

    #[test]
    fn test_tiny_sizes_keep_one_pixel() {
        assert_eq!(FigureSize::new(0.001, 2.5).pixels(), (1, 250));
    }
}
