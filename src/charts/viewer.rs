// ============================================================
// Charts — Viewers
// ============================================================
// Where a rendered chart goes once it is drawn.
//
//   WindowViewer → native window (feature "gui"); blocks until
//                  the window is closed
//   LogViewer    → logs the chart; default without "gui"
//   NullViewer   → discards it (tests, batch jobs)

use image::RgbImage;

use crate::domain::traits::ChartViewer;

/// Viewer used when the caller does not pick one
pub fn default_viewer() -> Box<dyn ChartViewer> {
    #[cfg(feature = "gui")]
    {
        Box::new(WindowViewer)
    }
    #[cfg(not(feature = "gui"))]
    {
        Box::new(LogViewer)
    }
}

/// Logs each chart at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogViewer;

impl ChartViewer for LogViewer {
    fn show(&self, title: &str, image: &RgbImage) -> anyhow::Result<()> {
        tracing::info!(
            "Chart '{}' ready ({}x{} px)",
            title,
            image.width(),
            image.height()
        );
        Ok(())
    }
}

/// Discards every chart
#[derive(Debug, Default, Clone, Copy)]
pub struct NullViewer;

impl ChartViewer for NullViewer {
    fn show(&self, _title: &str, _image: &RgbImage) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "gui")]
pub use window::WindowViewer;

#[cfg(feature = "gui")]
mod window {
    use eframe::egui;
    use image::RgbImage;

    use crate::domain::traits::ChartViewer;

    /// Opens each chart in its own window at its pixel size
    #[derive(Debug, Default, Clone, Copy)]
    pub struct WindowViewer;

    impl ChartViewer for WindowViewer {
        fn show(&self, title: &str, image: &RgbImage) -> anyhow::Result<()> {
            let (w, h) = image.dimensions();
            let pixels = egui::ColorImage::from_rgb([w as usize, h as usize], image.as_raw());

            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([w as f32, h as f32])
                    .with_title(title),
                ..Default::default()
            };

            let name = title.to_string();
            eframe::run_native(
                title,
                options,
                Box::new(move |_cc| Ok(Box::new(ChartWindow::new(name, pixels)))),
            )
            .map_err(|e| anyhow::anyhow!("cannot open chart window: {e}"))
        }
    }

    /// The image is uploaded as a texture on the first frame
    struct ChartWindow {
        name:    String,
        pixels:  Option<egui::ColorImage>,
        texture: Option<egui::TextureHandle>,
    }

    impl ChartWindow {
        fn new(name: String, pixels: egui::ColorImage) -> Self {
            Self { name, pixels: Some(pixels), texture: None }
        }
    }

    impl eframe::App for ChartWindow {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            if let Some(pixels) = self.pixels.take() {
                self.texture =
                    Some(ctx.load_texture(&self.name, pixels, egui::TextureOptions::default()));
            }

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    if let Some(texture) = &self.texture {
                        ui.image(egui::load::SizedTexture::new(texture.id(), texture.size_vec2()));
                    }
                });
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_null_viewers_accept_any_image() {
        let image = RgbImage::new(4, 3);
        assert!(LogViewer.show("loss", &image).is_ok());
        assert!(NullViewer.show("loss", &image).is_ok());
    }
}
