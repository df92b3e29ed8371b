// ============================================================
// Charts — Line Chart
// ============================================================
// Draws one chart with plotters into an in-memory RGB buffer:
//
//   title        ← the metric substring
//   x axis       ← epoch index (0, 1, 2, ...)
//   y axis       ← every finite value of every series, +5%
//   grid         ← major lines plus a 30%-opacity minor grid
//   legend       ← one entry per series, upper right
//
// Titles, tick labels and the legend need a system font. When
// none can be loaded the chart is drawn again without text, so
// a headless box still gets its PNG.

use image::RgbImage;
use plotters::prelude::*;

use crate::charts::figure::{FigureSize, PALETTE};
use crate::error::{PtmError, Result};

const MAJOR_GRID:  RGBColor = RGBColor(176, 176, 176);
const MINOR_ALPHA: f64 = 0.3;

/// Finite values closer to the f64 limits are clamped so the
/// axis span stays finite.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

/// Render `series` as a line chart titled `title`
pub fn draw_chart(title: &str, series: &[(&str, &[f64])], size: FigureSize) -> Result<RgbImage> {
    match draw(title, series, size, true) {
        Ok(image) => Ok(image),
        Err(e) => {
            tracing::warn!("Chart '{}' drawn without text: {}", title, e);
            draw(title, series, size, false).map_err(PtmError::Chart)
        }
    }
}

/// Y axis bounds covering every finite value, padded by 5%.
/// Always finite, with `lo < hi`.
pub fn y_range(series: &[(&str, &[f64])]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in series.iter().flat_map(|(_, values)| values.iter()).filter(|v| v.is_finite()) {
        let v = v.clamp(-AXIS_LIMIT, AXIS_LIMIT);
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        let pad = lo.abs().max(1.0) * 0.5;
        return (lo - pad, hi + pad);
    }
    // scale before subtracting: hi - lo alone may overflow
    let pad = hi * 0.05 - lo * 0.05;
    (lo - pad, hi + pad)
}

fn draw(
    title:  &str,
    series: &[(&str, &[f64])],
    size:   FigureSize,
    text:   bool,
) -> std::result::Result<RgbImage, String> {
    let (width, height) = size.pixels();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let longest = series.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let x_hi = longest.saturating_sub(1).max(1) as f64;
        let (y_lo, y_hi) = y_range(series);

        let mut builder = ChartBuilder::on(&root);
        builder.margin(15);
        if text {
            builder
                .caption(title, ("sans-serif", 22))
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder
            .build_cartesian_2d(0f64..x_hi, y_lo..y_hi)
            .map_err(|e| e.to_string())?;

        let mut mesh = chart.configure_mesh();
        mesh.bold_line_style(MAJOR_GRID.stroke_width(1))
            .light_line_style(MAJOR_GRID.mix(MINOR_ALPHA).stroke_width(1))
            .x_max_light_lines(4)
            .y_max_light_lines(4);
        if text {
            mesh.x_desc("epoch").y_desc(title);
        }
        mesh.draw().map_err(|e| e.to_string())?;

        for (i, (name, values)) in series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let points = values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(epoch, v)| (epoch as f64, v.clamp(-AXIS_LIMIT, AXIS_LIMIT)));

            let drawn = chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(|e| e.to_string())?;
            if text {
                drawn.label(*name).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        if text {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    RgbImage::from_raw(width, height, buffer).ok_or_else(|| "chart buffer size mismatch".to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn rgb(c: RGBColor) -> Rgb<u8> {
        Rgb([c.0, c.1, c.2])
    }

    #[test]
    fn test_chart_uses_series_colours() {
        let acc = [0.2, 0.5, 0.7, 0.8];
        let val = [0.1, 0.4, 0.5, 0.6];
        let img = draw_chart(
            "accuracy",
            &[("accuracy", &acc[..]), ("val_accuracy", &val[..])],
            FigureSize::new(4.0, 3.0),
        )
        .unwrap();

        assert_eq!(img.dimensions(), (400, 300));
        for color in &PALETTE[..2] {
            assert!(img.pixels().any(|p| *p == rgb(*color)), "missing {color:?}");
        }
        assert!(!img.pixels().any(|p| *p == rgb(PALETTE[2])));
    }

    #[test]
    fn test_flat_and_single_point_series_render() {
        let flat = [0.5, 0.5, 0.5];
        let one  = [1.0];
        let img = draw_chart("flat", &[("flat", &flat[..]), ("one", &one[..])], FigureSize::new(3.0, 2.0))
            .unwrap();
        assert_eq!(img.dimensions(), (300, 200));
    }

    #[test]
    fn test_nan_values_do_not_panic() {
        let values = [0.3, f64::NAN, 0.6, f64::INFINITY];
        let img = draw_chart("loss", &[("loss", &values[..])], FigureSize::new(3.0, 2.0)).unwrap();
        assert_eq!(img.dimensions(), (300, 200));
    }

    #[test]
    fn test_y_range_pads_by_five_percent() {
        let values = [1.0, 3.0];
        let (lo, hi) = y_range(&[("loss", &values[..])]);
        assert!((lo - 0.9).abs() < 1e-12, "{lo}");
        assert!((hi - 3.1).abs() < 1e-12, "{hi}");
    }

    #[test]
    fn test_y_range_without_finite_values() {
        let values = [f64::NAN, f64::NEG_INFINITY];
        assert_eq!(y_range(&[("loss", &values[..])]), (0.0, 1.0));
        assert_eq!(y_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn test_y_range_stays_finite_near_f64_limits() {
        let values = [f64::MAX, -f64::MAX, 0.0];
        let (lo, hi) = y_range(&[("loss", &values[..])]);
        assert!(lo.is_finite() && hi.is_finite(), "{lo} {hi}");
        assert!(lo < hi);
        assert!((hi - lo).is_finite());

        let huge = [f64::MAX * 0.9];
        let (lo, hi) = y_range(&[("loss", &huge[..])]);
        assert!(lo.is_finite() && hi.is_finite() && lo < hi, "{lo} {hi}");
    }
}
