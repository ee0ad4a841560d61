//! Static Chart Renderer
//! Renders chart payloads to PNG bytes for report export.

use plotters::prelude::*;
use thiserror::Error;

use crate::charts::{HeatmapGrid, NamedValue, SeriesPayload, WeightedTerm};

/// Export palette mirroring the live dashboard colors
const EXPORT_PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(255, 87, 34),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

/// Word clouds export as a bar chart of the heaviest terms
const EXPORT_TERM_LIMIT: usize = 15;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("chart has no data to render")]
    EmptyChart,
    #[error("chart backend error: {0}")]
    Backend(String),
    #[error("png encode failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("pixel buffer size mismatch")]
    BufferSize,
}

/// Renders payloads to in-memory PNG images with plotters.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a payload to PNG bytes at the given size.
    pub fn render_to_png_bytes(
        title: &str,
        payload: &SeriesPayload,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if payload.is_empty() {
            return Err(RenderError::EmptyChart);
        }

        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(stringify)?;

            match payload {
                SeriesPayload::Categorical { labels, values } => {
                    Self::draw_categorical(&root, title, labels, values)?;
                }
                SeriesPayload::Slices(slices) => Self::draw_pie(&root, title, slices)?,
                SeriesPayload::WeightedTerms(terms) => {
                    // Heaviest terms first; the payload carries no ordering contract
                    let mut sorted: Vec<&WeightedTerm> = terms.iter().collect();
                    sorted.sort_by(|a, b| b.value.cmp(&a.value));
                    sorted.truncate(EXPORT_TERM_LIMIT);
                    let labels: Vec<String> = sorted.iter().map(|t| t.name.clone()).collect();
                    let values: Vec<i64> = sorted.iter().map(|t| t.value).collect();
                    Self::draw_categorical(&root, title, &labels, &values)?;
                }
                SeriesPayload::Heatmap(grid) => Self::draw_heatmap(&root, title, grid)?,
            }

            root.present().map_err(stringify)?;
        }

        let img =
            image::RgbImage::from_raw(width, height, buf).ok_or(RenderError::BufferSize)?;
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )?;
        Ok(bytes)
    }

    fn draw_categorical(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        title: &str,
        labels: &[String],
        values: &[i64],
    ) -> Result<(), RenderError> {
        let n = labels.len().max(1);
        let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(48)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..max * 1.1)
            .map_err(stringify)?;

        let axis_labels = labels.to_vec();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(12))
            .x_label_formatter(&|x: &f64| {
                let idx = x.round();
                if idx >= 0.0 && (x - idx).abs() < 0.25 {
                    axis_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .draw()
            .map_err(stringify)?;

        chart
            .draw_series(values.iter().enumerate().map(|(i, &value)| {
                Rectangle::new(
                    [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, value as f64)],
                    EXPORT_PALETTE[i % EXPORT_PALETTE.len()].filled(),
                )
            }))
            .map_err(stringify)?;
        Ok(())
    }

    fn draw_pie(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        title: &str,
        slices: &[NamedValue],
    ) -> Result<(), RenderError> {
        let titled = root
            .titled(title, ("sans-serif", 22))
            .map_err(stringify)?;

        let sizes: Vec<f64> = slices.iter().map(|s| s.value.max(0) as f64).collect();
        if sizes.iter().sum::<f64>() <= 0.0 {
            return Err(RenderError::EmptyChart);
        }
        let colors: Vec<RGBColor> = (0..slices.len())
            .map(|i| EXPORT_PALETTE[i % EXPORT_PALETTE.len()])
            .collect();
        let labels: Vec<String> = slices.iter().map(|s| s.name.clone()).collect();

        let (w, h) = titled.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.32;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        titled.draw(&pie).map_err(stringify)?;
        Ok(())
    }

    fn draw_heatmap(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        title: &str,
        grid: &HeatmapGrid,
    ) -> Result<(), RenderError> {
        let columns = grid.x_labels.len().max(1);
        let rows = grid.y_labels.len().max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(56)
            .y_label_area_size(110)
            .build_cartesian_2d(0f64..columns as f64, 0f64..rows as f64)
            .map_err(stringify)?;

        let x_labels = grid.x_labels.clone();
        let y_labels = grid.y_labels.clone();
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(columns)
            .y_labels(rows)
            .x_label_formatter(&|x: &f64| {
                x_labels.get(x.floor() as usize).cloned().unwrap_or_default()
            })
            .y_label_formatter(&|y: &f64| {
                y_labels.get(y.floor() as usize).cloned().unwrap_or_default()
            })
            .draw()
            .map_err(stringify)?;

        chart
            .draw_series(grid.cells.iter().map(|&(x, y, count)| {
                let t = if grid.max > 0 {
                    (count as f64 / grid.max as f64).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lerp = |from: f64, to: f64| (from + (to - from) * t) as u8;
                let color = RGBColor(lerp(237.0, 33.0), lerp(244.0, 102.0), lerp(251.0, 172.0));
                Rectangle::new(
                    [(x as f64, y as f64), (x as f64 + 1.0, y as f64 + 1.0)],
                    color.filled(),
                )
            }))
            .map_err(stringify)?;
        Ok(())
    }
}

fn stringify(err: impl std::fmt::Display) -> RenderError {
    RenderError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_rejected_before_any_drawing() {
        let payload = SeriesPayload::Categorical {
            labels: vec![],
            values: vec![],
        };
        assert!(matches!(
            StaticChartRenderer::render_to_png_bytes("t", &payload, 640, 480),
            Err(RenderError::EmptyChart)
        ));
    }
}
