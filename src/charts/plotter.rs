//! Chart Plotter Module
//! Draws chart payloads with egui_plot and egui painter primitives.

use egui::{Align2, Color32, FontId, RichText, Sense, Stroke};
use egui_plot::{Bar, BarChart, Plot};
use std::f32::consts::TAU;

use crate::charts::{
    ChartHandle, ChartKind, HeatmapGrid, NamedValue, SeriesPayload, WeightedTerm,
};

/// Color palette for slices and bars
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Word-cloud font size range
const MIN_TERM_SIZE: f32 = 12.0;
const MAX_TERM_SIZE: f32 = 50.0;

const PLOT_HEIGHT: f32 = 220.0;

/// An egui-backed chart: holds the most recently applied series payload and
/// redraws it every frame.
pub struct PanelChart {
    kind: ChartKind,
    payload: Option<SeriesPayload>,
}

impl PanelChart {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&SeriesPayload> {
        self.payload.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.payload.as_ref().is_some_and(|p| !p.is_empty())
    }
}

impl ChartHandle for PanelChart {
    fn set_series(&mut self, payload: SeriesPayload) {
        self.payload = Some(payload);
    }
}

/// Draws chart payloads into egui panels.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn slice_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a chart card body for the given handle.
    pub fn draw(ui: &mut egui::Ui, chart: &PanelChart) {
        match chart.payload() {
            Some(payload) if !payload.is_empty() => match payload {
                SeriesPayload::Categorical { labels, values } => {
                    Self::draw_bar_chart(ui, chart.kind(), labels, values);
                }
                SeriesPayload::Slices(slices) => Self::draw_pie_chart(ui, slices),
                SeriesPayload::WeightedTerms(terms) => Self::draw_word_cloud(ui, terms),
                SeriesPayload::Heatmap(grid) => Self::draw_heatmap(ui, grid),
            },
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(16.0).color(Color32::GRAY));
                });
            }
        }
    }

    /// Vertical bars over a category axis, one bar per record.
    fn draw_bar_chart(ui: &mut egui::Ui, kind: ChartKind, labels: &[String], values: &[i64]) {
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Bar::new(i as f64, value as f64)
                    .width(0.6)
                    .fill(Self::slice_color(i))
            })
            .collect();

        let x_labels: Vec<String> = labels.to_vec();
        Plot::new(format!("bar_{:?}", kind))
            .height(PLOT_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() && (mark.value - idx as f64).abs() < 0.25 {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Painter-drawn pie with a legend underneath. Slice angles are
    /// proportional to values; non-positive values get no sector but stay
    /// in the legend.
    fn draw_pie_chart(ui: &mut egui::Ui, slices: &[NamedValue]) {
        let total: i64 = slices.iter().map(|s| s.value.max(0)).sum();

        let diameter = PLOT_HEIGHT - 40.0;
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), diameter), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = diameter / 2.0 - 4.0;

        if total > 0 {
            let mut angle = -TAU / 4.0;
            for (i, slice) in slices.iter().enumerate() {
                if slice.value <= 0 {
                    continue;
                }
                let sweep = slice.value as f32 / total as f32 * TAU;
                let mut points = vec![center];
                let steps = (sweep / 0.05).ceil().max(2.0) as usize;
                for step in 0..=steps {
                    let a = angle + sweep * step as f32 / steps as f32;
                    points.push(center + egui::vec2(a.cos(), a.sin()) * radius);
                }
                painter.add(egui::Shape::convex_polygon(
                    points,
                    Self::slice_color(i),
                    Stroke::NONE,
                ));
                angle += sweep;
            }
        } else {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No Data",
                FontId::proportional(16.0),
                Color32::GRAY,
            );
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for (i, slice) in slices.iter().enumerate() {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, Self::slice_color(i));
                let percent = if total > 0 {
                    slice.value.max(0) as f32 / total as f32 * 100.0
                } else {
                    0.0
                };
                ui.label(
                    RichText::new(format!("{}: {} ({:.0}%)", slice.name, slice.value, percent))
                        .size(11.0),
                );
                ui.add_space(8.0);
            }
        });
    }

    /// Wrapped term labels, font size scaled by weight, colored per term.
    fn draw_word_cloud(ui: &mut egui::Ui, terms: &[WeightedTerm]) {
        let min = terms.iter().map(|t| t.value).min().unwrap_or(0);
        let max = terms.iter().map(|t| t.value).max().unwrap_or(0);
        let span = (max - min).max(1) as f32;

        ui.horizontal_wrapped(|ui| {
            for term in terms {
                let t = (term.value - min) as f32 / span;
                let size = MIN_TERM_SIZE + t * (MAX_TERM_SIZE - MIN_TERM_SIZE);
                let [r, g, b] = term.color;
                ui.label(
                    RichText::new(&term.name)
                        .size(size)
                        .strong()
                        .color(Color32::from_rgb(r, g, b)),
                );
                ui.add_space(6.0);
            }
        });
    }

    /// Cross-tab cells shaded by count, category labels on both axes.
    fn draw_heatmap(ui: &mut egui::Ui, grid: &HeatmapGrid) {
        let columns = grid.x_labels.len().max(1);
        let rows = grid.y_labels.len().max(1);

        let gutter_left = 86.0;
        let gutter_bottom = 18.0;
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), PLOT_HEIGHT),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);

        let cell_w = (rect.width() - gutter_left) / columns as f32;
        let cell_h = (rect.height() - gutter_bottom) / rows as f32;
        let origin = rect.left_top() + egui::vec2(gutter_left, 0.0);

        for &(x, y, count) in &grid.cells {
            if x >= columns || y >= rows {
                continue;
            }
            // Row 0 at the bottom, like the category axis it labels
            let top = origin + egui::vec2(x as f32 * cell_w, (rows - 1 - y) as f32 * cell_h);
            let cell = egui::Rect::from_min_size(top, egui::vec2(cell_w - 1.0, cell_h - 1.0));
            painter.rect_filled(cell, 2.0, Self::heat_color(count, grid.max));
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                count.to_string(),
                FontId::proportional(10.0),
                Color32::DARK_GRAY,
            );
        }

        for (y, label) in grid.y_labels.iter().enumerate() {
            let pos = origin + egui::vec2(-6.0, (rows - 1 - y) as f32 * cell_h + cell_h / 2.0);
            painter.text(
                pos,
                Align2::RIGHT_CENTER,
                truncate(label, 14),
                FontId::proportional(10.0),
                ui.visuals().text_color(),
            );
        }
        for (x, label) in grid.x_labels.iter().enumerate() {
            let pos = origin
                + egui::vec2(
                    x as f32 * cell_w + cell_w / 2.0,
                    rows as f32 * cell_h + gutter_bottom / 2.0,
                );
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                truncate(label, 12),
                FontId::proportional(10.0),
                ui.visuals().text_color(),
            );
        }
    }

    fn heat_color(count: i64, max: i64) -> Color32 {
        if max <= 0 {
            return Color32::from_gray(235);
        }
        let t = (count as f32 / max as f32).clamp(0.0, 1.0);
        let lerp = |from: f32, to: f32| (from + (to - from) * t) as u8;
        Color32::from_rgb(lerp(237.0, 33.0), lerp(244.0, 102.0), lerp(251.0, 172.0))
    }
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{short}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_chart_replaces_payload_wholesale() {
        let mut chart = PanelChart::new(ChartKind::Pie);
        assert!(!chart.has_data());

        chart.set_series(SeriesPayload::Slices(vec![NamedValue::new("Good", 12)]));
        assert!(chart.has_data());

        chart.set_series(SeriesPayload::Slices(vec![]));
        assert!(!chart.has_data(), "empty update must clear the chart");
        assert_eq!(chart.payload(), Some(&SeriesPayload::Slices(vec![])));
    }

    #[test]
    fn heat_color_spans_light_to_saturated() {
        assert_eq!(ChartPlotter::heat_color(0, 10), Color32::from_rgb(237, 244, 251));
        assert_eq!(ChartPlotter::heat_color(10, 10), Color32::from_rgb(33, 102, 172));
        assert_eq!(ChartPlotter::heat_color(3, 0), Color32::from_gray(235));
    }

    #[test]
    fn long_labels_are_truncated_with_ellipsis() {
        assert_eq!(truncate("Bachelor", 14), "Bachelor");
        assert_eq!(truncate("Less than High School Diploma", 14), "Less than Hig…");
    }
}
