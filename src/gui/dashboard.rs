//! Dashboard Widget
//! Right side scrollable panel showing the survey and population charts.
//! Supports responsive multi-column layout based on available width.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::{ChartKind, ChartPlotter, ChartRegistry, PanelChart};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 420.0;
const CARD_HEIGHT: f32 = 330.0;

/// Scrollable chart grid reading the chart registry.
#[derive(Default)]
pub struct Dashboard;

impl Dashboard {
    pub fn new() -> Self {
        Self
    }

    /// Draw every chart that currently has data, survey charts first.
    pub fn show(&self, ui: &mut egui::Ui, registry: &ChartRegistry<PanelChart>) {
        let populated: Vec<&PanelChart> = ChartKind::ALL
            .into_iter()
            .filter_map(|kind| registry.get(kind))
            .filter(|chart| chart.payload().is_some())
            .collect();

        if populated.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        // Calculate how many columns fit in available width
        let avail_width = ui.available_width();
        let card_total_width = CARD_WIDTH + CHART_SPACING;
        let num_columns = ((avail_width / card_total_width).floor() as usize).max(1);

        let total_rows = populated.len().div_ceil(num_columns);
        let row_height = CARD_HEIGHT + CHART_SPACING;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, total_rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        for col in 0..num_columns {
                            let idx = row * num_columns + col;
                            if let Some(chart) = populated.get(idx) {
                                Self::draw_chart_card(ui, chart);
                                ui.add_space(CHART_SPACING);
                            }
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    /// Draw a single chart card
    fn draw_chart_card(ui: &mut egui::Ui, chart: &PanelChart) {
        let accent = if chart.kind().is_population() {
            Color32::from_rgb(26, 188, 156)
        } else {
            Color32::from_rgb(100, 149, 237)
        };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, accent))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 24.0);
                ui.set_height(CARD_HEIGHT - 24.0);

                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(chart.kind().title())
                            .size(15.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(8.0);
                    ChartPlotter::draw(ui, chart);
                });
            });
    }
}
