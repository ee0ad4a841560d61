//! Control Panel Widget
//! Left side panel with file selection, question picker, and progress.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel driving the dashboard.
pub struct ControlPanel {
    pub file_path: Option<PathBuf>,
    pub survey_title: String,
    pub questions: Vec<String>,
    pub selected_question: Option<usize>,
    pub has_population: bool,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            file_path: None,
            survey_title: String::new(),
            questions: Vec::new(),
            selected_question: None,
            has_population: false,
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the question picker after a results file loads.
    pub fn update_questions(&mut self, title: String, questions: Vec<String>) {
        self.survey_title = title;
        self.selected_question = if questions.is_empty() { None } else { Some(0) };
        self.questions = questions;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Surveyscope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Survey & Population Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Results File Section =====
        ui.label(RichText::new("📁 Results File").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .file_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.file_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseFile;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Question Section =====
        ui.label(RichText::new("❓ Question").size(14.0).strong());
        ui.add_space(5.0);

        if !self.survey_title.is_empty() {
            ui.label(RichText::new(&self.survey_title).size(12.0).strong());
            ui.add_space(5.0);
        }

        let selected_text = self
            .selected_question
            .and_then(|i| self.questions.get(i))
            .map(String::as_str)
            .unwrap_or("No questions loaded");

        ComboBox::from_id_salt("question_picker")
            .width(ui.available_width() - 10.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (i, question) in self.questions.iter().enumerate() {
                    if ui
                        .selectable_label(self.selected_question == Some(i), question)
                        .clicked()
                    {
                        self.selected_question = Some(i);
                        action = ControlPanelAction::QuestionSelected(i);
                    }
                }
            });

        if self.has_population {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Population statistics included")
                    .size(11.0)
                    .color(Color32::from_rgb(40, 167, 69)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let export_enabled = !self.questions.is_empty();
            ui.add_enabled_ui(export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(160.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseFile,
    QuestionSelected(usize),
    ExportCharts,
}
