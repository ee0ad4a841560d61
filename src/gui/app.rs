//! Surveyscope Main Application
//! Main window wiring the control panel, chart registry, and dashboard.

use anyhow::Context;
use egui::SidePanel;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::info;

use crate::charts::{
    update_population_charts, update_survey_charts, ChartKind, ChartRegistry, PanelChart,
    StaticChartRenderer,
};
use crate::data::{ResultsLoader, SurveyDocument};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};

/// Exported chart image size
const EXPORT_WIDTH: u32 = 1280;
const EXPORT_HEIGHT: u32 = 800;

/// Load result from background thread
enum LoadResult {
    Complete {
        document: SurveyDocument,
        path: PathBuf,
    },
    Error(String),
}

/// Main application window. Owns the chart registry; every chart handle is
/// created once here and mutated in place by the dispatchers.
pub struct SurveyscopeApp {
    loader: ResultsLoader,
    control_panel: ControlPanel,
    dashboard: Dashboard,
    registry: ChartRegistry<PanelChart>,

    // Async results loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl SurveyscopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: ResultsLoader::new(),
            control_panel: ControlPanel::new(),
            dashboard: Dashboard::new(),
            registry: Self::build_registry(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// One handle per chart on the dashboard.
    fn build_registry() -> ChartRegistry<PanelChart> {
        let mut registry = ChartRegistry::new();
        for kind in ChartKind::ALL {
            registry.insert(kind, PanelChart::new(kind));
        }
        registry
    }

    /// Handle results file selection - decodes on a background thread.
    fn handle_browse_file(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Survey Results", &["json"])
            .pick_file()
        {
            self.control_panel.file_path = Some(path.clone());
            self.control_panel.set_progress(10.0, "Loading results...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            thread::spawn(move || {
                let result = match ResultsLoader::load_from_path(&path) {
                    Ok(document) => LoadResult::Complete { document, path },
                    Err(e) => LoadResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }
    }

    /// Check for results from the loading thread
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { document, path } => {
                        self.install_document(document, path);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Wire a freshly loaded document into the panel and charts.
    fn install_document(&mut self, document: SurveyDocument, path: PathBuf) {
        info!(path = %path.display(), questions = document.questions.len(), "results loaded");

        // Fresh handles so nothing lingers from the previous document
        self.registry = Self::build_registry();

        self.control_panel.has_population = document.population.is_some();
        let titles = document.questions.iter().map(|q| q.text.clone()).collect();
        self.control_panel
            .update_questions(document.title.clone(), titles);

        if let Some(population) = &document.population {
            update_population_charts(&mut self.registry, population);
        }

        let question_count = document.questions.len();
        self.loader.set_document(document, path);
        if question_count > 0 {
            self.handle_question_selected(0);
        }

        self.control_panel.set_progress(
            100.0,
            &format!("Complete! {} questions loaded", question_count),
        );
    }

    /// Dispatch the selected question's records to the survey charts.
    fn handle_question_selected(&mut self, index: usize) {
        let Some(question) = self
            .loader
            .document()
            .and_then(|doc| doc.questions.get(index))
            .cloned()
        else {
            return;
        };

        let mut rng = rand::rng();
        update_survey_charts(
            &mut self.registry,
            &question.responses,
            &question.schema,
            &mut rng,
        );
    }

    /// Handle chart export - render populated charts to PNG files.
    fn handle_export_charts(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.set_progress(10.0, "Rendering charts...");
        match self.export_charts(&dir) {
            Ok(count) => {
                self.control_panel
                    .set_progress(100.0, &format!("Complete! {} charts exported", count));
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {:#}", e));
            }
        }
    }

    fn export_charts(&self, dir: &Path) -> anyhow::Result<usize> {
        let mut exported = 0;
        for kind in ChartKind::ALL {
            let Some(chart) = self.registry.get(kind) else {
                continue;
            };
            let Some(payload) = chart.payload().filter(|p| !p.is_empty()) else {
                continue;
            };

            let bytes = StaticChartRenderer::render_to_png_bytes(
                kind.title(),
                payload,
                EXPORT_WIDTH,
                EXPORT_HEIGHT,
            )
            .with_context(|| format!("rendering {} chart", kind.title()))?;

            let file = dir.join(format!("{}.png", kind.slug()));
            fs::write(&file, bytes)
                .with_context(|| format!("writing {}", file.display()))?;
            exported += 1;
        }
        Ok(exported)
    }
}

impl eframe::App for SurveyscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseFile => self.handle_browse_file(),
                        ControlPanelAction::QuestionSelected(index) => {
                            self.handle_question_selected(index)
                        }
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui, &self.registry);
        });
    }
}
