//! Sleep Health Dashboard Main Application
//! Navigation menu on top, section content in the center, status line below.

use crate::charts::dashboard_charts;
use crate::config::DashboardConfig;
use crate::data::DataLoader;
use crate::export;
use crate::gui::data_preview::PreviewTable;
use crate::gui::navigation::{self, Panel, Section};
use crate::gui::ChartViewer;
use crate::presenter::{ChartOutcome, DatasetPresenter};
use egui::{Color32, RichText};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{error, info};

/// Dataset load result from background thread
enum LoadResult {
    Complete(Box<LoadedDashboard>),
    Error(String),
}

/// Everything the Visualizations section draws.
struct LoadedDashboard {
    presenter: DatasetPresenter,
    preview: PreviewTable,
    charts: Vec<ChartOutcome>,
}

enum DatasetState {
    Loading,
    Ready(Box<LoadedDashboard>),
    Failed(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    section: Section,
    loader: Arc<Mutex<DataLoader>>,
    state: DatasetState,
    dataset_path: PathBuf,
    load_rx: Option<Receiver<LoadResult>>,
    status: String,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            section: config.default_section,
            dataset_path: config.dataset_path.clone(),
            config,
            loader: Arc::new(Mutex::new(DataLoader::default())),
            state: DatasetState::Loading,
            load_rx: None,
            status: "Ready".to_string(),
        };
        let path = app.dataset_path.clone();
        app.start_load(path);
        app
    }

    /// Load the dataset and build every chart in a background thread.
    fn start_load(&mut self, path: PathBuf) {
        self.state = DatasetState::Loading;
        self.status = format!("Loading {}...", path.display());
        self.dataset_path = path.clone();

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let loader = Arc::clone(&self.loader);
        let preview_rows = self.config.preview_rows;

        thread::spawn(move || {
            let dataset = {
                let Ok(mut loader) = loader.lock() else {
                    let _ = tx.send(LoadResult::Error("dataset loader is unavailable".to_string()));
                    return;
                };
                loader.load_csv(&path)
            };

            let result = dataset
                .map_err(|e| e.to_string())
                .and_then(|dataset| DatasetPresenter::new(dataset).map_err(|e| e.to_string()))
                .and_then(|presenter| {
                    let preview = PreviewTable::from_dataset(presenter.dataset(), preview_rows)
                        .map_err(|e| e.to_string())?;
                    let charts = presenter.build_charts(&dashboard_charts());
                    Ok(LoadedDashboard {
                        presenter,
                        preview,
                        charts,
                    })
                });

            let _ = tx.send(match result {
                Ok(loaded) => LoadResult::Complete(Box::new(loaded)),
                Err(e) => LoadResult::Error(e),
            });
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(loaded)) => {
                let dataset = loaded.presenter.dataset();
                self.status = format!(
                    "Loaded {}: {} rows, {} columns",
                    file_name(dataset.source().unwrap_or(&self.dataset_path)),
                    dataset.height(),
                    dataset.width()
                );
                self.state = DatasetState::Ready(loaded);
            }
            Ok(LoadResult::Error(message)) => {
                error!(path = %self.dataset_path.display(), %message, "dataset load failed");
                self.status = format!("Error: {message}");
                self.state = DatasetState::Failed(message);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                let message = "dataset loader stopped unexpectedly".to_string();
                self.status = format!("Error: {message}");
                self.state = DatasetState::Failed(message);
            }
        }
    }

    fn handle_open_dataset(&mut self) {
        if self.load_rx.is_some() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Render charts to PNG and write them with their data to a folder.
    fn handle_export(&mut self) {
        let DatasetState::Ready(loaded) = &self.state else {
            self.status = "No charts to export".to_string();
            return;
        };

        let Some(directory) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        match export::export_charts(&loaded.charts, &directory, self.config.export_size) {
            Ok(summary) => {
                self.status = format!(
                    "Exported {} charts to {}",
                    summary.images,
                    summary.directory.display()
                );
                if let Err(e) = open::that(&summary.directory) {
                    info!(error = %e, "could not open export folder");
                }
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "export failed");
                self.status = format!("Export error: {e:#}");
            }
        }
    }

    fn show_menu_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if let Some(section) = navigation::show_menu(ui, self.section) {
                info!(section = section.label(), "section selected");
                self.section = section;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let ready = matches!(self.state, DatasetState::Ready(_));
                if ui
                    .add_enabled(ready, egui::Button::new("💾 Export Charts"))
                    .clicked()
                {
                    self.handle_export();
                }
                if ui.button("📂 Open Dataset").clicked() {
                    self.handle_open_dataset();
                }
            });
        });
        ui.add_space(4.0);
    }

    fn show_section(&self, ui: &mut egui::Ui) {
        for panel in navigation::panels_for(self.section) {
            match panel {
                Panel::Title(text) => {
                    ui.heading(RichText::new(text).size(32.0).strong());
                    ui.add_space(10.0);
                }
                Panel::Subheading(text) => {
                    ui.label(RichText::new(text).size(22.0).strong());
                    ui.add_space(6.0);
                }
                Panel::Narrative(paragraphs) => {
                    for paragraph in paragraphs {
                        ui.label(RichText::new(*paragraph).size(15.0));
                        ui.add_space(10.0);
                    }
                }
                Panel::DataPreview | Panel::Charts => {
                    let DatasetState::Ready(loaded) = &self.state else {
                        // The error or spinner is shown once for the section.
                        if panel == Panel::DataPreview {
                            self.show_unavailable(ui);
                        }
                        continue;
                    };
                    if panel == Panel::DataPreview {
                        loaded.preview.show(ui);
                    } else {
                        ui.add_space(15.0);
                        ChartViewer::show(ui, &loaded.charts, self.config.chart_height);
                    }
                    ui.add_space(10.0);
                }
            }
        }
    }

    fn show_unavailable(&self, ui: &mut egui::Ui) {
        match &self.state {
            DatasetState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading dataset...");
                });
            }
            DatasetState::Failed(message) => {
                ui.colored_label(
                    Color32::from_rgb(220, 53, 69),
                    RichText::new(format!("⚠ Could not load dataset: {message}")).size(15.0),
                );
            }
            DatasetState::Ready(_) => {}
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            self.show_menu_bar(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(RichText::new(&self.status).size(12.0).color(Color32::GRAY));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width().min(1300.0));
                    self.show_section(ui);
                });
        });
    }
}
