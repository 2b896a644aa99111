//! Sleep Health Dashboard - Dataset Explorer
//!
//! Loads the Sleep Health and Lifestyle dataset and presents it as a
//! three-section dashboard of narrative text and charts.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod logging;
mod presenter;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;
use logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;

    let config = DashboardConfig::default();
    let title = config.window_title();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(&title),
        ..Default::default()
    };

    tracing::info!(dataset = %config.dataset_path.display(), "starting dashboard");

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
