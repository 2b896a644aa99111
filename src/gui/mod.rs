//! GUI module - User interface components

mod app;
mod chart_viewer;
mod data_preview;
mod narrative;
mod navigation;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
pub use navigation::Section;
