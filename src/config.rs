//! Dashboard configuration with compiled-in defaults.

use crate::gui::Section;
use std::path::PathBuf;

/// Dataset file read at startup, relative to the working directory.
pub const DEFAULT_DATASET: &str = "Sleep_health_and_lifestyle_dataset.csv";

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub page_title: String,
    pub page_icon: String,
    pub dataset_path: PathBuf,
    pub default_section: Section,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of each interactive chart.
    pub chart_height: f32,
    /// Size of exported PNG images.
    pub export_size: (u32, u32),
    /// Rows shown in the data preview, `None` for all.
    pub preview_rows: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_title: "Data Exploration App".to_string(),
            page_icon: "📓".to_string(),
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            default_section: Section::Introduction,
            window_size: [1400.0, 900.0],
            min_window_size: [900.0, 600.0],
            chart_height: 320.0,
            export_size: (1200, 800),
            preview_rows: None,
        }
    }
}

impl DashboardConfig {
    pub fn window_title(&self) -> String {
        format!("{} {}", self.page_icon, self.page_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_on_introduction() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_section, Section::Introduction);
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET));
        assert_eq!(config.window_title(), "📓 Data Exploration App");
    }
}
