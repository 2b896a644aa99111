//! Navigation Menu
//! Horizontal tab bar and the panels shown for each section.

use super::narrative;
use egui::{Color32, RichText};

/// Top-level page sections, in menu order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Introduction,
    Visualizations,
    Conclusion,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::Introduction,
        Section::Visualizations,
        Section::Conclusion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Introduction => "Introduction",
            Section::Visualizations => "Visualizations",
            Section::Conclusion => "Conclusion",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Introduction => "🏠",
            Section::Visualizations => "📈",
            Section::Conclusion => "📓",
        }
    }
}

/// One block of page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Title(&'static str),
    Subheading(&'static str),
    Narrative(&'static [&'static str]),
    DataPreview,
    Charts,
}

/// Panels displayed for a section, top to bottom.
pub fn panels_for(section: Section) -> Vec<Panel> {
    match section {
        Section::Introduction => vec![
            Panel::Title(narrative::INTRODUCTION_TITLE),
            Panel::Narrative(narrative::INTRODUCTION),
        ],
        Section::Visualizations => vec![
            Panel::Subheading("Data Preview"),
            Panel::DataPreview,
            Panel::Charts,
        ],
        Section::Conclusion => vec![
            Panel::Subheading(narrative::CONCLUSION_TITLE),
            Panel::Narrative(narrative::CONCLUSION),
        ],
    }
}

/// Draw the horizontal menu. Returns the newly selected section, if any.
pub fn show_menu(ui: &mut egui::Ui, selected: Section) -> Option<Section> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for section in Section::ALL {
            let text = RichText::new(format!("{} {}", section.icon(), section.label())).size(16.0);
            let text = if section == selected {
                text.strong().color(Color32::from_rgb(100, 149, 237))
            } else {
                text
            };
            if ui.selectable_label(section == selected, text).clicked() && section != selected {
                clicked = Some(section);
            }
            ui.add_space(12.0);
        }
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn introduction_is_static_text() {
        let panels = panels_for(Section::Introduction);
        assert_eq!(panels[0], Panel::Title("Sleep Health and Lifestyle"));
        assert!(matches!(panels[1], Panel::Narrative(_)));
    }

    #[test]
    fn visualizations_show_preview_then_charts() {
        assert_eq!(
            panels_for(Section::Visualizations),
            vec![
                Panel::Subheading("Data Preview"),
                Panel::DataPreview,
                Panel::Charts
            ]
        );
    }

    #[test]
    fn conclusion_is_static_text() {
        let panels = panels_for(Section::Conclusion);
        assert_eq!(panels[0], Panel::Subheading("Conclusion"));
        assert!(!panels.contains(&Panel::Charts));
    }

    #[test]
    fn menu_order_matches_labels() {
        let labels: Vec<&str> = Section::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Introduction", "Visualizations", "Conclusion"]);
        assert_eq!(Section::default(), Section::Introduction);
    }
}
