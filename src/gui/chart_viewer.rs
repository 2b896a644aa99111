//! Chart Viewer Widget
//! Lays out chart cards two per row; a failed chart shows its error in place.

use crate::charts::ChartPlotter;
use crate::presenter::ChartOutcome;
use egui::{Color32, RichText};

const CHART_SPACING: f32 = 15.0;
const COLUMNS: usize = 2;

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, outcomes: &[ChartOutcome], chart_height: f32) {
        if outcomes.is_empty() {
            ui.label(RichText::new("No charts").size(16.0));
            return;
        }

        for row in outcomes.chunks(COLUMNS) {
            ui.columns(COLUMNS, |columns| {
                for (column, outcome) in columns.iter_mut().zip(row) {
                    Self::draw_card(column, outcome, chart_height);
                }
            });
            ui.add_space(CHART_SPACING);
        }
    }

    fn draw_card(ui: &mut egui::Ui, outcome: &ChartOutcome, chart_height: f32) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(outcome.spec.title).size(16.0).strong());
                ui.add_space(5.0);

                match &outcome.result {
                    Ok(data) => ChartPlotter::draw(ui, outcome.spec.id, data, chart_height),
                    Err(error) => {
                        ui.allocate_ui(egui::vec2(ui.available_width(), chart_height), |ui| {
                            ui.colored_label(
                                Color32::from_rgb(220, 53, 69),
                                format!("⚠ {error}"),
                            );
                        });
                    }
                }
            });
    }
}
