//! Data Preview Widget
//! Scrollable table of the loaded dataset.

use crate::data::Dataset;
use egui::{FontId, RichText, ScrollArea};
use polars::prelude::PolarsResult;

const CELL_FONT_SIZE: f32 = 12.0;
const PREVIEW_HEIGHT: f32 = 320.0;

/// One line of the scrolled grid. Line 0 is the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviewLine<'a> {
    Header(&'a [String]),
    Row(&'a [String]),
}

/// Display strings of the dataset, computed once per load.
#[derive(Debug, Clone, Default)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl PreviewTable {
    pub fn from_dataset(dataset: &Dataset, limit: Option<usize>) -> PolarsResult<Self> {
        Ok(Self {
            headers: dataset.column_names(),
            rows: dataset.display_rows(limit)?,
            total_rows: dataset.height(),
        })
    }

    /// Header plus data rows.
    fn line_count(&self) -> usize {
        self.rows.len() + 1
    }

    fn line(&self, index: usize) -> Option<PreviewLine<'_>> {
        match index.checked_sub(1) {
            None => Some(PreviewLine::Header(&self.headers)),
            Some(row) => self.rows.get(row).map(|r| PreviewLine::Row(r)),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        // Grid rows use the same vertical spacing show_rows adds per row.
        let row_spacing = ui.spacing().item_spacing.y;
        let row_height = ui.fonts(|f| f.row_height(&FontId::proportional(CELL_FONT_SIZE)));

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_salt("data_preview")
                    .max_height(PREVIEW_HEIGHT)
                    .auto_shrink([false, true])
                    .show_rows(ui, row_height, self.line_count(), |ui, range| {
                        egui::Grid::new("data_preview_grid")
                            .striped(true)
                            .min_col_width(60.0)
                            .min_row_height(row_height)
                            .spacing([12.0, row_spacing])
                            .show(ui, |ui| {
                                for line in range.filter_map(|i| self.line(i)) {
                                    match line {
                                        PreviewLine::Header(headers) => {
                                            for header in headers {
                                                ui.label(
                                                    RichText::new(header)
                                                        .strong()
                                                        .size(CELL_FONT_SIZE),
                                                );
                                            }
                                        }
                                        PreviewLine::Row(cells) => {
                                            for cell in cells {
                                                ui.label(RichText::new(cell).size(CELL_FONT_SIZE));
                                            }
                                        }
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });

        if self.rows.len() < self.total_rows {
            ui.label(
                RichText::new(format!(
                    "Showing {} of {} rows",
                    self.rows.len(),
                    self.total_rows
                ))
                .size(11.0)
                .weak(),
            );
        }
    }
}
