//! Chart Plotter Module
//! Draws interactive bar, pie and scatter charts using egui_plot.

use super::data::{BarData, ChartData, PieData, ScatterData};
use super::palette::egui_color;
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};
use std::f64::consts::TAU;

/// Share of each category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;
/// Segments used to approximate a full pie circle.
const PIE_SEGMENTS: usize = 120;

/// Creates interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw(ui: &mut egui::Ui, id: &str, data: &ChartData, height: f32) {
        match data {
            ChartData::Bar(bar) => Self::draw_bar_chart(ui, id, bar, height),
            ChartData::Pie(pie) => Self::draw_pie_chart(ui, id, pie, height),
            ChartData::Scatter(scatter) => Self::draw_scatter_chart(ui, id, scatter, height),
        }
    }

    /// Grouped bars side by side, or stacked when `bar.stack` is set.
    /// X-axis: categories, Y-axis: aggregated measure
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, bar: &BarData, height: f32) {
        let labels = bar.categories.clone();
        let series_count = bar.series.len().max(1);
        let width = if bar.stack {
            GROUP_WIDTH
        } else {
            GROUP_WIDTH / series_count as f64
        };

        Plot::new(format!("bar_{id}"))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(bar.x_label.as_str())
            .y_axis_label(bar.y_label.as_str())
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let mut charts: Vec<BarChart> = Vec::new();

                for (si, series) in bar.series.iter().enumerate() {
                    let offset = if bar.stack {
                        0.0
                    } else {
                        -GROUP_WIDTH / 2.0 + width * (si as f64 + 0.5)
                    };

                    // Stacking matches bars by index, so keep a bar per category.
                    let bars: Vec<Bar> = series
                        .values
                        .iter()
                        .enumerate()
                        .filter_map(|(ci, value)| match (value, bar.stack) {
                            (Some(v), _) => Some((ci, *v)),
                            (None, true) => Some((ci, 0.0)),
                            (None, false) => None,
                        })
                        .map(|(ci, v)| {
                            Bar::new(ci as f64 + offset, v)
                                .width(width)
                                .name(&bar.categories[ci])
                        })
                        .collect();

                    let mut chart = BarChart::new(bars)
                        .color(egui_color(si))
                        .name(&series.name);
                    if bar.stack {
                        let below: Vec<&BarChart> = charts.iter().collect();
                        chart = chart.stack_on(&below);
                    }
                    charts.push(chart);
                }

                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Pie slices drawn as filled polygons on a unit circle.
    pub fn draw_pie_chart(ui: &mut egui::Ui, id: &str, pie: &PieData, height: f32) {
        if pie.total() <= 0.0 {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(16.0));
            });
            return;
        }

        let fractions = pie.fractions();

        Plot::new(format!("pie_{id}"))
            .height(height)
            .legend(Legend::default())
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.3)
            .include_y(1.3)
            .show(ui, |plot_ui| {
                let mut start = 0.0;
                for (i, (slice, fraction)) in pie.slices.iter().zip(&fractions).enumerate() {
                    let end = start + fraction * TAU;
                    let color = egui_color(i);

                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(Self::wedge(start, end)))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(&slice.label),
                    );

                    let mid = (start + end) / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                            RichText::new(format!("{:.1}%", fraction * 100.0)).size(12.0),
                        )
                        .color(color),
                    );
                    start = end;
                }
            });
    }

    /// Outline of one pie wedge, counter-clockwise from `start` to `end`.
    fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
        let steps = (((end - start) / TAU) * PIE_SEGMENTS as f64).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for i in 0..=steps {
            let angle = start + (end - start) * i as f64 / steps as f64;
            points.push([angle.cos(), angle.sin()]);
        }
        points
    }

    /// One point cloud per color value.
    pub fn draw_scatter_chart(ui: &mut egui::Ui, id: &str, scatter: &ScatterData, height: f32) {
        Plot::new(format!("scatter_{id}"))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(scatter.x_label.as_str())
            .y_axis_label(scatter.y_label.as_str())
            .show(ui, |plot_ui| {
                for (i, series) in scatter.series.iter().enumerate() {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(points)
                            .radius(3.5)
                            .color(egui_color(i).gamma_multiply(0.8))
                            .name(&series.name),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_center_and_spans_angle() {
        let points = ChartPlotter::wedge(0.0, TAU / 4.0);
        assert_eq!(points[0], [0.0, 0.0]);
        assert_eq!(points[1], [1.0, 0.0]);
        let last = points.last().unwrap();
        assert!(last[0].abs() < 1e-9);
        assert!((last[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_wedge_still_has_an_arc() {
        let points = ChartPlotter::wedge(0.0, 1e-6);
        assert_eq!(points.len(), 3);
    }
}
