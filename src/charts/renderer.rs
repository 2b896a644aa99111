//! Static Chart Renderer
//! Renders chart images to PNG bytes with plotters, for export.
//!
//! Layout:
//! 1. Caption: chart title centered at the top
//! 2. Plot area: grouped/stacked bars, pie with percentages, or scatter
//! 3. Legend box in the upper right for multi-series charts

use super::data::{BarData, ChartData, PieData, ScatterData};
use super::palette::plotters_color;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

const FONT: &str = "sans-serif";
const GROUP_WIDTH: f64 = 0.8;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart into an in-memory PNG.
    pub fn render_png(
        data: &ChartData,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, data, title).map_err(|e| RenderError::Drawing(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        let image =
            RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Draw a chart onto any plotters drawing area.
    pub fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &ChartData,
        title: &str,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        match data {
            ChartData::Bar(bar) => Self::draw_bar(root, bar, title),
            ChartData::Pie(pie) => Self::draw_pie(root, pie, title),
            ChartData::Scatter(scatter) => Self::draw_scatter(root, scatter, title),
        }
    }

    fn draw_bar<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        bar: &BarData,
        title: &str,
    ) -> DrawResult<DB> {
        let n = bar.categories.len().max(1);
        let y_max = Self::padded_max(bar.max_value());
        let categories = &bar.categories;

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 28))
            .margin(15)
            .x_label_area_size(120)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x: &f64| Self::category_at(categories, *x))
            .x_label_style((FONT, 13).into_font().transform(FontTransform::Rotate90))
            .x_desc(bar.x_label.as_str())
            .y_desc(bar.y_label.as_str())
            .draw()?;

        let series_count = bar.series.len().max(1);
        let width = if bar.stack {
            GROUP_WIDTH
        } else {
            GROUP_WIDTH / series_count as f64
        };
        let mut base = vec![0.0; bar.categories.len()];

        for (si, series) in bar.series.iter().enumerate() {
            let color = plotters_color(si);
            let mut rects = Vec::new();

            for (ci, value) in series.values.iter().enumerate() {
                let Some(value) = *value else { continue };
                let (x0, y0) = if bar.stack {
                    (ci as f64 - width / 2.0, base[ci])
                } else {
                    (ci as f64 - GROUP_WIDTH / 2.0 + width * si as f64, 0.0)
                };
                rects.push(Rectangle::new(
                    [(x0, y0), (x0 + width, y0 + value)],
                    color.filled(),
                ));
                if bar.stack {
                    base[ci] += value;
                }
            }

            chart
                .draw_series(rects)?
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        if bar.series.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        pie: &PieData,
        title: &str,
    ) -> DrawResult<DB> {
        let area = root.titled(title, (FONT, 28))?;
        let (w, h) = area.dim_in_pixel();

        if pie.total() <= 0.0 {
            area.draw(&Text::new(
                "No Data",
                ((w / 2) as i32 - 30, (h / 2) as i32),
                (FONT, 20).into_font(),
            ))?;
            return Ok(());
        }

        let center = ((w / 2) as i32, (h / 2) as i32);
        let radius = f64::from(w.min(h)) * 0.32;
        let sizes: Vec<f64> = pie.slices.iter().map(|s| s.value).collect();
        let colors: Vec<RGBColor> = (0..pie.slices.len()).map(plotters_color).collect();
        let labels: Vec<String> = pie
            .slices
            .iter()
            .map(|s| format!("{} ({})", s.label, s.value))
            .collect();

        let mut chart = Pie::new(&center, &radius, &sizes, &colors, &labels);
        chart.label_style((FONT, 16).into_font().color(&BLACK));
        chart.percentages((FONT, 14).into_font().color(&WHITE));
        area.draw(&chart)?;
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        scatter: &ScatterData,
        title: &str,
    ) -> DrawResult<DB> {
        let (x0, x1, y0, y1) = scatter.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
        let (x0, x1) = Self::padded_range(x0, x1);
        let (y0, y1) = Self::padded_range(y0, y1);

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 28))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .x_desc(scatter.x_label.as_str())
            .y_desc(scatter.y_label.as_str())
            .draw()?;

        for (i, series) in scatter.series.iter().enumerate() {
            let color = plotters_color(i);
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|p| Circle::new((p[0], p[1]), 4, color.mix(0.7).filled())),
                )?
                .label(series.name.as_str())
                .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    }

    fn category_at(categories: &[String], x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        categories.get(idx as usize).cloned().unwrap_or_default()
    }

    fn padded_max(max: f64) -> f64 {
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    fn padded_range(min: f64, max: f64) -> (f64, f64) {
        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        (min - pad, max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let categories = vec!["Doctor".to_string(), "Nurse".to_string()];
        assert_eq!(StaticChartRenderer::category_at(&categories, 0.0), "Doctor");
        assert_eq!(StaticChartRenderer::category_at(&categories, 1.0), "Nurse");
        assert_eq!(StaticChartRenderer::category_at(&categories, 0.5), "");
        assert_eq!(StaticChartRenderer::category_at(&categories, 2.0), "");
        assert_eq!(StaticChartRenderer::category_at(&categories, -1.0), "");
    }

    #[test]
    fn ranges_are_padded() {
        assert_eq!(StaticChartRenderer::padded_max(0.0), 1.0);
        assert!((StaticChartRenderer::padded_max(10.0) - 11.0).abs() < 1e-9);
        assert_eq!(StaticChartRenderer::padded_range(5.0, 5.0), (4.0, 6.0));
        let (lo, hi) = StaticChartRenderer::padded_range(0.0, 10.0);
        assert!(lo < 0.0 && hi > 10.0);
    }
}
