//! Charts module - Chart definitions, data and rendering

mod catalog;
mod data;
mod palette;
mod plotter;
mod renderer;

pub use catalog::{dashboard_charts, ChartSpec};
pub use data::ChartData;
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;

#[cfg(test)]
pub use catalog::ChartKind;
#[cfg(test)]
pub use data::{PieData, PieSlice};
