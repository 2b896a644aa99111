//! Chart-ready data built from summary tables or raw dataset slices.

use super::catalog::{ChartKind, ChartSpec};
use crate::data::Dataset;
use crate::stats::{AggregationError, Aggregator, SplitSummary, SummaryTable, MISSING_KEY};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    /// Aligned with `BarData::categories`.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarData {
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub stack: bool,
}

impl BarData {
    fn from_summary(table: &SummaryTable, stack: bool) -> Self {
        let (categories, values) = table
            .pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), Some(value)))
            .unzip();
        Self {
            x_label: table.key_column.clone(),
            y_label: table.value_column.clone(),
            categories,
            series: vec![BarSeries {
                name: table.value_column.clone(),
                values,
            }],
            stack,
        }
    }

    fn from_split(summary: &SplitSummary, stack: bool) -> Self {
        Self {
            x_label: summary.key_column.clone(),
            y_label: summary.value_column.clone(),
            categories: summary.keys.clone(),
            series: summary
                .splits
                .iter()
                .zip(&summary.cells)
                .map(|(name, values)| BarSeries {
                    name: name.clone(),
                    values: values.clone(),
                })
                .collect(),
            stack,
        }
    }

    /// Largest bar top, summing series when stacked.
    pub fn max_value(&self) -> f64 {
        if self.stack {
            (0..self.categories.len())
                .map(|i| {
                    self.series
                        .iter()
                        .filter_map(|s| s.values.get(i).copied().flatten())
                        .sum::<f64>()
                })
                .fold(0.0, f64::max)
        } else {
            self.series
                .iter()
                .flat_map(|s| s.values.iter().flatten().copied())
                .fold(0.0, f64::max)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieData {
    pub column: String,
    pub slices: Vec<PieSlice>,
}

impl PieData {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of each slice in `[0, 1]`.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| if total > 0.0 { s.value / total } else { 0.0 })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterData {
    /// `(x_min, x_max, y_min, y_max)` over all points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        Some(points.fold(
            (first[0], first[0], first[1], first[1]),
            |(x0, x1, y0, y1), p| (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1])),
        ))
    }
}

/// Data for one chart, ready for either renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Bar(BarData),
    Pie(PieData),
    Scatter(ScatterData),
}

impl ChartData {
    /// Compute the chart's summary from a dataset whose categorical columns
    /// are already normalized.
    pub fn build(spec: &ChartSpec, dataset: &Dataset) -> Result<Self, AggregationError> {
        match spec.kind {
            ChartKind::Bar => {
                let measure = Self::y_column(spec)?;
                let bar = match spec.color {
                    Some(split) => BarData::from_split(
                        &Aggregator::split_aggregate(dataset, spec.x, split, measure, spec.aggregate)?,
                        spec.stack,
                    ),
                    None => BarData::from_summary(
                        &Aggregator::group_aggregate(dataset, spec.x, measure, spec.aggregate)?,
                        spec.stack,
                    ),
                };
                Ok(ChartData::Bar(bar))
            }
            ChartKind::Pie => {
                let counts = Aggregator::value_counts(dataset, spec.x)?;
                Ok(ChartData::Pie(PieData {
                    column: counts.key_column,
                    slices: counts
                        .rows
                        .into_iter()
                        .map(|r| PieSlice {
                            label: r.key,
                            value: r.value,
                        })
                        .collect(),
                }))
            }
            ChartKind::Scatter => {
                let y = Self::y_column(spec)?;
                Ok(ChartData::Scatter(Self::scatter(dataset, spec.x, y, spec.color)?))
            }
        }
    }

    fn y_column(spec: &ChartSpec) -> Result<&'static str, AggregationError> {
        spec.y
            .ok_or_else(|| AggregationError::MissingColumn(format!("{} (y axis)", spec.title)))
    }

    /// Raw (x, y) pairs, one series per color value. Rows missing x or y are
    /// not plotted.
    fn scatter(
        dataset: &Dataset,
        x: &str,
        y: &str,
        color: Option<&str>,
    ) -> Result<ScatterData, AggregationError> {
        let xs = Aggregator::measure_values(dataset, x)?;
        let ys = Aggregator::measure_values(dataset, y)?;
        let groups = match color {
            Some(column) => {
                if !dataset.has_column(column) {
                    return Err(AggregationError::MissingColumn(column.to_string()));
                }
                dataset.text_values(column)?
            }
            None => vec![Some(y.to_string()); dataset.height()],
        };

        let mut series: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
        for ((x, y), group) in xs.into_iter().zip(ys).zip(groups) {
            if let (Some(x), Some(y)) = (x, y) {
                let name = group.unwrap_or_else(|| MISSING_KEY.to_string());
                series.entry(name).or_default().push([x, y]);
            }
        }

        Ok(ScatterData {
            x_label: x.to_string(),
            y_label: y.to_string(),
            series: series
                .into_iter()
                .map(|(name, points)| ScatterSeries { name, points })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns;
    use polars::prelude::*;

    fn dataset() -> Dataset {
        let df = DataFrame::new(vec![
            Column::new(columns::BMI_CATEGORY.into(), vec!["Normal", "Normal", "Obese"]),
            Column::new(columns::GENDER.into(), vec!["Male", "Female", "Male"]),
            Column::new(columns::AGE.into(), vec![30.0, 40.0, 50.0]),
            Column::new(columns::SLEEP_DURATION.into(), vec![Some(7.0), Some(6.0), None]),
            Column::new(
                columns::SLEEP_DISORDER.into(),
                vec!["None", "Insomnia", "None"],
            ),
        ])
        .unwrap();
        Dataset::from_dataframe(df)
    }

    #[test]
    fn colored_bar_has_one_series_per_split() {
        let spec = ChartSpec::bar("age", "Age", columns::BMI_CATEGORY, columns::AGE)
            .colored_by(columns::GENDER);
        let ChartData::Bar(bar) = ChartData::build(&spec, &dataset()).unwrap() else {
            panic!("expected bar data");
        };

        assert_eq!(bar.categories, vec!["Normal", "Obese"]);
        let names: Vec<&str> = bar.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Female", "Male"]);
        assert_eq!(bar.series[0].values, vec![Some(40.0), None]);
        assert_eq!(bar.series[1].values, vec![Some(30.0), Some(50.0)]);
        assert_eq!(bar.max_value(), 50.0);
    }

    #[test]
    fn stacked_max_sums_series() {
        let spec = ChartSpec::bar("age", "Age", columns::BMI_CATEGORY, columns::AGE)
            .colored_by(columns::GENDER)
            .stacked(true);
        let ChartData::Bar(bar) = ChartData::build(&spec, &dataset()).unwrap() else {
            panic!("expected bar data");
        };
        assert_eq!(bar.max_value(), 70.0);
    }

    #[test]
    fn pie_slices_follow_value_counts() {
        let spec = ChartSpec::pie("pie", "Disorders", columns::SLEEP_DISORDER);
        let ChartData::Pie(pie) = ChartData::build(&spec, &dataset()).unwrap() else {
            panic!("expected pie data");
        };
        assert_eq!(pie.slices[0].label, "None");
        assert_eq!(pie.total(), 3.0);
        let fractions = pie.fractions();
        assert!((fractions[0] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scatter_skips_rows_without_coordinates() {
        let spec = ChartSpec::scatter("s", "Scatter", columns::AGE, columns::SLEEP_DURATION)
            .colored_by(columns::SLEEP_DISORDER);
        let ChartData::Scatter(scatter) = ChartData::build(&spec, &dataset()).unwrap() else {
            panic!("expected scatter data");
        };
        let total: usize = scatter.series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total, 2);
        assert_eq!(scatter.bounds(), Some((30.0, 40.0, 6.0, 7.0)));
    }

    #[test]
    fn missing_measure_fails_only_that_chart() {
        let spec = ChartSpec::bar("x", "Stress", columns::BMI_CATEGORY, columns::STRESS_LEVEL);
        let err = ChartData::build(&spec, &dataset()).unwrap_err();
        assert!(matches!(err, AggregationError::MissingColumn(c) if c == columns::STRESS_LEVEL));
    }
}
