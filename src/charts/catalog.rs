//! Chart definitions shown on the Visualizations page.

use crate::data::columns;
use crate::stats::AggregateFn;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Scatter,
}

/// What to draw and from which columns.
///
/// For bar charts `x` is the grouping column and `y` the measure; for pie
/// charts `x` is the counted column; for scatter plots both are numeric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub x: &'static str,
    pub y: Option<&'static str>,
    /// Column whose values split the data into colored series.
    pub color: Option<&'static str>,
    pub stack: bool,
    pub aggregate: AggregateFn,
}

impl ChartSpec {
    pub fn bar(id: &'static str, title: &'static str, x: &'static str, y: &'static str) -> Self {
        Self {
            id,
            title,
            kind: ChartKind::Bar,
            x,
            y: Some(y),
            color: None,
            stack: false,
            aggregate: AggregateFn::Mean,
        }
    }

    pub fn pie(id: &'static str, title: &'static str, column: &'static str) -> Self {
        Self {
            id,
            title,
            kind: ChartKind::Pie,
            x: column,
            y: None,
            color: None,
            stack: false,
            aggregate: AggregateFn::Count,
        }
    }

    pub fn scatter(id: &'static str, title: &'static str, x: &'static str, y: &'static str) -> Self {
        Self {
            id,
            title,
            kind: ChartKind::Scatter,
            x,
            y: Some(y),
            color: None,
            stack: false,
            aggregate: AggregateFn::Mean,
        }
    }

    pub fn colored_by(mut self, column: &'static str) -> Self {
        self.color = Some(column);
        self
    }

    pub fn stacked(mut self, stack: bool) -> Self {
        self.stack = stack;
        self
    }
}

/// Charts of the Visualizations page, in display order.
pub fn dashboard_charts() -> Vec<ChartSpec> {
    vec![
        ChartSpec::bar(
            "sleep-duration-by-occupation",
            "Sleep Duration by Occupation",
            columns::OCCUPATION,
            columns::SLEEP_DURATION,
        ),
        ChartSpec::bar(
            "stress-level-by-occupation",
            "Stress Level by Occupation",
            columns::OCCUPATION,
            columns::STRESS_LEVEL,
        ),
        ChartSpec::bar(
            "age-by-bmi-category",
            "Age by BMI Category",
            columns::BMI_CATEGORY,
            columns::AGE,
        )
        .colored_by(columns::GENDER)
        .stacked(false),
        ChartSpec::pie(
            "sleep-disorder-distribution",
            "Sleep Disorder Distribution",
            columns::SLEEP_DISORDER,
        ),
        ChartSpec::scatter(
            "sleep-duration-vs-activity",
            "Sleep Duration vs Physical Activity",
            columns::PHYSICAL_ACTIVITY_LEVEL,
            columns::SLEEP_DURATION,
        )
        .colored_by(columns::SLEEP_DISORDER),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn chart_ids_are_unique() {
        let charts = dashboard_charts();
        let ids: HashSet<_> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), charts.len());
    }

    #[test]
    fn catalog_covers_every_chart_kind() {
        let kinds: Vec<ChartKind> = dashboard_charts().iter().map(|c| c.kind).collect();
        assert!(kinds.contains(&ChartKind::Bar));
        assert!(kinds.contains(&ChartKind::Pie));
        assert!(kinds.contains(&ChartKind::Scatter));
    }
}
