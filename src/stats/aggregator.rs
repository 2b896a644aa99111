//! Summary Aggregator Module
//! Value counts and per-group aggregates that feed the charts.

use crate::data::Dataset;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::debug;

/// Key used for null values in value counts.
pub const MISSING_KEY: &str = "(missing)";

const COUNT_ALIAS: &str = "__count";

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Column \"{0}\" not found in dataset")]
    MissingColumn(String),
    #[error("Column \"{0}\" is not numeric")]
    NotNumeric(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Statistic computed for each group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFn {
    #[default]
    Mean,
    Count,
}

impl AggregateFn {
    pub fn label(self) -> &'static str {
        match self {
            AggregateFn::Mean => "mean",
            AggregateFn::Count => "count",
        }
    }

    /// `values` is never empty when called from the aggregator.
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            AggregateFn::Mean => values.iter().mean(),
            AggregateFn::Count => values.len() as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: String,
    pub value: f64,
}

/// Small derived table of (key, value) pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub key_column: String,
    pub value_column: String,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.key == key).map(|r| r.value)
    }

    #[cfg(test)]
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.rows.iter().map(|r| (r.key.as_str(), r.value)).collect()
    }
}

/// Aggregate keyed by a group column and a split (color) column.
///
/// `cells[split][key]` is `None` when the combination does not occur.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSummary {
    pub key_column: String,
    pub split_column: String,
    pub value_column: String,
    pub keys: Vec<String>,
    pub splits: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SplitSummary {
    #[cfg(test)]
    pub fn get(&self, key: &str, split: &str) -> Option<f64> {
        let k = self.keys.iter().position(|k| k == key)?;
        let s = self.splits.iter().position(|s| s == split)?;
        self.cells[s][k]
    }
}

/// Computes summary tables from a dataset.
pub struct Aggregator;

impl Aggregator {
    /// Frequency of each distinct value, most frequent first.
    ///
    /// Ties are ordered by value so repeated renders are stable.
    pub fn value_counts(dataset: &Dataset, column: &str) -> Result<SummaryTable, AggregationError> {
        Self::ensure_column(dataset, column)?;

        let counts = dataset
            .dataframe()
            .clone()
            .lazy()
            .select([col(column).cast(DataType::String)])
            .group_by([col(column)])
            .agg([len().alias(COUNT_ALIAS)])
            .collect()?;

        let keys = counts.column(column)?.str()?;
        let totals = counts.column(COUNT_ALIAS)?.cast(&DataType::UInt64)?;
        let totals = totals.u64()?;

        let mut rows: Vec<SummaryRow> = keys
            .into_iter()
            .zip(totals.into_iter())
            .map(|(key, n)| SummaryRow {
                key: key.unwrap_or(MISSING_KEY).to_string(),
                value: n.unwrap_or(0) as f64,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.key.cmp(&b.key))
        });

        Ok(SummaryTable {
            key_column: column.to_string(),
            value_column: "count".to_string(),
            rows,
        })
    }

    /// One row per group value present in the data, ordered by group value.
    ///
    /// Null measures are skipped; groups left without any value are omitted.
    pub fn group_aggregate(
        dataset: &Dataset,
        group: &str,
        measure: &str,
        agg: AggregateFn,
    ) -> Result<SummaryTable, AggregationError> {
        let keys = Self::group_keys(dataset, group)?;
        let values = Self::measure_values(dataset, measure)?;

        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (key, value) in keys.into_iter().zip(values) {
            if let (Some(key), Some(value)) = (key, value) {
                if !value.is_nan() {
                    groups.entry(key).or_default().push(value);
                }
            }
        }

        let rows = groups
            .into_iter()
            .map(|(key, values)| SummaryRow {
                key,
                value: agg.apply(&values),
            })
            .collect::<Vec<_>>();
        debug!(group, measure, agg = agg.label(), groups = rows.len(), "group aggregate");

        Ok(SummaryTable {
            key_column: group.to_string(),
            value_column: format!("{measure} ({})", agg.label()),
            rows,
        })
    }

    /// Group aggregate split by a second categorical column.
    pub fn split_aggregate(
        dataset: &Dataset,
        group: &str,
        split: &str,
        measure: &str,
        agg: AggregateFn,
    ) -> Result<SplitSummary, AggregationError> {
        let keys = Self::group_keys(dataset, group)?;
        let splits = Self::group_keys(dataset, split)?;
        let values = Self::measure_values(dataset, measure)?;

        let mut cells: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
        for ((key, split), value) in keys.into_iter().zip(splits).zip(values) {
            if let (Some(key), Some(split), Some(value)) = (key, split, value) {
                if !value.is_nan() {
                    cells.entry((key, split)).or_default().push(value);
                }
            }
        }

        let key_names: Vec<String> = cells
            .keys()
            .map(|(k, _)| k.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let split_names: Vec<String> = cells
            .keys()
            .map(|(_, s)| s.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let grid = split_names
            .iter()
            .map(|s| {
                key_names
                    .iter()
                    .map(|k| {
                        cells
                            .get(&(k.clone(), s.clone()))
                            .map(|values| agg.apply(values))
                    })
                    .collect()
            })
            .collect();

        Ok(SplitSummary {
            key_column: group.to_string(),
            split_column: split.to_string(),
            value_column: format!("{measure} ({})", agg.label()),
            keys: key_names,
            splits: split_names,
            cells: grid,
        })
    }

    fn ensure_column(dataset: &Dataset, column: &str) -> Result<(), AggregationError> {
        if dataset.has_column(column) {
            Ok(())
        } else {
            Err(AggregationError::MissingColumn(column.to_string()))
        }
    }

    fn group_keys(dataset: &Dataset, column: &str) -> Result<Vec<Option<String>>, AggregationError> {
        Self::ensure_column(dataset, column)?;
        Ok(dataset.text_values(column)?)
    }

    /// Numeric values of a measure column.
    pub fn measure_values(
        dataset: &Dataset,
        column: &str,
    ) -> Result<Vec<Option<f64>>, AggregationError> {
        Self::ensure_column(dataset, column)?;
        if !dataset.is_numeric(column) {
            return Err(AggregationError::NotNumeric(column.to_string()));
        }
        Ok(dataset.numeric_values(column)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{columns, DataProcessor};

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset::from_dataframe(DataFrame::new(columns).unwrap())
    }

    fn occupations() -> Dataset {
        dataset(vec![
            Column::new(
                columns::OCCUPATION.into(),
                vec!["Nurse", "Nurse", "Doctor", "Engineer", "Doctor"],
            ),
            Column::new(
                columns::SLEEP_DURATION.into(),
                vec![Some(7.0), Some(9.0), Some(6.0), None, Some(8.0)],
            ),
            Column::new(
                columns::GENDER.into(),
                vec!["Female", "Female", "Male", "Male", "Female"],
            ),
        ])
    }

    #[test]
    fn mean_per_group() {
        let table = Aggregator::group_aggregate(
            &occupations(),
            columns::OCCUPATION,
            columns::SLEEP_DURATION,
            AggregateFn::Mean,
        )
        .unwrap();

        assert_eq!(table.get("Nurse"), Some(8.0));
        assert_eq!(table.get("Doctor"), Some(7.0));
        // Engineer only has a null measure.
        assert_eq!(table.get("Engineer"), None);
        let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Doctor", "Nurse"]);
        assert_eq!(table.value_column, "Sleep Duration (mean)");
    }

    #[test]
    fn aggregate_functions_apply() {
        assert_eq!(AggregateFn::Count.apply(&[1.0, 5.0, 3.0]), 3.0);
        assert!((AggregateFn::Mean.apply(&[1.0, 2.0]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn value_counts_sum_to_dataset_size() {
        let ds = occupations();
        let counts = Aggregator::value_counts(&ds, columns::OCCUPATION).unwrap();

        assert_eq!(counts.total() as usize, ds.height());
        assert_eq!(
            counts.pairs(),
            vec![("Doctor", 2.0), ("Nurse", 2.0), ("Engineer", 1.0)]
        );
    }

    #[test]
    fn value_counts_keep_nulls() {
        let ds = dataset(vec![Column::new(
            columns::SLEEP_DISORDER.into(),
            vec![None, Some("Insomnia"), None],
        )]);
        let counts = Aggregator::value_counts(&ds, columns::SLEEP_DISORDER).unwrap();
        assert_eq!(counts.pairs(), vec![(MISSING_KEY, 2.0), ("Insomnia", 1.0)]);
    }

    #[test]
    fn single_missing_disorder_counts_as_none() {
        let ds = dataset(vec![Column::new(
            columns::SLEEP_DISORDER.into(),
            vec![None::<&str>],
        )]);
        let ds = DataProcessor::normalize_sleep_disorder(&ds).unwrap();
        let counts = Aggregator::value_counts(&ds, columns::SLEEP_DISORDER).unwrap();
        assert_eq!(counts.pairs(), vec![("None", 1.0)]);
    }

    #[test]
    fn split_aggregate_leaves_absent_combinations_empty() {
        let summary = Aggregator::split_aggregate(
            &occupations(),
            columns::OCCUPATION,
            columns::GENDER,
            columns::SLEEP_DURATION,
            AggregateFn::Mean,
        )
        .unwrap();

        assert_eq!(summary.keys, vec!["Doctor", "Nurse"]);
        assert_eq!(summary.splits, vec!["Female", "Male"]);
        assert_eq!(summary.get("Nurse", "Female"), Some(8.0));
        assert_eq!(summary.get("Doctor", "Male"), Some(6.0));
        assert_eq!(summary.get("Doctor", "Female"), Some(8.0));
        assert_eq!(summary.get("Nurse", "Male"), None);
    }

    #[test]
    fn absent_columns_are_errors() {
        let ds = occupations();
        let err = Aggregator::group_aggregate(&ds, "Shift", columns::SLEEP_DURATION, AggregateFn::Mean)
            .unwrap_err();
        assert!(matches!(err, AggregationError::MissingColumn(c) if c == "Shift"));

        let err = Aggregator::value_counts(&ds, "Shift").unwrap_err();
        assert!(matches!(err, AggregationError::MissingColumn(_)));

        let err = Aggregator::group_aggregate(&ds, columns::OCCUPATION, columns::GENDER, AggregateFn::Mean)
            .unwrap_err();
        assert!(matches!(err, AggregationError::NotNumeric(c) if c == columns::GENDER));
    }
}
