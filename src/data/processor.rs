//! Data Processor Module
//! Categorical clean-up applied before any summary is computed.

use super::dataset::Dataset;
use super::schema::columns;
use crate::stats::AggregationError;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Label used for missing and "no disorder" Sleep Disorder values.
pub const NO_DISORDER: &str = "None";

/// Raw category value to display label, plus a label for missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    missing: Option<String>,
    values: HashMap<String, String>,
}

impl CategoryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label assigned to null and blank cells.
    pub fn missing_as(mut self, label: impl Into<String>) -> Self {
        self.missing = Some(label.into());
        self
    }

    pub fn map(mut self, raw: impl Into<String>, label: impl Into<String>) -> Self {
        self.values.insert(raw.into(), label.into());
        self
    }

    /// Sleep Disorder codes: missing and 0 mean no disorder.
    pub fn sleep_disorder() -> Self {
        Self::new()
            .missing_as(NO_DISORDER)
            .map("0", NO_DISORDER)
            .map("1", "Insomnia")
            .map("2", "Sleep Apnea")
    }

    /// Map one cell. Keys match exactly; unmapped values, padding included,
    /// pass through unchanged.
    pub fn apply(&self, raw: Option<&str>) -> Option<String> {
        match raw {
            None | Some("") => self.missing.clone().or_else(|| raw.map(str::to_string)),
            Some(key) => Some(self.values.get(key).map_or(key, String::as_str).to_string()),
        }
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Replace a column's values according to `mapping`.
    pub fn normalize_categorical(
        dataset: &Dataset,
        column: &str,
        mapping: &CategoryMapping,
    ) -> Result<Dataset, AggregationError> {
        if !dataset.has_column(column) {
            return Err(AggregationError::MissingColumn(column.to_string()));
        }

        let raw = dataset.text_values(column)?;
        let mut remapped = 0usize;
        let values: Vec<Option<String>> = raw
            .iter()
            .map(|value| {
                let mapped = mapping.apply(value.as_deref());
                if mapped != *value {
                    remapped += 1;
                }
                mapped
            })
            .collect();
        debug!(column, remapped, "normalized categorical column");

        let mut df = dataset.dataframe().clone();
        df.with_column(Series::new(column.into(), values))?;
        Ok(dataset.with_dataframe(df))
    }

    /// Apply the Sleep Disorder mapping. Must run before anything groups by
    /// that column.
    pub fn normalize_sleep_disorder(dataset: &Dataset) -> Result<Dataset, AggregationError> {
        Self::normalize_categorical(
            dataset,
            columns::SLEEP_DISORDER,
            &CategoryMapping::sleep_disorder(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disorders(values: Vec<Option<&str>>) -> Dataset {
        let df = DataFrame::new(vec![Column::new(columns::SLEEP_DISORDER.into(), values)]).unwrap();
        Dataset::from_dataframe(df)
    }

    #[test]
    fn codes_and_missing_become_labels() {
        let ds = disorders(vec![None, Some("0"), Some("1"), Some("2"), Some("0"), None]);
        let out = DataProcessor::normalize_sleep_disorder(&ds).unwrap();
        let values = out.text_values(columns::SLEEP_DISORDER).unwrap();

        let none = values.iter().filter(|v| v.as_deref() == Some("None")).count();
        assert_eq!(none, 4);
        assert!(values.iter().all(|v| matches!(
            v.as_deref(),
            Some("None") | Some("Insomnia") | Some("Sleep Apnea")
        )));
        assert_eq!(out.height(), ds.height());
    }

    #[test]
    fn unmapped_values_pass_through() {
        let ds = disorders(vec![Some("Insomnia"), Some("Narcolepsy")]);
        let out = DataProcessor::normalize_sleep_disorder(&ds).unwrap();
        assert_eq!(
            out.text_values(columns::SLEEP_DISORDER).unwrap(),
            vec![Some("Insomnia".to_string()), Some("Narcolepsy".to_string())]
        );
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let ds = disorders(vec![None, Some("0"), Some("1"), Some("2"), Some("Sleep Apnea")]);
        let once = DataProcessor::normalize_sleep_disorder(&ds).unwrap();
        let twice = DataProcessor::normalize_sleep_disorder(&once).unwrap();
        assert!(once.dataframe().equals_missing(twice.dataframe()));
    }

    #[test]
    fn mapping_without_missing_label_keeps_nulls() {
        let mapping = CategoryMapping::new().map("M", "Male");
        assert_eq!(mapping.apply(None), None);
        assert_eq!(mapping.apply(Some("M")), Some("Male".to_string()));
        assert_eq!(mapping.apply(Some("F")), Some("F".to_string()));
    }

    #[test]
    fn padded_values_are_left_as_they_are() {
        let ds = disorders(vec![Some(" 1"), Some(" Insomnia"), Some("1"), Some("")]);
        let out = DataProcessor::normalize_sleep_disorder(&ds).unwrap();
        assert_eq!(
            out.text_values(columns::SLEEP_DISORDER).unwrap(),
            vec![
                Some(" 1".to_string()),
                Some(" Insomnia".to_string()),
                Some("Insomnia".to_string()),
                Some("None".to_string())
            ]
        );
    }

    #[test]
    fn absent_column_is_an_aggregation_error() {
        let df = DataFrame::new(vec![Column::new("Age".into(), vec![30.0])]).unwrap();
        let err = DataProcessor::normalize_sleep_disorder(&Dataset::from_dataframe(df)).unwrap_err();
        assert!(matches!(err, AggregationError::MissingColumn(c) if c == columns::SLEEP_DISORDER));
    }
}
