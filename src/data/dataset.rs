//! In-memory dataset backed by a Polars DataFrame.

use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Ordered, read-only collection of respondent records.
///
/// Values are typed by the schema the loader checked: numeric columns are
/// `f64`, categorical columns are strings.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { df, source: None }
    }

    pub(crate) fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    /// Same source, replaced contents. Used by transformations.
    pub(crate) fn with_dataframe(&self, df: DataFrame) -> Self {
        Self {
            df,
            source: self.source.clone(),
        }
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.df.column(name).is_ok_and(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Path the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Values of a column rendered as text, `None` for nulls.
    pub fn text_values(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        let column = self.df.column(name)?.cast(&DataType::String)?;
        let ca = column.str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Values of a column as `f64`, `None` for nulls.
    pub fn numeric_values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let column = self.df.column(name)?.cast(&DataType::Float64)?;
        let ca = column.f64()?;
        Ok(ca.into_iter().collect())
    }

    /// Row-major display strings for the data preview.
    pub fn display_rows(&self, limit: Option<usize>) -> PolarsResult<Vec<Vec<String>>> {
        let height = limit.map_or(self.height(), |l| l.min(self.height()));
        let mut rows = vec![Vec::with_capacity(self.width()); height];

        for column in self.df.get_columns() {
            let name = column.name().as_str();
            let cells: Vec<String> = if self.is_numeric(name) {
                self.numeric_values(name)?
                    .into_iter()
                    .take(height)
                    .map(|v| v.map(format_number).unwrap_or_default())
                    .collect()
            } else {
                self.text_values(name)?
                    .into_iter()
                    .take(height)
                    .map(Option::unwrap_or_default)
                    .collect()
            };

            for (row, cell) in rows.iter_mut().zip(cells) {
                row.push(cell);
            }
        }

        Ok(rows)
    }
}

/// Integral values print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let df = DataFrame::new(vec![
            Column::new("Occupation".into(), vec!["Nurse", "Doctor"]),
            Column::new("Sleep Duration".into(), vec![Some(6.5), None]),
        ])
        .unwrap();
        Dataset::from_dataframe(df)
    }

    #[test]
    fn exposes_typed_values() {
        let ds = sample();
        assert_eq!(ds.height(), 2);
        assert_eq!(ds.width(), 2);
        assert!(ds.is_numeric("Sleep Duration"));
        assert!(!ds.is_numeric("Occupation"));
        assert!(!ds.has_column("Age"));
        assert_eq!(
            ds.text_values("Occupation").unwrap(),
            vec![Some("Nurse".to_string()), Some("Doctor".to_string())]
        );
        assert_eq!(
            ds.numeric_values("Sleep Duration").unwrap(),
            vec![Some(6.5), None]
        );
    }

    #[test]
    fn display_rows_formats_cells() {
        let rows = sample().display_rows(None).unwrap();
        assert_eq!(rows[0], vec!["Nurse".to_string(), "6.5".to_string()]);
        assert_eq!(rows[1], vec!["Doctor".to_string(), String::new()]);

        let limited = sample().display_rows(Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(6.1), "6.1");
    }
}
