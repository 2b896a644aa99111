//! CSV Data Loader Module
//! Loads the dataset with Polars and checks it against an explicit schema.

use super::dataset::Dataset;
use super::schema::{ColumnKind, DatasetSchema};
use polars::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column \"{0}\"")]
    MissingColumn(String),
    #[error("Column \"{column}\" must be {expected}: {reason}")]
    ColumnType {
        column: String,
        expected: &'static str,
        reason: String,
    },
}

/// Last successful load, keyed on path and modification time.
#[derive(Debug, Clone)]
struct CachedDataset {
    path: PathBuf,
    modified: SystemTime,
    dataset: Dataset,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    schema: DatasetSchema,
    cache: Option<CachedDataset>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(DatasetSchema::default())
    }
}

impl DataLoader {
    pub fn new(schema: DatasetSchema) -> Self {
        Self {
            schema,
            cache: None,
        }
    }

    /// Load a CSV file, reusing the previous result when the file is unchanged.
    pub fn load_csv(&mut self, path: &Path) -> Result<Dataset, LoadError> {
        let metadata = fs::metadata(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        if !metadata.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let modified = metadata.modified().ok();

        if let (Some(cached), Some(modified)) = (&self.cache, modified) {
            if cached.path == path && cached.modified == modified {
                debug!(path = %path.display(), "dataset unchanged, reusing cached copy");
                return Ok(cached.dataset.clone());
            }
        }

        let dataset = self.read_uncached(path)?;
        self.cache = modified.map(|modified| CachedDataset {
            path: path.to_path_buf(),
            modified,
            dataset: dataset.clone(),
        });
        Ok(dataset)
    }

    /// Load a CSV file without consulting or filling the cache.
    pub fn read_uncached(&self, path: &Path) -> Result<Dataset, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        info!(path = %path.display(), "loading dataset");

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let df = apply_schema(df, &self.schema)?;
        info!(rows = df.height(), columns = df.width(), "dataset loaded");
        Ok(Dataset::from_dataframe(df).with_source(path.to_path_buf()))
    }
}

fn normalize_header(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}').trim()
}

/// Check columns against the schema and coerce them to their declared kind.
fn apply_schema(mut df: DataFrame, schema: &DatasetSchema) -> Result<DataFrame, LoadError> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .filter_map(|name| {
            let clean = normalize_header(name.as_str());
            (clean != name.as_str()).then(|| (name.to_string(), clean.to_string()))
        })
        .collect();
    for (from, to) in renames {
        df.rename(&from, to.into())?;
    }

    for spec in schema.columns() {
        let coerced = match df.column(spec.name) {
            Ok(column) => {
                let series = column.as_materialized_series();
                match spec.kind {
                    ColumnKind::Numeric => coerce_numeric(series)?,
                    ColumnKind::Categorical => coerce_categorical(series)?,
                }
            }
            Err(_) if spec.required => {
                return Err(LoadError::MissingColumn(spec.name.to_string()));
            }
            Err(_) => continue,
        };
        df.with_column(coerced)?;
    }

    Ok(df)
}

fn coerce_numeric(series: &Series) -> Result<Series, LoadError> {
    series
        .strict_cast(&DataType::Float64)
        .map_err(|e| LoadError::ColumnType {
            column: series.name().to_string(),
            expected: ColumnKind::Numeric.label(),
            reason: e.to_string(),
        })
}

/// Categories are text. Integral float codes lose their fraction so `1.0`
/// and `1` land on the same category.
fn coerce_categorical(series: &Series) -> Result<Series, LoadError> {
    if series.dtype().is_float() {
        let floats = series.cast(&DataType::Float64)?;
        let integral = floats.f64()?.into_iter().flatten().all(|v| v.fract() == 0.0);
        if integral {
            return Ok(series.cast(&DataType::Int64)?.cast(&DataType::String)?);
        }
    }
    Ok(series.cast(&DataType::String)?)
}
