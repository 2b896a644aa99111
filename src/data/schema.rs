//! Dataset Schema Module
//! Named, typed columns checked when a dataset is loaded.

/// Column names of the Sleep Health and Lifestyle dataset.
pub mod columns {
    pub const PERSON_ID: &str = "Person ID";
    pub const GENDER: &str = "Gender";
    pub const AGE: &str = "Age";
    pub const OCCUPATION: &str = "Occupation";
    pub const SLEEP_DURATION: &str = "Sleep Duration";
    pub const QUALITY_OF_SLEEP: &str = "Quality of Sleep";
    pub const PHYSICAL_ACTIVITY_LEVEL: &str = "Physical Activity Level";
    pub const STRESS_LEVEL: &str = "Stress Level";
    pub const BMI_CATEGORY: &str = "BMI Category";
    pub const BLOOD_PRESSURE: &str = "Blood Pressure";
    pub const HEART_RATE: &str = "Heart Rate";
    pub const DAILY_STEPS: &str = "Daily Steps";
    pub const SLEEP_DISORDER: &str = "Sleep Disorder";
}

/// How a column's values are typed after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free text category, stored as strings
    Categorical,
    /// Measurement, stored as `f64`
    Numeric,
}

impl ColumnKind {
    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Categorical => "categorical",
            ColumnKind::Numeric => "numeric",
        }
    }
}

/// One typed column of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Required columns must be present in the file header.
    pub required: bool,
}

impl ColumnSpec {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Explicit schema for a delimited input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Schema of the Sleep Health and Lifestyle dataset.
    pub fn sleep_health() -> Self {
        use columns::*;
        use ColumnKind::{Categorical, Numeric};

        Self::new(vec![
            ColumnSpec::optional(PERSON_ID, Numeric),
            ColumnSpec::required(GENDER, Categorical),
            ColumnSpec::required(AGE, Numeric),
            ColumnSpec::required(OCCUPATION, Categorical),
            ColumnSpec::required(SLEEP_DURATION, Numeric),
            ColumnSpec::optional(QUALITY_OF_SLEEP, Numeric),
            ColumnSpec::required(PHYSICAL_ACTIVITY_LEVEL, Numeric),
            ColumnSpec::required(STRESS_LEVEL, Numeric),
            ColumnSpec::required(BMI_CATEGORY, Categorical),
            ColumnSpec::optional(BLOOD_PRESSURE, Categorical),
            ColumnSpec::optional(HEART_RATE, Numeric),
            ColumnSpec::optional(DAILY_STEPS, Numeric),
            ColumnSpec::required(SLEEP_DISORDER, Categorical),
        ])
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::sleep_health()
    }
}
