//! Dataset Presenter
//! Normalizes a loaded dataset and turns chart specs into chart data.

use crate::charts::{ChartData, ChartSpec};
use crate::data::{DataProcessor, Dataset};
use crate::stats::AggregationError;
use rayon::prelude::*;
use tracing::{info, warn};

/// Result of building one chart. A failure affects only that chart.
#[derive(Debug)]
pub struct ChartOutcome {
    pub spec: ChartSpec,
    pub result: Result<ChartData, AggregationError>,
}

impl ChartOutcome {
    pub fn data(&self) -> Option<&ChartData> {
        self.result.as_ref().ok()
    }
}

/// Owns the normalized dataset every chart is computed from.
#[derive(Debug, Clone)]
pub struct DatasetPresenter {
    dataset: Dataset,
}

impl DatasetPresenter {
    /// Normalize Sleep Disorder before anything can group by it.
    pub fn new(dataset: Dataset) -> Result<Self, AggregationError> {
        let dataset = DataProcessor::normalize_sleep_disorder(&dataset)?;
        Ok(Self { dataset })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn build_chart(&self, spec: &ChartSpec) -> ChartOutcome {
        let result = ChartData::build(spec, &self.dataset);
        if let Err(e) = &result {
            warn!(chart = spec.id, error = %e, "chart could not be built");
        }
        ChartOutcome {
            spec: spec.clone(),
            result,
        }
    }

    /// Build every chart in parallel, keeping the order of `specs`.
    pub fn build_charts(&self, specs: &[ChartSpec]) -> Vec<ChartOutcome> {
        let outcomes: Vec<ChartOutcome> = specs.par_iter().map(|spec| self.build_chart(spec)).collect();
        let built = outcomes.iter().filter(|o| o.result.is_ok()).count();
        info!(built, total = outcomes.len(), "charts built");
        outcomes
    }
}
