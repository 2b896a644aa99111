//! Chart Export Module
//! Writes each chart as a PNG plus the chart data as `summaries.json`.

use crate::charts::{ChartData, ChartSpec, StaticChartRenderer};
use crate::presenter::ChartOutcome;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SUMMARY_FILE: &str = "summaries.json";

#[derive(Serialize)]
struct ExportedChart<'a> {
    spec: &'a ChartSpec,
    image: String,
    data: &'a ChartData,
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub directory: PathBuf,
    pub images: usize,
    /// Charts left out because their data could not be built.
    pub skipped: usize,
}

pub fn image_file_name(spec: &ChartSpec) -> String {
    format!("{}.png", spec.id)
}

/// Render every built chart into `directory`.
pub fn export_charts(
    outcomes: &[ChartOutcome],
    directory: &Path,
    (width, height): (u32, u32),
) -> Result<ExportSummary> {
    fs::create_dir_all(directory)
        .with_context(|| format!("creating export folder {}", directory.display()))?;

    let mut images = 0;
    for outcome in outcomes {
        let Some(data) = outcome.data() else {
            continue;
        };
        let png = StaticChartRenderer::render_png(data, outcome.spec.title, width, height)
            .with_context(|| format!("rendering \"{}\"", outcome.spec.title))?;
        let path = directory.join(image_file_name(&outcome.spec));
        fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
        images += 1;
    }

    write_summaries(outcomes, directory)?;

    let summary = ExportSummary {
        directory: directory.to_path_buf(),
        images,
        skipped: outcomes.len() - images,
    };
    if summary.skipped > 0 {
        warn!(skipped = summary.skipped, "some charts were not exported");
    }
    info!(directory = %directory.display(), images, "charts exported");
    Ok(summary)
}

/// Write the data behind every built chart as pretty JSON.
pub fn write_summaries(outcomes: &[ChartOutcome], directory: &Path) -> Result<PathBuf> {
    let charts: Vec<ExportedChart> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.data().map(|data| ExportedChart {
                spec: &outcome.spec,
                image: image_file_name(&outcome.spec),
                data,
            })
        })
        .collect();

    let path = directory.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&charts).context("serializing chart data")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{PieData, PieSlice};
    use crate::stats::AggregationError;

    fn outcomes() -> Vec<ChartOutcome> {
        vec![
            ChartOutcome {
                spec: ChartSpec::pie("disorders", "Disorders", "Sleep Disorder"),
                result: Ok(ChartData::Pie(PieData {
                    column: "Sleep Disorder".to_string(),
                    slices: vec![PieSlice {
                        label: "None".to_string(),
                        value: 3.0,
                    }],
                })),
            },
            ChartOutcome {
                spec: ChartSpec::bar("broken", "Broken", "Shift", "Age"),
                result: Err(AggregationError::MissingColumn("Shift".to_string())),
            },
        ]
    }

    #[test]
    fn summaries_list_only_built_charts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_summaries(&outcomes(), dir.path()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let charts = json.as_array().unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0]["spec"]["id"], "disorders");
        assert_eq!(charts[0]["image"], "disorders.png");
        assert_eq!(charts[0]["data"]["kind"], "pie");
        assert_eq!(charts[0]["data"]["slices"][0]["value"], 3.0);
    }
}
