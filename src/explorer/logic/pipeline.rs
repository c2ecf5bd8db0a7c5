//! Top-to-bottom pipeline runs, one per dashboard variant.
//!
//! Every input change re-runs Dataset Provider → Column Classifier → Chart
//! Renderer from scratch. The inputs structs below are the whole per-session
//! state; nothing is cached between runs.

use super::charts::render;
use super::classify::ColumnTypes;
use super::dataset::{
    self, MAX_SAMPLES, MIN_SAMPLES, SAMPLE_STEP, SYNTHETIC_COLUMNS, column_names,
    generate_synthetic, load_from_bytes,
};
use super::types::{ChartKind, ChartRequest, ChartResult, RenderOptions};
use crate::config::DashboardSettings;
use crate::error::Result;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

pub const MIN_ROW_CAP: usize = 10;
pub const MAX_ROW_CAP: usize = 500;
pub const ROW_CAP_STEP: usize = 10;

/// Rows shown in the "loaded data" preview of an upload.
pub const HEAD_ROWS: usize = 5;

/// Chart kind and column choices shared by both dashboards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    pub kind: ChartKind,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl ChartSelection {
    /// Points the selection at columns that exist in `selected`.
    fn reconcile(&mut self, selected: &[String]) {
        if !self.primary.as_ref().is_some_and(|p| selected.contains(p)) {
            self.primary = selected.first().cloned();
        }
        if !self.secondary.as_ref().is_none_or(|s| selected.contains(s)) {
            self.secondary = None;
        }
    }

    fn request(&self) -> Option<ChartRequest> {
        self.primary.as_ref().map(|primary| ChartRequest {
            kind: self.kind,
            primary: primary.clone(),
            secondary: self.secondary.clone(),
        })
    }
}

/// What the chart region shows after a run.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartPanel {
    /// No column selected, so there is nothing to chart.
    NoColumn,
    Result(ChartResult),
    /// Unexpected failure caught at the render boundary.
    Error(String),
}

impl ChartPanel {
    fn from_render(outcome: Result<ChartResult>) -> Self {
        match outcome {
            Ok(result) => Self::Result(result),
            Err(e) => {
                tracing::warn!("Chart rendering failed: {e}");
                Self::Error(format!("Error generating chart: {e}"))
            }
        }
    }

    pub fn result(&self) -> Option<&ChartResult> {
        match self {
            Self::Result(r) => Some(r),
            Self::NoColumn | Self::Error(_) => None,
        }
    }
}

/// Clamps `value` into `[min, max]` and snaps it to `step` above `min`.
fn snap(value: usize, min: usize, max: usize, step: usize) -> usize {
    let clamped = value.clamp(min, max.max(min));
    min + (clamped - min) / step * step
}

fn keep_known(selected: &[String], known: &[String], limit: usize) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for name in selected {
        if known.contains(name) && !kept.contains(name) {
            kept.push(name.clone());
        }
    }
    kept.truncate(limit);
    kept
}

// SYNTHETIC DATASET

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticInputs {
    pub sample_count: usize,
    pub selected: Vec<String>,
    pub chart: ChartSelection,
}

impl SyntheticInputs {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            sample_count: settings.default_sample_count,
            selected: SYNTHETIC_COLUMNS
                .iter()
                .take(settings.default_selected_columns)
                .map(|s| (*s).to_owned())
                .collect(),
            chart: ChartSelection::default(),
        }
    }

    /// Clamps every input into the range its control allows.
    #[must_use]
    pub fn normalized(&self, max_selected: usize) -> Self {
        let known: Vec<String> = SYNTHETIC_COLUMNS.iter().map(|s| (*s).to_owned()).collect();
        let selected = keep_known(&self.selected, &known, max_selected);
        let mut chart = self.chart.clone();
        chart.reconcile(&selected);
        Self {
            sample_count: snap(self.sample_count, MIN_SAMPLES, MAX_SAMPLES, SAMPLE_STEP),
            selected,
            chart,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SyntheticView {
    pub inputs: SyntheticInputs,
    pub table: DataFrame,
    pub preview: DataFrame,
    pub chart: ChartPanel,
}

/// Runs the synthetic dashboard pipeline.
///
/// The chart is rendered over the full table, with the line chart sorted and
/// scatter points coloured by sport.
///
/// # Errors
///
/// Fails only if the table cannot be assembled or projected.
pub fn run_synthetic(inputs: &SyntheticInputs, settings: &DashboardSettings) -> Result<SyntheticView> {
    let inputs = inputs.normalized(settings.max_selected_columns);
    let table = generate_synthetic(inputs.sample_count, settings.seed)?;
    let preview = dataset::preview(&table, &inputs.selected, None)?;
    let types = ColumnTypes::synthetic();

    let chart = match inputs.chart.request() {
        Some(request) => ChartPanel::from_render(render(
            &table,
            &inputs.selected,
            &request,
            &types,
            &RenderOptions::synthetic(),
        )),
        None => ChartPanel::NoColumn,
    };

    Ok(SyntheticView {
        inputs,
        table,
        preview,
        chart,
    })
}

// UPLOADED DATASET

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadInputs {
    /// `None` until the user touches the column selector; the first few file
    /// columns are used meanwhile.
    pub selected: Option<Vec<String>>,
    pub row_cap: usize,
    pub types: ColumnTypes,
    pub chart: ChartSelection,
}

impl UploadInputs {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            selected: None,
            row_cap: settings.default_row_cap,
            types: ColumnTypes::declared(),
            chart: ChartSelection::default(),
        }
    }

    /// Fits the inputs to a freshly parsed file.
    #[must_use]
    pub fn reconcile(&self, columns: &[String], row_count: usize, settings: &DashboardSettings) -> Self {
        let selected = match &self.selected {
            Some(chosen) => keep_known(chosen, columns, settings.max_selected_columns),
            None => columns
                .iter()
                .take(settings.default_selected_columns)
                .cloned()
                .collect(),
        };

        let mut types = self.types.clone();
        types.retain_columns(&selected);

        let mut chart = self.chart.clone();
        chart.reconcile(&selected);

        let max_cap = MAX_ROW_CAP.min(row_count).max(MIN_ROW_CAP);
        Self {
            selected: Some(selected),
            row_cap: snap(self.row_cap, MIN_ROW_CAP, max_cap, ROW_CAP_STEP),
            types,
            chart,
        }
    }

    pub fn selected(&self) -> &[String] {
        self.selected.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct UploadView {
    pub inputs: UploadInputs,
    pub columns: Vec<String>,
    pub row_count: usize,
    /// First rows of the whole file.
    pub head: DataFrame,
    /// Selected columns, limited to the row cap. Charts are drawn from this.
    pub preview: DataFrame,
    pub chart: ChartPanel,
}

/// Runs the upload dashboard pipeline over raw file bytes.
///
/// # Errors
///
/// Returns [`crate::error::EdaError::Parse`] for malformed content; nothing
/// downstream is produced in that case. Chart failures do not error: they are
/// reported through [`ChartPanel::Error`].
pub fn run_upload(bytes: &[u8], inputs: &UploadInputs, settings: &DashboardSettings) -> Result<UploadView> {
    let table = load_from_bytes(bytes)?;
    let columns = column_names(&table);
    let row_count = table.height();
    let inputs = inputs.reconcile(&columns, row_count, settings);

    let head = table.head(Some(HEAD_ROWS));
    let preview = dataset::preview(&table, inputs.selected(), Some(inputs.row_cap))?;

    let chart = match inputs.chart.request() {
        Some(request) => ChartPanel::from_render(render(
            &preview,
            inputs.selected(),
            &request,
            &inputs.types,
            &RenderOptions::uploaded(),
        )),
        None => ChartPanel::NoColumn,
    };

    Ok(UploadView {
        inputs,
        columns,
        row_count,
        head,
        preview,
        chart,
    })
}
