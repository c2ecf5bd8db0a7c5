pub mod charts;
pub mod classify;
pub mod dataset;
pub mod pipeline;
pub mod types;

pub use charts::{render, value_counts};
pub use classify::ColumnTypes;
pub use dataset::{generate_synthetic, load_from_bytes, load_from_path, preview, save_csv};
pub use pipeline::{
    ChartPanel, ChartSelection, SyntheticInputs, SyntheticView, UploadInputs, UploadView,
    run_synthetic, run_upload,
};
pub use types::{
    ChartKind, ChartRequest, ChartResult, ColumnKind, Figure, Frequency, FrequencyBars, Histogram,
    HistogramBin, LineOrder, LineSeries, PieChart, PieSlice, PointGroup, RenderOptions, Scatter,
    ValidationWarning,
};
