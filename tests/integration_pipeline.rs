//! Integration tests for both dashboard pipelines
//!
//! These run the public pipeline entry points on fixture files and check the
//! view that would be drawn.

#![expect(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]

use eda_dashboard::config::DashboardSettings;
use eda_dashboard::explorer::logic::dataset::{self, AGE, SPORT, WEIGHT};
use eda_dashboard::explorer::logic::{
    ChartKind, ChartPanel, ColumnKind, Figure, SyntheticInputs, UploadInputs, ValidationWarning,
    run_synthetic, run_upload,
};
use std::path::PathBuf;

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {}: {e}", path.display()))
}

fn figure(panel: &ChartPanel) -> &Figure {
    match panel {
        ChartPanel::Result(result) => result
            .figure()
            .unwrap_or_else(|| panic!("expected a figure, got {result:?}")),
        other => panic!("expected a chart, got {other:?}"),
    }
}

#[test]
fn test_upload_clean_csv() {
    let settings = DashboardSettings::default();
    let view = run_upload(
        &fixture("clean.csv"),
        &UploadInputs::new(&settings),
        &settings,
    )
    .unwrap();

    assert_eq!(view.row_count, 10, "Should have 10 rows");
    assert_eq!(view.columns.len(), 6, "Should have 6 columns");
    assert_eq!(view.head.height(), 5);
    assert_eq!(view.inputs.selected(), ["id", "name", "age", "city"]);
    // Row cap is clamped to the file size
    assert_eq!(view.inputs.row_cap, 10);
    assert_eq!(view.preview.shape(), (10, 4));

    let Figure::Histogram(h) = figure(&view.chart) else {
        panic!("Default chart should be a histogram");
    };
    assert_eq!(h.column, "id");
    assert_eq!(h.sample_size, 10);
}

#[test]
fn test_upload_missing_values_are_skipped() {
    let settings = DashboardSettings::default();
    let mut inputs = UploadInputs::new(&settings);
    inputs.selected = Some(vec!["age".to_owned(), "city".to_owned()]);
    inputs.chart.kind = ChartKind::Line;
    inputs.chart.primary = Some("age".to_owned());

    let view = run_upload(&fixture("missing_values.csv"), &inputs, &settings).unwrap();
    let Figure::Line(line) = figure(&view.chart) else {
        panic!("Expected a line chart");
    };
    assert_eq!(line.points.len(), 7, "Three ages are missing");
    // Row order is preserved for uploaded files
    assert_eq!(line.points[0], [0.0, 34.0]);
    assert_eq!(line.points[1], [1.0, 45.0]);

    inputs.types.declare("city", ColumnKind::Qualitative);
    inputs.chart.kind = ChartKind::Bar;
    inputs.chart.primary = Some("city".to_owned());
    let view = run_upload(&fixture("missing_values.csv"), &inputs, &settings).unwrap();
    let Figure::Bar(bars) = figure(&view.chart) else {
        panic!("Expected a bar chart");
    };
    assert_eq!(bars.total(), 8, "Two cities are missing");
    assert_eq!(bars.counts[0].label, "Madrid");
    assert_eq!(bars.counts[0].count, 3);
}

#[test]
fn test_upload_malformed_csv_is_a_parse_error() {
    let settings = DashboardSettings::default();
    let err = run_upload(
        &fixture("malformed.csv"),
        &UploadInputs::new(&settings),
        &settings,
    )
    .unwrap_err();
    assert!(err.is_parse(), "got {err}");
    assert!(err.to_string().starts_with("Could not parse file"));
}

#[test]
fn test_upload_text_declared_quantitative_reports_error() {
    let settings = DashboardSettings::default();
    let mut inputs = UploadInputs::new(&settings);
    inputs.chart.kind = ChartKind::Histogram;
    inputs.chart.primary = Some("name".to_owned());

    let view = run_upload(&fixture("clean.csv"), &inputs, &settings).unwrap();
    match &view.chart {
        ChartPanel::Error(message) => assert!(message.starts_with("Error generating chart")),
        other => panic!("Expected an error panel, got {other:?}"),
    }
}

#[test]
fn test_synthetic_scatter_covers_every_row() {
    let settings = DashboardSettings::default();
    let mut inputs = SyntheticInputs::new(&settings);
    inputs.selected = vec![AGE.to_owned(), WEIGHT.to_owned()];
    inputs.chart.kind = ChartKind::Scatter;
    inputs.chart.primary = Some(AGE.to_owned());
    inputs.chart.secondary = Some(WEIGHT.to_owned());

    let view = run_synthetic(&inputs, &settings).unwrap();
    let Figure::Scatter(scatter) = figure(&view.chart) else {
        panic!("Expected a scatter plot");
    };
    assert_eq!(scatter.point_count(), 200);
    assert!(scatter.groups.iter().all(|g| g.label.is_some()));
}

#[test]
fn test_synthetic_pie_on_quantitative_column_warns() {
    let settings = DashboardSettings::default();
    let mut inputs = SyntheticInputs::new(&settings);
    inputs.chart.kind = ChartKind::Pie;
    inputs.chart.primary = Some(AGE.to_owned());

    let view = run_synthetic(&inputs, &settings).unwrap();
    let result = view.chart.result().unwrap();
    assert_eq!(result.warning(), Some(ValidationWarning::PieNeedsQualitative));
}

#[test]
fn test_exported_synthetic_data_uploads_cleanly() {
    let settings = DashboardSettings::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sports.csv");
    let mut df = dataset::generate_synthetic(120, settings.seed).unwrap();
    dataset::save_csv(&mut df, &path).unwrap();

    let mut inputs = UploadInputs::new(&settings);
    inputs.selected = Some(vec![SPORT.to_owned()]);
    inputs.row_cap = 500;
    inputs.types.declare(SPORT, ColumnKind::Qualitative);
    inputs.chart.kind = ChartKind::Pie;

    let view = run_upload(&std::fs::read(&path).unwrap(), &inputs, &settings).unwrap();
    assert_eq!(view.row_count, 120);
    assert_eq!(view.inputs.row_cap, 120);

    let Figure::Pie(pie) = figure(&view.chart) else {
        panic!("Expected a pie chart");
    };
    let total: usize = pie.slices.iter().map(|s| s.count).sum();
    assert_eq!(total, 120);
    let fractions: f64 = pie.slices.iter().map(|s| s.fraction).sum();
    assert!((fractions - 1.0).abs() < 1e-9);
}
