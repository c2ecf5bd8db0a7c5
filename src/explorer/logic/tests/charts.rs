use crate::error::EdaError;
use crate::explorer::logic::charts::{MAX_BINS, calculate_bins, density_curve, value_counts};
use crate::explorer::logic::dataset::{AGE, DEFAULT_SEED, SPORT, WEIGHT, generate_synthetic};
use crate::explorer::logic::*;
use anyhow::Result;
use polars::prelude::{Column, DataFrame, Float64Chunked, NamedFrom, NewChunkedArray, Series, df};

fn names(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|s| (*s).to_owned()).collect()
}

fn mixed_frame() -> Result<DataFrame> {
    Ok(df!(
        "score" => &[Some(3.0), Some(1.0), None, Some(2.0), Some(5.0)],
        "team" => &[Some("red"), Some("blue"), Some("red"), None, Some("green")],
        "note" => &["10", "x", "12", "13", "14"]
    )?)
}

fn declared(kinds: &[(&str, ColumnKind)]) -> ColumnTypes {
    let mut types = ColumnTypes::declared();
    for (name, kind) in kinds {
        types.declare(*name, *kind);
    }
    types
}

#[test]
fn test_every_invalid_combination_warns() -> Result<()> {
    let df = generate_synthetic(60, DEFAULT_SEED)?;
    let selected = names(&[AGE, WEIGHT, SPORT]);
    let types = ColumnTypes::synthetic();
    let options = RenderOptions::synthetic();

    let cases = [
        (ChartRequest::new(ChartKind::Histogram, SPORT), ValidationWarning::HistogramNeedsQuantitative),
        (ChartRequest::new(ChartKind::Line, SPORT), ValidationWarning::LineNeedsQuantitative),
        (ChartRequest::new(ChartKind::Pie, AGE), ValidationWarning::PieNeedsQualitative),
        (ChartRequest::new(ChartKind::Scatter, AGE), ValidationWarning::ScatterNeedsTwoQuantitative),
        (
            ChartRequest::new(ChartKind::Scatter, AGE).with_secondary(SPORT),
            ValidationWarning::ScatterNeedsTwoQuantitative,
        ),
        (
            ChartRequest::new(ChartKind::Scatter, SPORT).with_secondary(WEIGHT),
            ValidationWarning::ScatterNeedsTwoQuantitative,
        ),
    ];

    for (request, expected) in cases {
        let result = render(&df, &selected, &request, &types, &options)?;
        assert_eq!(result, ChartResult::Warning(expected), "request {request:?}");
    }
    Ok(())
}

#[test]
fn test_histogram_on_qualitative_warns_with_message() -> Result<()> {
    let df = generate_synthetic(50, DEFAULT_SEED)?;
    let result = render(
        &df,
        &names(&[SPORT]),
        &ChartRequest::new(ChartKind::Histogram, SPORT),
        &ColumnTypes::synthetic(),
        &RenderOptions::synthetic(),
    )?;
    assert!(result.figure().is_none());
    assert_eq!(
        result.warning().map(ValidationWarning::message),
        Some("histogram requires quantitative data")
    );
    Ok(())
}

#[test]
fn test_mixed_columns_only_support_bar() -> Result<()> {
    let df = mixed_frame()?;
    let selected = names(&["team"]);
    let types = declared(&[("team", ColumnKind::Mixed)]);
    let options = RenderOptions::uploaded();

    for kind in ChartKind::ALL {
        let result = render(&df, &selected, &ChartRequest::new(kind, "team"), &types, &options)?;
        match kind {
            ChartKind::Bar => assert!(result.figure().is_some()),
            _ => assert!(result.warning().is_some(), "{kind} should warn"),
        }
    }
    Ok(())
}

#[test]
fn test_render_is_idempotent() -> Result<()> {
    let df = generate_synthetic(80, DEFAULT_SEED)?;
    let selected = names(&[AGE, WEIGHT, SPORT]);
    let types = ColumnTypes::synthetic();
    let options = RenderOptions::synthetic();

    for kind in ChartKind::ALL {
        let request = ChartRequest::new(kind, AGE).with_secondary(WEIGHT);
        let first = render(&df, &selected, &request, &types, &options)?;
        let second = render(&df, &selected, &request, &types, &options)?;
        assert_eq!(first, second, "{kind} should render identically twice");
    }
    Ok(())
}

#[test]
fn test_scatter_on_synthetic_has_every_point() -> Result<()> {
    let df = generate_synthetic(200, DEFAULT_SEED)?;
    let request = ChartRequest::new(ChartKind::Scatter, AGE).with_secondary(WEIGHT);
    let result = render(
        &df,
        &names(&[AGE, WEIGHT]),
        &request,
        &ColumnTypes::synthetic(),
        &RenderOptions::synthetic(),
    )?;

    let Some(Figure::Scatter(scatter)) = result.figure() else {
        panic!("Expected a scatter figure, got {result:?}");
    };
    assert_eq!(scatter.point_count(), 200);
    assert_eq!(scatter.x_label, AGE);
    assert_eq!(scatter.y_label, WEIGHT);
    // Coloured by sport even though sport is not selected
    assert!(scatter.groups.len() > 1);
    assert!(scatter.groups.iter().all(|g| g.label.is_some()));
    Ok(())
}

#[test]
fn test_scatter_drops_rows_with_missing_coordinates() -> Result<()> {
    let df = df!(
        "x" => &[Some(1.0), None, Some(3.0), Some(4.0)],
        "y" => &[Some(1.0), Some(2.0), None, Some(4.0)]
    )?;
    let result = render(
        &df,
        &names(&["x", "y"]),
        &ChartRequest::new(ChartKind::Scatter, "x").with_secondary("y"),
        &ColumnTypes::declared(),
        &RenderOptions::uploaded(),
    )?;
    let Some(Figure::Scatter(scatter)) = result.figure() else {
        panic!("Expected a scatter figure");
    };
    assert_eq!(scatter.groups.len(), 1);
    assert_eq!(scatter.groups[0].label, None);
    assert_eq!(scatter.groups[0].points, vec![[1.0, 1.0], [4.0, 4.0]]);
    Ok(())
}

#[test]
fn test_bar_counts_sum_to_non_missing_rows() -> Result<()> {
    let df = mixed_frame()?;
    let selected = names(&["score", "team", "note"]);
    let types = ColumnTypes::declared();

    for column in ["score", "team", "note"] {
        let result = render(
            &df,
            &selected,
            &ChartRequest::new(ChartKind::Bar, column),
            &types,
            &RenderOptions::uploaded(),
        )?;
        let Some(Figure::Bar(bars)) = result.figure() else {
            panic!("Bar should always render for {column}");
        };
        let non_missing = df.height() - df.column(column)?.null_count();
        assert_eq!(bars.total(), non_missing, "{column}");
        assert_eq!(bars.y_label, "Frequency");
    }
    Ok(())
}

#[test]
fn test_value_counts_order() -> Result<()> {
    let df = df!("c" => &[Some("b"), Some("d"), Some("a"), None, Some("a"), Some("c"), Some("b"), Some("a")])?;
    let counts = value_counts(&df, "c")?;
    let labels: Vec<&str> = counts.iter().map(|f| f.label.as_str()).collect();
    // Most frequent first, equal counts by label, missing values dropped
    assert_eq!(labels, vec!["a", "b", "c", "d"]);
    assert_eq!(counts[0].count, 3);
    assert_eq!(counts.iter().map(|f| f.count).sum::<usize>(), 7);
    Ok(())
}

#[test]
fn test_line_order_differs_by_variant() -> Result<()> {
    let df = df!("v" => &[Some(3.0), None, Some(1.0), Some(2.0)])?;
    let selected = names(&["v"]);
    let types = ColumnTypes::declared();
    let request = ChartRequest::new(ChartKind::Line, "v");

    let sorted = render(&df, &selected, &request, &types, &RenderOptions::synthetic())?;
    let Some(Figure::Line(line)) = sorted.figure() else {
        panic!("Expected line");
    };
    assert_eq!(line.points, vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]);

    let rows = render(&df, &selected, &request, &types, &RenderOptions::uploaded())?;
    let Some(Figure::Line(line)) = rows.figure() else {
        panic!("Expected line");
    };
    assert_eq!(line.points, vec![[0.0, 3.0], [1.0, 1.0], [2.0, 2.0]]);
    Ok(())
}

#[test]
fn test_pie_fractions_and_labels() -> Result<()> {
    let df = df!("team" => &["red", "red", "blue", "green"])?;
    let result = render(
        &df,
        &names(&["team"]),
        &ChartRequest::new(ChartKind::Pie, "team"),
        &declared(&[("team", ColumnKind::Qualitative)]),
        &RenderOptions::uploaded(),
    )?;
    let Some(Figure::Pie(pie)) = result.figure() else {
        panic!("Expected pie");
    };
    assert_eq!(pie.title, "Pie chart of team");
    let total: f64 = pie.slices.iter().map(|s| s.fraction).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(pie.slices[0].label, "red");
    assert_eq!(pie.slices[0].percent_label(), "50.0%");
    Ok(())
}

#[test]
fn test_histogram_density_integrates_to_one() -> Result<()> {
    let df = generate_synthetic(300, DEFAULT_SEED)?;
    let result = render(
        &df,
        &names(&[WEIGHT]),
        &ChartRequest::new(ChartKind::Histogram, WEIGHT),
        &ColumnTypes::synthetic(),
        &RenderOptions::synthetic(),
    )?;
    let Some(Figure::Histogram(hist)) = result.figure() else {
        panic!("Expected histogram");
    };
    assert_eq!(hist.title, "Histogram of Peso");
    assert_eq!(hist.sample_size, 300);
    let area: f64 = hist.bins.iter().map(|b| b.density * b.width()).sum();
    assert!((area - 1.0).abs() < 1e-9, "area was {area}");
    let counted: usize = hist.bins.iter().map(|b| b.count).sum();
    assert_eq!(counted, 300);
    assert!(!hist.density_curve.is_empty());
    Ok(())
}

#[test]
fn test_bins_for_constant_data() {
    let constant = Float64Chunked::from_slice("v".into(), &[2.0, 2.0, 2.0]);
    let bins = calculate_bins(&constant);
    assert_eq!(bins.len(), 1);
    assert_eq!(bins[0].count, 3);
    assert!((bins[0].center() - 2.0).abs() < f64::EPSILON);
    assert!(density_curve(&constant).is_empty());
    assert!(calculate_bins(&Float64Chunked::from_slice("v".into(), &[])).is_empty());
}

#[test]
fn test_declared_quantitative_text_fails_at_render() -> Result<()> {
    let df = mixed_frame()?;
    let err = render(
        &df,
        &names(&["note"]),
        &ChartRequest::new(ChartKind::Histogram, "note"),
        &ColumnTypes::declared(),
        &RenderOptions::uploaded(),
    )
    .unwrap_err();
    assert!(matches!(err, EdaError::DataProcessing(_)), "got {err}");
    Ok(())
}

#[test]
fn test_unselected_column_is_rejected() -> Result<()> {
    let s = Series::new("a".into(), vec![1.0, 2.0]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    let err = render(
        &df,
        &names(&["b"]),
        &ChartRequest::new(ChartKind::Bar, "a"),
        &ColumnTypes::declared(),
        &RenderOptions::uploaded(),
    )
    .expect_err("column a is not selected");
    assert!(matches!(err, EdaError::ColumnNotSelected(name) if name == "a"));
    Ok(())
}

#[test]
fn test_histogram_with_far_outlier_has_bounded_bins() -> Result<()> {
    // Tight quartiles next to one huge value push the Freedman-Diaconis bin
    // count far beyond anything drawable
    let values: Vec<f64> = std::iter::once(1e12)
        .chain((0..60).map(|i| f64::from(i) / 1000.0))
        .collect();
    let df = df!("v" => values)?;
    let result = render(
        &df,
        &names(&["v"]),
        &ChartRequest::new(ChartKind::Histogram, "v"),
        &ColumnTypes::declared(),
        &RenderOptions::uploaded(),
    )?;
    let Some(Figure::Histogram(hist)) = result.figure() else {
        panic!("Expected histogram");
    };
    assert!(!hist.bins.is_empty());
    assert!(hist.bins.len() <= MAX_BINS, "{} bins", hist.bins.len());
    let counted: usize = hist.bins.iter().map(|b| b.count).sum();
    assert_eq!(counted, 61);
    assert_eq!(hist.bins.last().map(|b| b.count), Some(1));
    Ok(())
}

#[test]
fn test_bins_for_range_beyond_f64() {
    let extreme = Float64Chunked::from_slice("v".into(), &[-1e308, 0.0, 1e308]);
    let bins = calculate_bins(&extreme);
    assert!(!bins.is_empty() && bins.len() <= MAX_BINS);
    assert!(bins.iter().all(|b| b.left.is_finite() && b.density.is_finite()));
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    assert!(density_curve(&extreme).is_empty());
}

#[test]
fn test_scatter_secondary_outside_selection_is_rejected() -> Result<()> {
    let df = df!("x" => &[1.0, 2.0], "y" => &[3.0, 4.0])?;
    let err = render(
        &df,
        &names(&["x"]),
        &ChartRequest::new(ChartKind::Scatter, "x").with_secondary("y"),
        &ColumnTypes::declared(),
        &RenderOptions::uploaded(),
    )
    .expect_err("column y is not selected");
    assert!(matches!(err, EdaError::ColumnNotSelected(name) if name == "y"));
    Ok(())
}
