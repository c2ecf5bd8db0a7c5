//! Chart selection and rendering.
//!
//! [`render`] validates the requested chart against the column types *before*
//! touching any data, then builds a [`Figure`] describing exactly what the
//! plotting layer should draw. Type mismatches come back as
//! [`ChartResult::Warning`]; only data access failures are errors.

use super::classify::ColumnTypes;
use super::types::{
    ChartKind, ChartRequest, ChartResult, ColumnKind, Figure, Frequency, FrequencyBars, Histogram,
    HistogramBin, LineOrder, LineSeries, PieChart, PieSlice, PointGroup, RenderOptions, Scatter,
    ValidationWarning,
};
use crate::error::{EdaError, Result};
use polars::prelude::*;

/// Points along the density curve.
const CURVE_RESOLUTION: usize = 200;

/// Upper bound on histogram bins, reached by long-tailed data.
pub const MAX_BINS: usize = 1000;

const VALUE_FIELD: &str = "value";
const COUNT_FIELD: &str = "counts";

pub const FREQUENCY_LABEL: &str = "Frequency";

/// Renders `request` against `table`.
///
/// `selected` is the user's current column subset; both request columns must
/// belong to it.
///
/// # Errors
///
/// - [`EdaError::ColumnNotSelected`] if a request column is outside `selected`
/// - [`EdaError::UnknownColumn`] if a fixed classification has no entry
/// - [`EdaError::DataProcessing`] if the data cannot be read as requested, e.g.
///   text in a column declared quantitative
pub fn render(
    table: &DataFrame,
    selected: &[String],
    request: &ChartRequest,
    types: &ColumnTypes,
    options: &RenderOptions,
) -> Result<ChartResult> {
    ensure_selected(selected, &request.primary)?;
    if let Some(secondary) = &request.secondary {
        ensure_selected(selected, secondary)?;
    }

    let primary = request.primary.as_str();
    let primary_kind = types.classify(primary)?;

    let result = match request.kind {
        ChartKind::Histogram => {
            if primary_kind != ColumnKind::Quantitative {
                return Ok(ChartResult::Warning(
                    ValidationWarning::HistogramNeedsQuantitative,
                ));
            }
            Figure::Histogram(histogram(table, primary)?)
        }
        ChartKind::Bar => Figure::Bar(frequency_bars(table, primary)?),
        ChartKind::Scatter => {
            let secondary = match &request.secondary {
                Some(secondary)
                    if primary_kind == ColumnKind::Quantitative
                        && types.classify(secondary)? == ColumnKind::Quantitative =>
                {
                    secondary.as_str()
                }
                _ => {
                    return Ok(ChartResult::Warning(
                        ValidationWarning::ScatterNeedsTwoQuantitative,
                    ));
                }
            };
            Figure::Scatter(scatter(table, primary, secondary, options.hue_column.as_deref())?)
        }
        ChartKind::Line => {
            if primary_kind != ColumnKind::Quantitative {
                return Ok(ChartResult::Warning(ValidationWarning::LineNeedsQuantitative));
            }
            Figure::Line(line_series(table, primary, options.line_order)?)
        }
        ChartKind::Pie => {
            if primary_kind != ColumnKind::Qualitative {
                return Ok(ChartResult::Warning(ValidationWarning::PieNeedsQualitative));
            }
            Figure::Pie(pie_chart(table, primary)?)
        }
    };

    tracing::debug!(kind = ?request.kind, column = primary, "Rendered chart");
    Ok(ChartResult::Rendered(result))
}

fn ensure_selected(selected: &[String], name: &str) -> Result<()> {
    if selected.iter().any(|s| s == name) {
        Ok(())
    } else {
        Err(EdaError::ColumnNotSelected(name.to_owned()))
    }
}

// DATA ACCESS

fn series<'a>(table: &'a DataFrame, name: &str) -> Result<&'a Series> {
    Ok(table.column(name)?.as_materialized_series())
}

/// Column values as floats, `None` for missing values.
///
/// The cast is strict: a value that cannot be read as a number fails the whole
/// column instead of silently becoming missing.
pub fn numeric_values(table: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = series(table, name)?;
    let casted = s.strict_cast(&DataType::Float64).map_err(|e| {
        EdaError::DataProcessing(format!("column '{name}' is not numeric: {e}"))
    })?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Value frequencies with missing values excluded, most frequent first.
/// Equal counts are ordered by label.
pub fn value_counts(table: &DataFrame, name: &str) -> Result<Vec<Frequency>> {
    let s = series(table, name)?
        .cast(&DataType::String)?
        .drop_nulls()
        .with_name(VALUE_FIELD.into());
    let counted = s.value_counts(true, false, COUNT_FIELD.into(), false)?;
    let values = counted.column(VALUE_FIELD)?.as_materialized_series();
    let counts = counted
        .column(COUNT_FIELD)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;

    let mut frequencies: Vec<Frequency> = values
        .str()?
        .into_iter()
        .zip(counts.u64()?)
        .filter_map(|(value, count)| match (value, count) {
            (Some(v), Some(c)) => Some(Frequency {
                label: v.to_owned(),
                count: c as usize,
            }),
            _ => None,
        })
        .collect();

    // value_counts leaves ties in hash order
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    Ok(frequencies)
}

/// Finite, non-missing values of a column as a chunked array.
fn finite_values(table: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let values: Vec<f64> = numeric_values(table, name)?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    Ok(Float64Chunked::from_vec(name.into(), values))
}

// FIGURE BUILDERS

fn histogram(table: &DataFrame, name: &str) -> Result<Histogram> {
    let values = finite_values(table, name)?;
    let bins = calculate_bins(&values);
    let density_curve = density_curve(&values);

    Ok(Histogram {
        title: format!("Histogram of {name}"),
        column: name.to_owned(),
        sample_size: values.len(),
        bins,
        density_curve,
    })
}

fn frequency_bars(table: &DataFrame, name: &str) -> Result<FrequencyBars> {
    Ok(FrequencyBars {
        title: format!("Bar chart of {name}"),
        column: name.to_owned(),
        y_label: FREQUENCY_LABEL.to_owned(),
        counts: value_counts(table, name)?,
    })
}

fn scatter(table: &DataFrame, x: &str, y: &str, hue: Option<&str>) -> Result<Scatter> {
    let xs = numeric_values(table, x)?;
    let ys = numeric_values(table, y)?;

    let hue_values: Option<Vec<Option<String>>> = match hue {
        Some(h) if table.column(h).is_ok() => {
            let s = series(table, h)?.cast(&DataType::String)?;
            Some(s.str()?.into_iter().map(|v| v.map(str::to_owned)).collect())
        }
        _ => None,
    };

    let groups = match hue_values {
        Some(labels) => {
            let mut groups: Vec<PointGroup> = Vec::new();
            for ((x, y), label) in xs.into_iter().zip(ys).zip(labels) {
                let (Some(x), Some(y), Some(label)) = (x, y, label) else {
                    continue;
                };
                match groups
                    .iter_mut()
                    .find(|g| g.label.as_deref() == Some(label.as_str()))
                {
                    Some(group) => group.points.push([x, y]),
                    None => groups.push(PointGroup {
                        label: Some(label),
                        points: vec![[x, y]],
                    }),
                }
            }
            groups
        }
        None => {
            let points = xs
                .into_iter()
                .zip(ys)
                .filter_map(|pair| match pair {
                    (Some(x), Some(y)) => Some([x, y]),
                    _ => None,
                })
                .collect();
            vec![PointGroup {
                label: None,
                points,
            }]
        }
    };

    Ok(Scatter {
        title: format!("{x} vs {y}"),
        x_label: x.to_owned(),
        y_label: y.to_owned(),
        groups,
    })
}

fn line_series(table: &DataFrame, name: &str, order: LineOrder) -> Result<LineSeries> {
    let mut values: Vec<f64> = numeric_values(table, name)?.into_iter().flatten().collect();
    if order == LineOrder::SortedAscending {
        values.sort_by(f64::total_cmp);
    }

    let points = values
        .into_iter()
        .enumerate()
        .map(|(i, v)| [i as f64, v])
        .collect();

    Ok(LineSeries {
        title: format!("Line chart of {name}"),
        column: name.to_owned(),
        order,
        points,
    })
}

fn pie_chart(table: &DataFrame, name: &str) -> Result<PieChart> {
    let counts = value_counts(table, name)?;
    let total: usize = counts.iter().map(|c| c.count).sum();

    let slices = counts
        .into_iter()
        .map(|c| PieSlice {
            fraction: if total > 0 {
                c.count as f64 / total as f64
            } else {
                0.0
            },
            label: c.label,
            count: c.count,
        })
        .collect();

    Ok(PieChart {
        title: format!("Pie chart of {name}"),
        column: name.to_owned(),
        slices,
    })
}

// STATISTICS

/// Equal-width bins using the larger bin count of the Sturges and
/// Freedman-Diaconis rules, capped at [`MAX_BINS`]. Constant data gets one
/// unit-wide bin. Missing values are ignored.
pub fn calculate_bins(values: &Float64Chunked) -> Vec<HistogramBin> {
    let (Some(min_v), Some(max_v)) = (values.min(), values.max()) else {
        return Vec::new();
    };
    let n = values.len() - values.null_count();

    if (max_v - min_v).abs() < f64::EPSILON {
        return vec![HistogramBin {
            left: min_v - 0.5,
            right: min_v + 0.5,
            count: n,
            density: 1.0,
        }];
    }

    let range = max_v - min_v;
    let num_bins = if range.is_finite() {
        let sturges_width = range / ((n as f64).log2() + 1.0);
        let q1 = values.quantile(0.25, QuantileMethod::Linear).unwrap_or(None);
        let q3 = values.quantile(0.75, QuantileMethod::Linear).unwrap_or(None);
        let iqr = q3.unwrap_or(max_v) - q1.unwrap_or(min_v);
        let fd_width = 2.0 * iqr / (n as f64).cbrt();

        let width = if fd_width > 0.0 {
            sturges_width.min(fd_width)
        } else {
            sturges_width
        };
        ((range / width).ceil() as usize).clamp(1, MAX_BINS)
    } else {
        MAX_BINS
    };

    // Scaling each end first keeps the width finite when max - min overflows
    let bin_width = max_v / num_bins as f64 - min_v / num_bins as f64;
    let offset = |v: f64| {
        if range.is_finite() {
            (v - min_v) / bin_width
        } else {
            v / bin_width - min_v / bin_width
        }
    };

    let mut counts = vec![0usize; num_bins];
    for val in values.into_iter().flatten() {
        // The last bin is closed on the right so the maximum lands inside it
        let idx = (offset(val).floor() as usize).min(num_bins - 1);
        if let Some(c) = counts.get_mut(idx) {
            *c += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let left = min_v + i as f64 * bin_width;
            HistogramBin {
                left,
                right: left + bin_width,
                count,
                density: count as f64 / (n as f64 * bin_width),
            }
        })
        .collect()
}

/// Gaussian kernel density estimate over the data range, Scott's bandwidth.
/// Empty when the spread is zero or not representable.
pub fn density_curve(values: &Float64Chunked) -> Vec<[f64; 2]> {
    let (Some(std), Some(min_v), Some(max_v)) = (values.std(1), values.min(), values.max())
    else {
        return Vec::new();
    };
    if !(std.is_finite() && std > 0.0 && (max_v - min_v).is_finite()) {
        return Vec::new();
    }

    let n = (values.len() - values.null_count()) as f64;
    let bandwidth = std * n.powf(-0.2);
    let step = (max_v - min_v) / (CURVE_RESOLUTION - 1) as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..CURVE_RESOLUTION)
        .map(|i| {
            let x = min_v + i as f64 * step;
            let y = values
                .into_iter()
                .flatten()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            [x, y]
        })
        .collect()
}
