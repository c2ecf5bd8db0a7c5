use serde::{Deserialize, Serialize};
use std::fmt;

// COLUMN CLASSIFICATION

/// Statistical type of a column, as used to validate chart requests.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ColumnKind {
    #[default]
    Quantitative,
    Qualitative,
    Mixed,
}

impl ColumnKind {
    pub const ALL: [Self; 3] = [Self::Quantitative, Self::Qualitative, Self::Mixed];

    pub fn label(self) -> &'static str {
        match self {
            Self::Quantitative => "Quantitative",
            Self::Qualitative => "Qualitative",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// CHART REQUESTS

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ChartKind {
    #[default]
    Histogram,
    Bar,
    Scatter,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [Self; 5] = [
        Self::Histogram,
        Self::Bar,
        Self::Scatter,
        Self::Line,
        Self::Pie,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Histogram => "Histogram",
            Self::Bar => "Bar chart",
            Self::Scatter => "Scatter plot",
            Self::Line => "Line chart",
            Self::Pie => "Pie chart",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A chart kind plus the column(s) it should be drawn against.
///
/// Both columns must belong to the selected subset handed to
/// [`super::charts::render`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub primary: String,
    pub secondary: Option<String>,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, primary: impl Into<String>) -> Self {
        Self {
            kind,
            primary: primary.into(),
            secondary: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }
}

/// Order in which a line chart plots its values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineOrder {
    /// Values sorted ascending before plotting (synthetic dataset).
    SortedAscending,
    /// Values in original row order, missing values dropped (uploaded files).
    #[default]
    RowOrder,
}

/// Rendering differences between the synthetic and the uploaded dashboards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub line_order: LineOrder,
    /// Categorical column used to colour scatter points, when present in the table.
    pub hue_column: Option<String>,
}

impl RenderOptions {
    pub fn synthetic() -> Self {
        Self {
            line_order: LineOrder::SortedAscending,
            hue_column: Some(super::dataset::SPORT.to_owned()),
        }
    }

    pub fn uploaded() -> Self {
        Self {
            line_order: LineOrder::RowOrder,
            hue_column: None,
        }
    }
}

// CHART RESULTS

/// Expected, user-correctable mismatch between a chart and its column types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationWarning {
    HistogramNeedsQuantitative,
    ScatterNeedsTwoQuantitative,
    LineNeedsQuantitative,
    PieNeedsQualitative,
}

impl ValidationWarning {
    pub fn message(self) -> &'static str {
        match self {
            Self::HistogramNeedsQuantitative => "histogram requires quantitative data",
            Self::ScatterNeedsTwoQuantitative => "select two quantitative columns for scatter",
            Self::LineNeedsQuantitative => "line chart requires quantitative data",
            Self::PieNeedsQualitative => "pie chart requires qualitative data",
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Exactly one of these is produced per chart request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ChartResult {
    Rendered(Figure),
    Warning(ValidationWarning),
}

impl ChartResult {
    pub fn figure(&self) -> Option<&Figure> {
        match self {
            Self::Rendered(fig) => Some(fig),
            Self::Warning(_) => None,
        }
    }

    pub fn warning(&self) -> Option<ValidationWarning> {
        match self {
            Self::Rendered(_) => None,
            Self::Warning(w) => Some(*w),
        }
    }
}

// FIGURES

/// Backend-independent description of a rendered chart: the exact data the
/// plotting layer draws.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Figure {
    Histogram(Histogram),
    Bar(FrequencyBars),
    Scatter(Scatter),
    Line(LineSeries),
    Pie(PieChart),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Self::Histogram(h) => &h.title,
            Self::Bar(b) => &b.title,
            Self::Scatter(s) => &s.title,
            Self::Line(l) => &l.title,
            Self::Pie(p) => &p.title,
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Histogram(h) => write!(
                f,
                "{}: {} bins over {} values",
                h.title,
                h.bins.len(),
                h.sample_size
            ),
            Self::Bar(b) => {
                writeln!(f, "{} ({})", b.title, b.y_label)?;
                for item in &b.counts {
                    writeln!(f, "  {:<20} {}", item.label, item.count)?;
                }
                Ok(())
            }
            Self::Scatter(s) => {
                write!(f, "{}: {} points", s.title, s.point_count())?;
                if s.groups.len() > 1 {
                    write!(f, " in {} groups", s.groups.len())?;
                }
                Ok(())
            }
            Self::Line(l) => write!(f, "{}: {} points", l.title, l.points.len()),
            Self::Pie(p) => {
                writeln!(f, "{}", p.title)?;
                for slice in &p.slices {
                    writeln!(f, "  {:<20} {}", slice.label, slice.percent_label())?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
    /// `count / (n * width)`, so the bar areas sum to one.
    pub density: f64,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    pub title: String,
    pub column: String,
    pub sample_size: usize,
    pub bins: Vec<HistogramBin>,
    /// Smoothed density estimate on the same scale as the bins. Empty when
    /// the data has fewer than two distinct values.
    pub density_curve: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrequencyBars {
    pub title: String,
    pub column: String,
    pub y_label: String,
    pub counts: Vec<Frequency>,
}

impl FrequencyBars {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointGroup {
    /// Hue value, `None` when points are not grouped.
    pub label: Option<String>,
    pub points: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scatter {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<PointGroup>,
}

impl Scatter {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineSeries {
    pub title: String,
    pub column: String,
    pub order: LineOrder,
    /// `[position, value]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

impl PieSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub column: String,
    pub slices: Vec<PieSlice>,
}
