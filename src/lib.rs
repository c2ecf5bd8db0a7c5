//! # EDA Dashboard - Interactive Exploratory Data Analysis
//!
//! Pick a dataset (a synthetic sports table or an uploaded CSV file), choose a
//! subset of its columns, then request a histogram, bar, scatter, line or pie
//! chart. Each request is validated against the statistical type of its
//! columns; invalid combinations produce an inline warning instead of a chart.
//!
//! ## Quick Start
//!
//! ```no_run
//! use eda_dashboard::explorer::logic::{
//!     ChartKind, ChartRequest, ColumnTypes, RenderOptions, generate_synthetic, render,
//! };
//!
//! # fn example() -> eda_dashboard::error::Result<()> {
//! let table = generate_synthetic(200, 42)?;
//! let selected = vec!["Edad".to_owned(), "Peso".to_owned()];
//! let request = ChartRequest::new(ChartKind::Scatter, "Edad").with_secondary("Peso");
//!
//! let result = render(
//!     &table,
//!     &selected,
//!     &request,
//!     &ColumnTypes::synthetic(),
//!     &RenderOptions::synthetic(),
//! )?;
//! if let Some(figure) = result.figure() {
//!     println!("{figure}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`explorer`]: the dashboard itself
//!   - [`explorer::logic`]: dataset provider, column classifier, chart renderer
//!     and the per-variant pipelines
//!   - [`explorer::model`]: per-session state that re-runs a pipeline on change
//!   - [`explorer::gui`]: the `egui` front end
//! - [`config`]: application defaults loaded from JSON
//! - [`error`]: error types and handling utilities
//! - [`logging`]: `tracing` subscriber setup
//! - [`theme`]: colours and frames shared by the GUI
//! - [`utils`]: formatting helpers

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;
pub mod theme;
pub mod utils;
