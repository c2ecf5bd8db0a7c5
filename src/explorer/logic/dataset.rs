//! Dataset providers: the seeded synthetic sports table and CSV uploads.

use crate::error::{EdaError, Result, ResultExt as _};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom as _;
use rand::{Rng as _, SeedableRng as _};
use rand_distr::{Distribution as _, Normal, Poisson};
use std::io::Cursor;
use std::path::Path;

pub const AGE: &str = "Edad";
pub const HEIGHT: &str = "Altura";
pub const WEIGHT: &str = "Peso";
pub const SPORT: &str = "Deporte";
pub const LEVEL: &str = "Nivel";
pub const GOALS: &str = "Goles";

/// Synthetic column names in table order.
pub const SYNTHETIC_COLUMNS: [&str; 6] = [AGE, HEIGHT, WEIGHT, SPORT, LEVEL, GOALS];

pub const SPORTS: [&str; 5] = ["Fútbol", "Básquet", "Natación", "Tenis", "Ciclismo"];
pub const LEVELS: [&str; 3] = ["Amateur", "Intermedio", "Profesional"];

pub const DEFAULT_SEED: u64 = 42;
pub const MIN_SAMPLES: usize = 50;
pub const MAX_SAMPLES: usize = 500;
pub const SAMPLE_STEP: usize = 10;

/// Rows sampled when inferring column types of an upload.
const INFER_SCHEMA_ROWS: usize = 10_000;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Generates the synthetic sports dataset with `n` rows.
///
/// The same `(n, seed)` pair always yields the same table. `n` is expected to
/// be clamped by the caller.
///
/// # Errors
///
/// Returns an error only if Polars rejects the assembled columns.
pub fn generate_synthetic(n: usize, seed: u64) -> Result<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed);

    let height_dist = Normal::new(1.75, 0.1)
        .map_err(|e| EdaError::DataProcessing(format!("height distribution: {e}")))?;
    let weight_dist = Normal::new(70.0, 10.0)
        .map_err(|e| EdaError::DataProcessing(format!("weight distribution: {e}")))?;
    let goals_dist = Poisson::new(3.0)
        .map_err(|e| EdaError::DataProcessing(format!("goals distribution: {e}")))?;

    // Each column is drawn in full before the next, so a column's values do
    // not depend on how many other columns are generated after it.
    let ages: Vec<i64> = (0..n).map(|_| rng.random_range(15..40)).collect();
    let heights: Vec<f64> = (0..n)
        .map(|_| round_to(height_dist.sample(&mut rng), 2))
        .collect();
    let weights: Vec<f64> = (0..n)
        .map(|_| round_to(weight_dist.sample(&mut rng), 1))
        .collect();
    let sports: Vec<&str> = (0..n)
        .map(|_| SPORTS.choose(&mut rng).copied().unwrap_or_default())
        .collect();
    let levels: Vec<&str> = (0..n)
        .map(|_| LEVELS.choose(&mut rng).copied().unwrap_or_default())
        .collect();
    let goals: Vec<i64> = (0..n)
        .map(|_| goals_dist.sample(&mut rng) as i64)
        .collect();

    let df = df!(
        AGE => ages,
        HEIGHT => heights,
        WEIGHT => weights,
        SPORT => sports,
        LEVEL => levels,
        GOALS => goals
    )?;

    tracing::debug!(rows = n, seed, "Generated synthetic dataset");
    Ok(df)
}

/// Parses uploaded delimited text with a header row.
///
/// Column names and types are inferred by Polars.
///
/// # Errors
///
/// Returns [`EdaError::Parse`] when the content is empty, not UTF-8, has no
/// columns, or cannot be read as CSV (ragged rows, duplicate header names).
pub fn load_from_bytes(bytes: &[u8]) -> Result<DataFrame> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| EdaError::Parse(format!("content is not UTF-8 text ({e})")))?;
    if text.trim().is_empty() {
        return Err(EdaError::Parse("file is empty".to_owned()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| EdaError::Parse(e.to_string()))?;

    if df.width() == 0 {
        return Err(EdaError::Parse("no columns found in header".to_owned()));
    }

    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "Loaded uploaded table"
    );
    Ok(df)
}

/// Reads a CSV file from disk.
///
/// # Errors
///
/// Fails if the file cannot be read or [`load_from_bytes`] rejects it.
pub fn load_from_path(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    load_from_bytes(&bytes)
}

/// Writes a table as CSV with a header row.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .context("Failed to write CSV file")?;
    Ok(())
}

/// Selected columns of `table`, limited to the first `max_rows` rows.
///
/// # Errors
///
/// Fails if a selected column is missing from the table.
pub fn preview(table: &DataFrame, selected: &[String], max_rows: Option<usize>) -> Result<DataFrame> {
    let subset = table.select(selected.iter().map(String::as_str))?;
    Ok(match max_rows {
        Some(limit) => subset.head(Some(limit)),
        None => subset,
    })
}

/// Column names of a table, in order.
pub fn column_names(table: &DataFrame) -> Vec<String> {
    table
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}
