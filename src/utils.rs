use polars::prelude::AnyValue;
use std::time::Duration;

/// Formats a table cell for display; missing values render as an empty cell.
pub fn fmt_cell(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float64(x) => fmt_float(*x),
        AnyValue::Float32(x) => fmt_float(f64::from(*x)),
        other => other
            .get_str()
            .map_or_else(|| other.to_string(), str::to_owned),
    }
}

/// Formats a float without trailing zeros, or "—" if non-finite.
pub fn fmt_float(x: f64) -> String {
    if !x.is_finite() {
        return "—".to_owned();
    }
    let s = format!("{x:.4}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_owned()
}

pub fn fmt_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{}ms", d.as_millis())
    }
}
