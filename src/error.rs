//! Centralized error handling for the dashboard.
//!
//! Chart/column-type mismatches are *not* errors: they are reported as
//! [`crate::explorer::logic::ValidationWarning`] values inside a
//! [`crate::explorer::logic::ChartResult`]. This module covers everything that
//! genuinely fails:
//!
//! - malformed uploads ([`EdaError::Parse`]), which block the rest of the view
//! - data access failures during rendering ([`EdaError::DataProcessing`]), e.g. a
//!   text column declared quantitative
//! - requests that reference columns outside the selection
//!
//! ```
//! use eda_dashboard::error::EdaError;
//!
//! fn describe(err: &EdaError) -> &'static str {
//!     match err {
//!         EdaError::Parse(_) => "bad upload",
//!         EdaError::DataProcessing(_) => "chart failed",
//!         _ => "other",
//!     }
//! }
//! ```

use std::fmt;

/// Main error type for dashboard operations.
#[derive(Debug)]
pub enum EdaError {
    /// I/O errors (reading an upload, writing an export)
    Io(std::io::Error),

    /// Uploaded content is not well-formed delimited text
    Parse(String),

    /// Data processing errors (Polars, casts, etc.)
    DataProcessing(String),

    /// Column has no entry in a fixed classification table
    UnknownColumn(String),

    /// Chart request references a column outside the current selection
    ColumnNotSelected(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for EdaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "Could not parse file: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::UnknownColumn(name) => write!(f, "Unknown column: {name}"),
            Self::ColumnNotSelected(name) => {
                write!(f, "Column '{name}' is not part of the current selection")
            }
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EdaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl EdaError {
    /// True for malformed-upload failures, which block the rest of the view.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<std::io::Error> for EdaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<polars::error::PolarsError> for EdaError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<EdaError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: EdaError = e.into();
            EdaError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: EdaError = e.into();
            EdaError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EdaError::DataProcessing("column not found".to_owned());
        assert_eq!(err.to_string(), "Data processing error: column not found");
    }

    #[test]
    fn test_not_selected_display() {
        let err = EdaError::ColumnNotSelected("Peso".to_owned());
        assert_eq!(
            err.to_string(),
            "Column 'Peso' is not part of the current selection"
        );
    }

    #[test]
    fn test_polars_error_is_data_processing() {
        let err: EdaError =
            polars::error::PolarsError::ColumnNotFound("Peso".into()).into();
        assert!(matches!(err, EdaError::DataProcessing(msg) if msg.contains("Peso")));
    }

    #[test]
    fn test_parse_flag() {
        assert!(EdaError::Parse("empty".to_owned()).is_parse());
        assert!(!EdaError::Other("x".to_owned()).is_parse());
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.csv",
        ));

        let result: Result<()> = result.context("Failed to read upload");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read upload")
        );
    }
}
