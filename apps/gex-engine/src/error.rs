//! Error types for the GEX pipeline.
//!
//! Each variant maps to one failure class of the extraction/compute stages.
//! Recoverable conditions (a single missing Calls or Puts table, an invalid
//! interactive choice) are handled where they occur and never reach here
//! unless the caller asked for a hard failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::numeric::NumericParseError;

/// Errors raised while loading, extracting, or computing exposure.
#[derive(Debug, Error)]
pub enum GexError {
    /// Input workbook or intermediate artifact does not exist.
    #[error("File not found: {}{}", .path.display(), hint_suffix(.hint.as_deref()))]
    SourceNotFound {
        /// Path that was looked up.
        path: PathBuf,
        /// Optional remediation hint shown to the user.
        hint: Option<String>,
    },

    /// The coarse segmenter found no tables in the grid.
    #[error("No tables found in the file")]
    NoTablesFound,

    /// The workbook has no worksheet to read.
    #[error("Workbook '{}' contains no worksheets", .0.display())]
    NoWorksheet(PathBuf),

    /// A required column label could not be located.
    #[error("Could not find '{column}' column. Available columns: {available:?}")]
    RequiredColumnMissing {
        /// Label that was searched for.
        column: String,
        /// Labels actually present in the header row.
        available: Vec<String>,
    },

    /// The selected month yielded no Calls or Puts rows.
    #[error("No data found for {0}")]
    NoDataForMonth(String),

    /// A Strike or OI cell could not be converted to a number.
    #[error("Malformed {column} value '{value}' at data row {row}: {source}")]
    MalformedNumericCell {
        /// 1-based row within the intermediate artifact.
        row: usize,
        /// Column label (`Strike` or `OI`).
        column: &'static str,
        /// Raw cell text.
        value: String,
        /// Parse failure detail.
        source: NumericParseError,
    },

    /// Month selection is not a valid index or label.
    #[error("Invalid selection '{choice}': expected a number between 1 and {available} or a listed month")]
    InvalidSelection {
        /// What the user supplied.
        choice: String,
        /// Number of months on offer.
        available: usize,
    },

    /// The interactive prompt reached end of input before a valid choice.
    #[error("Month selection aborted: no more input")]
    SelectionAborted,

    /// Spreadsheet decoding failure.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// CSV read/write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GexError {
    /// Build a [`GexError::SourceNotFound`] without a hint.
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound {
            path: path.into(),
            hint: None,
        }
    }
}

fn hint_suffix(hint: Option<&str>) -> String {
    hint.map(|h| format!(" ({h})")).unwrap_or_default()
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, GexError>;
