// 🚨 Error Taxonomy - every way a summary run can fail
// Each variant aborts the run; nothing is recovered locally

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading sales data or building the summary.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The input source could not be located or opened.
    #[error("Input not found: {}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more required columns are absent from the header row.
    #[error("Schema mismatch: missing required column(s): {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A `date` value is not a valid calendar date.
    #[error("Parse error on line {line}: invalid date '{value}'")]
    ParseError { line: usize, value: String },

    /// A `units` or `price` value (or their product) is not a finite number.
    #[error("Numeric conversion error on line {line}: column '{column}' cannot be coerced to a finite number: '{value}'")]
    NumericConversionError {
        line: usize,
        column: String,
        value: String,
    },

    /// Structurally malformed CSV (ragged rows, bad UTF-8, ...).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
