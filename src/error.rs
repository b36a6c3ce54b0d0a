use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input file {} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error(
        "Row {row} of {}: unparseable month '{value}' (expected YYYY-MM-DD or YYYY-MM)",
        .path.display()
    )]
    InvalidMonth {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("Row {row} of {}: unparseable amount '{value}'", .path.display())]
    InvalidAmount {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("No actuals history for account: {0}")]
    EmptyHistory(String),

    #[error("Store schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database error: {0}")]
    DbError(#[from] rusqlite::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
