//! Writers that encode a [`Sheet`](crate::Sheet) for spreadsheets.
//!
//! Both sinks read the same projection. [`csv`] renders flags as the
//! literals `TRUE`/`FALSE`; [`json`] keeps them as native booleans and adds
//! the metadata spreadsheet importers need.

pub mod csv;
pub mod json;

/// Errors raised while encoding a sheet.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The CSV writer rejected a record.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] ::csv::Error),
    /// JSON serialization failed.
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
