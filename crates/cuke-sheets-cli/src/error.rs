//! Error types for an export run.
//!
//! Variants name the path involved so the message printed at exit is enough to
//! locate the problem without re-running with more logging.

use std::path::PathBuf;

use cuke_sheets::sink::SinkError;
use thiserror::Error;

/// Errors that can end an export run.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The input path is neither a file nor a directory.
    #[error("{} is not a valid file or directory", .0.display())]
    InvalidInput(PathBuf),

    /// A feature document could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Unreadable {
        /// The document that failed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output base name would place files outside the output directory.
    #[error(
        "output name '{0}' must be a relative path without '..' inside the output directory"
    )]
    InvalidOutputName(String),

    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        /// Directory that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Sink {
        /// The output file being written.
        path: PathBuf,
        /// The encoder or writer failure.
        #[source]
        source: SinkError,
    },
}
