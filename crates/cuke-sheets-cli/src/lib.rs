//! Command line export of Gherkin scenario tags to spreadsheets.
//!
//! This crate wraps the `cuke-sheets` library with the pieces a one-shot
//! export needs: configuration, feature discovery, logging, and writing the
//! CSV and JSON files.
//!
//! # Configuration
//!
//! The run can be configured via environment variables:
//!
//! - `CUKE_SHEETS_LOG_LEVEL`: Log verbosity (trace, debug, info, warn, error)
//! - `CUKE_SHEETS_OUTPUT_DIR`: Directory receiving generated files
//! - `CUKE_SHEETS_SKIP_UNREADABLE`: Skip documents that cannot be read
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cuke_sheets_cli::config::SheetsConfig;
//! use cuke_sheets_cli::run::export;
//!
//! let config = SheetsConfig::from_env()?;
//! let summary = export(Path::new("features"), "cucumber_scenarios", &config)?;
//! println!("{} scenarios", summary.scenarios);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;
pub mod run;
