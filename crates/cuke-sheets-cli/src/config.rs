//! Run configuration parsed from environment variables.
//!
//! Every setting can be supplied through a `CUKE_SHEETS_` environment
//! variable and overridden on the command line.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

use crate::error::SheetsError;

const LOG_LEVEL_VAR: &str = "CUKE_SHEETS_LOG_LEVEL";
const OUTPUT_DIR_VAR: &str = "CUKE_SHEETS_OUTPUT_DIR";
const SKIP_UNREADABLE_VAR: &str = "CUKE_SHEETS_SKIP_UNREADABLE";

/// Directory that receives generated files unless overridden.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Verbosity of the stderr log.
///
/// Parsed by clap for `--log-level` and by [`FromStr`] for
/// `CUKE_SHEETS_LOG_LEVEL`; both accept any case and `warning` for `warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Per-document detail.
    Debug,
    /// One line per scanned document.
    #[default]
    Info,
    /// Skipped documents and other recoverable problems.
    #[value(alias = "warning")]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = SheetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true).map_err(|_| {
            let expected: Vec<_> = Self::value_variants()
                .iter()
                .filter_map(ValueEnum::to_possible_value)
                .map(|value| value.get_name().to_owned())
                .collect();
            SheetsError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: {}",
                expected.join(", ")
            ))
        })
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Configuration for an export run.
///
/// # Environment Variables
///
/// - `CUKE_SHEETS_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `CUKE_SHEETS_OUTPUT_DIR`: directory receiving the CSV and JSON files
/// - `CUKE_SHEETS_SKIP_UNREADABLE`: `1`/`true` to skip unreadable documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    /// Log level.
    pub log_level: LogLevel,
    /// Directory receiving generated files; created when absent.
    pub output_dir: PathBuf,
    /// Skip documents that cannot be read instead of failing the run.
    pub skip_unreadable: bool,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            skip_unreadable: false,
        }
    }
}

impl SheetsConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, SheetsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SheetsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };

        let output_dir = lookup(OUTPUT_DIR_VAR)
            .filter(|val| !val.trim().is_empty())
            .map_or(defaults.output_dir, PathBuf::from);

        let skip_unreadable = match lookup(SKIP_UNREADABLE_VAR) {
            Some(val) => parse_switch(&val)?,
            None => defaults.skip_unreadable,
        };

        Ok(Self {
            log_level,
            output_dir,
            skip_unreadable,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults. `skip_unreadable` can only be switched on.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        output_dir: Option<PathBuf>,
        skip_unreadable: bool,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }

        self.skip_unreadable |= skip_unreadable;
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

fn parse_switch(value: &str) -> Result<bool, SheetsError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(SheetsError::InvalidConfig(format!(
            "invalid {SKIP_UNREADABLE_VAR} value '{value}', expected true or false"
        ))),
    }
}
