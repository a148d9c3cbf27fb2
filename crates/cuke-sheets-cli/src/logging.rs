//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr; stdout carries only the run summary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::SheetsConfig;

fn filter_from_config(config: &SheetsConfig) -> EnvFilter {
    EnvFilter::new(LevelFilter::from(config.log_level).to_string())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `CUKE_SHEETS_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber is already set, the error is ignored and the first
/// subscriber stays in place.
pub fn init_logging(config: &SheetsConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn init_logging_is_idempotent() {
        let config = SheetsConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn filter_uses_config_log_level() {
        let config = SheetsConfig::default().with_log_level(LogLevel::Warn);
        assert_eq!(filter_from_config(&config).to_string(), "warn");
    }
}
