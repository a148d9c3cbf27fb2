//! Export Gherkin scenario tags to spreadsheet-ready CSV and JSON.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use cuke_sheets_cli::config::{LogLevel, SheetsConfig};
use cuke_sheets_cli::logging::init_logging;
use cuke_sheets_cli::output::{DEFAULT_BASE_NAME, write_summary};
use cuke_sheets_cli::run::export;

/// Summarise the tags of every scenario in a feature file or directory.
#[derive(Parser, Debug)]
#[command(name = "cuke-sheets", author, version, about)]
struct Args {
    /// Feature file, or directory searched recursively for `.feature` files.
    input: PathBuf,

    /// Output base name; `.csv` is appended when missing.
    #[arg(default_value = DEFAULT_BASE_NAME)]
    output: String,

    /// Directory receiving the generated files.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level.
    #[arg(long, value_enum, ignore_case = true)]
    log_level: Option<LogLevel>,

    /// Skip documents that cannot be read instead of failing.
    #[arg(long)]
    skip_unreadable: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = SheetsConfig::from_env()?.apply_overrides(
        args.log_level,
        args.output_dir,
        args.skip_unreadable,
    );
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        input = %args.input.display(),
        "starting cuke-sheets"
    );

    let summary = export(&args.input, &args.output, &config)
        .wrap_err_with(|| format!("failed to export {}", args.input.display()))?;
    write_summary(&mut io::stdout().lock(), &summary)
}
