//! Output file naming and the run summary.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use cuke_sheets::Sheet;
use cuke_sheets::sink::{self, SinkError};
use eyre::{Context, Result};

use crate::error::SheetsError;
use crate::run::RunSummary;

/// Base name used when none is given on the command line.
pub const DEFAULT_BASE_NAME: &str = "cucumber_scenarios";

const CSV_EXTENSION: &str = ".csv";
const JSON_SUFFIX: &str = "_sheets.json";

/// Where a run writes its files, and the title it gives the JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    /// Delimited tabular file.
    pub csv_path: PathBuf,
    /// Spreadsheet-format JSON file.
    pub json_path: PathBuf,
    /// Human-readable sheet title.
    pub title: String,
}

impl OutputPlan {
    /// Plan output files for `base_name` under `output_dir`.
    ///
    /// `.csv` is appended to the tabular file only when missing, and is
    /// removed before the JSON suffix is added. The base name may name a
    /// subdirectory but must stay inside `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::InvalidOutputName` when `base_name` is empty,
    /// absolute, or contains a `..` component.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use cuke_sheets_cli::output::OutputPlan;
    ///
    /// let plan = OutputPlan::new(Path::new("output"), "smoke_suite.csv")?;
    /// assert_eq!(plan.csv_path, Path::new("output/smoke_suite.csv"));
    /// assert_eq!(plan.json_path, Path::new("output/smoke_suite_sheets.json"));
    /// assert_eq!(plan.title, "Smoke Suite");
    /// assert!(OutputPlan::new(Path::new("output"), "../escape").is_err());
    /// # Ok::<(), cuke_sheets_cli::error::SheetsError>(())
    /// ```
    pub fn new(output_dir: &Path, base_name: &str) -> Result<Self, SheetsError> {
        let stem = base_name.strip_suffix(CSV_EXTENSION).unwrap_or(base_name);
        let Some(title_source) = contained_file_name(stem) else {
            return Err(SheetsError::InvalidOutputName(base_name.to_owned()));
        };
        Ok(Self {
            csv_path: output_dir.join(format!("{stem}{CSV_EXTENSION}")),
            json_path: output_dir.join(format!("{stem}{JSON_SUFFIX}")),
            title: sink::json::title_from_base_name(&title_source),
        })
    }

    /// Write both files, creating missing directories first.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::CreateOutputDir` or `SheetsError::Sink` naming the
    /// path that failed.
    pub fn write(&self, sheet: &Sheet) -> Result<(), SheetsError> {
        for path in [&self.csv_path, &self.json_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| SheetsError::CreateOutputDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        write_file(&self.csv_path, |writer| sink::csv::write(writer, sheet))?;
        write_file(&self.json_path, |writer| {
            sink::json::write(writer, sheet, &self.title)
        })
    }
}

/// Final file name of `stem` when every component stays below the directory
/// it is joined to.
fn contained_file_name(stem: &str) -> Option<String> {
    let path = Path::new(stem);
    let contained = path
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if !contained {
        return None;
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn write_file<F>(path: &Path, encode: F) -> Result<(), SheetsError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), SinkError>,
{
    let sink_error = |source| SheetsError::Sink {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| sink_error(SinkError::Io(e)))?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer).map_err(sink_error)?;
    writer.flush().map_err(|e| sink_error(SinkError::Io(e)))
}

/// Print the generated file paths, scenario count and skipped documents.
///
/// # Errors
///
/// Returns an error when `writer` fails.
pub fn write_summary(writer: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    writeln!(
        writer,
        "CSV file generated: {}",
        summary.outputs.csv_path.display()
    )
    .wrap_err("failed to write CSV location")?;
    writeln!(
        writer,
        "JSON file generated: {}",
        summary.outputs.json_path.display()
    )
    .wrap_err("failed to write JSON location")?;
    writeln!(writer, "Total scenarios: {}", summary.scenarios)
        .wrap_err("failed to write scenario total")?;
    for skipped in &summary.skipped {
        writeln!(
            writer,
            "Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        )
        .wrap_err_with(|| format!("failed to report skipped {}", skipped.path.display()))?;
    }
    writer.flush().wrap_err("failed to flush run summary")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::run::SkippedDocument;

    #[rstest]
    #[case("cucumber_scenarios", "cucumber_scenarios.csv", "cucumber_scenarios_sheets.json")]
    #[case("release.csv", "release.csv", "release_sheets.json")]
    #[case("release.CSV", "release.CSV.csv", "release.CSV_sheets.json")]
    fn names_output_files(
        #[case] base: &str,
        #[case] csv: &str,
        #[case] json: &str,
    ) -> Result<(), SheetsError> {
        let plan = OutputPlan::new(Path::new("out"), base)?;
        assert_eq!(plan.csv_path, Path::new("out").join(csv));
        assert_eq!(plan.json_path, Path::new("out").join(json));
        Ok(())
    }

    #[test]
    fn title_uses_final_path_component() -> Result<(), SheetsError> {
        let plan = OutputPlan::new(Path::new("out"), "nightly/api_smoke")?;
        assert_eq!(plan.title, "Api Smoke");
        assert_eq!(plan.csv_path, Path::new("out").join("nightly/api_smoke.csv"));
        Ok(())
    }

    #[rstest]
    #[case("")]
    #[case(".csv")]
    #[case("..")]
    #[case("../escape")]
    #[case("nested/../../escape.csv")]
    #[case("/tmp/escape")]
    #[case("reports/..")]
    fn rejects_names_leaving_the_output_directory(#[case] base: &str) {
        let result = OutputPlan::new(Path::new("out"), base);
        assert!(
            matches!(&result, Err(SheetsError::InvalidOutputName(name)) if name == base),
            "{base:?} gave {result:?}"
        );
    }

    #[test]
    fn summary_lists_files_count_and_skips() -> Result<()> {
        let summary = RunSummary {
            documents: 2,
            scenarios: 5,
            outputs: OutputPlan::new(Path::new("out"), "run")?,
            skipped: vec![SkippedDocument {
                path: PathBuf::from("broken.feature"),
                reason: "stream did not contain valid UTF-8".into(),
            }],
        };
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &summary)?;
        let text = String::from_utf8(buffer)?;
        assert!(text.contains("CSV file generated: "));
        assert!(text.contains("run_sheets.json"));
        assert!(text.contains("Total scenarios: 5\n"));
        assert!(text.contains("Skipped broken.feature: stream did not contain valid UTF-8"));
        Ok(())
    }
}
