//! The export run: scan every document, then project and write once.

use std::fs;
use std::path::{Path, PathBuf};

use cuke_sheets::{Inventory, scan_feature};
use tracing::{debug, info, warn};

use crate::config::SheetsConfig;
use crate::discovery::collect_feature_paths;
use crate::error::SheetsError;
use crate::output::OutputPlan;

/// A document left out of the run because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    /// The document path.
    pub path: PathBuf,
    /// Why it could not be read.
    pub reason: String,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents scanned successfully.
    pub documents: usize,
    /// Scenario rows written.
    pub scenarios: usize,
    /// The files written.
    pub outputs: OutputPlan,
    /// Documents skipped under `skip_unreadable`.
    pub skipped: Vec<SkippedDocument>,
}

/// Coordinates one export: owns the inventory while documents are scanned.
#[derive(Debug)]
pub struct ExportRun<'a> {
    config: &'a SheetsConfig,
    inventory: Inventory,
    documents: usize,
    skipped: Vec<SkippedDocument>,
}

impl<'a> ExportRun<'a> {
    /// Start an empty run.
    #[must_use]
    pub fn new(config: &'a SheetsConfig) -> Self {
        Self {
            config,
            inventory: Inventory::new(),
            documents: 0,
            skipped: Vec::new(),
        }
    }

    /// Read and scan one document.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Unreadable` when the document cannot be read and
    /// `skip_unreadable` is off.
    pub fn scan_path(&mut self, path: &Path) -> Result<(), SheetsError> {
        info!(path = %path.display(), "parsing");
        match fs::read_to_string(path) {
            Ok(text) => {
                self.scan_text(&text);
                self.documents += 1;
                Ok(())
            }
            Err(source) if self.config.skip_unreadable => {
                warn!(path = %path.display(), error = %source, "skipping unreadable document");
                self.skipped.push(SkippedDocument {
                    path: path.to_path_buf(),
                    reason: source.to_string(),
                });
                Ok(())
            }
            Err(source) => Err(SheetsError::Unreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Scan already loaded document text.
    pub fn scan_text(&mut self, text: &str) -> usize {
        let added = self.inventory.absorb(scan_feature(text));
        debug!(scenarios = added, "scanned document");
        added
    }

    /// The scenarios accumulated so far.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Project the inventory and write both output files.
    ///
    /// # Errors
    ///
    /// Returns an error when an output directory or file cannot be written.
    pub fn finish(self, outputs: OutputPlan) -> Result<RunSummary, SheetsError> {
        let sheet = self.inventory.project();
        debug!(
            columns = sheet.schema().columns().len(),
            tags = self.inventory.universe().len(),
            "derived column schema"
        );
        outputs.write(&sheet)?;
        info!(
            csv = %outputs.csv_path.display(),
            json = %outputs.json_path.display(),
            "wrote sheets"
        );
        Ok(RunSummary {
            documents: self.documents,
            scenarios: sheet.rows().len(),
            outputs,
            skipped: self.skipped,
        })
    }
}

/// Export every feature document under `input`.
///
/// # Errors
///
/// Returns `SheetsError::InvalidOutputName` before anything is read when
/// `base_name` would leave the output directory, `SheetsError::InvalidInput`
/// for a missing input, and any read or write failure that `config` does not
/// allow skipping.
pub fn export(
    input: &Path,
    base_name: &str,
    config: &SheetsConfig,
) -> Result<RunSummary, SheetsError> {
    let outputs = OutputPlan::new(&config.output_dir, base_name)?;
    let paths = collect_feature_paths(input)?;
    debug!(documents = paths.len(), "discovered feature documents");
    let mut run = ExportRun::new(config);
    for path in &paths {
        run.scan_path(path)?;
    }
    run.finish(outputs)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn config_in(dir: &TempDir) -> SheetsConfig {
        SheetsConfig::default().apply_overrides(None, Some(dir.path().join("out")), false)
    }

    #[test]
    fn exports_directory_into_both_files() {
        let dir = TempDir::new().expect("temp dir");
        let features = dir.path().join("features");
        fs::create_dir_all(features.join("nested")).expect("create features");
        fs::write(
            features.join("b.feature"),
            "Feature: B\n@smoke\nScenario: b1\n",
        )
        .expect("write b");
        fs::write(
            features.join("nested/a.feature"),
            "@automated\nFeature: A\nScenario: a1\nScenario: a2\n",
        )
        .expect("write a");

        let config = config_in(&dir);
        let summary = export(&features, "suite", &config).expect("export");
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.scenarios, 3);
        assert!(summary.skipped.is_empty());

        let csv = fs::read_to_string(&summary.outputs.csv_path).expect("read csv");
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            [
                "Feature,Scenario,Automated,Smoke",
                "B,b1,FALSE,TRUE",
                "A,a1,TRUE,FALSE",
                "A,a2,TRUE,FALSE",
            ]
        );
        assert!(summary.outputs.json_path.is_file());
    }

    #[test]
    fn invalid_input_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let config = config_in(&dir);
        let result = export(&dir.path().join("missing"), "suite", &config);
        assert!(matches!(result, Err(SheetsError::InvalidInput(_))));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn escaping_base_name_fails_before_writing() {
        let dir = TempDir::new().expect("temp dir");
        let features = dir.path().join("features");
        fs::create_dir_all(&features).expect("create features");
        fs::write(features.join("a.feature"), "Feature: A\nScenario: a\n").expect("write a");

        let config = config_in(&dir);
        let result = export(&features, "../escaped", &config);
        assert!(matches!(result, Err(SheetsError::InvalidOutputName(_))));
        assert!(!dir.path().join("out").exists());
        assert!(!dir.path().join("escaped.csv").exists());
    }

    #[test]
    fn unreadable_document_fails_by_default() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("binary.feature");
        fs::write(&path, [0xff, 0xfe, 0x00]).expect("write invalid utf-8");

        let config = config_in(&dir);
        let mut run = ExportRun::new(&config);
        let result = run.scan_path(&path);
        assert!(matches!(result, Err(SheetsError::Unreadable { path: p, .. }) if p == path));
    }

    #[test]
    fn unreadable_document_is_skipped_when_allowed() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("binary.feature");
        fs::write(&path, [0xff, 0xfe, 0x00]).expect("write invalid utf-8");

        let config = config_in(&dir).apply_overrides(None, None, true);
        let mut run = ExportRun::new(&config);
        run.scan_path(&path).expect("skip unreadable");
        assert_eq!(run.scan_text("Feature: f\nScenario: s\n"), 1);
        assert_eq!(run.inventory().len(), 1);

        let outputs = OutputPlan::new(&config.output_dir, "partial").expect("plan outputs");
        let summary = run.finish(outputs).expect("finish");
        assert_eq!(summary.documents, 0);
        assert_eq!(summary.scenarios, 1);
        let skipped = summary.skipped.first().expect("skipped entry");
        assert_eq!(skipped.path, path);
        assert!(!skipped.reason.is_empty());
    }
}
