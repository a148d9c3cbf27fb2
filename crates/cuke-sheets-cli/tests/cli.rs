//! Smoke tests for the `cuke-sheets` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/features");

fn cuke_sheets(workdir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cuke-sheets")?;
    cmd.current_dir(workdir)
        .env_remove("CUKE_SHEETS_LOG_LEVEL")
        .env_remove("CUKE_SHEETS_OUTPUT_DIR")
        .env_remove("CUKE_SHEETS_SKIP_UNREADABLE");
    Ok(cmd)
}

#[test]
fn missing_input_prints_usage() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn invalid_input_fails_with_message() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .arg("no/such/features")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a valid file or directory"));
    assert!(!dir.path().join("output").exists());
    Ok(())
}

#[test]
fn exports_fixture_directory_with_defaults() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .arg(FIXTURES)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total scenarios: 4"))
        .stdout(predicate::str::contains("cucumber_scenarios.csv"));

    let csv = fs::read_to_string(dir.path().join("output/cucumber_scenarios.csv"))?;
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines,
        [
            "Feature,Scenario,Automated,Negative,Severity,Smoke,Regression,Guest-checkout,Payments",
            "Card payments,pay with a saved card,TRUE,FALSE,Low,TRUE,FALSE,FALSE,TRUE",
            "Card payments,declined card,TRUE,TRUE,High,FALSE,TRUE,FALSE,TRUE",
            "Guest checkout,checkout without an account,FALSE,FALSE,,FALSE,FALSE,TRUE,FALSE",
            "Login,valid credentials,TRUE,FALSE,Medium,TRUE,FALSE,FALSE,FALSE",
        ]
    );

    let json: Value = serde_json::from_str(&fs::read_to_string(
        dir.path().join("output/cucumber_scenarios_sheets.json"),
    )?)?;
    assert_eq!(json["title"], "Cucumber Scenarios");
    assert_eq!(
        json["checkbox_columns"],
        serde_json::json!(["Automated", "Negative", "Smoke", "Regression"])
    );
    assert_eq!(json["rows"][1]["Negative"], true);
    assert_eq!(json["rows"][1]["Severity"], "High");
    Ok(())
}

#[test]
fn honours_base_name_and_output_dir() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .arg(Path::new(FIXTURES).join("login.feature"))
        .arg("nightly_run.csv")
        .args(["--output-dir", "reports"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total scenarios: 1"));

    assert!(dir.path().join("reports/nightly_run.csv").is_file());
    let json: Value = serde_json::from_str(&fs::read_to_string(
        dir.path().join("reports/nightly_run_sheets.json"),
    )?)?;
    assert_eq!(json["title"], "Nightly Run");
    Ok(())
}

#[test]
fn output_dir_can_come_from_environment() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .env("CUKE_SHEETS_OUTPUT_DIR", "from-env")
        .arg(Path::new(FIXTURES).join("login.feature"))
        .assert()
        .success();
    assert!(dir.path().join("from-env/cucumber_scenarios.csv").is_file());
    Ok(())
}

#[test]
fn unreadable_document_can_be_skipped() -> TestResult {
    let dir = TempDir::new()?;
    let features = dir.path().join("features");
    fs::create_dir_all(&features)?;
    fs::write(features.join("broken.feature"), [0xff, 0xfe, 0x00])?;
    fs::write(features.join("ok.feature"), "Feature: ok\n@wip\nScenario: fine\n")?;

    cuke_sheets(dir.path())?
        .arg("features")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.feature"));

    cuke_sheets(dir.path())?
        .arg("features")
        .arg("--skip-unreadable")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total scenarios: 1"))
        .stdout(predicate::str::contains("Skipped"))
        .stdout(predicate::str::contains("broken.feature"));
    Ok(())
}

#[test]
fn rejects_unknown_log_level() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .env("CUKE_SHEETS_LOG_LEVEL", "chatty")
        .arg(FIXTURES)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log level"));
    Ok(())
}

#[test]
fn rejects_base_name_outside_output_dir() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .arg(FIXTURES)
        .arg("../escaped")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("output name '../escaped'"));
    assert!(!dir.path().join("output").exists());
    Ok(())
}

#[test]
fn accepts_log_level_flag_in_any_case() -> TestResult {
    let dir = TempDir::new()?;
    cuke_sheets(dir.path())?
        .arg(Path::new(FIXTURES).join("login.feature"))
        .args(["--log-level", "WARNING"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsing").not());
    Ok(())
}
