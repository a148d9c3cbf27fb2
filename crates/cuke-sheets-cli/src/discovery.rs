//! Feature document discovery.
//!
//! A file input is scanned as-is whatever its extension. A directory input is
//! walked recursively for `.feature` files, and the result is sorted so runs
//! are reproducible regardless of file-system enumeration order.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::SheetsError;

/// Resolve `input` into the ordered list of documents to scan.
///
/// # Errors
///
/// Returns `SheetsError::InvalidInput` when `input` is neither a file nor a
/// directory.
///
/// # Examples
///
/// ```ignore
/// use std::path::Path;
/// use cuke_sheets_cli::discovery::collect_feature_paths;
///
/// for path in collect_feature_paths(Path::new("features"))? {
///     println!("{}", path.display());
/// }
/// ```
pub fn collect_feature_paths(input: &Path) -> Result<Vec<PathBuf>, SheetsError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(SheetsError::InvalidInput(input.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(|path| is_feature_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Check whether the supplied path has a `.feature` extension.
fn is_feature_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == OsStr::new("feature"))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, "Feature: f\n").expect("write file");
    }

    #[test]
    fn walks_nested_directories_in_sorted_order() {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "b/checkout.feature");
        write(dir.path(), "a/deep/login.feature");
        write(dir.path(), "z.feature");
        write(dir.path(), "notes.md");
        write(dir.path(), "a/feature.txt");

        let found = collect_feature_paths(dir.path()).expect("collect features");
        let relative: Vec<_> = found
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .expect("path under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(
            relative,
            ["a/deep/login.feature", "b/checkout.feature", "z.feature"]
        );
    }

    #[test]
    fn single_file_is_used_regardless_of_extension() {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "scenarios.txt");
        let path = dir.path().join("scenarios.txt");
        assert_eq!(
            collect_feature_paths(&path).expect("collect file"),
            vec![path]
        );
    }

    #[test]
    fn missing_path_is_invalid_input() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope");
        let result = collect_feature_paths(&missing);
        assert!(matches!(result, Err(SheetsError::InvalidInput(path)) if path == missing));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = TempDir::new().expect("temp dir");
        assert!(collect_feature_paths(dir.path()).expect("collect").is_empty());
    }

    #[rstest]
    #[case("login.feature", true)]
    #[case("dir/nested.feature", true)]
    #[case("login.features", false)]
    #[case("feature", false)]
    #[case("login.FEATURE", false)]
    fn recognises_feature_extension(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_feature_file(Path::new(path)), expected);
    }
}
