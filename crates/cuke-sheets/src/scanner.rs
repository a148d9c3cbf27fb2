//! Line-oriented scanner that resolves scenario tags.
//!
//! The scanner makes a single forward pass over a feature document. It does
//! not validate Gherkin; each trimmed line is classified by its leading text
//! and fed to [`Scanner::step`], which updates three pieces of state:
//!
//! - the *pending* tags collected from `@` lines since the last boundary,
//! - the current feature title,
//! - the tags committed to the feature by its `Feature:` line.
//!
//! A `Scenario:` or `Scenario Outline:` line emits a [`ScenarioRecord`] whose
//! tags are the feature tags followed by the pending tags. Keeping that order
//! lets namespaced lookups take the last match, so a scenario's
//! `@severity:low` overrides a feature-wide `@severity:high`.
//!
//! `Background:` discards pending tags. Tags written directly above a
//! background never reach a record, which matches how existing suites have
//! been reported and is pinned by the scanner tests.

use crate::tag::{Tag, extract_tags};

const FEATURE_KEYWORD: &str = "Feature:";
const SCENARIO_KEYWORDS: [&str; 2] = ["Scenario:", "Scenario Outline:"];
const BACKGROUND_KEYWORD: &str = "Background:";

/// A scenario with its feature title and fully resolved tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioRecord {
    feature_title: String,
    scenario_title: String,
    tags: Vec<Tag>,
}

impl ScenarioRecord {
    /// Build a record from already resolved tags.
    ///
    /// # Examples
    /// ```
    /// use cuke_sheets::ScenarioRecord;
    ///
    /// let record = ScenarioRecord::new("Login", "valid user", ["automated", "smoke"]);
    /// assert_eq!(record.feature_title(), "Login");
    /// assert!(record.has_tag("SMOKE"));
    /// ```
    #[must_use]
    pub fn new<T: Into<Tag>>(
        feature_title: impl Into<String>,
        scenario_title: impl Into<String>,
        tags: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            feature_title: feature_title.into(),
            scenario_title: scenario_title.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Title of the feature that was active when the scenario was read.
    #[must_use]
    pub fn feature_title(&self) -> &str {
        &self.feature_title
    }

    /// Title of the scenario.
    #[must_use]
    pub fn scenario_title(&self) -> &str {
        &self.scenario_title
    }

    /// Feature tags followed by scenario tags, in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether the record carries `token`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, token: &str) -> bool {
        self.tags.iter().any(|tag| tag.is(token))
    }

    /// Value of the last tag in `namespace`.
    ///
    /// # Examples
    /// ```
    /// use cuke_sheets::ScenarioRecord;
    ///
    /// let record = ScenarioRecord::new("f", "s", ["severity:high", "severity:low"]);
    /// assert_eq!(record.last_value_in("severity"), Some("low"));
    /// ```
    #[must_use]
    pub fn last_value_in(&self, namespace: &str) -> Option<&str> {
        self.tags.iter().rev().find_map(|tag| tag.value_in(namespace))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Tags(&'a str),
    Feature(&'a str),
    Scenario(&'a str),
    Background,
    Other,
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Skip;
    }
    if line.starts_with('@') {
        return Line::Tags(line);
    }
    if let Some(title) = line.strip_prefix(FEATURE_KEYWORD) {
        return Line::Feature(title.trim());
    }
    if let Some(title) = SCENARIO_KEYWORDS
        .iter()
        .find_map(|keyword| line.strip_prefix(keyword))
    {
        return Line::Scenario(title.trim());
    }
    if line.starts_with(BACKGROUND_KEYWORD) {
        return Line::Background;
    }
    Line::Other
}

/// Scanner state for one feature document.
///
/// # Examples
/// ```
/// use cuke_sheets::Scanner;
///
/// let mut scanner = Scanner::new();
/// assert!(scanner.step("@regression").is_none());
/// assert!(scanner.step("Feature: Cart").is_none());
/// let record = scanner.step("Scenario: add item").expect("scenario line");
/// assert_eq!(record.tags()[0].as_str(), "regression");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    pending_tags: Vec<Tag>,
    feature_title: String,
    feature_tags: Vec<Tag>,
}

impl Scanner {
    /// Start scanning a new document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance over one line, returning a record at scenario boundaries.
    pub fn step(&mut self, line: &str) -> Option<ScenarioRecord> {
        match classify(line) {
            Line::Tags(text) => {
                self.pending_tags.extend(extract_tags(text));
                None
            }
            Line::Feature(title) => {
                title.clone_into(&mut self.feature_title);
                self.feature_tags = std::mem::take(&mut self.pending_tags);
                None
            }
            Line::Scenario(title) => Some(self.emit(title)),
            Line::Background => {
                self.pending_tags.clear();
                None
            }
            Line::Skip | Line::Other => None,
        }
    }

    /// Title of the most recent `Feature:` line, or empty before one is seen.
    #[must_use]
    pub fn feature_title(&self) -> &str {
        &self.feature_title
    }

    fn emit(&mut self, title: &str) -> ScenarioRecord {
        let tags = self
            .feature_tags
            .iter()
            .cloned()
            .chain(self.pending_tags.drain(..))
            .collect();
        ScenarioRecord {
            feature_title: self.feature_title.clone(),
            scenario_title: title.to_owned(),
            tags,
        }
    }
}

/// Scan a whole document and return its scenarios in order.
///
/// A leading byte-order mark is ignored. Scanning never fails: lines that are
/// not recognised are skipped.
#[must_use]
pub fn scan_feature(text: &str) -> Vec<ScenarioRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut scanner = Scanner::new();
    text.lines().filter_map(|line| scanner.step(line)).collect()
}
