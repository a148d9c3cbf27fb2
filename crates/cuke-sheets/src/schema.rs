//! Column schema derivation.
//!
//! The schema always opens with `Feature` and `Scenario`. Well-known columns
//! follow in a fixed order, each present only when its guard tag was observed
//! somewhere in the run. Every remaining tag becomes a custom flag column,
//! ordered by its raw token, unless it is reserved: the well-known tokens,
//! `headless`/`not-headless`, and the `severity:`, `platform:`, `team:` and
//! `story:` namespaces never produce custom columns.
//!
//! Column names are unique. A custom tag whose header would repeat a name
//! already in the schema, such as `@feature` or a second spelling of `@Wip`,
//! is skipped with a warning so rows never carry two cells under one key.

use std::collections::BTreeSet;

use tracing::warn;

use crate::scanner::ScenarioRecord;
use crate::sheet::{Cell, Row};
use crate::tag::{Tag, TagUniverse};

const SEVERITY_NAMESPACE: &str = "severity";

const RESERVED_TOKENS: [&str; 8] = [
    "automated",
    "positive",
    "negative",
    "smoke",
    "regression",
    "sanity",
    "headless",
    "not-headless",
];

const RESERVED_NAMESPACES: [&str; 4] = [SEVERITY_NAMESPACE, "platform", "team", "story"];

/// Column names rendered as checkboxes by spreadsheet consumers, in order.
pub const CHECKBOX_COLUMNS: [&str; 6] = [
    "Automated",
    "Positive",
    "Negative",
    "Smoke",
    "Regression",
    "Sanity",
];

/// Columns with fixed semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// `@automated`
    Automated,
    /// `@positive`
    Positive,
    /// `@negative`
    Negative,
    /// Last `@severity:<level>` tag.
    Severity,
    /// `@smoke`
    Smoke,
    /// `@regression`
    Regression,
    /// `@sanity`
    Sanity,
}

impl WellKnown {
    /// Every well-known column in schema order.
    pub const ALL: [Self; 7] = [
        Self::Automated,
        Self::Positive,
        Self::Negative,
        Self::Severity,
        Self::Smoke,
        Self::Regression,
        Self::Sanity,
    ];

    /// Header text for the column.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Automated => "Automated",
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Severity => "Severity",
            Self::Smoke => "Smoke",
            Self::Regression => "Regression",
            Self::Sanity => "Sanity",
        }
    }

    /// The tag token, or namespace for [`WellKnown::Severity`], that guards
    /// the column.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Automated => "automated",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Severity => SEVERITY_NAMESPACE,
            Self::Smoke => "smoke",
            Self::Regression => "regression",
            Self::Sanity => "sanity",
        }
    }

    fn is_observed(self, universe: &TagUniverse) -> bool {
        match self {
            Self::Severity => universe.contains_namespace(SEVERITY_NAMESPACE),
            flag => universe.contains_token(flag.token()),
        }
    }

    fn cell(self, record: &ScenarioRecord) -> Cell {
        match self {
            Self::Severity => Cell::Text(
                record
                    .last_value_in(SEVERITY_NAMESPACE)
                    .map(capitalize)
                    .unwrap_or_default(),
            ),
            flag => Cell::Flag(record.has_tag(flag.token())),
        }
    }
}

/// One column of the sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    /// Owning feature title.
    Feature,
    /// Scenario title.
    Scenario,
    /// A column with fixed semantics.
    WellKnown(WellKnown),
    /// A flag column for an arbitrary tag.
    Custom {
        /// The tag token as observed.
        tag: Tag,
        /// Header text: the token with its first character upper-cased.
        name: String,
    },
}

impl Column {
    fn custom(tag: &Tag) -> Self {
        Self::Custom {
            name: upper_first(tag.as_str()),
            tag: tag.clone(),
        }
    }

    /// Header text for the column.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Feature => "Feature",
            Self::Scenario => "Scenario",
            Self::WellKnown(known) => known.column_name(),
            Self::Custom { name, .. } => name.as_str(),
        }
    }

    /// Compute this column's cell for `record`.
    #[must_use]
    pub fn cell(&self, record: &ScenarioRecord) -> Cell {
        match self {
            Self::Feature => Cell::Text(record.feature_title().to_owned()),
            Self::Scenario => Cell::Text(record.scenario_title().to_owned()),
            Self::WellKnown(known) => known.cell(record),
            Self::Custom { tag, .. } => Cell::Flag(record.has_tag(tag.as_str())),
        }
    }
}

/// Ordered columns derived from a [`TagUniverse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Derive the schema for every tag observed in a run.
    ///
    /// The result depends only on the universe, never on record order.
    ///
    /// # Examples
    /// ```
    /// use cuke_sheets::{ColumnSchema, Tag, TagUniverse};
    ///
    /// let universe: TagUniverse = ["wip", "smoke", "severity:high", "team:core"]
    ///     .into_iter()
    ///     .map(Tag::from)
    ///     .collect();
    /// let schema = ColumnSchema::derive(&universe);
    /// let names: Vec<_> = schema.names().collect();
    /// assert_eq!(names, ["Feature", "Scenario", "Severity", "Smoke", "Wip"]);
    /// ```
    #[must_use]
    pub fn derive(universe: &TagUniverse) -> Self {
        let mut columns = vec![Column::Feature, Column::Scenario];
        columns.extend(
            WellKnown::ALL
                .into_iter()
                .filter(|known| known.is_observed(universe))
                .map(Column::WellKnown),
        );
        let mut taken: BTreeSet<String> =
            columns.iter().map(|column| column.name().to_owned()).collect();
        for tag in universe.iter().filter(|tag| !is_reserved(tag)) {
            let column = Column::custom(tag);
            if taken.insert(column.name().to_owned()) {
                columns.push(column);
            } else {
                warn!(
                    tag = %tag,
                    column = column.name(),
                    "column name already taken; tag has no column of its own"
                );
            }
        }
        Self { columns }
    }

    /// Columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// The subset of [`CHECKBOX_COLUMNS`] present in this schema.
    #[must_use]
    pub fn checkbox_columns(&self) -> Vec<&'static str> {
        CHECKBOX_COLUMNS
            .into_iter()
            .filter(|name| self.names().any(|present| present == *name))
            .collect()
    }

    /// Project one record into a row aligned with these columns.
    #[must_use]
    pub fn project(&self, record: &ScenarioRecord) -> Row {
        self.columns.iter().map(|column| column.cell(record)).collect()
    }
}

fn is_reserved(tag: &Tag) -> bool {
    RESERVED_TOKENS.iter().any(|token| tag.is(token))
        || RESERVED_NAMESPACES
            .iter()
            .any(|namespace| tag.in_namespace(namespace))
}

fn upper_first(token: &str) -> String {
    let mut chars = token.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
