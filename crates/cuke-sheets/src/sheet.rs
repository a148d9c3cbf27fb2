//! Projected rows ready for the sinks.

use serde::Serialize;

use crate::scanner::ScenarioRecord;
use crate::schema::ColumnSchema;

/// A single cell value.
///
/// Serializes as a bare JSON string or boolean.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Free text such as titles and severity.
    Text(String),
    /// Presence of a tag.
    Flag(bool),
}

impl Cell {
    /// The flag value, if this is a flag cell.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// The text value, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Flag(_) => None,
        }
    }
}

/// Cells for one scenario, aligned with a [`ColumnSchema`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row(Vec<Cell>);

impl Row {
    /// Cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A derived schema together with one row per scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sheet {
    schema: ColumnSchema,
    rows: Vec<Row>,
}

impl Sheet {
    /// Project `records` through `schema`, preserving record order.
    #[must_use]
    pub fn new(schema: ColumnSchema, records: &[ScenarioRecord]) -> Self {
        let rows = records.iter().map(|record| schema.project(record)).collect();
        Self { schema, rows }
    }

    /// The column schema.
    #[must_use]
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Rows in accumulation order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}
