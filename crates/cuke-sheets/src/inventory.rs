//! Run-scoped accumulation of scanned scenarios.

use crate::scanner::ScenarioRecord;
use crate::schema::ColumnSchema;
use crate::sheet::Sheet;
use crate::tag::TagUniverse;

/// Every scenario scanned in a run, plus the tags they carry.
///
/// Records keep the order in which they were absorbed; callers feed documents
/// in a stable order so the output is deterministic.
///
/// # Examples
/// ```
/// use cuke_sheets::{Inventory, scan_feature};
///
/// let mut inventory = Inventory::new();
/// let added = inventory.absorb(scan_feature("Feature: f\n@wip\nScenario: s\n"));
/// assert_eq!(added, 1);
/// assert!(inventory.universe().contains_token("wip"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    records: Vec<ScenarioRecord>,
    universe: TagUniverse,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records and merge their tags, returning how many were added.
    pub fn absorb(&mut self, records: impl IntoIterator<Item = ScenarioRecord>) -> usize {
        let before = self.records.len();
        for record in records {
            self.universe.extend(record.tags());
            self.records.push(record);
        }
        self.records.len() - before
    }

    /// Records in accumulation order.
    #[must_use]
    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    /// Distinct tags seen so far.
    #[must_use]
    pub fn universe(&self) -> &TagUniverse {
        &self.universe
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no scenario has been absorbed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derive the schema and project every record.
    #[must_use]
    pub fn project(&self) -> Sheet {
        Sheet::new(ColumnSchema::derive(&self.universe), &self.records)
    }
}
