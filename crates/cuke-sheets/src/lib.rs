//! Scenario spreadsheets for Gherkin feature suites.
//!
//! The crate turns tagged `.feature` text into spreadsheet-ready rows in two
//! phases:
//!
//! 1. [`scan_feature`] walks one document line by line and emits a
//!    [`ScenarioRecord`] per scenario, with feature tags resolved ahead of the
//!    scenario's own tags. Records are accumulated in an [`Inventory`], which
//!    also tracks the [`TagUniverse`] observed across every document.
//! 2. [`Inventory::project`] derives a [`ColumnSchema`] from the finished
//!    universe and projects each record into a [`Row`]. The resulting
//!    [`Sheet`] is handed to the CSV and JSON writers in [`sink`].
//!
//! The schema can only be known once every document has been scanned, so rows
//! are never streamed during scanning.
//!
//! # Example
//!
//! ```
//! use cuke_sheets::{Inventory, scan_feature};
//!
//! let text = "@automated\nFeature: Login\n  @smoke\n  Scenario: valid user\n";
//! let mut inventory = Inventory::new();
//! inventory.absorb(scan_feature(text));
//!
//! let sheet = inventory.project();
//! let names: Vec<_> = sheet.schema().names().collect();
//! assert_eq!(names, ["Feature", "Scenario", "Automated", "Smoke"]);
//! ```

mod inventory;
mod scanner;
mod schema;
mod sheet;
pub mod sink;
mod tag;

pub use inventory::Inventory;
pub use scanner::{ScenarioRecord, Scanner, scan_feature};
pub use schema::{CHECKBOX_COLUMNS, Column, ColumnSchema, WellKnown};
pub use sheet::{Cell, Row, Sheet};
pub use tag::{Tag, TagUniverse, extract_tags};
