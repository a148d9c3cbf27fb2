//! Delimited tabular output.

use std::io::Write;

use super::SinkError;
use crate::sheet::{Cell, Sheet};

const TRUE: &str = "TRUE";
const FALSE: &str = "FALSE";

fn render(cell: &Cell) -> &str {
    match cell {
        Cell::Text(text) => text.as_str(),
        Cell::Flag(true) => TRUE,
        Cell::Flag(false) => FALSE,
    }
}

/// Write the header row followed by one row per scenario.
///
/// Fields are quoted only when they contain the delimiter, quotes or line
/// breaks.
///
/// # Errors
/// Returns [`SinkError`] when the underlying writer fails.
///
/// # Examples
/// ```
/// use cuke_sheets::{Inventory, scan_feature, sink};
///
/// let mut inventory = Inventory::new();
/// inventory.absorb(scan_feature("Feature: Cart\n@smoke\nScenario: add, then pay\n"));
/// let mut buffer = Vec::new();
/// sink::csv::write(&mut buffer, &inventory.project()).unwrap();
/// let text = String::from_utf8(buffer).unwrap();
/// assert_eq!(text.lines().nth(1), Some("Cart,\"add, then pay\",TRUE"));
/// ```
pub fn write<W: Write>(writer: W, sheet: &Sheet) -> Result<(), SinkError> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(sheet.schema().names())?;
    for row in sheet.rows() {
        out.write_record(row.cells().iter().map(render))?;
    }
    out.flush()?;
    Ok(())
}

/// Render the sheet into an in-memory CSV string.
///
/// # Errors
/// Returns [`SinkError`] when encoding fails.
pub fn to_string(sheet: &Sheet) -> Result<String, SinkError> {
    let mut buffer = Vec::new();
    write(&mut buffer, sheet)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
