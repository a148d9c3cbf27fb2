//! Spreadsheet-format JSON output.
//!
//! The document carries everything an importer needs to rebuild the sheet:
//!
//! ```json
//! {
//!   "title": "Cucumber Scenarios",
//!   "columns": ["Feature", "Scenario", "Automated"],
//!   "checkbox_columns": ["Automated"],
//!   "rows": [{ "Feature": "Login", "Scenario": "ok", "Automated": true }]
//! }
//! ```
//!
//! Row objects keep their keys in column order.

use std::io::Write;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::SinkError;
use crate::schema::{ColumnSchema, capitalize};
use crate::sheet::{Row, Sheet};

#[derive(Serialize)]
struct SheetDocument<'a> {
    title: String,
    columns: Vec<&'a str>,
    checkbox_columns: Vec<&'static str>,
    rows: Vec<JsonRow<'a>>,
}

struct JsonRow<'a> {
    schema: &'a ColumnSchema,
    row: &'a Row,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cells = self.row.cells();
        let mut map = serializer.serialize_map(Some(cells.len()))?;
        for (name, cell) in self.schema.names().zip(cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

impl<'a> SheetDocument<'a> {
    fn new(sheet: &'a Sheet, title: String) -> Self {
        let schema = sheet.schema();
        Self {
            title,
            columns: schema.names().collect(),
            checkbox_columns: schema.checkbox_columns(),
            rows: sheet
                .rows()
                .iter()
                .map(|row| JsonRow { schema, row })
                .collect(),
        }
    }
}

/// Derive a display title from an output base name.
///
/// Every underscore becomes one space and each space-separated word is
/// capitalised. Runs of separators are kept, so `a__b` gives `A  B`.
///
/// # Examples
/// ```
/// use cuke_sheets::sink::json::title_from_base_name;
///
/// assert_eq!(title_from_base_name("cucumber_scenarios"), "Cucumber Scenarios");
/// assert_eq!(title_from_base_name("API_smoke run"), "Api Smoke Run");
/// ```
#[must_use]
pub fn title_from_base_name(base_name: &str) -> String {
    base_name
        .replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the sheet as a pretty-printed JSON document.
///
/// # Errors
/// Returns [`SinkError`] when serialization or the writer fails.
pub fn write<W: Write>(mut writer: W, sheet: &Sheet, title: &str) -> Result<(), SinkError> {
    serde_json::to_writer_pretty(&mut writer, &SheetDocument::new(sheet, title.to_owned()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Build the JSON document as a [`serde_json::Value`].
///
/// # Errors
/// Returns [`SinkError`] when serialization fails.
///
/// # Examples
/// ```
/// use cuke_sheets::{Inventory, scan_feature, sink};
///
/// let mut inventory = Inventory::new();
/// inventory.absorb(scan_feature("Feature: f\n@automated\nScenario: s\n"));
/// let value = sink::json::to_value(&inventory.project(), "Run").unwrap();
/// assert_eq!(value["rows"][0]["Automated"], true);
/// assert_eq!(value["checkbox_columns"][0], "Automated");
/// ```
pub fn to_value(sheet: &Sheet, title: &str) -> Result<serde_json::Value, SinkError> {
    Ok(serde_json::to_value(SheetDocument::new(
        sheet,
        title.to_owned(),
    ))?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::{Inventory, scan_feature};

    fn sheet(text: &str) -> Sheet {
        let mut inventory = Inventory::new();
        inventory.absorb(scan_feature(text));
        inventory.project()
    }

    #[test]
    fn document_carries_columns_checkboxes_and_typed_rows() -> Result<(), SinkError> {
        let value = to_value(
            &sheet(concat!(
                "@automated @severity:high\n",
                "Feature: Checkout\n",
                "  @severity:low @smoke @my-feature\n",
                "  Scenario: pay\n",
            )),
            "Checkout Run",
        )?;
        assert_eq!(
            value,
            json!({
                "title": "Checkout Run",
                "columns": ["Feature", "Scenario", "Automated", "Severity", "Smoke", "My-feature"],
                "checkbox_columns": ["Automated", "Smoke"],
                "rows": [{
                    "Feature": "Checkout",
                    "Scenario": "pay",
                    "Automated": true,
                    "Severity": "Low",
                    "Smoke": true,
                    "My-feature": true,
                }],
            })
        );
        Ok(())
    }

    #[test]
    fn row_keys_follow_column_order() -> Result<(), SinkError> {
        let mut buffer = Vec::new();
        write(
            &mut buffer,
            &sheet("Feature: f\n@zeta @alpha\nScenario: s\n"),
            "t",
        )?;
        let text = String::from_utf8_lossy(&buffer);
        let feature = text.find("\"Feature\": \"f\"");
        let alpha = text.find("\"Alpha\": true");
        let zeta = text.find("\"Zeta\": true");
        assert!(feature < alpha && alpha < zeta, "unexpected key order in {text}");
        assert!(feature.is_some());
        Ok(())
    }

    #[test]
    fn empty_sheet_has_no_rows_or_checkboxes() -> Result<(), SinkError> {
        let value = to_value(&sheet(""), "Empty")?;
        assert_eq!(value.get("rows"), Some(&Value::Array(Vec::new())));
        assert_eq!(value.get("checkbox_columns"), Some(&Value::Array(Vec::new())));
        Ok(())
    }

    #[rstest]
    #[case("cucumber_scenarios", "Cucumber Scenarios")]
    #[case("regression", "Regression")]
    #[case("__double__underscore", "  Double  Underscore")]
    #[case("smoke_", "Smoke ")]
    #[case("nightly run_v2", "Nightly Run V2")]
    #[case("", "")]
    fn derives_titles(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(title_from_base_name(base), expected);
    }
}
