//! In-memory tabular document model.
//!
//! A workbook is an ordered list of named sheets. Each sheet is a sparse grid
//! of cells addressed by 1-based `(row, column)`; every cell holds a value and
//! an optional background fill.

mod address;
mod store;

pub use address::{CellRef, ParseCellRefError};
pub use store::{FileStore, StoreError, WorkbookStore};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ARGB fill colours used to annotate results.
pub mod colors {
    pub const PASS: &str = "FF00B050";
    pub const FAIL: &str = "FFFF0000";
    pub const ERROR: &str = "FFFFC000";
    pub const INDETERMINATE: &str = "FF7030A0";
    pub const STRIPE: &str = "50FFFF00";
}

/// Value stored in a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text form where an empty cell reads as `"None"`.
    pub fn display_or_none(&self) -> String {
        match self {
            CellValue::Empty => "None".to_string(),
            other => other.to_string(),
        }
    }

    /// Integer view of the cell, accepting integral floats and integral numeric text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            CellValue::Text(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .and_then(|f| CellValue::Float(f).as_integer())
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(n) => write!(f, "{}", n),
            // Debug keeps the fractional part, so 5.0 stays "5.0".
            CellValue::Float(x) => write!(f, "{:?}", x),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n
                    .as_f64()
                    .map(CellValue::Float)
                    .unwrap_or_else(|| CellValue::Text(n.to_string())),
            },
            serde_json::Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// Background fill of a cell, as an ARGB hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fill(String);

impl Fill {
    pub fn new(argb: impl Into<String>) -> Self {
        Fill(argb.into())
    }

    pub fn argb(&self) -> &str {
        &self.0
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: CellValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
}

/// A named sheet of cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,

    /// Row number -> column number -> cell.
    #[serde(default)]
    pub cells: BTreeMap<u32, BTreeMap<u32, Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.cells.get(&row).and_then(|r| r.get(&column))
    }

    fn cell_mut(&mut self, row: u32, column: u32) -> &mut Cell {
        self.cells.entry(row).or_default().entry(column).or_default()
    }

    /// Value at `(row, column)`, `Empty` if the cell does not exist.
    pub fn value(&self, row: u32, column: u32) -> &CellValue {
        self.cell(row, column).map(|c| &c.value).unwrap_or(&EMPTY)
    }

    pub fn set_value(&mut self, row: u32, column: u32, value: impl Into<CellValue>) {
        self.cell_mut(row, column).value = value.into();
    }

    pub fn fill(&self, row: u32, column: u32) -> Option<&Fill> {
        self.cell(row, column).and_then(|c| c.fill.as_ref())
    }

    pub fn set_fill(&mut self, row: u32, column: u32, fill: Fill) {
        self.cell_mut(row, column).fill = Some(fill);
    }

    /// Remove any fill from an existing cell.
    pub fn clear_fill(&mut self, row: u32, column: u32) {
        if let Some(cell) = self.cells.get_mut(&row).and_then(|r| r.get_mut(&column)) {
            cell.fill = None;
        }
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Float(5.0).to_string(), "5.0");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Int(7).to_string(), "7");
        assert_eq!(CellValue::text("add").to_string(), "add");
        assert_eq!(CellValue::Empty.display_or_none(), "None");
    }

    #[test]
    fn test_cell_value_as_integer() {
        assert_eq!(CellValue::Int(7).as_integer(), Some(7));
        assert_eq!(CellValue::Float(7.0).as_integer(), Some(7));
        assert_eq!(CellValue::Float(7.5).as_integer(), None);
        assert_eq!(CellValue::text(" 12 ").as_integer(), Some(12));
        assert_eq!(CellValue::text("twelve").as_integer(), None);
        assert_eq!(CellValue::text("7.0").as_integer(), Some(7));
        assert_eq!(CellValue::text("7.5").as_integer(), None);
        assert_eq!(CellValue::text("NaN").as_integer(), None);
        assert_eq!(CellValue::Empty.as_integer(), None);
    }

    #[test]
    fn test_cell_value_from_json() {
        assert_eq!(CellValue::from(serde_json::json!(null)), CellValue::Empty);
        assert_eq!(CellValue::from(serde_json::json!(5.0)), CellValue::Float(5.0));
        assert_eq!(CellValue::from(serde_json::json!(200)), CellValue::Int(200));
        assert_eq!(CellValue::from(serde_json::json!("ok")), CellValue::text("ok"));
        assert_eq!(
            CellValue::from(serde_json::json!([1, 2])),
            CellValue::text("[1,2]")
        );
    }

    #[test]
    fn test_sheet_cells() {
        let mut sheet = Sheet::new("Activities");
        assert_eq!(sheet.value(3, 3), &CellValue::Empty);

        sheet.set_value(3, 3, 10_i64);
        sheet.set_fill(3, 4, Fill::new(colors::PASS));

        assert_eq!(sheet.value(3, 3), &CellValue::Int(10));
        assert_eq!(sheet.value(3, 4), &CellValue::Empty);
        assert_eq!(sheet.fill(3, 4).map(Fill::argb), Some(colors::PASS));

        sheet.clear_fill(3, 4);
        sheet.clear_fill(9, 9);
        assert_eq!(sheet.fill(3, 4), None);
        assert!(sheet.cell(9, 9).is_none());
    }

    #[test]
    fn test_workbook_sheets() {
        let mut workbook = Workbook::new();
        workbook.add_sheet(Sheet::new("Activities"));
        workbook.add_sheet(Sheet::new("Notes"));

        assert_eq!(workbook.sheet_names(), vec!["Activities", "Notes"]);
        assert!(workbook.sheet("Notes").is_some());
        assert!(workbook.sheet_mut("Missing").is_none());
    }

    #[test]
    fn test_cell_serialization() {
        let cell = Cell {
            value: CellValue::Float(5.0),
            fill: Some(Fill::new(colors::PASS)),
        };
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r#"{"value":5.0,"fill":"FF00B050"}"#);

        let parsed: Cell = serde_json::from_str(r#"{"value":"add"}"#).unwrap();
        assert_eq!(parsed.value, CellValue::text("add"));
        assert!(parsed.fill.is_none());
    }
}
