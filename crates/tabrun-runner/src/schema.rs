//! Column schema resolution from the header row.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::workbook::Sheet;

/// Logical column names the engine reads or writes.
pub mod columns {
    pub const SKIP: &str = "Skip";
    pub const ACTION: &str = "Action";
    pub const ARGS: &str = "Args";
    pub const CONDITION: &str = "Condition";
    pub const RUNTIME: &str = "Runtime";
    pub const RESULT: &str = "Result";
}

/// Mapping from header text to 1-based column index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSchema {
    header_row: u32,
    positions: HashMap<String, u32>,
}

impl ColumnSchema {
    /// Scan `header_row` from column 1 to `max_column` inclusive.
    ///
    /// Empty headers are ignored and the last of any duplicates wins. This
    /// never fails; missing names are reported by [`ColumnSchema::require`].
    pub fn resolve(sheet: &Sheet, header_row: u32, max_column: u32) -> Self {
        let mut positions = HashMap::new();

        for column in 1..=max_column {
            let header = sheet.value(header_row, column).to_string();
            let header = header.trim();
            if !header.is_empty() {
                positions.insert(header.to_string(), column);
            }
        }

        Self {
            header_row,
            positions,
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.positions.get(name).copied()
    }

    /// Column of `name`, or a schema error if the header is absent.
    pub fn require(&self, name: &str) -> Result<u32, EngineError> {
        self.get(name).ok_or_else(|| EngineError::Schema {
            column: name.to_string(),
            header_row: self.header_row,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Resolved positions of the columns the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskColumns {
    pub skip: u32,
    pub action: u32,
    pub args: u32,
    pub condition: Option<u32>,
    pub runtime: u32,
    pub result: u32,
}

impl TaskColumns {
    /// Look up every required column up front; `Condition` is optional.
    pub fn from_schema(schema: &ColumnSchema) -> Result<Self, EngineError> {
        Ok(Self {
            skip: schema.require(columns::SKIP)?,
            action: schema.require(columns::ACTION)?,
            args: schema.require(columns::ARGS)?,
            condition: schema.get(columns::CONDITION),
            runtime: schema.require(columns::RUNTIME)?,
            result: schema.require(columns::RESULT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_sheet(headers: &[(u32, &str)]) -> Sheet {
        let mut sheet = Sheet::new("Activities");
        for (column, name) in headers {
            sheet.set_value(6, *column, *name);
        }
        sheet
    }

    fn standard_sheet() -> Sheet {
        header_sheet(&[
            (2, "Skip"),
            (3, "Action"),
            (4, "Args"),
            (5, "Condition"),
            (6, "Runtime"),
            (7, "Result"),
        ])
    }

    #[test]
    fn test_resolve_schema() {
        let schema = ColumnSchema::resolve(&standard_sheet(), 6, 20);
        assert_eq!(schema.len(), 6);
        assert_eq!(schema.get("Skip"), Some(2));
        assert_eq!(schema.get("Result"), Some(7));
        assert_eq!(schema.get("Notes"), None);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let sheet = standard_sheet();
        let first = ColumnSchema::resolve(&sheet, 6, 20);
        let second = ColumnSchema::resolve(&sheet, 6, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_respects_max_column() {
        let sheet = header_sheet(&[(1, "Skip"), (21, "Result")]);
        let schema = ColumnSchema::resolve(&sheet, 6, 20);
        assert_eq!(schema.get("Skip"), Some(1));
        assert_eq!(schema.get("Result"), None);
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let sheet = header_sheet(&[(2, "Result"), (9, "Result"), (4, "  ")]);
        let schema = ColumnSchema::resolve(&sheet, 6, 20);
        assert_eq!(schema.get("Result"), Some(9));
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_task_columns() {
        let schema = ColumnSchema::resolve(&standard_sheet(), 6, 20);
        let columns = TaskColumns::from_schema(&schema).unwrap();
        assert_eq!(columns.action, 3);
        assert_eq!(columns.condition, Some(5));
    }

    #[test]
    fn test_task_columns_condition_optional() {
        let sheet = header_sheet(&[
            (2, "Skip"),
            (3, "Action"),
            (4, "Args"),
            (6, "Runtime"),
            (7, "Result"),
        ]);
        let schema = ColumnSchema::resolve(&sheet, 6, 20);
        let columns = TaskColumns::from_schema(&schema).unwrap();
        assert_eq!(columns.condition, None);
    }

    #[test]
    fn test_task_columns_missing_required() {
        let sheet = header_sheet(&[(2, "Skip"), (3, "Action")]);
        let schema = ColumnSchema::resolve(&sheet, 6, 20);
        let err = TaskColumns::from_schema(&schema).unwrap_err();
        assert!(matches!(err, EngineError::Schema { column, header_row: 6 } if column == "Args"));
    }
}
