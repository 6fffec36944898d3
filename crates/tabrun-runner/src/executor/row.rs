//! Row task reading and argument marshalling.

use crate::schema::TaskColumns;
use crate::workbook::Sheet;

/// One row's instructions, read fresh from the sheet each iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTask {
    pub row: u32,
    pub skip: bool,
    pub action: String,
    pub raw_args: Option<String>,
    pub condition: Option<String>,
}

impl RowTask {
    /// Read row `row` using the resolved columns.
    ///
    /// The Skip cell counts when its text starts with `y` in any case. An
    /// empty Action cell reads as `"None"`, which skips the row, as does
    /// blank action text.
    pub fn read(sheet: &Sheet, row: u32, columns: &TaskColumns) -> Self {
        let skip_flag = sheet
            .value(row, columns.skip)
            .display_or_none()
            .to_lowercase();
        let action = sheet
            .value(row, columns.action)
            .display_or_none()
            .trim()
            .to_string();

        let skip = skip_flag.starts_with('y') || action == "None" || action.is_empty();

        let raw_args = non_empty_text(sheet, row, columns.args);
        let condition = columns
            .condition
            .and_then(|column| non_empty_text(sheet, row, column))
            .filter(|text| !text.trim().is_empty());

        Self {
            row,
            skip,
            action,
            raw_args,
            condition,
        }
    }

    /// Positional arguments for the action.
    pub fn args(&self) -> Vec<String> {
        self.raw_args.as_deref().map(split_args).unwrap_or_default()
    }
}

fn non_empty_text(sheet: &Sheet, row: u32, column: u32) -> Option<String> {
    let value = sheet.value(row, column);
    if value.is_empty() {
        return None;
    }
    let text = value.to_string();
    (!text.is_empty()).then_some(text)
}

/// Split a raw Args cell on `,` without trimming the pieces.
pub fn split_args(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
