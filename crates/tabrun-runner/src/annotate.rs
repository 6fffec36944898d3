//! Marks a workbook as a results copy.

use crate::workbook::{colors, Fill, Workbook};

/// Paint the results stripe across `row`, columns `1..=columns`, of every sheet.
pub fn apply_results_stripe(workbook: &mut Workbook, row: u32, columns: u32) {
    let fill = Fill::new(colors::STRIPE);
    for sheet in &mut workbook.sheets {
        for column in 1..=columns {
            sheet.set_fill(row, column, fill.clone());
        }
    }
}
