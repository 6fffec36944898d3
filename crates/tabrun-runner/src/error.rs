//! Run-level error types.
//!
//! Everything here aborts a run. Failures of individual rows never surface as
//! errors; they are written into the row's Result cell instead.

use thiserror::Error;

use crate::workbook::{ParseCellRefError, StoreError};

/// Fatal errors raised by the execution engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required column header is missing.
    #[error("Schema error: required column '{column}' not found in header row {header_row}")]
    Schema { column: String, header_row: u32 },

    /// The row range configuration cells are missing or malformed.
    #[error("Range error: {0}")]
    Range(String),

    /// The requested tab does not exist.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The workbook could not be loaded or saved.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while building the runner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected a positive integer")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Invalid value for {key}: {source}")]
    InvalidCellRef {
        key: &'static str,
        #[source]
        source: ParseCellRefError,
    },
}
