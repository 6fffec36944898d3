//! Row outcome classification and run reporting.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::workbook::{colors, CellValue, Fill};

/// Outcome of a single executed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// The condition evaluated to `true`.
    Pass,
    /// The condition evaluated to `false`.
    Fail,
    /// The action could not be resolved or raised.
    Error,
    /// The condition failed to evaluate or produced a non-boolean.
    Indeterminate,
    /// No condition was given.
    Unset,
}

impl Classification {
    /// Fill applied to the Result cell, if any.
    pub fn fill(&self) -> Option<Fill> {
        let argb = match self {
            Classification::Pass => colors::PASS,
            Classification::Fail => colors::FAIL,
            Classification::Error => colors::ERROR,
            Classification::Indeterminate => colors::INDETERMINATE,
            Classification::Unset => return None,
        };
        Some(Fill::new(argb))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Pass => write!(f, "pass"),
            Classification::Fail => write!(f, "fail"),
            Classification::Error => write!(f, "error"),
            Classification::Indeterminate => write!(f, "indeterminate"),
            Classification::Unset => write!(f, "unset"),
        }
    }
}

/// What happened to one executed row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOutcome {
    pub row: u32,
    pub action: String,
    pub classification: Classification,
    pub result: String,
}

/// Summary of a run over one tab.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Tab that was executed.
    pub tab: String,

    /// Every row in the configured range, in order.
    pub visited: Vec<u32>,

    /// Rows skipped by flag or missing action.
    pub skipped: Vec<u32>,

    /// Executed rows, in order.
    pub outcomes: Vec<RowOutcome>,

    /// Path of the saved results copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
}

impl RunReport {
    pub fn new(tab: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, row: u32, action: &str, classification: Classification, result: &CellValue) {
        self.outcomes.push(RowOutcome {
            row,
            action: action.to_string(),
            classification,
            result: result.to_string(),
        });
    }

    /// Number of executed rows with the given classification.
    pub fn count(&self, classification: Classification) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.classification == classification)
            .count()
    }

    pub fn outcome(&self, row: u32) -> Option<&RowOutcome> {
        self.outcomes.iter().find(|o| o.row == row)
    }
}
