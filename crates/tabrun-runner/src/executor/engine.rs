//! Row-by-row execution of a tab.

use chrono::{DateTime, Local};
use std::sync::Arc;
use tabrun_actions::{ActionContext, ActionRegistry};

use super::condition::ConditionEvaluator;
use super::outcome::{Classification, RunReport};
use super::row::RowTask;
use crate::config::RunnerConfig;
use crate::error::EngineError;
use crate::schema::{ColumnSchema, TaskColumns};
use crate::workbook::{CellRef, CellValue, Sheet, Workbook};

/// Format of the Runtime stamp written before each action runs.
pub const RUNTIME_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Inclusive range of rows to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: u32,
    pub end: u32,
}

impl RowRange {
    /// Read the range from the two configuration cells.
    pub fn read(sheet: &Sheet, start_cell: CellRef, end_cell: CellRef) -> Result<Self, EngineError> {
        let start = read_row_number(sheet, start_cell, "start")?;
        let end = read_row_number(sheet, end_cell, "end")?;

        if start > end {
            return Err(EngineError::Range(format!(
                "start row {} (cell {}) is after end row {} (cell {})",
                start, start_cell, end, end_cell
            )));
        }

        Ok(Self { start, end })
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

fn read_row_number(sheet: &Sheet, cell: CellRef, label: &str) -> Result<u32, EngineError> {
    let value = sheet.value(cell.row, cell.column);
    if value.is_empty() {
        return Err(EngineError::Range(format!("{} row cell {} is empty", label, cell)));
    }

    let number = value.as_integer().ok_or_else(|| {
        EngineError::Range(format!(
            "{} row cell {} holds '{}', expected an integer",
            label, cell, value
        ))
    })?;

    u32::try_from(number)
        .ok()
        .filter(|row| *row >= 1)
        .ok_or_else(|| {
            EngineError::Range(format!(
                "{} row cell {} holds {}, expected a row number of at least 1",
                label, cell, number
            ))
        })
}

/// Executes the action rows of a tab against an action registry.
pub struct Engine {
    registry: Arc<ActionRegistry>,
    evaluator: ConditionEvaluator,
    config: RunnerConfig,
    clock: Clock,
}

impl Engine {
    /// Create an engine using the local wall clock.
    pub fn new(registry: Arc<ActionRegistry>, config: RunnerConfig) -> Self {
        Self {
            registry,
            evaluator: ConditionEvaluator::new(),
            config,
            clock: Box::new(Local::now),
        }
    }

    /// Replace the clock used for Runtime stamps.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Execute every row of `tab` in the configured range, in order.
    ///
    /// Schema and range problems abort before any row is touched. Once rows
    /// start running, a failing action only affects its own row: the error
    /// text becomes the row's result and the loop carries on.
    pub async fn execute(
        &self,
        workbook: &mut Workbook,
        tab: &str,
        ctx: &mut ActionContext,
    ) -> Result<RunReport, EngineError> {
        if workbook.sheet(tab).is_none() {
            tracing::warn!(tab = %tab, available = ?workbook.sheet_names(), "Tab not found");
        }
        let sheet = workbook
            .sheet_mut(tab)
            .ok_or_else(|| EngineError::SheetNotFound(tab.to_string()))?;

        let schema = ColumnSchema::resolve(sheet, self.config.header_row, self.config.max_column);
        let columns = TaskColumns::from_schema(&schema)?;
        let range = RowRange::read(sheet, self.config.start_row_cell, self.config.end_row_cell)?;

        tracing::info!(
            tab = %tab,
            start_row = range.start,
            end_row = range.end,
            "Executing rows"
        );

        let mut report = RunReport::new(tab);

        for row in range.rows() {
            report.visited.push(row);

            let task = RowTask::read(sheet, row, &columns);
            if task.skip {
                tracing::debug!(row, action = %task.action, "Skipping row");
                report.skipped.push(row);
                continue;
            }

            let stamp = (self.clock)().format(RUNTIME_FORMAT).to_string();
            sheet.set_value(row, columns.runtime, CellValue::Text(stamp));

            let (result, classification) = self.run_task(&task, ctx).await;

            sheet.set_value(row, columns.result, result.clone());
            match classification.fill() {
                Some(fill) => sheet.set_fill(row, columns.result, fill),
                None => sheet.clear_fill(row, columns.result),
            }

            tracing::debug!(
                row,
                action = %task.action,
                classification = %classification,
                "Row complete"
            );
            report.record(row, &task.action, classification, &result);
        }

        tracing::info!(
            tab = %tab,
            executed = report.outcomes.len(),
            skipped = report.skipped.len(),
            pass = report.count(Classification::Pass),
            fail = report.count(Classification::Fail),
            error = report.count(Classification::Error),
            indeterminate = report.count(Classification::Indeterminate),
            "Rows executed"
        );

        Ok(report)
    }

    /// Invoke one row's action and classify its result.
    async fn run_task(&self, task: &RowTask, ctx: &mut ActionContext) -> (CellValue, Classification) {
        let args = task.args();
        ctx.enter(task.row, &task.action);

        match self.registry.invoke(&task.action, &args, ctx).await {
            Ok(value) => {
                let classification = match task.condition.as_deref() {
                    Some(condition) => self.evaluator.evaluate(&value, condition).0,
                    None => Classification::Unset,
                };
                (CellValue::from(value), classification)
            }
            Err(e) => {
                tracing::warn!(row = task.row, action = %task.action, error = %e, "Action failed");
                let message = format!(
                    "Error - row {}, action '{}': {}",
                    task.row, task.action, e
                );
                (CellValue::Text(message), Classification::Error)
            }
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
