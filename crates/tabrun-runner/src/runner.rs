//! Load, execute, annotate and save one workbook.

use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tabrun_actions::{ActionContext, ActionRegistry};

use crate::annotate::apply_results_stripe;
use crate::config::RunnerConfig;
use crate::error::EngineError;
use crate::executor::{Engine, RunReport};
use crate::persist::persist;
use crate::workbook::{FileStore, Workbook, WorkbookStore};

/// Drives a complete run from input file to results artifact.
pub struct Runner<S: WorkbookStore = FileStore> {
    engine: Engine,
    store: S,
}

impl Runner<FileStore> {
    /// Create a runner reading and writing workbook files.
    pub fn new(registry: Arc<ActionRegistry>, config: RunnerConfig) -> Self {
        Self::with_store(Engine::new(registry, config), FileStore)
    }
}

impl<S: WorkbookStore> Runner<S> {
    pub fn with_store(engine: Engine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run `tab` of the workbook at `input` and save an annotated copy.
    ///
    /// The input file is never modified. Nothing is saved if the run aborts.
    pub async fn run(&self, input: &Path, tab: &str) -> Result<RunReport, EngineError> {
        tracing::info!(input = %input.display(), tab = %tab, "Loading workbook");
        let mut workbook = self.store.load(input)?;
        self.run_workbook(&mut workbook, input, tab).await
    }

    /// Run `tab` of an already loaded workbook; `input` names the artifact.
    pub async fn run_workbook(
        &self,
        workbook: &mut Workbook,
        input: &Path,
        tab: &str,
    ) -> Result<RunReport, EngineError> {
        let config = self.engine.config();
        let mut ctx = ActionContext::new();

        let mut report = self.engine.execute(workbook, tab, &mut ctx).await?;

        apply_results_stripe(workbook, config.stripe_row, config.stripe_columns);
        let artifact = persist(&self.store, workbook, input, &config.results_dir, Local::now())?;

        report.artifact = Some(artifact);
        Ok(report)
    }
}
