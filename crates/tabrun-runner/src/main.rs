//! tabrun binary.
//!
//! Runs a tab of a workbook and saves an annotated results copy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabrun_actions::actions::create_default_registry;
use tabrun_runner::workbook::CellRef;
use tabrun_runner::{Classification, Runner, RunnerConfig};

#[derive(Parser)]
#[command(name = "tabrun")]
#[command(version, about = "Spreadsheet-driven action runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the rows of a workbook tab and save the results copy
    /// Examples:
    ///     tabrun run plans/smoke.json
    ///     tabrun run plans/smoke.yaml --tab Regression --results-dir out
    #[command(verbatim_doc_comment)]
    Run {
        /// Workbook file (.json, .yaml or .yml)
        file: PathBuf,

        /// Tab to execute
        #[arg(long)]
        tab: Option<String>,

        /// Directory receiving the results copy
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Row holding the column headers
        #[arg(long)]
        header_row: Option<u32>,

        /// Last column scanned for headers
        #[arg(long)]
        max_column: Option<u32>,

        /// Cell holding the first row to execute
        #[arg(long)]
        start_cell: Option<CellRef>,

        /// Cell holding the last row to execute
        #[arg(long)]
        end_cell: Option<CellRef>,
    },

    /// List registered actions
    Actions,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tabrun_runner=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let registry = Arc::new(create_default_registry());

    match cli.command {
        Commands::Actions => {
            for name in registry.list() {
                println!("{}", name);
            }
        }
        Commands::Run {
            file,
            tab,
            results_dir,
            header_row,
            max_column,
            start_cell,
            end_cell,
        } => {
            let mut config = RunnerConfig::from_env().context("Invalid runner configuration")?;
            if let Some(dir) = results_dir {
                config.results_dir = dir;
            }
            if let Some(row) = header_row {
                config.header_row = row;
            }
            if let Some(column) = max_column {
                config.max_column = column;
            }
            if let Some(cell) = start_cell {
                config.start_row_cell = cell;
            }
            if let Some(cell) = end_cell {
                config.end_row_cell = cell;
            }
            let tab = tab.unwrap_or_else(|| config.tab.clone());

            tracing::info!(
                file = %file.display(),
                tab = %tab,
                results_dir = %config.results_dir.display(),
                "Runner configuration loaded"
            );

            let runner = Runner::new(registry, config);
            let report = runner
                .run(&file, &tab)
                .await
                .with_context(|| format!("Failed to run '{}' in {}", tab, file.display()))?;

            tracing::info!(
                executed = report.outcomes.len(),
                skipped = report.skipped.len(),
                pass = report.count(Classification::Pass),
                fail = report.count(Classification::Fail),
                error = report.count(Classification::Error),
                "Run complete"
            );

            if let Some(artifact) = report.artifact {
                println!("{}", artifact.display());
            }
        }
    }

    Ok(())
}
