//! tabrun runner
//!
//! Executes spreadsheet rows as actions and records their results.
//!
//! This crate provides:
//! - Workbook model and JSON/YAML file store
//! - Header-driven column schema and row range resolution
//! - Row executor with sandboxed condition evaluation
//! - Results annotation and timestamped artifact persistence

pub mod annotate;
pub mod config;
pub mod error;
pub mod executor;
pub mod persist;
pub mod runner;
pub mod schema;
pub mod workbook;

pub use config::RunnerConfig;
pub use error::{ConfigError, EngineError};
pub use executor::{Classification, Engine, RunReport};
pub use runner::Runner;
pub use workbook::{FileStore, Workbook, WorkbookStore};
