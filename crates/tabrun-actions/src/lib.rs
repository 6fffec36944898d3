//! tabrun action library
//!
//! Named actions invoked from spreadsheet rows.
//!
//! This crate provides:
//! - Action trait and registry for dispatch by name
//! - Shared bag for passing data between rows of a run
//! - Built-in actions: add, fibonacci, ping, url_status_code,
//!   website_headings, read_file, count_occurs

pub mod actions;
pub mod args;
pub mod context;
pub mod error;
pub mod registry;

pub use args::Args;
pub use context::ActionContext;
pub use error::ActionError;
pub use registry::{Action, ActionRegistry};
