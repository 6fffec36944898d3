//! Row execution module.

mod condition;
mod engine;
mod outcome;
mod row;

pub use condition::{ConditionEvaluator, RESULT_BINDINGS};
pub use engine::{Engine, RowRange, RUNTIME_FORMAT};
pub use outcome::{Classification, RowOutcome, RunReport};
pub use row::{split_args, RowTask};
