//! Condition evaluation against an action's result.
//!
//! A condition is a Rhai expression over the row's result, bound as both `r`
//! and `result`. Only a boolean settles the row: `true` passes, `false`
//! fails, and anything else, including an evaluation error, is
//! indeterminate.

use rhai::{Dynamic, Engine, Scope};

use super::outcome::Classification;
use crate::workbook::Fill;

/// Names the result is bound to inside a condition.
pub const RESULT_BINDINGS: [&str; 2] = ["r", "result"];

/// Evaluates row conditions in a restricted Rhai engine.
pub struct ConditionEvaluator {
    engine: Engine,
}

impl ConditionEvaluator {
    /// Create an evaluator with a locked-down engine.
    pub fn new() -> Self {
        let mut engine = Engine::new();

        engine.disable_symbol("eval");
        engine.set_max_operations(100_000);
        engine.set_max_call_levels(16);
        engine.set_max_expr_depths(64, 32);
        engine.set_max_string_size(1 << 20);
        engine.set_max_array_size(10_000);
        engine.set_max_map_size(10_000);

        engine.on_print(|msg| tracing::debug!(target: "condition", "{}", msg));
        engine.on_debug(|msg, _, _| tracing::debug!(target: "condition", "{}", msg));

        Self { engine }
    }

    /// Classify `result` against `condition`, returning the fill to apply.
    pub fn evaluate(&self, result: &serde_json::Value, condition: &str) -> (Classification, Option<Fill>) {
        let classification = match self.eval_raw(result, condition) {
            Ok(value) if value.is_bool() => match value.as_bool() {
                Ok(true) => Classification::Pass,
                Ok(false) => Classification::Fail,
                Err(_) => Classification::Indeterminate,
            },
            Ok(value) => {
                tracing::debug!(
                    condition = %condition,
                    value_type = %value.type_name(),
                    "Condition did not produce a boolean"
                );
                Classification::Indeterminate
            }
            Err(e) => {
                tracing::warn!(condition = %condition, error = %e, "Condition evaluation failed");
                Classification::Indeterminate
            }
        };

        (classification, classification.fill())
    }

    /// Evaluate `condition` and return the raw Rhai value.
    pub fn eval_raw(
        &self,
        result: &serde_json::Value,
        condition: &str,
    ) -> Result<Dynamic, Box<rhai::EvalAltResult>> {
        let bound = to_dynamic(result);
        let mut scope = Scope::new();
        for name in RESULT_BINDINGS {
            scope.push_dynamic(name, bound.clone());
        }

        self.engine
            .eval_expression_with_scope::<Dynamic>(&mut scope, condition)
    }
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConditionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionEvaluator")
            .field("bindings", &RESULT_BINDINGS)
            .finish()
    }
}

/// Convert an action result into the value a condition sees.
fn to_dynamic(value: &serde_json::Value) -> Dynamic {
    use serde_json::Value;

    match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Dynamic::from(i),
            // Numbers outside i64 are u64 or f64, both representable as f64.
            None => Dynamic::from(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Dynamic::from(s.clone()),
        Value::Array(items) => Dynamic::from(items.iter().map(to_dynamic).collect::<rhai::Array>()),
        Value::Object(fields) => Dynamic::from(
            fields
                .iter()
                .map(|(k, v)| (k.as_str().into(), to_dynamic(v)))
                .collect::<rhai::Map>(),
        ),
    }
}
