//! Numeric actions.

use async_trait::async_trait;

use crate::args::Args;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::registry::Action;

/// `add(a, b)`: sum of two numbers, always returned as a float.
pub struct AddAction;

#[async_trait]
impl Action for AddAction {
    fn name(&self) -> &'static str {
        "add"
    }

    async fn invoke(
        &self,
        args: &[String],
        _ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(2)?;
        let sum = args.float(0, "a")? + args.float(1, "b")?;

        serde_json::Number::from_f64(sum)
            .map(serde_json::Value::Number)
            .ok_or_else(|| ActionError::ExecutionFailed(format!("result {} is not finite", sum)))
    }
}

/// `fibonacci(iters=10)`: the series starting `1, 2` as comma separated text.
pub struct FibonacciAction;

impl FibonacciAction {
    /// Series `1, 2` followed by `iters` further terms.
    pub fn series(iters: i64) -> Result<Vec<u128>, ActionError> {
        let (mut a, mut b): (u128, u128) = (1, 2);
        let mut terms = vec![a, b];

        for _ in 0..iters.max(0) {
            let next = a
                .checked_add(b)
                .ok_or_else(|| ActionError::ExecutionFailed("fibonacci term overflowed".to_string()))?;
            a = b;
            b = next;
            terms.push(b);
        }

        Ok(terms)
    }
}

#[async_trait]
impl Action for FibonacciAction {
    fn name(&self) -> &'static str {
        "fibonacci"
    }

    async fn invoke(
        &self,
        args: &[String],
        _ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(1)?;
        let iters = args.int_or(0, "iters", 10)?;

        let terms: Vec<String> = Self::series(iters)?.iter().map(|t| t.to_string()).collect();
        Ok(serde_json::Value::String(terms.join(", ")))
    }
}
