//! Shared state handed to every action during a run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keyed store threaded through every action invocation of a run.
///
/// Actions use the bag to pass data to later rows, e.g. `read_file` stores
/// file contents that `count_occurs` reads back. Rows run strictly in order,
/// so the bag is only ever borrowed by one action at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionContext {
    /// Values shared between actions.
    #[serde(default)]
    pub shared: HashMap<String, serde_json::Value>,

    /// Row currently being executed.
    #[serde(default)]
    pub row: u32,

    /// Action currently being executed.
    #[serde(default)]
    pub action: String,
}

impl ActionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which row and action are about to run.
    pub fn enter(&mut self, row: u32, action: impl Into<String>) {
        self.row = row;
        self.action = action.into();
    }

    /// Store a shared value, returning the previous one.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.shared.insert(key.into(), value)
    }

    /// Get a shared value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.shared.get(key)
    }

    /// Get a shared value rendered as text.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.shared.get(key).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => v.to_string(),
        })
    }

    /// Remove a shared value.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.shared.remove(key)
    }

    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }
}
