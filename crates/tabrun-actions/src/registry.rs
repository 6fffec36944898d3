//! Action registry and dispatch.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::ActionContext;
use crate::error::ActionError;

/// A named capability that can be invoked from a spreadsheet row.
///
/// Arguments always arrive as text; each action converts them itself.
#[async_trait]
pub trait Action: Send + Sync {
    /// Returns the name rows use to reference this action.
    fn name(&self) -> &'static str;

    /// Invoke the action with positional text arguments.
    async fn invoke(
        &self,
        args: &[String],
        ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError>;
}

/// Registry of available actions.
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Create a new empty action registry.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action, replacing any action with the same name.
    pub fn register<A: Action + 'static>(&mut self, action: A) {
        let name = action.name().to_string();
        self.actions.insert(name, Arc::new(action));
    }

    /// Get an action by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Resolve an action by name, failing with `NotFound` if absent.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Action>, ActionError> {
        self.get(name)
            .ok_or_else(|| ActionError::NotFound(name.to_string()))
    }

    /// Check if an action is registered.
    pub fn has(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// List all registered action names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve and invoke an action by name.
    pub async fn invoke(
        &self,
        name: &str,
        args: &[String],
        ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let action = self.resolve(name)?;
        action.invoke(args, ctx).await
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAction;

    #[async_trait]
    impl Action for MockAction {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn invoke(
            &self,
            args: &[String],
            _ctx: &mut ActionContext,
        ) -> Result<serde_json::Value, ActionError> {
            Ok(serde_json::json!({ "args": args }))
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = ActionRegistry::new();
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_registry_register() {
        let mut registry = ActionRegistry::new();
        registry.register(MockAction);

        assert!(registry.has("mock"));
        assert!(!registry.has("unknown"));
        assert_eq!(registry.list(), vec!["mock"]);
    }

    #[tokio::test]
    async fn test_registry_invoke() {
        let mut registry = ActionRegistry::new();
        registry.register(MockAction);

        let mut ctx = ActionContext::new();
        let args = vec!["a".to_string(), " b".to_string()];
        let result = registry.invoke("mock", &args, &mut ctx).await.unwrap();
        assert_eq!(result, serde_json::json!({ "args": ["a", " b"] }));
    }

    #[tokio::test]
    async fn test_registry_invoke_not_found() {
        let registry = ActionRegistry::new();
        let mut ctx = ActionContext::new();
        let result = registry.invoke("unknown", &[], &mut ctx).await;
        assert!(matches!(result, Err(ActionError::NotFound(name)) if name == "unknown"));
    }

    #[test]
    fn test_registry_debug_lists_names() {
        let mut registry = ActionRegistry::new();
        registry.register(MockAction);
        assert_eq!(format!("{:?}", registry), "ActionRegistry { actions: [\"mock\"] }");
    }
}
