//! Actions that pass data to later rows through the shared bag.

use async_trait::async_trait;

use crate::args::Args;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::registry::Action;

const DEFAULT_SHARE_KEY: &str = "data_file";

/// `read_file(filename, share_key=data_file)`: load a text file into the bag.
pub struct ReadFileAction;

#[async_trait]
impl Action for ReadFileAction {
    fn name(&self) -> &'static str {
        "read_file"
    }

    async fn invoke(
        &self,
        args: &[String],
        ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(2)?;
        let filename = args.required(0, "filename")?;
        let share_key = args.optional(1, DEFAULT_SHARE_KEY);

        let contents = tokio::fs::read_to_string(filename).await?;
        tracing::debug!(
            filename = %filename,
            share_key = %share_key,
            bytes = contents.len(),
            "Stored file in shared bag"
        );
        ctx.set(share_key, serde_json::Value::String(contents));

        Ok(serde_json::Value::Null)
    }
}

/// `count_occurs(item=*, share_key=data_file)`: count `item` in a shared text.
///
/// `item` is matched verbatim so whitespace can be searched for.
pub struct CountOccursAction;

#[async_trait]
impl Action for CountOccursAction {
    fn name(&self) -> &'static str {
        "count_occurs"
    }

    async fn invoke(
        &self,
        args: &[String],
        ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(2)?;
        let item = args.raw(0).unwrap_or("*");
        let share_key = args.optional(1, DEFAULT_SHARE_KEY);

        if item.is_empty() {
            return Err(ActionError::InvalidArgument(
                "item to count must not be empty".to_string(),
            ));
        }

        let haystack = ctx.get_str(share_key).unwrap_or_default();
        Ok(serde_json::json!(haystack.matches(item).count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_read_then_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a*b**c").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut ctx = ActionContext::new();
        let stored = ReadFileAction.invoke(&args(&[&path]), &mut ctx).await.unwrap();
        assert!(stored.is_null());
        assert_eq!(ctx.get_str("data_file"), Some("a*b**c".to_string()));

        let count = CountOccursAction.invoke(&[], &mut ctx).await.unwrap();
        assert_eq!(count, serde_json::json!(3));
    }

    #[tokio::test]
    async fn test_custom_share_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x-y-z").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut ctx = ActionContext::new();
        ReadFileAction.invoke(&args(&[&path, " notes"]), &mut ctx).await.unwrap();
        assert!(ctx.get("notes").is_some());

        let count = CountOccursAction.invoke(&args(&["-", "notes"]), &mut ctx).await.unwrap();
        assert_eq!(count, serde_json::json!(2));
    }

    #[tokio::test]
    async fn test_count_without_data_is_zero() {
        let mut ctx = ActionContext::new();
        let count = CountOccursAction.invoke(&args(&["a"]), &mut ctx).await.unwrap();
        assert_eq!(count, serde_json::json!(0));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let mut ctx = ActionContext::new();
        let err = ReadFileAction
            .invoke(&args(&["/nonexistent/tabrun/input.txt"]), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Io(_)));
    }
}
