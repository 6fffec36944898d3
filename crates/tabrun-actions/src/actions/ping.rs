//! Network reachability via the system `ping` binary.

use async_trait::async_trait;
use tokio::process::Command;

use crate::args::Args;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::registry::Action;

/// `ping(host)`: send a single echo request and return ping's output.
pub struct PingAction {
    program: String,
}

impl PingAction {
    pub fn new() -> Self {
        Self {
            program: "ping".to_string(),
        }
    }

    /// Use a different executable, mostly useful for tests.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn validate_host(host: &str) -> Result<(), ActionError> {
        if host.is_empty() {
            return Err(ActionError::InvalidArgument("host must not be empty".to_string()));
        }
        if host.starts_with('-') || host.chars().any(char::is_whitespace) {
            return Err(ActionError::InvalidArgument(format!("invalid host '{}'", host)));
        }
        Ok(())
    }
}

impl Default for PingAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for PingAction {
    fn name(&self) -> &'static str {
        "ping"
    }

    async fn invoke(
        &self,
        args: &[String],
        _ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(1)?;
        let host = args.required(0, "host")?;
        Self::validate_host(host)?;

        tracing::debug!(program = %self.program, host = %host, "Spawning ping");

        let output = Command::new(&self.program)
            .arg("-c")
            .arg("1")
            .arg(host)
            .output()
            .await
            .map_err(|e| ActionError::Process(format!("Failed to spawn {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            let detail = if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() };
            return Err(ActionError::Process(format!(
                "Command exited with code {}: {}",
                exit_code, detail
            )));
        }

        Ok(serde_json::Value::String(stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host() {
        assert!(PingAction::validate_host("example.com").is_ok());
        assert!(PingAction::validate_host("").is_err());
        assert!(PingAction::validate_host("-f").is_err());
        assert!(PingAction::validate_host("a b").is_err());
    }

    #[tokio::test]
    async fn test_ping_requires_host() {
        let mut ctx = ActionContext::new();
        let err = PingAction::new().invoke(&[], &mut ctx).await.unwrap_err();
        assert!(matches!(err, ActionError::MissingArgument { name: "host", .. }));
    }

    #[tokio::test]
    async fn test_ping_missing_program() {
        let mut ctx = ActionContext::new();
        let action = PingAction::with_program("tabrun-no-such-ping-binary");
        let err = action
            .invoke(&["localhost".to_string()], &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Process(_)));
    }
}
