use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Captured result of one external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `-1` when the process was terminated by a signal
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Diagnostic text for error messages, falling back to the exit code
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exited with status {}", self.exit_code)
        } else {
            stderr.to_string()
        }
    }
}

/// Runs a program with a discrete argument vector
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Spawns real processes; never goes through a shell
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl CommandRunner for ProcessExecutor {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, "Running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| Error::Execution {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_execution_error() {
        let err = ProcessExecutor
            .run("sessionizer-definitely-not-a-real-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let args = vec!["$(whoami); echo pwned".to_string()];
        let output = ProcessExecutor.run("echo", &args).await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "$(whoami); echo pwned");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_captured() {
        let output = ProcessExecutor.run("false", &[]).await.unwrap();
        assert!(!output.success());
        assert_eq!(output.diagnostic(), format!("exited with status {}", output.exit_code));
    }
}
