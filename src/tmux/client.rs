use std::path::Path;
use std::sync::Arc;

use super::executor::{CommandOutput, CommandRunner, ProcessExecutor};
use super::Session;
use crate::error::{Error, OperationKind, Result};
use crate::outcome::OperationOutcome;

/// Field format requested from `list-sessions`; tmux never allows ':' in session names
const LIST_FORMAT: &str = "#{session_name}:#{session_windows}:#{session_attached}";

/// stderr fragments that mean "nothing to list" rather than a failure
const NO_SESSIONS_MARKERS: [&str; 3] = ["no server running", "no sessions", "error connecting to"];

/// Client for interacting with tmux via CLI
pub struct TmuxClient<R = ProcessExecutor> {
    /// Path to tmux binary
    tmux_path: String,
    /// Env var set by tmux inside attached clients
    attach_marker: String,
    runner: Arc<R>,
}

impl<R> Clone for TmuxClient<R> {
    fn clone(&self) -> Self {
        Self {
            tmux_path: self.tmux_path.clone(),
            attach_marker: self.attach_marker.clone(),
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<R: CommandRunner> TmuxClient<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            tmux_path: "tmux".to_string(),
            attach_marker: "TMUX".to_string(),
            runner: Arc::new(runner),
        }
    }

    pub fn set_tmux_path(&mut self, tmux_path: impl Into<String>) {
        self.tmux_path = tmux_path.into();
    }

    pub fn set_attach_marker(&mut self, marker: impl Into<String>) {
        self.attach_marker = marker.into();
    }

    async fn tmux(&self, args: &[&str]) -> Result<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(&self.tmux_path, &args).await
    }

    /// Whether this process runs inside a tmux client. Read on every call.
    pub fn inside_multiplexer(&self) -> bool {
        std::env::var_os(&self.attach_marker).is_some_and(|v| !v.is_empty())
    }

    /// List all tmux sessions
    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let output = self.tmux(&["list-sessions", "-F", LIST_FORMAT]).await?;

        if !output.success() {
            if NO_SESSIONS_MARKERS.iter().any(|m| output.stderr.contains(m)) {
                return Ok(Vec::new());
            }
            return Err(Error::operation(OperationKind::ListFailed, output.diagnostic()));
        }

        Ok(parse_session_listing(&output.stdout))
    }

    /// Check for a session by exact name
    pub async fn has_session(&self, name: &str) -> Result<bool> {
        let target = exact_target(name);
        let output = self.tmux(&["has-session", "-t", &target]).await?;
        Ok(output.success())
    }

    /// Create a detached session rooted at `path`
    pub async fn create(&self, name: &str, path: &Path) -> Result<Session> {
        let path_arg = path.to_string_lossy();
        let output = self
            .tmux(&["new-session", "-d", "-s", name, "-c", &path_arg])
            .await?;

        if !output.success() {
            return Err(Error::operation(
                OperationKind::CreateFailed,
                format!("could not create '{}': {}", name, output.diagnostic()),
            ));
        }
        tracing::info!(session = name, path = %path.display(), "Created session");

        // Get the session info; the session exists now, so only a launch failure is an error
        let sessions = match self.list_sessions().await {
            Ok(sessions) => sessions,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::debug!(session = name, "Listing after create failed: {}", e);
                Vec::new()
            }
        };
        let listed = sessions.len();
        Ok(sessions
            .into_iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| {
                tracing::debug!(session = name, "Created session missing from listing");
                Session {
                    display_index: listed + 1,
                    ..Session::new(name.to_string(), 1, false)
                }
            }))
    }

    /// Kill a session
    pub async fn delete(&self, name: &str) -> Result<OperationOutcome> {
        let target = exact_target(name);
        let output = self.tmux(&["kill-session", "-t", &target]).await?;

        if !output.success() {
            return Ok(Error::operation(
                OperationKind::DeleteFailed,
                format!("could not delete '{}': {}", name, output.diagnostic()),
            )
            .into());
        }

        tracing::info!(session = name, "Deleted session");
        Ok(OperationOutcome::completed(
            format!("Session '{}' deleted", name),
            None,
        ))
    }

    /// Move to a session: switch the current client, or hand back an attach command
    pub async fn switch(&self, name: &str) -> Result<OperationOutcome> {
        let target = exact_target(name);

        if self.inside_multiplexer() {
            let output = self.tmux(&["switch-client", "-t", &target]).await?;
            if !output.success() {
                return Ok(Error::operation(
                    OperationKind::SwitchFailed,
                    format!("could not switch to '{}': {}", name, output.diagnostic()),
                )
                .into());
            }
            return Ok(OperationOutcome::completed(
                format!("Switched to session '{}'", name),
                None,
            ));
        }

        if !self.has_session(name).await? {
            return Ok(Error::operation(
                OperationKind::SwitchFailed,
                format!("can't find session: {}", name),
            )
            .into());
        }

        Ok(OperationOutcome::ManualAttach {
            message: format!("Not inside tmux; attach to '{}' manually", name),
            command: self.attach_command(name),
        })
    }

    /// Get the command to attach to a session (for external execution)
    pub fn attach_command(&self, name: &str) -> Vec<String> {
        vec![
            self.tmux_path.clone(),
            "attach-session".to_string(),
            "-t".to_string(),
            exact_target(name),
        ]
    }
}

/// `=name` makes tmux match the session name exactly instead of by prefix
fn exact_target(name: &str) -> String {
    format!("={}", name)
}

/// Parse `list-sessions` output, skipping lines that don't fit the format
pub fn parse_session_listing(stdout: &str) -> Vec<Session> {
    stdout
        .lines()
        .filter_map(|line| {
            let parsed = parse_session_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                tracing::debug!(line, "Skipping malformed session line");
            }
            parsed
        })
        .enumerate()
        .map(|(i, session)| Session {
            display_index: i + 1,
            ..session
        })
        .collect()
}

fn parse_session_line(line: &str) -> Option<Session> {
    let mut parts = line.rsplitn(3, ':');
    let attached = parts.next()?;
    let windows = parts.next()?;
    let name = parts.next()?;

    if name.is_empty() {
        return None;
    }
    let window_count: u32 = windows.trim().parse().ok().filter(|n| *n > 0)?;
    let attached_clients: u32 = attached.trim().parse().ok()?;

    Some(Session::new(
        name.to_string(),
        window_count,
        attached_clients > 0,
    ))
}
