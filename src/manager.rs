use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{expand_home, Config, ConfigOptions};
use crate::error::{Error, Result};
use crate::outcome::OperationOutcome;
use crate::scanner::{self, CandidateDirectory};
use crate::tmux::{CommandRunner, ProcessExecutor, Session, TmuxClient};

static RE_HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Map a requested directory name onto `[alphanumeric _ -]`, collapsing and trimming hyphens
pub fn sanitize_name(requested: &str) -> Option<String> {
    let mapped: String = requested
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let collapsed = RE_HYPHEN_RUN.replace_all(&mapped, "-");
    let trimmed = collapsed.trim_matches('-');

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Session name for a directory; tmux rewrites '.' and ':' so do it up front
pub fn session_name_for(basename: &str) -> String {
    basename.replace(['.', ':'], "_")
}

/// Front-end facing API over tmux sessions and project directories
pub struct SessionManager<R = ProcessExecutor> {
    config: Config,
    client: TmuxClient<R>,
}

impl<R> Clone for SessionManager<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
        }
    }
}

impl SessionManager<ProcessExecutor> {
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, ProcessExecutor)
    }
}

impl<R: CommandRunner> SessionManager<R> {
    pub fn with_runner(config: Config, runner: R) -> Self {
        let mut client = TmuxClient::with_runner(runner);
        client.set_tmux_path(&config.multiplexer_command);
        client.set_attach_marker(&config.attach_marker);
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration with defaults overridden by `options`
    pub fn configure(&mut self, options: ConfigOptions) {
        self.config = Config::default().merged(options);
        self.client.set_tmux_path(&self.config.multiplexer_command);
        self.client.set_attach_marker(&self.config.attach_marker);
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.client.list_sessions().await
    }

    /// Scan the configured search paths; blocking filesystem work
    pub fn list_creation_candidates(&self) -> Vec<CandidateDirectory> {
        scanner::scan(&self.config.search_paths, self.config.max_scan_depth)
    }

    pub async fn activate(&self, name: &str) -> Result<OperationOutcome> {
        settle(self.client.switch(name).await)
    }

    pub async fn remove(&self, name: &str) -> Result<OperationOutcome> {
        settle(self.client.delete(name).await)
    }

    /// Create a session for `candidate`, or activate it if one with that name is already live
    pub async fn create_from_candidate(
        &self,
        candidate: &CandidateDirectory,
    ) -> Result<OperationOutcome> {
        let name = session_name_for(&candidate.basename);
        settle(self.create_or_activate(&name, &candidate.absolute_path).await)
    }

    /// Create `base_path/<sanitized name>` if needed and start a session in it
    pub async fn create_in_new_directory(
        &self,
        base_path: &str,
        requested_name: &str,
    ) -> Result<OperationOutcome> {
        let Some(dir_name) = sanitize_name(requested_name) else {
            return Ok(Error::Validation(format!(
                "'{}' has no usable characters",
                requested_name
            ))
            .into());
        };

        let target = expand_home(base_path).join(&dir_name);
        if target.is_dir() {
            let candidate = CandidateDirectory::from_path(target, base_path);
            return self.create_from_candidate(&candidate).await;
        }

        if let Err(e) = std::fs::create_dir_all(&target) {
            return Ok(Error::Filesystem {
                path: target,
                reason: e.to_string(),
            }
            .into());
        }
        tracing::info!(path = %target.display(), "Created directory");

        let name = session_name_for(&dir_name);
        settle(self.create(&name, &target).await)
    }

    async fn create_or_activate(&self, name: &str, path: &Path) -> Result<OperationOutcome> {
        let sessions = self.client.list_sessions().await?;
        if sessions.iter().any(|s| s.name == name) {
            tracing::debug!(session = name, "Session exists, activating instead");
            return self.client.switch(name).await;
        }
        self.create(name, path).await
    }

    async fn create(&self, name: &str, path: &Path) -> Result<OperationOutcome> {
        // tmux silently falls back to another directory when `-c` is missing
        if !path.is_dir() {
            return Err(Error::Filesystem {
                path: path.to_path_buf(),
                reason: "directory no longer exists".to_string(),
            });
        }
        let session = self.client.create(name, path).await?;
        Ok(OperationOutcome::completed(
            format!("Session '{}' created in {}", name, path.display()),
            Some(session),
        ))
    }
}

/// Keep fatal errors as `Err`, turn everything else into a failed outcome
fn settle(result: Result<OperationOutcome>) -> Result<OperationOutcome> {
    match result {
        Err(e) if !e.is_fatal() => Ok(OperationOutcome::Failed(e)),
        other => other,
    }
}
