//! Configuration for the session manager
//!
//! Loads an optional JSON overlay from `$SESSIONIZER_CONFIG` or
//! `~/.config/sessionizer/config.json` and merges it onto the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_ENV_VAR: &str = "SESSIONIZER_CONFIG";

/// Resolved configuration held by a `SessionManager`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ordered search roots, `~` allowed
    pub search_paths: Vec<String>,
    /// How deep to look below each root (root itself is depth 0)
    pub max_scan_depth: usize,
    /// Multiplexer executable name or path
    pub multiplexer_command: String,
    /// Environment variable that is set when running inside a multiplexer client
    pub attach_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: ["~/projects", "~/code", "~/dev", "~/src", "~/work"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_scan_depth: 2,
            multiplexer_command: "tmux".to_string(),
            attach_marker: "TMUX".to_string(),
        }
    }
}

/// Caller-supplied overrides; unset fields keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOptions {
    pub search_paths: Option<Vec<String>>,
    pub max_scan_depth: Option<usize>,
    pub multiplexer_command: Option<String>,
    pub attach_marker: Option<String>,
}

impl Config {
    /// Apply `options` on top of `self`, field by field
    pub fn merged(mut self, options: ConfigOptions) -> Self {
        if let Some(search_paths) = options.search_paths {
            self.search_paths = search_paths;
        }
        if let Some(depth) = options.max_scan_depth {
            self.max_scan_depth = depth;
        }
        if let Some(command) = options.multiplexer_command {
            self.multiplexer_command = command;
        }
        if let Some(marker) = options.attach_marker {
            self.attach_marker = marker;
        }
        self
    }
}

impl ConfigOptions {
    /// Read the config file if present; a missing file means no overrides
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_default()
        .join("sessionizer")
        .join("config.json")
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(pattern: &str) -> PathBuf {
    if pattern == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(pattern));
    }
    if let Some(rest) = pattern.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(pattern)
}
