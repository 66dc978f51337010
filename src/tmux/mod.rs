mod client;
mod executor;
#[cfg(test)]
pub(crate) mod fake;

pub use client::TmuxClient;
pub use executor::{CommandRunner, ProcessExecutor};

use serde::{Deserialize, Serialize};

/// Represents a live tmux session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session name, unique among live sessions
    pub name: String,
    /// Number of windows
    pub window_count: u32,
    /// Whether any client is attached
    pub attached: bool,
    /// 1-based position in the listing it came from
    pub display_index: usize,
}

impl Session {
    pub fn new(name: String, window_count: u32, attached: bool) -> Self {
        Self {
            name,
            window_count,
            attached,
            display_index: 0,
        }
    }
}
