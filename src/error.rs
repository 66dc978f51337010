use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which session operation the multiplexer rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    CreateFailed,
    DeleteFailed,
    SwitchFailed,
    ListFailed,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationKind::CreateFailed => "create failed",
            OperationKind::DeleteFailed => "delete failed",
            OperationKind::SwitchFailed => "switch failed",
            OperationKind::ListFailed => "list failed",
        };
        f.write_str(label)
    }
}

/// Errors produced by the session engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The external program could not be launched at all
    #[error("Failed to launch `{program}`: {reason}")]
    Execution { program: String, reason: String },

    /// The multiplexer ran but rejected the operation
    #[error("{kind}: {message}")]
    Operation { kind: OperationKind, message: String },

    /// Caller input reduced to nothing usable
    #[error("Invalid name: {0}")]
    Validation(String),

    #[error("Filesystem error at {}: {}", .path.display(), .reason)]
    Filesystem { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn operation(kind: OperationKind, message: impl Into<String>) -> Self {
        Error::Operation {
            kind,
            message: message.into(),
        }
    }

    /// Environment-level failures that must propagate instead of becoming an outcome
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Execution { .. } | Error::Config(_))
    }

    pub fn operation_kind(&self) -> Option<OperationKind> {
        match self {
            Error::Operation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
