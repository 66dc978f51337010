use crate::error::Error;
use crate::tmux::Session;

/// Result of a mutating session operation, for front ends to render
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// The operation took effect
    Completed {
        message: String,
        session: Option<Session>,
    },
    /// The caller isn't inside a multiplexer client; it has to run `command` itself
    ManualAttach {
        message: String,
        command: Vec<String>,
    },
    /// Expected failure (missing session, name collision, bad input)
    Failed(Error),
}

impl OperationOutcome {
    pub fn completed(message: impl Into<String>, session: Option<Session>) -> Self {
        OperationOutcome::Completed {
            message: message.into(),
            session,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, OperationOutcome::Failed(_))
    }

    pub fn requires_manual_attach(&self) -> bool {
        matches!(self, OperationOutcome::ManualAttach { .. })
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            OperationOutcome::Completed { session, .. } => session.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            OperationOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Attach command as a single copy-pasteable line
    pub fn suggested_command(&self) -> Option<String> {
        match self {
            OperationOutcome::ManualAttach { command, .. } => Some(
                command
                    .iter()
                    .map(|arg| shell_quote(arg))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            OperationOutcome::Completed { message, .. } => message.clone(),
            OperationOutcome::ManualAttach { message, .. } => message.clone(),
            OperationOutcome::Failed(err) => err.to_string(),
        }
    }
}

impl From<Error> for OperationOutcome {
    fn from(err: Error) -> Self {
        OperationOutcome::Failed(err)
    }
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./:,@%+".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationKind;

    #[test]
    fn test_suggested_command_quotes_unsafe_args() {
        let outcome = OperationOutcome::ManualAttach {
            message: "attach manually".to_string(),
            command: vec![
                "tmux".to_string(),
                "attach-session".to_string(),
                "-t".to_string(),
                "=it's mine".to_string(),
            ],
        };
        assert!(outcome.requires_manual_attach());
        assert!(outcome.is_success());
        assert_eq!(
            outcome.suggested_command().as_deref(),
            Some(r"tmux attach-session -t '=it'\''s mine'")
        );
    }

    #[test]
    fn test_failed_outcome_message() {
        let outcome: OperationOutcome =
            Error::operation(OperationKind::SwitchFailed, "can't find session: x").into();
        assert!(!outcome.is_success());
        assert!(outcome.suggested_command().is_none());
        assert_eq!(outcome.message(), "switch failed: can't find session: x");
    }
}
