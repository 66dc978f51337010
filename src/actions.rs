use crossterm::event::KeyEvent;

use crate::scanner::CandidateDirectory;
use crate::tmux::Session;

/// Actions that can be dispatched through the application
#[derive(Debug, Clone)]
pub enum Action {
    /// A key was pressed
    KeyPress(KeyEvent),
    /// Sessions were updated from tmux
    SessionsUpdated(Vec<Session>),
    /// A directory scan finished
    CandidatesUpdated(Vec<CandidateDirectory>),
    /// An error occurred
    Error(String),
    /// Switch to or attach to a session
    ActivateSession(String),
    /// Start (or reuse) a session for a scanned directory
    CreateFromCandidate(CandidateDirectory),
    /// Make a new directory under the first search path and start a session there
    CreateInNewDirectory(String),
    /// Delete a session
    DeleteSession(String),
    /// Rescan the search paths
    ScanCandidates,
    /// Re-list sessions now instead of waiting for the poller
    RefreshSessions,
}
