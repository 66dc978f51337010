//! In-memory stand-in for the tmux binary used by tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::executor::{CommandOutput, CommandRunner};
use crate::error::Result;

#[derive(Default)]
struct FakeState {
    running: bool,
    /// (name, windows, attached clients)
    sessions: Vec<(String, u32, u32)>,
    raw_listing: Option<String>,
    /// stderr for a hard `list-sessions` failure
    listing_failure: Option<String>,
    /// Becomes `listing_failure` once a session is created
    listing_failure_after_create: Option<String>,
    calls: Vec<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct FakeTmux {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTmux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(names: &[&str]) -> Self {
        let fake = Self::new();
        {
            let mut state = fake.state.lock().unwrap();
            state.running = true;
            state.sessions = names.iter().map(|n| (n.to_string(), 1, 0)).collect();
        }
        fake
    }

    pub fn stop_server(&self) {
        let mut state = self.state.lock().unwrap();
        state.running = false;
        state.sessions.clear();
    }

    pub fn set_raw_listing(&self, listing: &str) {
        let mut state = self.state.lock().unwrap();
        state.running = true;
        state.raw_listing = Some(listing.to_string());
    }

    /// Make every `list-sessions` call fail with `stderr`
    pub fn fail_listing(&self, stderr: &str) {
        self.state.lock().unwrap().listing_failure = Some(stderr.to_string());
    }

    /// Listing keeps working until the next successful `new-session`, then fails with `stderr`
    pub fn fail_listing_after_create(&self, stderr: &str) {
        self.state.lock().unwrap().listing_failure_after_create = Some(stderr.to_string());
    }

    pub fn session_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.sessions.iter().map(|(n, _, _)| n.clone()).collect()
    }

    /// Argument vectors of every call, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count_calls(&self, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.first().map(String::as_str) == Some(subcommand))
            .count()
    }
}

fn ok(stdout: impl Into<String>) -> CommandOutput {
    CommandOutput {
        stdout: stdout.into(),
        stderr: String::new(),
        exit_code: 0,
    }
}

fn fail(stderr: impl Into<String>) -> CommandOutput {
    CommandOutput {
        stdout: String::new(),
        stderr: stderr.into(),
        exit_code: 1,
    }
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn find(sessions: &[(String, u32, u32)], target: &str) -> Option<usize> {
    match target.strip_prefix('=') {
        Some(exact) => sessions.iter().position(|(n, _, _)| n == exact),
        None => sessions.iter().position(|(n, _, _)| n.starts_with(target)),
    }
}

#[async_trait]
impl CommandRunner for FakeTmux {
    async fn run(&self, _program: &str, args: &[String]) -> Result<CommandOutput> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.to_vec());

        let target = flag(args, "-t").unwrap_or_default().to_string();
        let output = match args.first().map(String::as_str) {
            Some("list-sessions") => {
                if let Some(stderr) = &state.listing_failure {
                    fail(stderr.clone())
                } else if let Some(raw) = &state.raw_listing {
                    ok(raw.clone())
                } else if !state.running || state.sessions.is_empty() {
                    fail("no server running on /tmp/tmux-1000/default")
                } else {
                    ok(state
                        .sessions
                        .iter()
                        .map(|(n, w, a)| format!("{}:{}:{}\n", n, w, a))
                        .collect::<String>())
                }
            }
            Some("has-session") => match find(&state.sessions, &target) {
                Some(_) => ok(""),
                None => fail(format!("can't find session: {}", target.trim_start_matches('='))),
            },
            Some("new-session") => {
                let name = flag(args, "-s").unwrap_or_default().to_string();
                if state.sessions.iter().any(|(n, _, _)| *n == name) {
                    fail(format!("duplicate session: {}", name))
                } else {
                    state.running = true;
                    state.sessions.push((name, 1, 0));
                    if let Some(stderr) = state.listing_failure_after_create.take() {
                        state.listing_failure = Some(stderr);
                    }
                    ok("")
                }
            }
            Some("kill-session") => match find(&state.sessions, &target) {
                Some(i) => {
                    state.sessions.remove(i);
                    ok("")
                }
                None => fail(format!("can't find session: {}", target.trim_start_matches('='))),
            },
            Some("switch-client") => match find(&state.sessions, &target) {
                Some(i) => {
                    state.sessions[i].2 += 1;
                    ok("")
                }
                None => fail(format!("can't find session: {}", target.trim_start_matches('='))),
            },
            other => fail(format!("unknown command: {:?}", other)),
        };

        Ok(output)
    }
}
