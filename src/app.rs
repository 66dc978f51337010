use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::actions::Action;
use crate::error::OperationKind;
use crate::outcome::OperationOutcome;
use crate::scanner::CandidateDirectory;
use crate::tmux::Session;

/// Theme colors
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::Rgb(220, 220, 220),
            accent: Color::Rgb(217, 119, 87),
            dim: Color::Rgb(100, 100, 100),
            success: Color::Rgb(80, 200, 120),
            warning: Color::Rgb(255, 193, 7),
            error: Color::Rgb(220, 53, 69),
        }
    }
}

/// Input mode for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Browsing,
    Creating,
    Confirming,
}

/// Message shown in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    /// List of tmux sessions
    pub sessions: Vec<Session>,
    /// Currently selected session index
    pub list_state: ListState,
    /// Directories from the last scan
    pub candidates: Vec<CandidateDirectory>,
    pub candidate_state: ListState,
    /// A scan is in flight
    pub scanning: bool,
    /// Current message to display (info or error)
    pub status: Option<StatusLine>,
    /// Theme
    pub theme: Theme,
    /// Current input mode
    pub input_mode: InputMode,
    /// Text input buffer
    pub input_buffer: String,
    /// Where new directories get created
    pub new_directory_base: String,
    /// Pending action queue
    pub pending_actions: Vec<Action>,
}

impl App {
    pub fn new(new_directory_base: String) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            sessions: Vec::new(),
            list_state,
            candidates: Vec::new(),
            candidate_state: ListState::default(),
            scanning: false,
            status: None,
            theme: Theme::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            new_directory_base,
            pending_actions: Vec::new(),
        }
    }

    /// Get the currently selected session
    pub fn selected_session(&self) -> Option<&Session> {
        self.list_state
            .selected()
            .and_then(|i| self.sessions.get(i))
    }

    pub fn selected_candidate(&self) -> Option<&CandidateDirectory> {
        self.candidate_state
            .selected()
            .and_then(|i| self.candidates.get(i))
    }

    /// Take pending actions (drains the queue)
    pub fn take_pending_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn show_outcome(&mut self, outcome: &OperationOutcome) {
        let Some(err) = outcome.error() else {
            self.set_info(outcome.message());
            return;
        };

        // The session is gone or renamed behind our back; don't wait for the poller
        if matches!(
            err.operation_kind(),
            Some(OperationKind::DeleteFailed | OperationKind::SwitchFailed)
        ) {
            self.pending_actions.push(Action::RefreshSessions);
        }
        self.set_error(err.to_string());
    }

    /// Attaching from here failed; keep the command on screen so it can be run by hand
    pub fn show_attach_failure(&mut self, outcome: &OperationOutcome, reason: &str) {
        match outcome.suggested_command() {
            Some(command) => {
                self.set_error(format!("Failed to attach: {}. Run: {}", reason, command))
            }
            None => self.set_error(format!("Failed to attach: {}", reason)),
        }
    }

    /// Handle an action and return whether to quit
    pub fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::KeyPress(key) => self.handle_key(key),
            Action::SessionsUpdated(sessions) => {
                self.sessions = sessions;
                clamp_selection(&mut self.list_state, self.sessions.len());
                Ok(false)
            }
            Action::CandidatesUpdated(candidates) => {
                self.scanning = false;
                self.candidates = candidates;
                if self.candidate_state.selected().is_none() && !self.candidates.is_empty() {
                    self.candidate_state.select(Some(0));
                }
                clamp_selection(&mut self.candidate_state, self.candidates.len());
                Ok(false)
            }
            Action::Error(msg) => {
                self.scanning = false;
                self.set_error(msg);
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        // Clear status message on any key press
        if self.status.is_some() && self.input_mode == InputMode::Normal {
            self.status = None;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Browsing => self.handle_browsing_key(key),
            InputMode::Creating => self.handle_creating_key(key),
            InputMode::Confirming => self.handle_confirming_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('j') | KeyCode::Down => {
                step_selection(&mut self.list_state, self.sessions.len(), true)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                step_selection(&mut self.list_state, self.sessions.len(), false)
            }
            KeyCode::Enter => {
                if let Some(session) = self.selected_session() {
                    self.pending_actions
                        .push(Action::ActivateSession(session.name.clone()));
                }
            }
            KeyCode::Char('o') => {
                self.input_mode = InputMode::Browsing;
                self.scanning = true;
                self.pending_actions.push(Action::ScanCandidates);
            }
            KeyCode::Char('n') => {
                self.input_mode = InputMode::Creating;
                self.input_buffer.clear();
            }
            KeyCode::Char('d') => {
                if self.selected_session().is_some() {
                    self.input_mode = InputMode::Confirming;
                }
            }
            KeyCode::Char('r') => {
                self.pending_actions.push(Action::RefreshSessions);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.input_mode = InputMode::Normal,
            KeyCode::Char('j') | KeyCode::Down => {
                step_selection(&mut self.candidate_state, self.candidates.len(), true)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                step_selection(&mut self.candidate_state, self.candidates.len(), false)
            }
            KeyCode::Char('r') => {
                self.scanning = true;
                self.pending_actions.push(Action::ScanCandidates);
            }
            KeyCode::Enter => {
                if let Some(candidate) = self.selected_candidate() {
                    self.pending_actions
                        .push(Action::CreateFromCandidate(candidate.clone()));
                    self.input_mode = InputMode::Normal;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_creating_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Enter => {
                if !self.input_buffer.is_empty() {
                    let name = std::mem::take(&mut self.input_buffer);
                    self.pending_actions.push(Action::CreateInNewDirectory(name));
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            // Free text; the manager sanitizes it
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_confirming_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(session) = self.selected_session() {
                    self.pending_actions
                        .push(Action::DeleteSession(session.name.clone()));
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
        Ok(false)
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Footer/status
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_main(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);

        // Render modal dialogs on top
        match self.input_mode {
            InputMode::Creating => self.render_create_dialog(frame),
            InputMode::Confirming => self.render_confirm_dialog(frame),
            InputMode::Normal | InputMode::Browsing => {}
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let subtitle = if self.input_mode == InputMode::Browsing {
            "│ Pick a directory"
        } else {
            "│ tmux sessions"
        };
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Sessionizer ",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(subtitle, Style::default().fg(self.theme.dim)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.dim)),
        );
        frame.render_widget(title, area);
    }

    fn render_main(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // List
                Constraint::Percentage(60), // Detail pane
            ])
            .split(area);

        if self.input_mode == InputMode::Browsing {
            self.render_candidate_list(frame, chunks[0]);
            self.render_candidate_detail(frame, chunks[1]);
        } else {
            self.render_session_list(frame, chunks[0]);
            self.render_detail_pane(frame, chunks[1]);
        }
    }

    fn list_block(&self, title: &'static str) -> Block<'static> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.dim))
    }

    fn placeholder(&self, text: &'static str) -> Vec<ListItem<'static>> {
        vec![ListItem::new(Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.dim),
        )))]
    }

    fn render_session_list(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = if self.sessions.is_empty() {
            self.placeholder("  No sessions. Press 'o' to pick a directory.")
        } else {
            self.sessions
                .iter()
                .map(|session| {
                    let marker = if session.attached {
                        Span::styled("● ", Style::default().fg(self.theme.success))
                    } else {
                        Span::styled("○ ", Style::default().fg(self.theme.dim))
                    };
                    let index = Span::styled(
                        format!("{:>2} ", session.display_index),
                        Style::default().fg(self.theme.dim),
                    );
                    let name = Span::styled(&session.name, Style::default().fg(self.theme.fg));

                    ListItem::new(Line::from(vec![index, marker, name]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(self.list_block(" Sessions "))
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(50, 50, 50))
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_candidate_list(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = if self.scanning && self.candidates.is_empty() {
            self.placeholder("  Scanning search paths...")
        } else if self.candidates.is_empty() {
            self.placeholder("  No directories found under the search paths.")
        } else {
            self.candidates
                .iter()
                .map(|candidate| {
                    ListItem::new(Line::from(Span::styled(
                        &candidate.basename,
                        Style::default().fg(self.theme.fg),
                    )))
                })
                .collect()
        };

        let list = List::new(items)
            .block(self.list_block(" Directories "))
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(50, 50, 50))
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.candidate_state);
    }

    fn field<'a>(&self, label: &'a str, value: String) -> Line<'a> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(self.theme.dim)),
            Span::styled(value, Style::default().fg(self.theme.fg)),
        ])
    }

    fn hint(&self, text: &'static str) -> Line<'static> {
        Line::from(Span::styled(text, Style::default().fg(self.theme.dim)))
    }

    fn render_detail_pane(&self, frame: &mut Frame, area: Rect) {
        let content = if let Some(session) = self.selected_session() {
            vec![
                self.field("Name: ", session.name.clone()),
                self.field("Windows: ", session.window_count.to_string()),
                Line::from(vec![
                    Span::styled("Attached: ", Style::default().fg(self.theme.dim)),
                    Span::styled(
                        if session.attached { "yes" } else { "no" },
                        Style::default().fg(if session.attached {
                            self.theme.success
                        } else {
                            self.theme.dim
                        }),
                    ),
                ]),
                Line::from(""),
                self.hint("Press Enter to attach, 'd' to delete"),
            ]
        } else {
            vec![
                self.hint("No session selected"),
                Line::from(""),
                self.hint("Press 'o' to open a directory or 'n' for a new one"),
            ]
        };

        let detail = Paragraph::new(content).block(self.list_block(" Details "));
        frame.render_widget(detail, area);
    }

    fn render_candidate_detail(&self, frame: &mut Frame, area: Rect) {
        let content = if let Some(candidate) = self.selected_candidate() {
            let existing = self
                .sessions
                .iter()
                .any(|s| s.name == crate::manager::session_name_for(&candidate.basename));
            vec![
                self.field("Path: ", candidate.absolute_path.display().to_string()),
                self.field("Found in: ", candidate.source_root.clone()),
                Line::from(""),
                if existing {
                    Line::from(Span::styled(
                        "A session for this directory is already running",
                        Style::default().fg(self.theme.warning),
                    ))
                } else {
                    Line::from("")
                },
                self.hint("Press Enter to open, 'r' to rescan, Esc to go back"),
            ]
        } else {
            vec![self.hint("No directory selected")]
        };

        let detail = Paragraph::new(content).block(self.list_block(" Details "));
        frame.render_widget(detail, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help_text = if self.input_mode == InputMode::Browsing {
            " Esc: Back │ j/k: Navigate │ Enter: Open │ r: Rescan "
        } else {
            " q: Quit │ j/k: Navigate │ Enter: Attach │ o: Open dir │ n: New dir │ d: Delete │ r: Refresh "
        };

        let content = if let Some(ref status) = self.status {
            let style = if status.is_error {
                Style::default().fg(self.theme.error)
            } else {
                Style::default().fg(self.theme.success)
            };
            Line::from(Span::styled(format!(" {} ", status.text), style))
        } else {
            Line::from(Span::styled(help_text, Style::default().fg(self.theme.dim)))
        };

        let footer = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.dim)),
        );
        frame.render_widget(footer, area);
    }

    fn render_create_dialog(&self, frame: &mut Frame) {
        let area = centered_rect(50, 20, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" New Directory ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Directory name (under {}):", self.new_directory_base),
                Style::default().fg(self.theme.fg),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("▶ {}_", self.input_buffer),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            self.hint("Press Enter to create, Esc to cancel"),
        ];

        let paragraph = Paragraph::new(text);
        frame.render_widget(paragraph, inner);
    }

    fn render_confirm_dialog(&self, frame: &mut Frame) {
        let area = centered_rect(50, 20, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Confirm Delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let session_name = self
            .selected_session()
            .map(|s| s.name.as_str())
            .unwrap_or("unknown");

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Kill session '{}'?", session_name),
                Style::default().fg(self.theme.fg),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Every process in it will be terminated.",
                Style::default().fg(self.theme.warning),
            )),
            Line::from(""),
            self.hint("Press 'y' to confirm, 'n' or Esc to cancel"),
        ];

        let paragraph = Paragraph::new(text);
        frame.render_widget(paragraph, inner);
    }
}

/// Keep a selection inside `len` items after the list changed
fn clamp_selection(state: &mut ListState, len: usize) {
    if let Some(selected) = state.selected() {
        if selected >= len && len > 0 {
            state.select(Some(len - 1));
        }
    }
}

/// Move the selection one step, wrapping at both ends
fn step_selection(state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_action(Action::KeyPress(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap()
    }

    fn sessions(names: &[&str]) -> Vec<Session> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Session {
                display_index: i + 1,
                ..Session::new(n.to_string(), 1, false)
            })
            .collect()
    }

    #[test]
    fn test_enter_activates_selected_session() {
        let mut app = App::new("~/projects".to_string());
        app.handle_action(Action::SessionsUpdated(sessions(&["a", "b"])))
            .unwrap();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let actions = app.take_pending_actions();
        assert!(matches!(actions.as_slice(), [Action::ActivateSession(name)] if name == "b"));
    }

    #[test]
    fn test_selection_clamped_when_sessions_shrink() {
        let mut app = App::new("~".to_string());
        app.handle_action(Action::SessionsUpdated(sessions(&["a", "b", "c"])))
            .unwrap();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.list_state.selected(), Some(2));

        app.handle_action(Action::SessionsUpdated(sessions(&["a"])))
            .unwrap();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_browsing_creates_from_candidate() {
        let mut app = App::new("~".to_string());
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.input_mode, InputMode::Browsing);
        assert!(matches!(
            app.take_pending_actions().as_slice(),
            [Action::ScanCandidates]
        ));

        let candidate = CandidateDirectory::from_path(PathBuf::from("/r/api"), "/r");
        app.handle_action(Action::CandidatesUpdated(vec![candidate.clone()]))
            .unwrap();
        assert!(!app.scanning);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(matches!(
            app.take_pending_actions().as_slice(),
            [Action::CreateFromCandidate(c)] if *c == candidate
        ));
    }

    #[test]
    fn test_new_directory_prompt_passes_raw_text() {
        let mut app = App::new("~".to_string());
        press(&mut app, KeyCode::Char('n'));
        for c in "My Project!".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(matches!(
            app.take_pending_actions().as_slice(),
            [Action::CreateInNewDirectory(name)] if name == "My Project!"
        ));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = App::new("~".to_string());
        app.handle_action(Action::SessionsUpdated(sessions(&["a"])))
            .unwrap();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::Confirming);
        press(&mut app, KeyCode::Esc);
        assert!(app.take_pending_actions().is_empty());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(matches!(
            app.take_pending_actions().as_slice(),
            [Action::DeleteSession(name)] if name == "a"
        ));
    }

    #[test]
    fn test_failed_switch_triggers_refresh() {
        let mut app = App::new("~".to_string());
        let outcome = OperationOutcome::Failed(Error::operation(
            OperationKind::SwitchFailed,
            "can't find session: gone",
        ));
        app.show_outcome(&outcome);

        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("can't find session: gone"));
        assert!(matches!(
            app.take_pending_actions().as_slice(),
            [Action::RefreshSessions]
        ));
    }

    #[test]
    fn test_validation_failure_does_not_refresh() {
        let mut app = App::new("~".to_string());
        app.show_outcome(&OperationOutcome::Failed(Error::Validation("###".to_string())));
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert!(app.take_pending_actions().is_empty());
    }

    #[test]
    fn test_attach_failure_shows_manual_command() {
        let mut app = App::new("~".to_string());
        let outcome = OperationOutcome::ManualAttach {
            message: "attach manually".to_string(),
            command: vec![
                "tmux".to_string(),
                "attach-session".to_string(),
                "-t".to_string(),
                "=my notes".to_string(),
            ],
        };
        assert!(outcome.requires_manual_attach());
        app.show_attach_failure(&outcome, "terminal is not a tty");

        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("terminal is not a tty"));
        assert!(status.text.ends_with("Run: tmux attach-session -t '=my notes'"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new("~".to_string());
        assert!(press(&mut app, KeyCode::Char('q')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_action(Action::KeyPress(ctrl_c)).unwrap());
    }
}
