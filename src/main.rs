use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use std::fs::OpenOptions;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

mod actions;
mod app;
mod config;
mod error;
mod manager;
mod outcome;
mod scanner;
mod tmux;

use actions::Action;
use app::App;
use config::{Config, ConfigOptions};
use manager::SessionManager;
use outcome::OperationOutcome;

/// Route logs to a file so they don't draw over the TUI
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let log_file = dirs::cache_dir()
        .map(|dir| dir.join("sessionizer"))
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir))
        .and_then(|dir| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("sessionizer.log"))
                .ok()
        });

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// Suspend the TUI, run the attach command in the foreground, then come back
fn attach_in_foreground(
    terminal: &mut ratatui::DefaultTerminal,
    command: &[String],
) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("Empty attach command")?;

    ratatui::restore();

    let status = std::process::Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    // Resume TUI
    *terminal = ratatui::init();

    let status = status.with_context(|| format!("Failed to run {}", program))?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", program, status);
    }
    Ok(())
}

/// Render an outcome, taking over the terminal when the user has to attach
fn apply_outcome(
    app: &mut App,
    terminal: &mut ratatui::DefaultTerminal,
    outcome: &OperationOutcome,
) {
    if !outcome.requires_manual_attach() {
        app.show_outcome(outcome);
        return;
    }
    if let OperationOutcome::ManualAttach { command, .. } = outcome {
        match attach_in_foreground(terminal, command) {
            Ok(()) => app.set_info("Detached"),
            Err(e) => app.show_attach_failure(outcome, &format!("{:#}", e)),
        }
    }
}

/// Activate the session a create produced, if it produced one
async fn follow_created(
    manager: &SessionManager,
    app: &mut App,
    terminal: &mut ratatui::DefaultTerminal,
    outcome: OperationOutcome,
) {
    let Some(session) = outcome.session().cloned() else {
        apply_outcome(app, terminal, &outcome);
        return;
    };

    match manager.activate(&session.name).await {
        Ok(activated) if activated.is_success() => apply_outcome(app, terminal, &activated),
        Ok(activated) => app.set_error(format!(
            "{}, but {}",
            outcome.message(),
            activated.message()
        )),
        Err(e) => app.set_error(format!("Failed to activate: {}", e)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let options = ConfigOptions::load().context("Failed to load configuration")?;
    let mut manager = SessionManager::new(Config::default());
    manager.configure(options);
    tracing::info!(config = ?manager.config(), "Starting sessionizer");

    let new_directory_base = manager
        .config()
        .search_paths
        .first()
        .cloned()
        .unwrap_or_else(|| "~".to_string());

    // Create event channel
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    // Initialize terminal
    let mut terminal = ratatui::init();

    // Spawn input handler
    let input_tx = tx.clone();
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        let _ = input_tx.send(Action::KeyPress(key));
                    }
                }
            }
        }
    });

    // Spawn tmux poller
    let tmux_tx = tx.clone();
    let poll_manager = manager.clone();
    tokio::spawn(async move {
        loop {
            match poll_manager.list_sessions().await {
                Ok(sessions) => {
                    let _ = tmux_tx.send(Action::SessionsUpdated(sessions));
                }
                Err(e) => {
                    let _ = tmux_tx.send(Action::Error(format!("Tmux: {}", e)));
                }
            }
            tokio::time::sleep(Duration::from_millis(1000)).await;
        }
    });

    // Create app state
    let mut app = App::new(new_directory_base.clone());

    // Main event loop
    let result = loop {
        // Render
        terminal.draw(|f| app.render(f))?;

        // Process any pending actions from the app; handling one may queue another
        loop {
            let batch = app.take_pending_actions();
            if batch.is_empty() {
                break;
            }
            for pending_action in batch {
                match pending_action {
                    Action::ActivateSession(ref name) => match manager.activate(name).await {
                        Ok(outcome) => apply_outcome(&mut app, &mut terminal, &outcome),
                        Err(e) => app.set_error(format!("Failed to activate: {}", e)),
                    },
                    Action::CreateFromCandidate(ref candidate) => {
                        match manager.create_from_candidate(candidate).await {
                            Ok(outcome) => {
                                follow_created(&manager, &mut app, &mut terminal, outcome).await
                            }
                            Err(e) => app.set_error(format!("Failed to create: {}", e)),
                        }
                    }
                    Action::CreateInNewDirectory(ref name) => {
                        match manager
                            .create_in_new_directory(&new_directory_base, name)
                            .await
                        {
                            Ok(outcome) => {
                                follow_created(&manager, &mut app, &mut terminal, outcome).await
                            }
                            Err(e) => app.set_error(format!("Failed to create: {}", e)),
                        }
                    }
                    Action::DeleteSession(ref name) => match manager.remove(name).await {
                        Ok(outcome) => app.show_outcome(&outcome),
                        Err(e) => app.set_error(format!("Failed to delete: {}", e)),
                    },
                    Action::ScanCandidates => {
                        // Directory walks block; keep them off the event loop
                        let scan_manager = manager.clone();
                        let scan_tx = tx.clone();
                        tokio::spawn(async move {
                            let scanned = tokio::task::spawn_blocking(move || {
                                scan_manager.list_creation_candidates()
                            })
                            .await;
                            let action = match scanned {
                                Ok(candidates) => Action::CandidatesUpdated(candidates),
                                Err(e) => Action::Error(format!("Scan failed: {}", e)),
                            };
                            let _ = scan_tx.send(action);
                        });
                    }
                    Action::RefreshSessions => match manager.list_sessions().await {
                        Ok(sessions) => {
                            app.handle_action(Action::SessionsUpdated(sessions))?;
                        }
                        Err(e) => app.set_error(format!("Tmux: {}", e)),
                    },
                    _ => {}
                }
            }
        }

        // Handle events from channel
        tokio::select! {
            Some(action) = rx.recv() => {
                match app.handle_action(action) {
                    Ok(should_quit) => {
                        if should_quit {
                            break Ok(());
                        }
                    }
                    Err(e) => {
                        break Err(e);
                    }
                }
            }
        }
    };

    // Restore terminal
    ratatui::restore();
    result
}
