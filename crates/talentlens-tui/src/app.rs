//! Main application loop and event handling.

use crate::browser;
use crate::state::{AppMode, AppState, FocusTarget};
use crate::ui;
use crate::worker::{start_worker, WorkerCommand, WorkerEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use talentlens_core::session::detect_system_dark;
use talentlens_core::{
    Config, FileStorage, HttpRecommender, SearchController, SearchTicket, SessionStore,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{info, warn};

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    let storage = FileStorage::open(config.storage_file());
    info!(storage = %storage.path().display(), "Session storage");
    let mut session = SessionStore::load(storage, detect_system_dark());
    session.on_theme_change(ui::theme::apply);

    let recommender = HttpRecommender::new(config.endpoint.clone())
        .with_context(|| format!("Invalid endpoint {}", config.endpoint))?;
    info!(endpoint = %recommender.endpoint(), use_ai = config.use_ai, "Starting TUI");

    let (cmd_tx, cmd_rx) = unbounded_channel();
    let (evt_tx, evt_rx) = mpsc::channel();
    let worker = start_worker(Arc::new(recommender), cmd_rx, evt_tx);

    let mut app = AppState::new(SearchController::new(session, config.use_ai));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &cmd_tx, &evt_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Quit also abandons a request that is still in flight.
    let _ = cmd_tx.send(WorkerCommand::Quit);
    drop(cmd_tx);
    if worker.join().is_err() {
        warn!("Worker thread panicked");
    }

    res
}

/// Main application loop
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cmd_tx: &UnboundedSender<WorkerCommand>,
    evt_rx: &mpsc::Receiver<WorkerEvent>,
) -> Result<()> {
    loop {
        while let Ok(evt) = evt_rx.try_recv() {
            match evt {
                WorkerEvent::SearchResults { ticket, outcome } => {
                    app.apply_search_outcome(&ticket, outcome);
                }
            }
        }

        terminal.draw(|f| ui_render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(ticket) = handle_key_event(app, key.code, key.modifiers) {
                        cmd_tx
                            .send(WorkerCommand::Search(ticket))
                            .context("Search worker stopped")?;
                    }
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard events. Returns a ticket when a search was started.
fn handle_key_event(
    app: &mut AppState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Option<SearchTicket> {
    match app.mode {
        AppMode::Search => handle_search_keys(app, key, modifiers),
        AppMode::Help => {
            handle_help_keys(app, key);
            None
        }
        AppMode::Examples => {
            handle_example_keys(app, key);
            None
        }
    }
}

/// Handle keys in search mode
fn handle_search_keys(
    app: &mut AppState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Option<SearchTicket> {
    // Global keys that work regardless of focus
    match (key, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.quit();
            return None;
        }
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
            app.toggle_theme();
            return None;
        }
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            app.toggle_ai();
            return None;
        }
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
            app.open_examples();
            return None;
        }
        (KeyCode::Char('?'), _) if !app.is_focused(FocusTarget::Input) => {
            app.toggle_help();
            return None;
        }
        (KeyCode::Tab, _) => {
            app.cycle_focus(true);
            return None;
        }
        (KeyCode::BackTab, _) => {
            app.cycle_focus(false);
            return None;
        }
        (KeyCode::Esc, _) => {
            if app.is_focused(FocusTarget::Input) {
                app.clear_query();
            } else {
                app.focus = FocusTarget::Input;
            }
            return None;
        }
        _ => {}
    }

    match app.focus {
        FocusTarget::Input => handle_input_keys(app, key, modifiers),
        FocusTarget::History => handle_history_keys(app, key),
        FocusTarget::Filters => {
            handle_filter_keys(app, key);
            None
        }
        FocusTarget::Results => {
            handle_results_keys(app, key);
            None
        }
    }
}

/// Handle keys when input is focused
fn handle_input_keys(
    app: &mut AppState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Option<SearchTicket> {
    match (key, modifiers) {
        (KeyCode::Enter, _) => return app.submit(),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            app.insert_char(c);
        }
        (KeyCode::Backspace, _) => app.delete_char(),
        (KeyCode::Delete, _) => app.delete_char_forward(),
        (KeyCode::Left, _) => app.move_cursor_left(),
        (KeyCode::Right, _) => app.move_cursor_right(),
        (KeyCode::Home, _) => app.move_cursor_home(),
        (KeyCode::End, _) => app.move_cursor_end(),
        (KeyCode::Down, _) => {
            if !app.results().is_empty() {
                app.focus = FocusTarget::Results;
            }
        }
        _ => {}
    }
    None
}

/// Handle keys when the recent-search chips are focused
fn handle_history_keys(app: &mut AppState, key: KeyCode) -> Option<SearchTicket> {
    match key {
        KeyCode::Enter => return app.run_selected_history(),
        KeyCode::Left | KeyCode::Char('h') => app.history_previous(),
        KeyCode::Right | KeyCode::Char('l') => app.history_next(),
        KeyCode::Char('x') => app.clear_history(),
        _ => {}
    }
    None
}

/// Handle keys when the filter bar is focused
fn handle_filter_keys(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.previous_filter_field(),
        KeyCode::Right | KeyCode::Char('l') => app.next_filter_field(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char(' ') | KeyCode::Enter => {
            app.cycle_filter(true)
        }
        KeyCode::Up | KeyCode::Char('k') => app.cycle_filter(false),
        KeyCode::Char('c') => app.clear_filters(),
        _ => {}
    }
}

/// Handle keys when results are focused
fn handle_results_keys(app: &mut AppState, key: KeyCode) {
    match key {
        // Up arrow at top goes back to input
        KeyCode::Up if app.selected_index == 0 => {
            app.focus = FocusTarget::Input;
        }
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') => app.select_first(),
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('o') | KeyCode::Enter => open_selected(app),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn open_selected(app: &mut AppState) {
    let Some(url) = app.selected_result().map(|r| r.url.clone()) else {
        return;
    };
    app.status = Some(match browser::open_url(&url) {
        Ok(()) => format!("✓ Opened {url}"),
        Err(e) => {
            warn!("Open failed: {}", e);
            e.to_string()
        }
    });
}

/// Handle keys in help mode
fn handle_help_keys(app: &mut AppState, key: KeyCode) {
    if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
        app.toggle_help();
    }
}

/// Handle keys in the example picker
fn handle_example_keys(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.example_next(),
        KeyCode::Up | KeyCode::Char('k') => app.example_previous(),
        KeyCode::Enter => app.pick_example(),
        KeyCode::Esc | KeyCode::Char('q') => app.close_overlay(),
        _ => {}
    }
}

/// Render the UI
fn ui_render(f: &mut Frame, app: &mut AppState) {
    render_search(f, app);
    match app.mode {
        AppMode::Search => {}
        AppMode::Help => ui::overlays::render_help(f),
        AppMode::Examples => ui::overlays::render_examples(f, app),
    }
}

/// Render search interface
fn render_search(f: &mut Frame, app: &mut AppState) {
    let history_height = if app.controller.session().history().is_empty() {
        0
    } else {
        1
    };
    let filters_height = if app.controller.raw_results().is_empty() {
        0
    } else {
        3
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Header
            Constraint::Length(3),              // Search input
            Constraint::Length(history_height), // Recent searches
            Constraint::Length(filters_height), // Filter bar
            Constraint::Min(0),                 // Results + details
            Constraint::Length(1),              // Status bar
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[4]);

    ui::header::render(f, chunks[0], app);
    ui::search_input::render(f, chunks[1], app);
    if history_height > 0 {
        ui::history::render(f, chunks[2], app);
    }
    if filters_height > 0 {
        ui::filters::render(f, chunks[3], app);
    }
    ui::results::render(f, body[0], app);
    ui::detail::render(f, body[1], app);
    ui::footer::render(f, chunks[5], app);
}
