//! Terminal UI module
//!
//! Owns the terminal for the lifetime of the event loop: alternate screen
//! and raw mode on entry, restored on every exit path (quit key, shutdown
//! signal, event stream failure).

pub mod view;

use std::{io, sync::Arc};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use crate::{
    state::AppState,
    utils::{shutdown_signal, signal_name},
};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the terminal UI until the user quits or a shutdown signal arrives
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, state).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(terminal: &mut Tui, state: Arc<AppState>) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let mut view_rx = state.subscribe_view();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let snapshot = match state.get_countdown() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to read countdown state: {}", e);
                break;
            }
        };
        let (last_action, last_action_time) = state.get_last_action();
        let uptime = state.get_uptime();

        terminal.draw(|frame| {
            view::draw(frame, &snapshot, last_action.as_deref(), last_action_time, &uptime);
        })?;

        tokio::select! {
            signal = &mut shutdown => {
                info!("{} ended the UI session", signal_name(signal));
                break;
            }

            // Redraw whenever a tick or control action changed the state
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }

            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key(key, &state) {
                            info!("Quit requested, leaving UI loop");
                            break;
                        }
                    }
                    // Resize and other events fall through to the redraw
                    Some(Ok(event)) => {
                        debug!("Ignoring terminal event: {:?}", event);
                    }
                    Some(Err(e)) => {
                        error!("Terminal event error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

/// Dispatch a key press to the countdown controls. Returns true on quit.
fn handle_key(key: KeyEvent, state: &AppState) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('s') => {
            if let Err(e) = state.start() {
                error!("Failed to start countdown: {}", e);
            }
            false
        }
        KeyCode::Char('p') => {
            if let Err(e) = state.pause() {
                error!("Failed to pause countdown: {}", e);
            }
            false
        }
        KeyCode::Char('r') => {
            if let Err(e) = state.reset() {
                error!("Failed to reset countdown: {}", e);
            }
            false
        }
        _ => false,
    }
}
