//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, Pane};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Select the highlighted driver
    Select,
    /// Clear the selection
    Deselect,
    /// Reload every view
    Reload,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global shortcuts (Ctrl+C, Ctrl+R)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return HandleResult::Quit,
            KeyCode::Char('r') => return HandleResult::Reload,
            _ => {}
        }
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,

        // Directory navigation
        KeyCode::Char('j') | KeyCode::Down if app.focus == Pane::Directory => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up if app.focus == Pane::Directory => {
            app.select_prev();
            HandleResult::Continue
        }
        KeyCode::Enter if app.focus == Pane::Directory => HandleResult::Select,

        // Tabs in the focused panel
        KeyCode::Char('l') | KeyCode::Right => {
            app.next_tab();
            HandleResult::Continue
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.prev_tab();
            HandleResult::Continue
        }

        KeyCode::Tab => {
            app.cycle_focus();
            HandleResult::Continue
        }

        KeyCode::Char('/') => {
            app.enter_search();
            HandleResult::Continue
        }

        KeyCode::Char('x') => HandleResult::Deselect,

        KeyCode::Esc => {
            app.clear_status();
            HandleResult::Continue
        }

        _ => HandleResult::Continue,
    }
}

/// Handle keys while editing the search query
fn handle_search_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.confirm_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
    HandleResult::Continue
}
