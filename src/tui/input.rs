// ABOUTME: Keyboard input handling for the TUI — translates key events into actions.
// ABOUTME: Routes keys by screen: login form, dashboard tabs, or chat input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chat::QUICK_QUESTIONS;
use crate::tui::state::{Screen, Tab, TuiState};

/// The result of processing a key event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed.
    None,
    /// Mobile number entered on the login screen.
    SubmitMobile(String),
    /// Verification code entered on the login screen.
    SubmitCode(String),
    /// Return from the code step to the number step.
    BackToMobile,
    /// Chat message to send.
    Send(String),
    ClearChat,
    Logout,
    Quit,
}

/// Process a key event against the current TUI state and return the resulting action.
pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits
    if ctrl && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    match state.screen {
        Screen::Login => handle_login_key(state, key),
        Screen::Dashboard => handle_dashboard_key(state, key),
    }
}

fn handle_login_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter => match state.submit_input() {
            Some(text) if state.awaiting_code() => InputResult::SubmitCode(text),
            Some(text) => InputResult::SubmitMobile(text),
            None => InputResult::None,
        },
        KeyCode::Esc if state.awaiting_code() => {
            state.clear_input();
            InputResult::BackToMobile
        }
        _ => {
            edit_input(state, key);
            InputResult::None
        }
    }
}

fn handle_dashboard_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab => {
            state.tab = state.tab.next();
            return InputResult::None;
        }
        KeyCode::BackTab => {
            state.tab = state.tab.previous();
            return InputResult::None;
        }
        KeyCode::Char('l') if ctrl => return InputResult::Logout,
        _ => {}
    }

    if state.tab != Tab::Chat {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
            KeyCode::Char('c') => {
                state.tab = Tab::Chat;
                InputResult::None
            }
            _ => InputResult::None,
        };
    }

    if handle_scroll_key(state, key.code) {
        return InputResult::None;
    }

    match key.code {
        KeyCode::Char('k') if ctrl => InputResult::ClearChat,
        // Quick questions: digits on an empty input.
        KeyCode::Char(c @ '1'..='4') if state.input.is_empty() && !state.composing => {
            let idx = c as usize - '1' as usize;
            InputResult::Send(QUICK_QUESTIONS[idx].to_string())
        }
        KeyCode::Enter => {
            // One request at a time; keep the draft while a reply is pending.
            if state.composing {
                return InputResult::None;
            }
            match state.submit_input() {
                Some(text) => InputResult::Send(text),
                None => InputResult::None,
            }
        }
        _ => {
            edit_input(state, key);
            InputResult::None
        }
    }
}

/// Apply a plain editing key to the input buffer.
fn edit_input(state: &mut TuiState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Char(c) => state.insert_char_at_cursor(c),
        KeyCode::Backspace => state.backspace_char(),
        KeyCode::Delete => state.delete_char_at_cursor(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        KeyCode::Home => state.move_cursor_home(),
        KeyCode::End => state.move_cursor_end(),
        _ => {}
    }
}

/// Handle chat scroll keys. Returns true if the key was consumed.
fn handle_scroll_key(state: &mut TuiState, code: KeyCode) -> bool {
    match code {
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
            true
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
            true
        }
        KeyCode::Up => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
            true
        }
        KeyCode::Down => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            true
        }
        _ => false,
    }
}
