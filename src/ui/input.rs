use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::client::{Command, ExportKind};
use crate::ui::app::App;

const PAGE_LINES: usize = 10;

/// Action to take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// Send this command to the supervisor.
    Dispatch(Command),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'c') {
        app.request_quit();
        return InputAction::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::None;
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.request_quit();
            return InputAction::None;
        }
        KeyCode::Char('c') => {
            app.clear_log();
            return InputAction::None;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up(1);
            return InputAction::None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down(1);
            return InputAction::None;
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE_LINES);
            return InputAction::None;
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE_LINES);
            return InputAction::None;
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.follow_tail();
            return InputAction::None;
        }
        KeyCode::Char('r') => Command::Start,
        KeyCode::Char('x') => Command::Export(ExportKind::Spreadsheet),
        KeyCode::Char('s') => Command::ToggleScroll,
        KeyCode::Char('e') => Command::SendEnter,
        KeyCode::Char('t') => Command::Stop,
        KeyCode::Char('o') => Command::OpenBrowser,
        _ => return InputAction::None,
    };

    match app.request(command) {
        Some(command) => InputAction::Dispatch(command),
        None => InputAction::None,
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
