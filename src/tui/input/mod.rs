mod confirm;
mod edit;
mod filter;
mod line;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, InputMode};

use confirm::handle_confirm;
use edit::handle_edit;
use filter::handle_filter;
use navigate::handle_navigate;

pub use edit::{begin_edit_existing, begin_new_item};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl-C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Navigate => handle_navigate(app, key),
        InputMode::Edit => handle_edit(app, key),
        InputMode::Confirm => handle_confirm(app, key),
        InputMode::Filter => handle_filter(app, key),
    }
}
