use crossterm::event::KeyEvent;

use crate::ops::search::compile_pattern;
use crate::tui::app::{App, InputMode};

use super::line::{LineAction, edit_line};

pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    let mut cursor = app.filter_input.len();
    match edit_line(&mut app.filter_input, &mut cursor, key) {
        LineAction::Edited => apply_filter(app),
        LineAction::Submit => {
            if app.filter_input.is_empty() {
                app.filter = None;
            }
            app.input_mode = InputMode::Navigate;
        }
        LineAction::Cancel => {
            app.filter_input.clear();
            app.filter = None;
            app.input_mode = InputMode::Navigate;
        }
    }
    app.clamp_cursor();
}

/// Recompile the filter as the user types. An incomplete pattern keeps the
/// previous filter in place.
fn apply_filter(app: &mut App) {
    if app.filter_input.is_empty() {
        app.filter = None;
        return;
    }
    if let Ok(re) = compile_pattern(&app.filter_input) {
        app.filter = Some(re);
    }
}
