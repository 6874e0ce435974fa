use crossterm::event::{KeyCode, KeyEvent};

use crate::model::item::Mode;
use crate::tui::app::{App, ConfirmState, InputMode};

use super::edit::{begin_edit_existing, begin_new_item};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.visible_ids().len();
            if app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible_ids().len().saturating_sub(1);
        }

        // Lists
        KeyCode::Tab | KeyCode::BackTab => {
            let next = app.mode().toggled();
            app.switch_mode(next);
        }
        KeyCode::Char('w') => app.switch_mode(Mode::Work),
        KeyCode::Char('t') => app.switch_mode(Mode::Travel),

        // Items
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter => begin_new_item(app),
        KeyCode::Char('e') => {
            if let Some(id) = app.cursor_id() {
                begin_edit_existing(app, id);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = app.cursor_id()
                && let Some(Some(done)) = app.apply(|store| store.toggle_complete(id))
            {
                app.set_status(if done { "done" } else { "not done" });
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_id()
                && let Some(item) = app.store.get(id)
            {
                app.confirm_state = Some(ConfirmState {
                    id,
                    text: item.text.clone(),
                });
                app.input_mode = InputMode::Confirm;
            }
        }

        // Filter
        KeyCode::Char('/') => {
            app.filter_input.clear();
            app.input_mode = InputMode::Filter;
        }
        KeyCode::Esc => {
            if app.filter.take().is_some() {
                app.filter_input.clear();
                app.clamp_cursor();
            }
        }

        _ => {}
    }
}
