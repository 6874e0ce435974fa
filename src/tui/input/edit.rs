use crossterm::event::KeyEvent;

use crate::model::item::ItemId;
use crate::tui::app::{App, EditTarget, InputMode};

use super::line::{LineAction, edit_line};

/// Focus the input line for a new item on the active list.
pub fn begin_new_item(app: &mut App) {
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.edit_target = Some(EditTarget::NewItem);
    app.input_mode = InputMode::Edit;
}

/// Load an existing item's text into the input line.
pub fn begin_edit_existing(app: &mut App, id: ItemId) {
    let Some(item) = app.store.get(id) else {
        return;
    };
    app.edit_buffer = item.text.clone();
    app.edit_cursor = app.edit_buffer.len();
    app.edit_target = Some(EditTarget::Existing(id));
    app.input_mode = InputMode::Edit;
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match edit_line(&mut app.edit_buffer, &mut app.edit_cursor, key) {
        LineAction::Edited => {}
        LineAction::Submit => submit(app),
        LineAction::Cancel => leave_edit(app),
    }
}

fn submit(app: &mut App) {
    let text = app.edit_buffer.trim().to_string();
    match app.edit_target {
        Some(EditTarget::NewItem) | None => {
            if let Some(Some(id)) = app.apply(|store| store.add_item(&text)) {
                // Put the cursor on the new item
                if let Some(pos) = app.visible_ids().iter().position(|v| *v == id) {
                    app.cursor = pos;
                }
            } else if !text.is_empty() {
                // Write failed; keep the text so it is not lost
                return;
            }
        }
        Some(EditTarget::Existing(id)) => {
            if !text.is_empty() && app.apply(|store| store.edit_item(id, &text)).is_none() {
                return;
            }
        }
    }
    leave_edit(app);
}

fn leave_edit(app: &mut App) {
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.edit_target = None;
    app.input_mode = InputMode::Navigate;
}
