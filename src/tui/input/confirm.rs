use crossterm::event::{KeyCode, KeyEvent};

use crate::io::store::Confirmation;
use crate::tui::app::{App, InputMode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let answer = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Confirmation::Ok,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Cancel,
        _ => return,
    };

    let state = app.confirm_state.take();
    app.input_mode = InputMode::Navigate;
    let Some(state) = state else {
        return;
    };

    if answer == Confirmation::Ok
        && let Some(Some(removed)) = app.apply(|store| store.delete_item(state.id, |_| answer))
    {
        app.set_status(format!("deleted \"{}\"", removed.text));
    }
}
