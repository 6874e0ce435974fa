use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{KeyValueStore, MemoryStore};
use crate::io::store::ToDoStore;
use crate::model::Config;
use crate::model::item::Mode;
use crate::tui::app::App;
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An in-memory app holding `items` in order, ids 1000, 1001, ...,
/// showing the Work list.
pub fn app_with(items: &[(&str, Mode)]) -> App {
    let storage: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
    let mut store = ToDoStore::open(storage).unwrap();
    for (i, (text, mode)) in items.iter().enumerate() {
        store.set_mode(*mode).unwrap();
        store.add_item_at(text, 1_000 + i as u64).unwrap();
    }
    store.set_mode(Mode::Work).unwrap();
    App::new(store, &Config::default())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Send each char of `text` as a key press.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}
