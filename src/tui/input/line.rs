use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// Outcome of a key press on a single-line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineAction {
    /// Buffer or cursor changed (or the key was swallowed)
    Edited,
    Submit,
    Cancel,
}

/// Apply one key to `buffer` with the cursor at byte offset `cursor`.
pub(super) fn edit_line(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> LineAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Enter => return LineAction::Submit,
        KeyCode::Esc => return LineAction::Cancel,

        // Word motion
        KeyCode::Left if ctrl || alt => *cursor = word_boundary_left(buffer, *cursor),
        KeyCode::Right if ctrl || alt => *cursor = word_boundary_right(buffer, *cursor),
        KeyCode::Char('b') if alt => *cursor = word_boundary_left(buffer, *cursor),
        KeyCode::Char('f') if alt => *cursor = word_boundary_right(buffer, *cursor),

        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        KeyCode::Char('a') if ctrl => *cursor = 0,
        KeyCode::Char('e') if ctrl => *cursor = buffer.len(),

        // Deletion
        KeyCode::Char('w') if ctrl => {
            let start = word_boundary_left(buffer, *cursor);
            buffer.replace_range(start..*cursor, "");
            *cursor = start;
        }
        KeyCode::Char('u') if ctrl => {
            buffer.replace_range(..*cursor, "");
            *cursor = 0;
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(*cursor..next, "");
            }
        }

        KeyCode::Char(c) if !ctrl && !alt => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => {}
    }
    LineAction::Edited
}
