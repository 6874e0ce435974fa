use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, EditTarget, InputMode};
use crate::util::unicode::{display_col, display_width, truncate_to_width};

/// Render the input line: the edit buffer while typing, else the placeholder
pub fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.input_bg;
    let editing = app.input_mode == InputMode::Edit;
    let prefix = match app.edit_target {
        Some(EditTarget::Existing(_)) if editing => " \u{270E} ",
        _ => " + ",
    };
    let prefix_w = display_width(prefix);
    let avail = (area.width as usize).saturating_sub(prefix_w + 1);

    let mut spans = vec![Span::styled(
        prefix,
        Style::default().fg(app.theme.accent(app.mode())).bg(bg),
    )];

    if editing {
        let start = scroll_start(&app.edit_buffer, app.edit_cursor, avail);
        let visible = truncate_to_width(&app.edit_buffer[start..], avail);
        spans.push(Span::styled(
            visible,
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        let col = display_col(&app.edit_buffer[start..], app.edit_cursor - start);
        frame.set_cursor_position(Position::new(
            area.x + (prefix_w + col) as u16,
            area.y,
        ));
    } else {
        spans.push(Span::styled(
            app.mode().placeholder(),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// First byte to show so the cursor stays within `avail` cells.
fn scroll_start(buffer: &str, cursor: usize, avail: usize) -> usize {
    if display_col(buffer, cursor) <= avail {
        return 0;
    }
    for (i, _) in buffer[..cursor].grapheme_indices(true) {
        if display_width(&buffer[i..cursor]) <= avail {
            return i;
        }
    }
    cursor
}
