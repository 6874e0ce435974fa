use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::push_highlighted_spans;

/// Render the active list, keeping the cursor row in view
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    let ids = app.visible_ids();

    if ids.is_empty() {
        let msg = if app.filter.is_some() { "  no matches" } else { "  (empty)" };
        let para = Paragraph::new(Span::styled(msg, Style::default().fg(app.theme.dim).bg(bg)))
            .style(Style::default().bg(bg));
        frame.render_widget(para, area);
        return;
    }

    adjust_scroll(app, height);

    let text_width = (area.width as usize).saturating_sub(5);
    let highlight = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let mut lines: Vec<Line> = Vec::new();
    for (row, id) in ids.iter().enumerate().skip(app.scroll_offset).take(height) {
        let Some(item) = app.store.get(*id) else {
            continue;
        };
        let row_bg = if row == app.cursor { app.theme.selection_bg } else { bg };
        let mut text_style = Style::default().fg(app.theme.item_color(item.completed)).bg(row_bg);
        if item.completed {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }
        let box_style = Style::default()
            .fg(if item.completed { app.theme.green } else { app.theme.dim })
            .bg(row_bg);

        let mut spans = vec![
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(format!("[{}]", item.checkbox_char()), box_style),
            Span::styled(" ", Style::default().bg(row_bg)),
        ];
        let text = truncate_to_width(&item.text, text_width);
        push_highlighted_spans(&mut spans, &text, text_style, highlight, app.filter.as_ref());
        lines.push(Line::from(spans).style(Style::default().bg(row_bg)));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Move the scroll window so the cursor row is visible
fn adjust_scroll(app: &mut App, height: usize) {
    if height == 0 {
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
}
