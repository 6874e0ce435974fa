use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the delete prompt over the list
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm_state else {
        return;
    };

    let popup_w: u16 = 40.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);

    let quoted = truncate_to_width(
        &format!("\u{201c}{}\u{201d}", confirm.text),
        inner_w.saturating_sub(3),
    );

    let lines = vec![
        Line::from(Span::styled(" Delete To Do", header_style)),
        Line::from(""),
        Line::from(Span::styled("  R U sure?", text_style)),
        Line::from(Span::styled(format!("   {}", quoted), bright_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [n]", key_style),
            Span::styled(" Cancel   ", text_style),
            Span::styled("[y]", key_style),
            Span::styled(" OK", text_style),
        ]),
    ];

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
