use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, InputMode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = if let Some(msg) = &app.status_message {
        let color = if app.status_is_error { app.theme.red } else { app.theme.text };
        Line::from(Span::styled(format!(" {}", msg), Style::default().fg(color).bg(bg)))
    } else {
        match app.input_mode {
            InputMode::Navigate => {
                let mut spans = Vec::new();
                if let Some(re) = &app.filter {
                    spans.push(Span::styled(format!("/{}", re.as_str()), dim));
                }
                if app.show_key_hints {
                    push_hint(
                        &mut spans,
                        "a add  e edit  space done  d delete  tab switch  / filter  q quit",
                        width,
                        dim,
                    );
                }
                Line::from(spans)
            }
            InputMode::Edit => {
                let mut spans = Vec::new();
                if app.show_key_hints {
                    push_hint(&mut spans, "Enter save  Esc cancel", width, dim);
                }
                Line::from(spans)
            }
            InputMode::Confirm => {
                let mut spans = Vec::new();
                if app.show_key_hints {
                    push_hint(&mut spans, "y OK  n Cancel", width, dim);
                }
                Line::from(spans)
            }
            InputMode::Filter => {
                // Filter prompt: /pattern▌
                let mut spans = vec![
                    Span::styled(
                        format!("/{}", app.filter_input),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                    Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
                ];
                if app.show_key_hints {
                    push_hint(&mut spans, "Enter keep  Esc clear", width, dim);
                }
                Line::from(spans)
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align `hint` after the existing spans, if it fits.
fn push_hint<'a>(spans: &mut Vec<Span<'a>>, hint: &'a str, width: usize, style: Style) {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), style));
        spans.push(Span::styled(hint, style));
    }
}
