use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Single-line text box. An empty value shows the placeholder; the active
/// box gets a cursor and a yellow border.
pub fn input_box<'a>(title: &'a str, value: &'a str, placeholder: &'a str, active: bool) -> Paragraph<'a> {
    let mut spans = if value.is_empty() {
        vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::raw(value)]
    };
    if active {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }

    let border = if active { Color::Yellow } else { Color::Gray };
    Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
}
