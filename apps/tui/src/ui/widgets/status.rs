use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

/// `key: description` pairs in the footer style.
pub fn key_hints(pairs: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let spans = pairs
        .iter()
        .enumerate()
        .flat_map(|(i, (key, description))| {
            let separator = if i + 1 == pairs.len() { "" } else { "   " };
            [
                Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(": {description}{separator}")),
            ]
        })
        .collect::<Vec<_>>();
    TextLine::from(spans)
}

pub fn render_status_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut line = if app.is_busy() {
        Throbber::default()
            .label("Loading... ")
            .style(Style::default().fg(Color::Cyan))
            .to_line(&app.throbber)
    } else {
        TextLine::default()
    };

    if !app.status_message.is_empty() {
        line.push_span(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::TOP).title("Status"));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_hints_alternate_key_and_description() {
        let line = key_hints(&[("Enter", "Search"), ("Esc", "Back")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Enter: Search   Esc: Back");
    }
}
