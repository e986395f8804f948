use crate::app::state::{App, AppScreen};
use crate::ui::widgets::status::key_hints;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(app: &App, f: &mut Frame<'_>, area: Rect) {
    let heading = |text: &'static str| {
        TextLine::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![
        heading("Everywhere"),
        key_hints(&[("F1", "Toggle help"), ("Esc", "Back / close")]),
        TextLine::default(),
    ];

    match app.screen {
        AppScreen::Home => {
            lines.push(heading("Home"));
            lines.push(key_hints(&[("↑/↓", "Move"), ("Enter", "Open page"), ("q", "Quit")]));
        }
        AppScreen::Prediction | AppScreen::Recommend | AppScreen::Chatbot => {
            lines.push(heading(app.screen.label()));
            lines.push(TextLine::from("Type, then press Enter to submit."));
        }
        AppScreen::Nearby => {
            lines.push(heading("Nearby"));
            lines.push(key_hints(&[("n", "Search around your location")]));
            lines.push(key_hints(&[("l", "Type a location, Enter to search")]));
            lines.push(key_hints(&[("/", "Filter the list by name")]));
            lines.push(key_hints(&[("↑/↓", "Select a place")]));
            lines.push(key_hints(&[("Enter", "Driving directions to the selection")]));
            lines.push(key_hints(&[("b", "Book at the selected medical facility")]));
            lines.push(key_hints(&[("c", "Clear the route")]));
            lines.push(TextLine::from(vec![
                Span::styled("@", Style::default().fg(Color::LightBlue)),
                Span::raw(" you   "),
                Span::styled("H", Style::default().fg(Color::Red)),
                Span::raw(" medical facility   "),
                Span::styled("+", Style::default().fg(Color::Green)),
                Span::raw(" pharmacy"),
            ]));
        }
        AppScreen::BookAppointment => {
            lines.push(heading("Book Appointment"));
            lines.push(TextLine::from("Every field is required. Enter submits the form."));
            lines.push(TextLine::from(
                "The receipt PDF is saved when the confirmation closes.",
            ));
        }
    }

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
