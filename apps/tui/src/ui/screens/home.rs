use crate::app::state::{App, AppScreen};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const fn describe(screen: AppScreen) -> &'static str {
    match screen {
        AppScreen::Prediction => "Describe your symptoms and get a likely condition.",
        AppScreen::Chatbot => "Ask general health questions.",
        AppScreen::Recommend => "Prevention, medicines and home remedies for a disease.",
        AppScreen::Nearby => "Find hospitals and pharmacies, get directions, book a visit.",
        AppScreen::Home | AppScreen::BookAppointment => "",
    }
}

pub fn render_home(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let items = AppScreen::MENU
        .iter()
        .enumerate()
        .flat_map(|(i, screen)| {
            let is_selected = i == app.menu_index;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if is_selected { ">" } else { " " };
            [
                TextLine::from(Span::styled(
                    format!("{prefix} {}. {}", i + 1, screen.label()),
                    style,
                )),
                TextLine::from(Span::styled(
                    format!("     {}", describe(*screen)),
                    Style::default().fg(Color::Gray),
                )),
            ]
        })
        .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(items).block(Block::default().title("Menu").borders(Borders::ALL)),
        chunks[0],
    );

    let location = match (app.nearby.origin, &app.nearby.geolocation_error) {
        (Some(origin), _) => TextLine::from(vec![
            Span::raw("Your location: "),
            Span::styled(origin.to_string(), Style::default().fg(Color::LightBlue)),
        ]),
        (None, Some(error)) => {
            TextLine::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
        }
        (None, None) => TextLine::from(Span::styled(
            "Locating...",
            Style::default().fg(Color::Gray),
        )),
    };
    f.render_widget(
        Paragraph::new(location)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );
}
