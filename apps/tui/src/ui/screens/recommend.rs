use crate::app::pages::LoadState;
use crate::app::App;
use crate::ui::widgets::input::input_box;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn section<'a>(title: &'a str, items: &'a [String]) -> Paragraph<'a> {
    let lines = if items.is_empty() {
        vec![TextLine::from(Span::styled(
            "No information available.",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        items
            .iter()
            .map(|item| TextLine::from(format!("- {item}")))
            .collect()
    };
    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL),
    )
}

pub fn render_recommend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = &app.recommend;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    f.render_widget(
        input_box("Disease", &page.query, "Enter a disease name", true),
        chunks[0],
    );

    if let Some(error) = &page.error {
        f.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
        return;
    }

    let Some(info) = &page.disease_info else {
        let hint = if page.status == LoadState::Loading {
            "Searching..."
        } else {
            "Search for a disease to see recommendations."
        };
        f.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    f.render_widget(section("Prevention", &info.prevention), columns[0]);
    f.render_widget(section("Medicines", &info.medicines), columns[1]);
    f.render_widget(section("Home Remedies", &info.home_remedies), columns[2]);
}
