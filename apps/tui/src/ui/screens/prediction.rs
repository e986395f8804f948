use crate::app::App;
use crate::ui::widgets::input::input_box;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_prediction(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = &app.prediction;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    f.render_widget(
        input_box(
            "Symptoms",
            &page.description,
            "Describe your symptoms, e.g. fever, headache, sore throat",
            true,
        ),
        chunks[0],
    );

    let (text, style) = match (&page.response, &page.error) {
        (_, Some(error)) => (error.as_str(), Style::default().fg(Color::Red)),
        (Some(response), None) => (response.as_str(), Style::default().fg(Color::White)),
        (None, None) => ("The prediction will appear here.", Style::default().fg(Color::Gray)),
    };

    f.render_widget(
        Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Prediction").borders(Borders::ALL)),
        chunks[1],
    );
}
