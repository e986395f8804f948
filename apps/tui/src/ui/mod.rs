// Rendering for every page plus the toast and help overlays.

pub mod screens;
pub mod widgets;

use crate::app::state::{AppScreen, ToastKind};
use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use widgets::popup::{centered_rect, top_right_rect};
use widgets::status::render_status_bar;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Page
            Constraint::Length(2), // Status
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title(app, f, chunks[0]);

    match app.screen {
        AppScreen::Home => screens::home::render_home(app, f, chunks[1]),
        AppScreen::Prediction => screens::prediction::render_prediction(app, f, chunks[1]),
        AppScreen::Chatbot => screens::chatbot::render_chatbot(app, f, chunks[1]),
        AppScreen::Recommend => screens::recommend::render_recommend(app, f, chunks[1]),
        AppScreen::Nearby => screens::nearby::render_nearby(app, f, chunks[1]),
        AppScreen::BookAppointment => screens::booking::render_booking(app, f, chunks[1]),
    }

    render_status_bar(app, f, chunks[2]);
    f.render_widget(
        Paragraph::new(screens::shortcuts(app)).alignment(Alignment::Center),
        chunks[3],
    );

    if app.toast.is_some() {
        render_toast(app, f);
    }

    if app.show_help {
        screens::help::render_help_popup(app, f, centered_rect(60, 70, f.area()));
    }
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = TextLine::from(vec![
        Span::styled(
            "MedAssist ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.screen.label(), Style::default().fg(Color::White)),
    ]);
    let paragraph = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_toast(app: &App, f: &mut Frame<'_>) {
    let Some(toast) = &app.toast else {
        return;
    };
    let color = match toast.kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    #[allow(clippy::cast_possible_truncation)]
    let width = (toast.message.chars().count() as u16).saturating_add(4);
    let area = top_right_rect(width, 3, f.area());

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(toast.message.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}
