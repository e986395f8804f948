use crate::app::App;
use crate::booking::FormField;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_booking(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = &app.booking;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    let focused = page.focused();
    let mut lines = vec![
        TextLine::from(vec![
            Span::styled("Hospital: ", Style::default().fg(Color::Gray)),
            Span::styled(
                page.form.hospital.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::default(),
    ];

    for field in FormField::ALL {
        let is_focused = field == focused;
        let label_style = if is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let value = field.value(&page.form);
        let value_span = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.to_string())
        };

        let mut spans = vec![
            Span::styled(format!("{:<22}", field.label()), label_style),
            Span::raw(" "),
            value_span,
        ];
        if is_focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
        lines.push(TextLine::from(spans));
    }

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title("Book Appointment")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        chunks[0],
    );

    let footer = match (&page.error, &page.receipt_path) {
        (Some(error), _) => {
            TextLine::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
        }
        (None, Some(path)) => TextLine::from(vec![
            Span::raw("Receipt: "),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Green)),
        ]),
        (None, None) => TextLine::from(Span::styled(
            "All fields are required.",
            Style::default().fg(Color::Gray),
        )),
    };
    f.render_widget(
        Paragraph::new(footer)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );
}
