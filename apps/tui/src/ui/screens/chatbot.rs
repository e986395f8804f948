use crate::app::App;
use crate::domain::Sender;
use crate::ui::widgets::input::input_box;
use crate::ui::widgets::list::tail_offset;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_chatbot(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = &app.chat;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    // One line per reply line so the view can stick to the newest message.
    let lines = page
        .messages
        .iter()
        .flat_map(|message| {
            let (who, color) = match message.sender {
                Sender::User => ("You", Color::Yellow),
                Sender::Assistant => ("Bot", Color::Cyan),
            };
            let label = Style::default().fg(color).add_modifier(Modifier::BOLD);
            message
                .text
                .lines()
                .enumerate()
                .map(move |(i, text)| {
                    let prefix = if i == 0 { format!("{who}: ") } else { "     ".to_string() };
                    TextLine::from(vec![Span::styled(prefix, label), Span::raw(text.to_string())])
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let visible = chunks[0].height.saturating_sub(2) as usize;
    let offset = u16::try_from(tail_offset(lines.len(), visible)).unwrap_or(u16::MAX);

    f.render_widget(
        Paragraph::new(lines)
            .scroll((offset, 0))
            .block(Block::default().title("Conversation").borders(Borders::ALL)),
        chunks[0],
    );

    f.render_widget(
        input_box("Message", &page.input, "Ask a health question", true),
        chunks[1],
    );
}
