use crate::app::pages::LoadState;
use crate::app::App;
use crate::ui::widgets::input::input_box;
use crate::ui::widgets::list::scroll_offset;
use crate::ui::widgets::map::{category_color, render_map};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_nearby(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = &app.nearby;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Location + filter
            Constraint::Min(6),    // List + map
            Constraint::Length(1), // Error line
        ])
        .split(area);

    let search_bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);
    f.render_widget(
        input_box(
            "Location (l)",
            &page.location_input,
            "Enter a location, or press n to search near you",
            page.editing_location,
        ),
        search_bar[0],
    );
    f.render_widget(
        input_box("Filter (/)", &page.filter, "name or address", page.filtering),
        search_bar[1],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_place_table(app, f, body[0]);

    if page.map.info_window().is_some() {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(8)])
            .split(body[1]);
        render_map(page, f, right[0]);
        render_info_window(app, f, right[1]);
    } else {
        render_map(page, f, body[1]);
    }

    let message = page
        .error
        .as_ref()
        .or(page.geolocation_error.as_ref())
        .map_or_else(TextLine::default, |error| {
            TextLine::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
        });
    f.render_widget(Paragraph::new(message), rows[2]);
}

fn render_place_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = &app.nearby;
    let pins = page.map.pins();
    let visible = page.visible_pins();

    if visible.is_empty() {
        let text = match page.status {
            LoadState::Loading => "Searching nearby places...",
            _ if !pins.is_empty() => "No places match the filter.",
            _ => "No places yet. Press n or l to search.",
        };
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Places").borders(Borders::ALL)),
            area,
        );
        return;
    }

    let header = Row::new(vec![Cell::from("Name"), Cell::from("Type"), Cell::from("Rating")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(visible.len(), max_visible_rows, page.selected);

    let table_rows = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .filter_map(|(row, index)| pins.get(*index).map(|pin| (row, pin)))
        .map(|(row, pin)| {
            let style = if row == page.selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(category_color(pin.place.category))
            };
            Row::new(vec![
                Cell::from(pin.place.name.clone()),
                Cell::from(pin.place.category.label()),
                Cell::from(
                    pin.place
                        .rating
                        .map_or_else(|| "N/A".to_string(), |rating| format!("{rating:.1}")),
                ),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(6),
    ];
    let table = Table::new(table_rows, widths).header(header).block(
        Block::default()
            .title(format!(
                "Places ({} of {})",
                (page.selected + 1).min(visible.len()),
                visible.len()
            ))
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}

fn render_info_window(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(window) = app.nearby.map.info_window() else {
        return;
    };

    let mut lines = window
        .lines
        .iter()
        .map(|line| TextLine::from(line.as_str()))
        .collect::<Vec<_>>();
    if app.nearby.route_status == LoadState::Loading {
        lines.push(TextLine::from(Span::styled(
            "Getting directions...",
            Style::default().fg(Color::Gray),
        )));
    }
    if window.book_action {
        lines.push(TextLine::from(vec![
            Span::styled(
                "[b] Book Appointment",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(window.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
