use crate::app::pages::NearbyPage;
use crate::domain::{Coordinate, PlaceCategory};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

pub const fn category_color(category: PlaceCategory) -> Color {
    match category {
        PlaceCategory::Facility => Color::Red,
        PlaceCategory::Pharmacy => Color::Green,
    }
}

pub const fn category_symbol(category: PlaceCategory) -> &'static str {
    match category {
        PlaceCategory::Facility => "H",
        PlaceCategory::Pharmacy => "+",
    }
}

/// Half-width of the drawn viewport in kilometres. Leaves a margin around
/// the search circle.
fn viewport_km(radius_m: u32) -> f64 {
    (f64::from(radius_m) / 1000.0 * 1.2).max(0.5)
}

/// Plots the current location, place pins and the route on a km grid
/// centred on the map centre.
pub fn render_map(page: &NearbyPage, f: &mut Frame<'_>, area: Rect) {
    let map = &page.map;
    let center = map.center();
    let radius_km = f64::from(map.radius_m()) / 1000.0;
    let extent = viewport_km(map.radius_m());
    let selected = page.selected_pin().map(|pin| pin.id.clone());
    let project = |position: Coordinate| position.offset_km_from(center);

    let block = Block::default()
        .title(format!("Map ({center}, {radius_km} km)"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-extent, extent])
        .y_bounds([-extent, extent])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: radius_km,
                color: Color::DarkGray,
            });

            if let Some(route) = map.route() {
                for segment in route.summary.path.windows(2) {
                    let (x1, y1) = project(segment[0]);
                    let (x2, y2) = project(segment[1]);
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: Color::Yellow,
                    });
                }
            }

            ctx.layer();

            for pin in map.pins() {
                let (x, y) = project(pin.marker.position);
                let mut style = Style::default().fg(category_color(pin.place.category));
                if selected.as_ref() == Some(&pin.id) {
                    style = style.bg(Color::White).add_modifier(Modifier::BOLD);
                }
                ctx.print(x, y, Span::styled(category_symbol(pin.place.category), style));
            }

            if let Some(current) = map.current_location() {
                let (x, y) = project(current.position);
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        "@",
                        Style::default()
                            .fg(Color::LightBlue)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_has_margin_and_floor() {
        assert!((viewport_km(5000) - 6.0).abs() < 1e-9);
        assert!((viewport_km(100) - 0.5).abs() < 1e-9);
    }
}
