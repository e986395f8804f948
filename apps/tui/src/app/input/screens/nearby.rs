use crate::app::input::helpers::{edit_text, wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_nearby_input(app: &mut App, key: KeyCode) {
    if app.nearby.editing_location {
        handle_location_input(app, key);
        return;
    }

    if app.nearby.filtering {
        handle_filter_input(app, key);
        return;
    }

    let len = app.nearby.visible_pins().len();
    match key {
        KeyCode::Esc => {
            if app.nearby.map.info_window().is_some() {
                app.nearby.map.close_info_window();
            } else {
                app.open_screen(AppScreen::Home);
            }
        }
        KeyCode::Up => {
            app.nearby.selected = wrap_decrement(app.nearby.selected, len);
        }
        KeyCode::Down => {
            app.nearby.selected = wrap_increment(app.nearby.selected, len);
        }
        KeyCode::Home => {
            app.nearby.selected = 0;
        }
        KeyCode::End => {
            app.nearby.selected = len.saturating_sub(1);
        }
        KeyCode::Char('n') => app.search_near_me(),
        KeyCode::Char('l') => {
            app.nearby.editing_location = true;
        }
        KeyCode::Char('/') => {
            app.nearby.filtering = true;
        }
        KeyCode::Enter => app.request_directions(),
        KeyCode::Char('b') => app.open_booking(),
        KeyCode::Char('c') => app.nearby.map.clear_route(),
        _ => {}
    }
}

fn handle_location_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.nearby.editing_location = false;
        }
        KeyCode::Enter => {
            app.nearby.editing_location = false;
            app.search_location();
        }
        _ => {
            edit_text(&mut app.nearby.location_input, key);
        }
    }
}

fn handle_filter_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.nearby.filtering = false;
            app.nearby.filter.clear();
            app.nearby.selected = 0;
        }
        KeyCode::Enter => {
            app.nearby.filtering = false;
        }
        _ => {
            if edit_text(&mut app.nearby.filter, key) {
                app.nearby.selected = 0;
            }
        }
    }
}
