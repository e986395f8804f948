use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_home_input(app: &mut App, key: KeyCode) {
    let len = AppScreen::MENU.len();
    match key {
        KeyCode::Up => {
            app.menu_index = wrap_decrement(app.menu_index, len);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.menu_index = wrap_increment(app.menu_index, len);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.menu_index = index;
            app.open_screen(AppScreen::MENU[index]);
        }
        KeyCode::Enter => {
            if let Some(screen) = AppScreen::MENU.get(app.menu_index) {
                app.open_screen(*screen);
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        _ => {}
    }
}
