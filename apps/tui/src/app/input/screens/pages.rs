use crate::app::input::helpers::edit_text;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_recommend_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.open_screen(AppScreen::Home),
        KeyCode::Enter => app.submit_disease_lookup(),
        _ => {
            edit_text(&mut app.recommend.query, key);
        }
    }
}

pub fn handle_prediction_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.open_screen(AppScreen::Home),
        KeyCode::Enter => app.submit_prediction(),
        _ => {
            edit_text(&mut app.prediction.description, key);
        }
    }
}

pub fn handle_chatbot_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.open_screen(AppScreen::Home),
        KeyCode::Enter => app.send_chat(),
        _ => {
            edit_text(&mut app.chat.input, key);
        }
    }
}
