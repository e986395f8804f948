use crate::app::input::helpers::edit_text;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_booking_input(app: &mut App, key: KeyCode) {
    let field = app.booking.focused();
    match key {
        KeyCode::Esc => app.open_screen(AppScreen::Nearby),
        KeyCode::Down | KeyCode::Tab => {
            app.booking.field = Some(field.next());
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.booking.field = Some(field.prev());
        }
        KeyCode::Enter => app.submit_booking(),
        _ => {
            if edit_text(field.value_mut(&mut app.booking.form), key) {
                app.booking.error = None;
            }
        }
    }
}
