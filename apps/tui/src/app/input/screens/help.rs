use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

/// While a toast is up, Enter or Esc dismisses it early.
pub fn handle_toast_dismiss(app: &mut App, key: KeyCode) -> bool {
    if app.toast.is_none() {
        return false;
    }

    if matches!(key, KeyCode::Enter | KeyCode::Esc) {
        app.close_toast();
        return true;
    }

    false
}
