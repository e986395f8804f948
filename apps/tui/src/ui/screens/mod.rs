use crate::app::state::{App, AppScreen};
use crate::ui::widgets::status::key_hints;
use ratatui::text::Line as TextLine;

pub mod booking;
pub mod chatbot;
pub mod help;
pub mod home;
pub mod nearby;
pub mod prediction;
pub mod recommend;

/// Footer hints for the active page and input mode.
pub fn shortcuts(app: &App) -> TextLine<'static> {
    if app.toast.is_some() {
        return key_hints(&[("Enter/Esc", "Dismiss")]);
    }

    match app.screen {
        AppScreen::Home => key_hints(&[
            ("↑/↓", "Select"),
            ("Enter", "Open"),
            ("1-4", "Jump"),
            ("F1", "Help"),
            ("q", "Quit"),
        ]),
        AppScreen::Prediction => key_hints(&[("Enter", "Predict"), ("Esc", "Home"), ("F1", "Help")]),
        AppScreen::Chatbot => key_hints(&[("Enter", "Send"), ("Esc", "Home"), ("F1", "Help")]),
        AppScreen::Recommend => key_hints(&[("Enter", "Search"), ("Esc", "Home"), ("F1", "Help")]),
        AppScreen::Nearby if app.nearby.editing_location || app.nearby.filtering => {
            key_hints(&[("Enter", "Apply"), ("Esc", "Cancel")])
        }
        AppScreen::Nearby => key_hints(&[
            ("n", "Near me"),
            ("l", "Location"),
            ("/", "Filter"),
            ("Enter", "Directions"),
            ("b", "Book"),
            ("Esc", "Back"),
        ]),
        AppScreen::BookAppointment => key_hints(&[
            ("Tab/↑/↓", "Field"),
            ("Enter", "Book Appointment"),
            ("Esc", "Back"),
        ]),
    }
}
