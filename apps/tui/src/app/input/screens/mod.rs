use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod booking;
mod help;
mod home;
mod nearby;
mod pages;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if help::handle_toast_dismiss(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Home => home::handle_home_input(app, key),
        AppScreen::Prediction => pages::handle_prediction_input(app, key),
        AppScreen::Chatbot => pages::handle_chatbot_input(app, key),
        AppScreen::Recommend => pages::handle_recommend_input(app, key),
        AppScreen::Nearby => nearby::handle_nearby_input(app, key),
        AppScreen::BookAppointment => booking::handle_booking_input(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::BookingPage;
    use crate::app::state::testing::offline_app;
    use crate::booking::FormField;
    use std::path::PathBuf;

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            dispatch_input(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn home_menu_opens_selected_page() {
        let (mut app, _rx) = offline_app(PathBuf::from("unused"));
        dispatch_input(&mut app, KeyCode::Down);
        dispatch_input(&mut app, KeyCode::Down);
        dispatch_input(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, AppScreen::Recommend);

        dispatch_input(&mut app, KeyCode::Esc);
        dispatch_input(&mut app, KeyCode::Char('4'));
        assert_eq!(app.screen, AppScreen::Nearby);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let (mut app, _rx) = offline_app(PathBuf::from("unused"));
        dispatch_input(&mut app, KeyCode::F(1));
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn booking_form_edits_focused_field() {
        let (mut app, _rx) = offline_app(PathBuf::from("unused"));
        app.booking = BookingPage::for_hospital("City Hospital");
        app.screen = AppScreen::BookAppointment;

        type_text(&mut app, "Asha");
        dispatch_input(&mut app, KeyCode::Tab);
        type_text(&mut app, "34");
        dispatch_input(&mut app, KeyCode::Backspace);

        assert_eq!(app.booking.form.patient_name, "Asha");
        assert_eq!(app.booking.form.patient_age, "3");
        assert_eq!(app.booking.focused(), FormField::PatientAge);
    }

    #[test]
    fn nearby_filter_mode_captures_letters() {
        let (mut app, _rx) = offline_app(PathBuf::from("unused"));
        app.screen = AppScreen::Nearby;
        dispatch_input(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "nb");
        assert_eq!(app.nearby.filter, "nb");
        assert_eq!(app.nearby.search_generation(), 0);

        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.nearby.filtering);
        assert!(app.nearby.filter.is_empty());
        assert_eq!(app.screen, AppScreen::Nearby);
    }
}
