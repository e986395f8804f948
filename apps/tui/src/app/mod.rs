// Application state, page models and key handling.

pub mod actions;
pub mod input;
pub mod pages;
pub mod state;

pub use actions::{AppActions, TaskOutcome};
pub use input::handle_input;
pub use state::{App, AppScreen, Toast, ToastKind};
