pub mod input;
pub mod list;
pub mod map;
pub mod popup;
pub mod status;
