// Library surface of the terminal client, shared by the binary and tests.
pub mod app;
pub mod booking;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod map;
pub mod services;
pub mod terminal;
pub mod ui;

pub use domain::{Coordinate, Place, PlaceCategory};
