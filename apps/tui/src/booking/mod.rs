// Appointment booking: form validation, confirmation flow and PDF receipt.

pub mod form;
pub mod machine;
pub mod receipt;

pub use form::{validate, Appointment, FormError, FormField};
pub use machine::{BookingEvent, BookingMachine, BookingState};
pub use receipt::{write_receipt, ReceiptError};

pub const BOOKED_MESSAGE: &str = "Appointment booked successfully!";
