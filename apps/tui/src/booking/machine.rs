use std::fmt;
use std::path::PathBuf;

/// Life cycle of a booking: the form is submitted, the confirmation toast is
/// shown, and the receipt is written once the toast closes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BookingState {
    Editing,
    Confirmed,
    WritingReceipt,
    ReceiptSaved,
    ReceiptFailed,
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "Editing"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::WritingReceipt => write!(f, "WritingReceipt"),
            Self::ReceiptSaved => write!(f, "ReceiptSaved"),
            Self::ReceiptFailed => write!(f, "ReceiptFailed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingEvent {
    Submitted,
    ToastClosed,
    ReceiptWritten(PathBuf),
    ReceiptFailed(String),
    Reset,
}

impl fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "Submitted"),
            Self::ToastClosed => write!(f, "ToastClosed"),
            Self::ReceiptWritten(path) => write!(f, "ReceiptWritten({})", path.display()),
            Self::ReceiptFailed(msg) => write!(f, "ReceiptFailed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid transition from {from} with event {event}")]
pub struct StateTransitionError {
    pub from: BookingState,
    pub event: BookingEvent,
}

#[derive(Debug)]
pub struct BookingMachine {
    state: BookingState,
}

impl Default for BookingMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingMachine {
    pub const fn new() -> Self {
        Self {
            state: BookingState::Editing,
        }
    }

    pub const fn state(&self) -> BookingState {
        self.state
    }

    pub fn process(&mut self, event: &BookingEvent) -> Result<BookingState, StateTransitionError> {
        let next = match (self.state, event) {
            (BookingState::Editing, BookingEvent::Submitted) => BookingState::Confirmed,
            (BookingState::Confirmed, BookingEvent::ToastClosed) => BookingState::WritingReceipt,
            (BookingState::WritingReceipt, BookingEvent::ReceiptWritten(_)) => {
                BookingState::ReceiptSaved
            }
            (BookingState::WritingReceipt, BookingEvent::ReceiptFailed(_)) => {
                BookingState::ReceiptFailed
            }
            (BookingState::ReceiptSaved | BookingState::ReceiptFailed, BookingEvent::Reset) => {
                BookingState::Editing
            }
            _ => {
                return Err(StateTransitionError {
                    from: self.state,
                    event: event.clone(),
                })
            }
        };
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_returns_to_editing() {
        let mut machine = BookingMachine::new();
        machine.process(&BookingEvent::Submitted).unwrap();
        machine.process(&BookingEvent::ToastClosed).unwrap();
        assert_eq!(
            machine
                .process(&BookingEvent::ReceiptWritten(PathBuf::from("r.pdf")))
                .unwrap(),
            BookingState::ReceiptSaved
        );
        assert_eq!(machine.process(&BookingEvent::Reset).unwrap(), BookingState::Editing);
    }

    #[test]
    fn toast_close_while_editing_is_rejected() {
        let mut machine = BookingMachine::new();
        let err = machine.process(&BookingEvent::ToastClosed).unwrap_err();
        assert_eq!(err.from, BookingState::Editing);
        assert_eq!(
            err.to_string(),
            "Invalid transition from Editing with event ToastClosed"
        );
        assert_eq!(machine.state(), BookingState::Editing);
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut machine = BookingMachine::new();
        machine.process(&BookingEvent::Submitted).unwrap();
        assert!(machine.process(&BookingEvent::Submitted).is_err());
        assert_eq!(machine.state(), BookingState::Confirmed);
    }

    #[test]
    fn failed_receipt_can_be_reset() {
        let mut machine = BookingMachine::new();
        machine.process(&BookingEvent::Submitted).unwrap();
        machine.process(&BookingEvent::ToastClosed).unwrap();
        machine
            .process(&BookingEvent::ReceiptFailed("disk full".into()))
            .unwrap();
        assert_eq!(machine.process(&BookingEvent::Reset).unwrap(), BookingState::Editing);
    }
}
