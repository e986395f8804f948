use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{handle_input, App, TaskOutcome};
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Applies every outcome that has arrived since the last tick. Returns
/// `false` once all senders are gone.
pub fn drain_outcomes(app: &mut App, outcomes: &mut UnboundedReceiver<TaskOutcome>) -> bool {
    loop {
        match outcomes.try_recv() {
            Ok(outcome) => app.apply_outcome(outcome),
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut outcomes: UnboundedReceiver<TaskOutcome>,
) -> Result<()> {
    app.mount();

    while app.running {
        if !drain_outcomes(app, &mut outcomes) {
            tracing::warn!("task channel closed");
        }
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    if let Err(e) = terminal.autoresize() {
                        tracing::debug!(error = %e, "resize failed");
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "failed to read terminal event");
                }
            }
        }

        // Let spawned requests make progress between frames.
        tokio::task::yield_now().await;
    }

    Ok(())
}
