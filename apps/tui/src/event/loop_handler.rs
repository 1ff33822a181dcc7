use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{handle_input, App, AppEvent};
use crate::terminal::Tui;
use crate::ui;

// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Run the main application event loop
pub async fn run(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        // Loader and readiness notifications arrive between frames
        while let Ok(app_event) = events.try_recv() {
            app.handle_event(app_event);
        }

        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    // Non-fatal, the next iteration redraws anyway
                    let _ = terminal.draw(|f| ui::ui(app, f));
                }
                Ok(_) | Err(_) => {}
            }
        }

        if !app.running {
            break;
        }

        // Let spawned readiness tasks make progress on the current thread
        tokio::task::yield_now().await;
    }

    Ok(())
}
