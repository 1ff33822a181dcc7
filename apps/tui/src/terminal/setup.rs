use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout, Write};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen. A failed step rolls back the
/// ones before it, so the shell is usable when this returns an error.
pub fn setup_terminal() -> Result<Tui> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    tracing::debug!(width, height, "setting up terminal");

    enable_raw_mode().wrap_err("could not enable raw mode")?;

    if let Err(error) = execute!(stdout(), EnterAlternateScreen, cursor::Hide) {
        cleanup_terminal_state(true, false);
        return Err(eyre!("could not enter alternate screen: {error}"));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(terminal) => terminal,
        Err(error) => {
            cleanup_terminal_state(true, true);
            return Err(eyre!("could not create terminal: {error}"));
        }
    };

    // First draw clears anyway
    if let Err(error) = terminal.clear() {
        tracing::warn!(%error, "terminal clear failed");
    }

    Ok(terminal)
}

/// Undo whatever [`setup_terminal`] managed to do. Errors are logged, not returned.
pub fn cleanup_terminal_state(raw_mode: bool, alternate_screen: bool) {
    let mut out = stdout();

    if alternate_screen {
        if let Err(error) = execute!(out, LeaveAlternateScreen) {
            tracing::warn!(%error, "leaving alternate screen failed");
        }
    }
    if raw_mode {
        if let Err(error) = disable_raw_mode() {
            tracing::warn!(%error, "disabling raw mode failed");
        }
    }

    let _ = execute!(out, cursor::Show, cursor::MoveToNextLine(1));
    let _ = out.flush();
    tracing::debug!("terminal restored");
}
