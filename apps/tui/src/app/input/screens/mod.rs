use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod fleet;
mod help;
mod overview;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.filter_editing {
        fleet::handle_filter_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            app.screen = match app.screen {
                AppScreen::Overview => AppScreen::Fleet,
                AppScreen::Fleet => AppScreen::Overview,
            };
            return;
        }
        _ => {}
    }

    match app.screen {
        AppScreen::Overview => overview::handle_overview_input(app, key),
        AppScreen::Fleet => fleet::handle_fleet_input(app, key),
    }
}
