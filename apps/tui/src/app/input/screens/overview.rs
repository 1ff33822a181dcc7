use crate::app::input::helpers::{step_clamped, wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use airpower_leaderboard::domain::{Subsystem, LEADERBOARD};
use crossterm::event::KeyCode;

pub fn handle_overview_input(app: &mut App, key: KeyCode) {
    let total_rows = LEADERBOARD.len();

    match key {
        KeyCode::Up => app.selected_row = step_clamped(app.selected_row, -1, total_rows),
        KeyCode::Down => app.selected_row = step_clamped(app.selected_row, 1, total_rows),
        KeyCode::PageUp => app.selected_row = step_clamped(app.selected_row, -5, total_rows),
        KeyCode::PageDown => app.selected_row = step_clamped(app.selected_row, 5, total_rows),
        KeyCode::Home => app.selected_row = 0,
        KeyCode::End => app.selected_row = total_rows - 1,
        KeyCode::Left => {
            app.subsystem_index = wrap_decrement(app.subsystem_index, Subsystem::ALL.len());
        }
        KeyCode::Right => {
            app.subsystem_index = wrap_increment(app.subsystem_index, Subsystem::ALL.len());
        }
        KeyCode::Enter => {
            let code = app.selected_entity_code();
            app.clear_filter();
            app.open_tab(code);
            app.screen = AppScreen::Fleet;
        }
        _ => {}
    }
}
