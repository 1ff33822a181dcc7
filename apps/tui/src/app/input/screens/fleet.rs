use crate::app::input::helpers::step_clamped;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_fleet_input(app: &mut App, key: KeyCode) {
    let total_cards = app.visible_cards().len();

    match key {
        KeyCode::Left => {
            app.clear_filter();
            app.previous_tab();
        }
        KeyCode::Right => {
            app.clear_filter();
            app.next_tab();
        }
        KeyCode::Up => app.card_scroll = step_clamped(app.card_scroll, -1, total_cards),
        KeyCode::Down => app.card_scroll = step_clamped(app.card_scroll, 1, total_cards),
        KeyCode::PageUp => app.card_scroll = step_clamped(app.card_scroll, -5, total_cards),
        KeyCode::PageDown => app.card_scroll = step_clamped(app.card_scroll, 5, total_cards),
        KeyCode::Home => app.card_scroll = 0,
        KeyCode::Char('/') => {
            app.filter_editing = true;
        }
        KeyCode::Esc => {
            if app.filter.is_empty() {
                app.screen = AppScreen::Overview;
            } else {
                app.clear_filter();
            }
        }
        _ => {}
    }
}

pub fn handle_filter_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => {
            app.filter.push(c);
            app.card_scroll = 0;
        }
        KeyCode::Backspace => {
            app.filter.pop();
            app.card_scroll = 0;
        }
        KeyCode::Enter => {
            app.filter_editing = false;
        }
        KeyCode::Esc => {
            app.clear_filter();
        }
        _ => {}
    }
}
