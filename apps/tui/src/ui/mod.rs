// UI module for the leaderboard dashboard
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(10),   // Content area
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    screens::chrome::render_title(app, f, layout[0]);

    match app.screen {
        AppScreen::Overview => screens::overview::render_overview(app, f, layout[1]),
        AppScreen::Fleet => screens::fleet::render_fleet(app, f, layout[1]),
    }

    screens::chrome::render_status(app, f, layout[2]);
    screens::chrome::render_shortcuts(app, f, layout[3]);

    if app.show_help {
        screens::help::render_help_popup(f, f.area());
    }
}
