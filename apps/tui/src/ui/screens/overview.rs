use crate::app::App;
use crate::ui::widgets::charts::{render_li_chart, render_subsystem_chart};
use crate::ui::widgets::radar::render_capability_radar;
use crate::ui::widgets::tables::render_rankings_table;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

pub fn render_overview(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[0]);

    render_rankings_table(app, f, top[0]);
    render_li_chart(f, top[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_capability_radar(f, bottom[0], app.animation_counter);
    render_subsystem_chart(app, f, bottom[1]);
}
