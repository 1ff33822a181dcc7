use crate::app::App;
use airpower_leaderboard::domain::{li_color, top, Subsystem, LEADERBOARD};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Tabs};
use ratatui::Frame;

const SUBSYSTEM_TOP: usize = 10;

pub fn render_subsystem_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Subsystem::ALL
        .iter()
        .map(|subsystem| TextLine::from(subsystem.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.subsystem_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(app.subsystem().color())
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// Lethality Index for every country, colored by tier.
pub fn render_li_chart(f: &mut Frame<'_>, area: Rect) {
    let bars: Vec<Bar<'_>> = LEADERBOARD
        .iter()
        .map(|entity| {
            Bar::default()
                .value(scaled(entity.li))
                .text_value(format!("{:.0}", entity.li))
                .label(TextLine::from(entity.code.to_uppercase()))
                .style(Style::default().fg(li_color(entity.li)))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(li_color(entity.li))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Lethality Index by Country")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(1000)
        .bar_gap(1)
        .bar_width(3);

    f.render_widget(chart, area);
}

/// Selected subsystem score for the top ten countries.
pub fn render_subsystem_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    let subsystem = app.subsystem();
    let block = Block::default()
        .title(format!("{} (top {SUBSYSTEM_TOP})", subsystem.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(inner);

    render_subsystem_tabs(app, f, split[0]);

    let bars: Vec<Bar<'_>> = top(SUBSYSTEM_TOP)
        .iter()
        .map(|entity| {
            Bar::default()
                .value(u64::from(entity.score(subsystem)))
                .label(TextLine::from(entity.code.to_uppercase()))
                .style(Style::default().fg(subsystem.color()))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .max(100)
        .bar_gap(1)
        .bar_width(4);

    f.render_widget(chart, split[1]);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(li: f64) -> u64 {
    (li * 10.0).round().max(0.0) as u64
}
