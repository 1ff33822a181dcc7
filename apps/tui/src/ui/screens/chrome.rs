use crate::app::{App, AppScreen};
use airpower_leaderboard::domain::LEADERBOARD;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_title(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Air Power Leaderboard ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let screen_label = match app.screen {
        AppScreen::Overview => "Overview",
        AppScreen::Fleet => "Fleet Rosters",
    };
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Air Power ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            screen_label,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  source: {}", app.source_description),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    let resolved = app.cache.resolved_count();
    if app.is_loading() {
        let throbber = Throbber::default()
            .label(format!("Loading rosters {resolved}/{}", LEADERBOARD.len()))
            .style(Style::default().fg(Color::Gray))
            .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        f.render_stateful_widget(throbber, chunks[1], &mut app.throbber_state);
    } else {
        let progress = Paragraph::new(TextLine::from(Span::styled(
            format!("Rosters {resolved}/{}", LEADERBOARD.len()),
            Style::default().fg(Color::Green),
        )))
        .alignment(Alignment::Right);
        f.render_widget(progress, chunks[1]);
    }
}

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let line = if app.filter_editing || !app.filter.is_empty() {
        TextLine::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}{}", app.filter, if app.filter_editing { "_" } else { "" }),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        TextLine::from(Span::styled(app.status_message.clone(), style))
    };

    f.render_widget(Paragraph::new(line), area);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn hint(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Gray))
}

pub fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![key("Tab"), hint(": Switch screen | ")];
    match app.screen {
        AppScreen::Overview => spans.extend([
            key("↑/↓"),
            hint(": Select | "),
            key("←/→"),
            hint(": Subsystem | "),
            key("Enter"),
            hint(": Fleet | "),
        ]),
        AppScreen::Fleet => spans.extend([
            key("←/→"),
            hint(": Country | "),
            key("↑/↓"),
            hint(": Scroll | "),
            key("/"),
            hint(": Filter | "),
        ]),
    }
    spans.extend([key("?"), hint(": Help | "), key("q"), hint(": Quit")]);

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}
