use crate::app::App;
use crate::ui::widgets::tables::scroll_offset;
use airpower_leaderboard::domain::{li_color, LEADERBOARD};
use airpower_leaderboard::render::{FleetHeader, RosterCard};
use airpower_leaderboard::{LoadState, TabView};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

const TAB_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 6;
const TWO_COLUMN_WIDTH: u16 = 100;

pub fn render_fleet(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Country tabs
            Constraint::Length(5), // Header block
            Constraint::Min(3),    // Cards
        ])
        .split(area);

    render_country_tabs(app, f, layout[0]);

    match app.tabs.view() {
        TabView::Empty => render_placeholder(f, layout[1].union(layout[2]), "Select a country"),
        TabView::AwaitingData { code } => render_placeholder(
            f,
            layout[1].union(layout[2]),
            &format!("Loading {} roster...", code.to_uppercase()),
        ),
        TabView::Rendered { content, .. } => {
            render_header(&content.header, f, layout[1]);
            render_cards(app, f, layout[2]);
        }
    }
}

fn tab_marker(state: &LoadState) -> &'static str {
    match state {
        LoadState::Loaded(_) => "",
        LoadState::Failed(_) => " !",
        LoadState::NotRequested | LoadState::Loading => " …",
    }
}

fn render_country_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let visible = usize::from((area.width / TAB_WIDTH).max(1));
    let active = app.tabs.active_index().unwrap_or(0);
    let offset = scroll_offset(LEADERBOARD.len(), visible, active);

    let titles = LEADERBOARD
        .iter()
        .skip(offset)
        .take(visible)
        .map(|entity| {
            TextLine::from(format!(
                "#{} {} {}{}",
                entity.rank,
                entity.short_name(9),
                entity.fps,
                tab_marker(&app.cache.state(entity.code))
            ))
        })
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.tabs.active_index().map(|index| index - offset))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_placeholder(f: &mut Frame<'_>, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn render_header(header: &FleetHeader, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!("#{} {}", header.rank, header.name))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = vec![
        TextLine::from(vec![
            Span::styled("Lethality Index ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}", header.li),
                Style::default()
                    .fg(li_color(header.li))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Fleet Power Score ", Style::default().fg(Color::Gray)),
            Span::styled(
                header.fps.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Fleet mix ", Style::default().fg(Color::Gray)),
            Span::raw(header.aircraft.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Missiles  ", Style::default().fg(Color::Gray)),
            Span::styled(
                header.missile.clone(),
                Style::default().fg(Color::LightBlue),
            ),
        ]),
    ];

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let cards = app.visible_cards();
    if cards.is_empty() {
        let message = if app.filter.is_empty() {
            "No aircraft listed for this country"
        } else {
            "No aircraft match the filter"
        };
        render_placeholder(f, area, message);
        return;
    }

    let columns: u16 = if area.width >= TWO_COLUMN_WIDTH { 2 } else { 1 };
    let rows_visible = (area.height / CARD_HEIGHT).max(1);
    let per_page = usize::from(rows_visible * columns);
    let start = app.card_scroll.min(cards.len().saturating_sub(1));

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); usize::from(rows_visible)])
        .split(area);

    for (slot, card) in cards.iter().skip(start).take(per_page).enumerate() {
        let row = slot / usize::from(columns);
        let column = slot % usize::from(columns);
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, u32::from(columns)); usize::from(columns)])
            .split(row_areas[row]);
        render_card(card, f, column_areas[column]);
    }

    if cards.len() > per_page {
        let indicator = Paragraph::new(format!(
            "{}-{} of {}",
            start + 1,
            (start + per_page).min(cards.len()),
            cards.len()
        ))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray));
        let indicator_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        f.render_widget(indicator, indicator_area);
    }
}

fn render_card(card: &RosterCard, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            card.aircraft.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = vec![
        TextLine::from(vec![
            Span::styled("Type ", Style::default().fg(Color::Gray)),
            Span::raw(card.aircraft_type.clone()),
            Span::styled("  Origin ", Style::default().fg(Color::Gray)),
            Span::raw(card.origin.clone()),
        ]),
        TextLine::from(vec![
            Span::styled("Versions ", Style::default().fg(Color::Gray)),
            Span::raw(card.versions.clone()),
            Span::styled("  In service ", Style::default().fg(Color::Gray)),
            Span::styled(card.in_service.clone(), Style::default().fg(Color::Green)),
        ]),
        TextLine::from(Span::styled(
            card.notes.clone(),
            Style::default().fg(Color::White),
        )),
        TextLine::from(Span::styled(
            card.photo.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
