use crate::ui::widgets::popup::centered_rect;
use airpower_leaderboard::domain::Subsystem;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn shortcut(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key:<8}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Air Power Leaderboard",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Scores are precomputed. Fleet rosters load in the background, default country first.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        shortcut("Tab", "Switch between overview and fleet rosters"),
        shortcut("↑/↓", "Select ranking row / scroll roster cards"),
        shortcut("←/→", "Change subsystem chart / change country"),
        shortcut("Enter", "Open the selected country's roster"),
        shortcut("/", "Filter roster cards by aircraft name"),
        shortcut("Esc", "Clear filter / back to overview"),
        shortcut("?", "Toggle this help popup"),
        shortcut("q", "Quit application"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Subsystem columns:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    lines.extend(Subsystem::ALL.iter().map(|subsystem| {
        TextLine::from(format!(
            "  {} - {} (highlighted at {}+)",
            subsystem.short_label(),
            subsystem.label(),
            subsystem.highlight_threshold()
        ))
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "CLI Options:",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
