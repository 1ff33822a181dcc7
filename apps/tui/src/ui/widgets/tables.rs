use crate::app::App;
use airpower_leaderboard::domain::{li_color, Subsystem, LEADERBOARD};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

/// First row to draw so that `selected_index` stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

pub fn render_rankings_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut header_cells = vec![
        Cell::from("#"),
        Cell::from("Country"),
        Cell::from("Aircraft"),
        Cell::from("Missile"),
        Cell::from("LI"),
        Cell::from("FPS"),
    ];
    header_cells.extend(
        Subsystem::ALL
            .iter()
            .map(|subsystem| Cell::from(subsystem.short_label())),
    );
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = LEADERBOARD.len();
    let max_visible_rows = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_row);

    let rows = LEADERBOARD
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, entity)| {
            let mut cells = vec![
                Cell::from(entity.rank.to_string()),
                Cell::from(entity.display_name),
                Cell::from(entity.aircraft).style(Style::default().fg(Color::Gray)),
                Cell::from(entity.missile).style(Style::default().fg(Color::LightBlue)),
                Cell::from(format!("{:.1}", entity.li)).style(
                    Style::default()
                        .fg(li_color(entity.li))
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(entity.fps.to_string()).style(Style::default().fg(Color::Green)),
            ];
            cells.extend(Subsystem::ALL.iter().map(|subsystem| {
                let color = if entity.is_highlighted(*subsystem) {
                    Color::Green
                } else {
                    Color::Gray
                };
                Cell::from(entity.score(*subsystem).to_string()).style(Style::default().fg(color))
            }));

            let row = Row::new(cells);
            if index == app.selected_row {
                row.style(
                    Style::default()
                        .bg(Color::Rgb(0, 0, 238))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row
            }
        });

    let mut widths = vec![
        Constraint::Length(3),
        Constraint::Length(15),
        Constraint::Min(20),
        Constraint::Min(16),
        Constraint::Length(5),
        Constraint::Length(5),
    ];
    widths.extend(std::iter::repeat(Constraint::Length(3)).take(Subsystem::ALL.len()));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Rankings ({} of {total_rows})",
                    app.selected_row + 1
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::scroll_offset;

    #[test]
    fn everything_fits_without_scrolling() {
        assert_eq!(scroll_offset(10, 20, 9), 0);
    }

    #[test]
    fn selection_below_the_fold_scrolls_into_view() {
        assert_eq!(scroll_offset(20, 5, 7), 3);
        assert_eq!(scroll_offset(20, 5, 19), 15);
    }

    #[test]
    fn selection_above_the_fold_keeps_top() {
        assert_eq!(scroll_offset(20, 5, 2), 0);
    }
}
