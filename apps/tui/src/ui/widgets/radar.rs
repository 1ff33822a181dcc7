use airpower_leaderboard::domain::{top, Entity, Subsystem};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const RADAR_TOP: usize = 5;
const SERIES_COLORS: [Color; RADAR_TOP] = [
    Color::Rgb(59, 130, 246),
    Color::Rgb(239, 68, 68),
    Color::Rgb(245, 158, 11),
    Color::Rgb(16, 185, 129),
    Color::Rgb(139, 92, 246),
];

/// Point on the radar for `score` along the spoke of `axis`.
pub fn radar_point(axis: usize, score: f64) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let angle = std::f64::consts::FRAC_PI_2
        - (std::f64::consts::TAU * axis as f64 / Subsystem::ALL.len() as f64);
    (angle.cos() * score, angle.sin() * score)
}

fn polygon(entity: &Entity) -> Vec<(f64, f64)> {
    Subsystem::ALL
        .iter()
        .enumerate()
        .map(|(axis, subsystem)| radar_point(axis, f64::from(entity.score(*subsystem))))
        .collect()
}

/// Six-axis capability radar for the top five countries.
pub fn render_capability_radar(f: &mut Frame<'_>, area: Rect, animation: f64) {
    let block = Block::default()
        .title("Top 5 Multi-Dimensional Analysis")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 6 {
        return;
    }

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(18)])
        .split(inner);

    let leaders = top(RADAR_TOP);
    let pulse = (animation * 0.6).sin().mul_add(0.5, 0.5);

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                for ring in [25.0, 50.0, 75.0, 100.0] {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: ring,
                        color: Color::DarkGray,
                    });
                }

                for axis in 0..Subsystem::ALL.len() {
                    let (x, y) = radar_point(axis, 100.0);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: Color::DarkGray,
                    });
                }

                ctx.layer();

                for (index, entity) in leaders.iter().enumerate() {
                    let points = polygon(entity);
                    let color = SERIES_COLORS[index % SERIES_COLORS.len()];
                    for (start, end) in points.iter().zip(points.iter().cycle().skip(1)) {
                        ctx.draw(&CanvasLine {
                            x1: start.0,
                            y1: start.1,
                            x2: end.0,
                            y2: end.1,
                            color,
                        });
                    }
                }

                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 100.0 * pulse,
                    color: Color::Rgb(30, 41, 59),
                });

                for (axis, subsystem) in Subsystem::ALL.iter().enumerate() {
                    let (x, y) = radar_point(axis, 112.0);
                    ctx.print(
                        x - 8.0,
                        y,
                        Span::styled(subsystem.label(), Style::default().fg(Color::Gray)),
                    );
                }
            })
            .x_bounds([-130.0, 130.0])
            .y_bounds([-120.0, 120.0]),
        split[0],
    );

    let legend = leaders
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            TextLine::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]),
                ),
                Span::raw(entity.short_name(12)),
            ])
        })
        .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(Text::from(legend)).alignment(Alignment::Left),
        split[1],
    );
}
