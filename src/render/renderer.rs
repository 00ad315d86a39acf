use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{FieldSize, Position, RoundSnapshot};
use crate::metrics::GameMetrics;

/// Terminal columns used by one grid cell
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Split the screen into header, playing area and footer
    fn layout(area: Rect) -> [Rect; 3] {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .areas(area)
    }

    /// Field size that exactly fills the playing area of a terminal of size
    /// `area`, so that every visible cell is a valid grid cell
    pub fn field_for(area: Rect, cell_size: u32) -> FieldSize {
        let [_, game, _] = Self::layout(area);
        let inner = Block::default().borders(Borders::ALL).inner(game);
        FieldSize::new(
            (inner.width / CELL_WIDTH) as u32 * cell_size,
            inner.height as u32 * cell_size,
        )
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &RoundSnapshot, metrics: &GameMetrics) {
        let [header, game, footer] = Self::layout(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), header);
        frame.render_widget(self.render_grid(snapshot), game);
        if snapshot.is_over {
            let popup = centered(game, 36, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(snapshot, metrics), popup);
        }
        frame.render_widget(self.render_controls(), footer);
    }

    fn render_grid(&self, snapshot: &RoundSnapshot) -> Paragraph<'_> {
        let dim = if snapshot.is_over {
            Modifier::DIM
        } else {
            Modifier::empty()
        };

        let lines: Vec<Line> = (0..snapshot.grid.rows)
            .map(|y| {
                let spans: Vec<Span> = (0..snapshot.grid.cols)
                    .map(|x| cell_span(snapshot, Position::new(x, y)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).style(Style::default().add_modifier(dim)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &RoundSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Cyan);
        let text = Line::from(vec![
            Span::styled("SCORE ", label),
            Span::styled(
                snapshot.score.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("BEST ", label),
            Span::raw(metrics.best_score.to_string()),
            Span::raw("    "),
            Span::styled("TIME ", label),
            Span::raw(metrics.format_time()),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &RoundSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let bold = Modifier::BOLD;
        let text = vec![
            Line::from(Span::styled(
                "Game Over",
                Style::default().fg(Color::Cyan).add_modifier(bold),
            )),
            Line::from(""),
            Line::from(format!("Score {}   Best {}", snapshot.score, metrics.best_score)),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(bold)),
                Span::raw(" to retry or "),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(bold)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(snapshot: &RoundSnapshot, pos: Position) -> Span<'static> {
    if pos == snapshot.head {
        Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else if snapshot.tail.contains(&pos) {
        Span::styled("■ ", Style::default().fg(Color::Blue))
    } else if snapshot.is_apple_at(pos) {
        Span::styled(
            "● ",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("· ", Style::default().fg(Color::DarkGray))
    }
}

/// A `width` x `height` rectangle centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(snapshot: &RoundSnapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, snapshot, &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_field_for_terminal() {
        // 40x16 terminal: 38x12 inside the border, 19 cells wide
        let field = Renderer::field_for(Rect::new(0, 0, 40, 16), 25);
        assert_eq!(field, FieldSize::new(19 * 25, 12 * 25));
    }

    #[test]
    fn test_running_round_shows_score() {
        let mut engine = GameEngine::new(GameConfig::small());
        let round = engine.reset(FieldSize::new(250, 250));
        let text = screen_text(&round.snapshot());

        assert!(text.contains("SCORE"));
        assert!(text.contains("■"));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn test_over_round_shows_overlay() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut round = engine.reset(FieldSize::new(250, 250));
        for _ in 0..6 {
            engine.tick(&mut round);
        }
        assert!(round.is_over());

        let text = screen_text(&round.snapshot());
        assert!(text.contains("Game Over"));
        assert!(text.contains("retry"));
    }
}
