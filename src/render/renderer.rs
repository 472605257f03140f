use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Board, SEGMENT_GLYPH};
use crate::metrics::GameMetrics;

/// Loop-owned values shown next to the board
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub last_key: Option<String>,
    /// Seconds between ticks
    pub tick_rate: f64,
    pub paused: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board, metrics: &GameMetrics, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(board, metrics, hud), chunks[0]);

        let board_area = self.board_area(chunks[1], board);
        if board.is_lost() {
            frame.render_widget(self.render_game_over(board, metrics), board_area);
        } else {
            frame.render_widget(self.render_board(board), board_area);
            if hud.paused {
                let overlay = centered(board_area, 20, 3);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_paused(), overlay);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Center the bordered board inside `area`, each cell two columns wide
    fn board_area(&self, area: Rect, board: &Board) -> Rect {
        let width = u16::try_from(board.width() * 2 + 2).unwrap_or(u16::MAX);
        let height = u16::try_from(board.height() + 2).unwrap_or(u16::MAX);
        centered(area, width, height)
    }

    fn render_board(&self, board: &Board) -> Paragraph<'static> {
        let lines: Vec<Line> = board
            .render()
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|glyph| Span::styled(format!("{glyph} "), glyph_style(glyph)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, board: &Board, metrics: &GameMetrics, hud: &Hud) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(board.length().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Key: ", label),
            Span::styled(hud.last_key.clone().unwrap_or_else(|| "-".to_string()), value),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(format!("{:.2}s", hud.tick_rate), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, board: &Board, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    board.length().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_paused(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("hjkl", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn glyph_style(glyph: char) -> Style {
    match glyph {
        ' ' => Style::default(),
        SEGMENT_GLYPH => Style::default().fg(Color::Green),
        '<' | '>' | '^' | 'v' => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(board: &Board, hud: &Hud) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, board, &metrics, hud))
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
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered(area, 20, 2);
        assert_eq!(rect, Rect::new(0, 1, 10, 2));
    }

    #[test]
    fn test_renders_board_and_stats() {
        let board = Board::new(6, 4).unwrap();
        let hud = Hud {
            last_key: Some("l".to_string()),
            tick_rate: 0.3,
            paused: false,
        };
        let text = screen_text(&board, &hud);
        assert!(text.contains("Length: 1"));
        assert!(text.contains("Tick: 0.30s"));
        assert!(text.contains("Key: l"));
        assert!(text.contains('>'));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_renders_pause_overlay() {
        let board = Board::new(12, 6).unwrap();
        let hud = Hud {
            paused: true,
            tick_rate: 0.3,
            ..Default::default()
        };
        assert!(screen_text(&board, &hud).contains("PAUSED"));
    }
}
