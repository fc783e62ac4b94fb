use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::canvas::PixelCanvas;
use crate::game::GameState;
use crate::metrics::SessionMetrics;

/// Lays out the game canvas with a status line above and key help below
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R>(
        &self,
        frame: &mut Frame,
        canvas: &PixelCanvas,
        state: &GameState<R>,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let (cols, rows) = canvas.cell_size();
        let board = centered(chunks[1], cols.saturating_add(2), rows.saturating_add(2));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(board);
        frame.render_widget(block, board);
        frame.render_widget(canvas, inner);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_stats<R>(&self, state: &GameState<R>, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
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

/// A `width x height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_frame_shows_status_and_board() {
        let state = GameState::seeded(GameConfig::default(), 3);
        let mut canvas = PixelCanvas::new(64, 36);
        state.render(&mut canvas);
        let metrics = SessionMetrics::new();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &canvas, &state, &metrics))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Length: 1"));
        assert!(text.contains("Snake"));
        assert!(text.contains("to quit"));
        assert!(text.contains("▀"));
    }

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 20);
        let rect = centered(area, 66, 20);
        assert_eq!(rect, Rect::new(7, 0, 66, 20));

        let small = centered(Rect::new(0, 0, 10, 5), 66, 20);
        assert!(small.width <= 10 && small.height <= 5);
    }
}
