use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Game, Position};

/// What occupies a grid cell, as far as drawing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

impl Cell {
    /// Classify `pos`; food is drawn over the snake
    pub fn at<R: Rng>(game: &Game<R>, pos: Position) -> Self {
        if pos == game.food() {
            Cell::Food
        } else if pos == game.snake().head() {
            Cell::Head
        } else if game.snake().occupies(pos) {
            Cell::Body
        } else {
            Cell::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng>(&self, frame: &mut Frame, game: &Game<R>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_grid(game), chunks[0]);
        frame.render_widget(self.render_controls(), chunks[1]);
    }

    /// One line of cells per grid row
    pub fn grid_cells<R: Rng>(&self, game: &Game<R>) -> Vec<Vec<Cell>> {
        (0..game.grid_height())
            .map(|y| {
                (0..game.grid_width())
                    .map(|x| Cell::at(game, Position::new(x, y)))
                    .collect()
            })
            .collect()
    }

    fn render_grid<R: Rng>(&self, game: &Game<R>) -> Paragraph<'static> {
        let lines: Vec<Line<'static>> = self
            .grid_cells(game)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Cell::span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn game() -> Game {
        let mut game = Game::seeded(GameConfig::new(6, 4), 2).unwrap();
        game.set_food(Position::new(0, 0));
        game
    }

    #[test]
    fn test_grid_cells() {
        let game = game();
        let cells = Renderer::new().grid_cells(&game);

        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|row| row.len() == 6));
        assert_eq!(cells[0][0], Cell::Food);
        assert_eq!(cells[2][3], Cell::Head);
        assert_eq!(cells[3][3], Cell::Body);

        let occupied = cells.iter().flatten().filter(|c| **c != Cell::Empty).count();
        assert_eq!(occupied, 3);
    }

    #[test]
    fn test_food_drawn_over_body() {
        let mut game = game();
        game.set_food(Position::new(3, 3));
        assert_eq!(Cell::at(&game, Position::new(3, 3)), Cell::Food);
    }

    #[test]
    fn test_render_to_test_backend() {
        let game = game();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &game))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Snake"));
        assert!(text.contains('■'));
        assert!(text.contains('O'));
    }
}
