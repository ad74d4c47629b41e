//! Paints the game into an RGBA8 frame buffer, one `cell_size` square
//! per grid cell. Any surface that accepts raw RGBA bytes can show it.

use rand::Rng;

use crate::game::{Game, Position};

pub const BACKGROUND_RGBA: [u8; 4] = [0x10, 0x10, 0x10, 0xFF];
pub const SNAKE_RGBA: [u8; 4] = [0x00, 0x64, 0x00, 0xFF]; // darkgreen
pub const FOOD_RGBA: [u8; 4] = [0xFF, 0x00, 0x00, 0xFF];

/// Frame dimensions in pixels
///
/// Games only exist for configs whose frame fits in memory, so this
/// cannot overflow.
pub fn frame_size<R: Rng>(game: &Game<R>) -> (usize, usize) {
    let cell = game.cell_size();
    (
        game.grid_width() as usize * cell,
        game.grid_height() as usize * cell,
    )
}

/// Clear `frame` and draw the snake, then the food on top
///
/// Returns false and leaves the buffer untouched if its length does not
/// match [`frame_size`].
pub fn paint<R: Rng>(frame: &mut [u8], game: &Game<R>) -> bool {
    if Some(frame.len()) != game.config().frame_bytes() {
        return false;
    }
    let (width, _) = frame_size(game);

    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&BACKGROUND_RGBA);
    }

    for segment in game.snake().segments() {
        fill_cell(frame, width, game.cell_size(), *segment, SNAKE_RGBA);
    }
    fill_cell(frame, width, game.cell_size(), game.food(), FOOD_RGBA);

    true
}

fn fill_cell(frame: &mut [u8], width: usize, cell: usize, pos: Position, rgba: [u8; 4]) {
    let x0 = pos.x as usize * cell;
    let y0 = pos.y as usize * cell;

    for py in y0..y0 + cell {
        let row = py * width;
        for px in x0..x0 + cell {
            let i = (row + px) * 4;
            if let Some(pixel) = frame.get_mut(i..i + 4) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn pixel(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let i = (y * width + x) * 4;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    fn game() -> Game {
        let config = GameConfig {
            cell_size: 3,
            ..GameConfig::new(4, 4)
        };
        let mut game = Game::seeded(config, 4).unwrap();
        game.set_food(Position::new(0, 0));
        game
    }

    #[test]
    fn test_frame_size() {
        assert_eq!(frame_size(&game()), (12, 12));
    }

    #[test]
    fn test_paint_cells() {
        let game = game();
        let (width, height) = frame_size(&game);
        let mut frame = vec![0u8; width * height * 4];

        assert!(paint(&mut frame, &game));

        // Head (2,2) and neck (2,3) cover pixels 6..9 horizontally
        assert_eq!(pixel(&frame, width, 6, 6), SNAKE_RGBA);
        assert_eq!(pixel(&frame, width, 8, 8), SNAKE_RGBA);
        assert_eq!(pixel(&frame, width, 7, 11), SNAKE_RGBA);
        assert_eq!(pixel(&frame, width, 0, 0), FOOD_RGBA);
        assert_eq!(pixel(&frame, width, 2, 2), FOOD_RGBA);
        assert_eq!(pixel(&frame, width, 3, 3), BACKGROUND_RGBA);
        assert_eq!(pixel(&frame, width, 11, 0), BACKGROUND_RGBA);

        let coloured = frame
            .chunks_exact(4)
            .filter(|p| *p != BACKGROUND_RGBA)
            .count();
        assert_eq!(coloured, 3 * 9);
    }

    #[test]
    fn test_oversized_frame_never_reaches_painter() {
        let config = GameConfig {
            cell_size: usize::MAX / 4,
            ..GameConfig::new(20, 20)
        };
        assert!(Game::seeded(config, 1).is_err());
    }

    #[test]
    fn test_frame_size_matches_config() {
        let game = game();
        let (width, height) = frame_size(&game);
        assert_eq!(Some(width * height * 4), game.config().frame_bytes());
    }

    #[test]
    fn test_paint_rejects_wrong_buffer() {
        let game = game();
        let mut frame = vec![7u8; 10];
        assert!(!paint(&mut frame, &game));
        assert!(frame.iter().all(|b| *b == 7));
    }
}
