use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::{
    config::{ConfigError, GameConfig},
    heading::Heading,
    state::{Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
}

/// The simulation: one snake, one piece of food, one RNG
///
/// `Game` exclusively owns its snake and food. Renderers get shared
/// references through [`Game::snake`] and [`Game::food`]; input goes
/// through [`Game::set_heading`].
pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Position,
    steps: u64,
    rng: R,
}

impl Game<StdRng> {
    /// Start a new game with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a new game with a deterministic RNG
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Start a new game drawing food positions from `rng`
    ///
    /// The snake starts at the grid centre heading up.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let width = config.grid_width as i32;
        let height = config.grid_height as i32;
        let centre = Position::new(width / 2 + width % 2, height / 2 + height % 2);

        let snake = Snake::new(centre, Heading::Up, width, height, config.initial_speed_ms)
            .with_speed_limits(config.min_speed_ms, config.speed_step_ms);
        let food = random_cell(&mut rng, width, height);

        info!(
            width,
            height,
            speed_ms = config.initial_speed_ms,
            "starting game"
        );

        Ok(Self {
            config,
            snake,
            food,
            steps: 0,
            rng,
        })
    }

    /// Execute one step of the game
    ///
    /// Moves the snake, then lets it eat if its head landed on the food.
    pub fn advance(&mut self) -> StepInfo {
        self.snake.move_forward();
        let ate_food = self.check();
        self.steps += 1;

        trace!(step = self.steps, head = ?self.snake.head(), ate_food, "advanced");

        StepInfo { ate_food }
    }

    /// Feed the snake if its head is on the food, then respawn the food
    ///
    /// The new cell is drawn uniformly over the whole grid and may land on
    /// the snake itself.
    pub fn check(&mut self) -> bool {
        if !self.snake.check(self.food) {
            return false;
        }

        self.snake.eat();
        let (width, height) = (self.grid_width(), self.grid_height());
        self.food = random_cell(&mut self.rng, width, height);

        info!(
            length = self.snake.len(),
            speed_ms = self.snake.speed_ms(),
            "snake ate"
        );
        debug!(x = self.food.x, y = self.food.y, "food respawned");

        true
    }

    /// Forward a turn request to the snake; returns whether it was taken
    pub fn set_heading(&mut self, heading: Heading) -> bool {
        let current = self.snake.heading();
        let accepted = self.snake.set_moving(heading);

        if accepted {
            debug!(from = ?current, to = ?heading, "heading changed");
        } else {
            debug!(current = ?current, requested = ?heading, "heading change ignored");
        }

        accepted
    }

    /// Place the food explicitly, wrapped onto the grid
    pub fn set_food(&mut self, pos: Position) {
        self.food = pos.wrapped(self.grid_width(), self.grid_height());
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of completed `advance` calls
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn grid_width(&self) -> i32 {
        self.config.grid_width as i32
    }

    pub fn grid_height(&self) -> i32 {
        self.config.grid_height as i32
    }

    pub fn cell_size(&self) -> usize {
        self.config.cell_size
    }
}

fn random_cell<R: Rng>(rng: &mut R, width: i32, height: i32) -> Position {
    Position::new(rng.gen_range(0..width), rng.gen_range(0..height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_game() -> Game {
        Game::seeded(GameConfig::small(), 7).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = small_game();
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().head(), Position::new(5, 5));
        assert_eq!(game.snake().heading(), Heading::Up);
        assert_eq!(game.snake().speed_ms(), 150);
        assert_eq!(game.snake().bounds(), (10, 10));
        assert_eq!(game.snake().min_speed_ms(), 60);
        assert!(game.food().is_within(10, 10));
        assert_eq!(game.steps(), 0);
    }

    #[test]
    fn test_odd_grid_centre_rounds_up() {
        let game = Game::seeded(GameConfig::new(21, 7), 1).unwrap();
        assert_eq!(game.snake().head(), Position::new(11, 4));
    }

    #[test]
    fn test_single_cell_grid() {
        let mut game = Game::seeded(GameConfig::new(1, 1), 1).unwrap();
        assert_eq!(game.snake().head(), Position::new(0, 0));
        assert_eq!(game.food(), Position::new(0, 0));

        let info = game.advance();
        assert!(info.ate_food);
        assert_eq!(game.snake().len(), 3);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        assert!(matches!(
            Game::new(GameConfig::new(0, 0)),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_speed_limits_come_from_config() {
        let config = GameConfig {
            initial_speed_ms: 100,
            min_speed_ms: 80,
            speed_step_ms: 15,
            ..GameConfig::small()
        };
        let mut game = Game::seeded(config, 3).unwrap();
        assert_eq!(game.snake().min_speed_ms(), 80);

        for expected in [85, 80, 80] {
            let head = game.snake().head().stepped(Heading::Up, 10, 10);
            game.set_food(head);
            assert!(game.advance().ate_food);
            assert_eq!(game.snake().speed_ms(), expected);
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut game = small_game();
        game.set_food(Position::new(0, 0));

        let info = game.advance();

        assert!(!info.ate_food);
        assert_eq!(game.steps(), 1);
        assert_eq!(game.snake().head(), Position::new(5, 4));
        assert_eq!(game.snake().tail(), Position::new(5, 5));
        assert_eq!(game.food(), Position::new(0, 0));
    }

    #[test]
    fn test_eat_on_first_advance() {
        let mut game = small_game();
        game.set_food(Position::new(5, 4));

        let info = game.advance();

        assert!(info.ate_food);
        assert_eq!(game.snake().head(), Position::new(5, 4));
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.snake().speed_ms(), 145);
        assert!(game.food().is_within(10, 10));
    }

    #[test]
    fn test_check_without_food_is_noop() {
        let mut game = small_game();
        game.set_food(Position::new(0, 0));

        assert!(!game.check());
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.food(), Position::new(0, 0));
    }

    #[test]
    fn test_set_heading_validates() {
        let mut game = small_game();
        assert!(!game.set_heading(Heading::Down));
        assert_eq!(game.snake().heading(), Heading::Up);
        assert!(game.set_heading(Heading::Left));
        assert_eq!(game.snake().heading(), Heading::Left);
    }

    #[test]
    fn test_set_food_wraps() {
        let mut game = small_game();
        game.set_food(Position::new(-1, 12));
        assert_eq!(game.food(), Position::new(9, 2));
    }

    #[test]
    fn test_length_and_speed_monotonic() {
        let mut game = Game::seeded(GameConfig::new(4, 3), 11).unwrap();
        let turns = [Heading::Left, Heading::Down, Heading::Right, Heading::Up];
        let mut meals = 0;

        for step in 0..500 {
            let len = game.snake().len();
            let speed = game.snake().speed_ms();

            if step % 5 == 0 {
                game.set_heading(turns[(step / 5) % turns.len()]);
            }
            if step % 7 == 0 {
                let ahead = game.snake().head().stepped(game.snake().heading(), 4, 3);
                game.set_food(ahead);
            }
            if game.advance().ate_food {
                meals += 1;
            }

            assert!(game.snake().len() >= len);
            assert!(game.snake().speed_ms() <= speed);
            assert!(game.snake().speed_ms() >= game.snake().min_speed_ms());
            assert!(game.snake().head().is_within(4, 3));
            assert!(game.food().is_within(4, 3));
        }

        assert!(meals > 0);
        assert_eq!(game.snake().len(), 2 + meals);
    }

    #[test]
    fn test_same_seed_same_food() {
        let mut a = Game::seeded(GameConfig::small(), 99).unwrap();
        let mut b = Game::seeded(GameConfig::small(), 99).unwrap();
        assert_eq!(a.food(), b.food());

        for _ in 0..20 {
            let next = a.snake().head().stepped(a.snake().heading(), 10, 10);
            a.set_food(next);
            b.set_food(next);
            a.advance();
            b.advance();
            assert_eq!(a.food(), b.food());
        }
    }

    #[test]
    fn test_food_covers_whole_grid() {
        let mut game = Game::seeded(GameConfig::new(3, 2), 5).unwrap();
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let head = game.snake().head();
            game.set_food(head);
            assert!(game.check());
            seen.insert(game.food());
        }

        // Every cell is reachable, including the ones under the snake
        assert_eq!(seen.len(), 6);
    }
}
