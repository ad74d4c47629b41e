use rand::Rng;
use std::time::Instant;

use super::engine::{Game, StepInfo};

/// Turns a fast, irregular stream of frame callbacks into game ticks
///
/// Each call to [`Ticker::tick`] compares the time since the last executed
/// step against the snake's current speed. The speed is read on every
/// call, so a speed-up from eating applies from the next frame on.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    last_tick: Instant,
}

impl Ticker {
    pub fn start(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// Advance `game` once if more than one tick interval has elapsed
    pub fn tick<R: Rng>(&mut self, now: Instant, game: &mut Game<R>) -> Option<StepInfo> {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed <= game.snake().speed() {
            return None;
        }

        self.last_tick = now;
        Some(game.advance())
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }
}
