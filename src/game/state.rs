use std::time::Duration;

use super::config::{DEFAULT_MIN_SPEED_MS, DEFAULT_SPEED_STEP_MS};
use super::heading::Heading;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Overwrite this position with the coordinates of `other`
    pub fn copy_from(&mut self, other: &Position) {
        self.x = other.x;
        self.y = other.y;
    }

    /// Bring the position back onto a `width` x `height` torus
    pub fn wrapped(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    /// Neighbouring cell in `heading`, wrapping at the grid edges
    pub fn stepped(&self, heading: Heading, width: i32, height: i32) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy).wrapped(width, height)
    }

    /// Check the position lies within `[0, width) x [0, height)`
    pub fn is_within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// The snake in the game
///
/// Segments are stored head first. A snake always has at least two of
/// them: it is born with a head and one segment behind it and only ever
/// grows from there.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Position>,
    heading: Heading,
    speed_ms: u64,
    min_speed_ms: u64,
    speed_step_ms: u64,
    bounds_width: i32,
    bounds_height: i32,
}

impl Snake {
    /// Create a two-segment snake with its head at `head`
    ///
    /// The second segment sits directly behind the head, opposite to
    /// `heading`. Speed limits start at the defaults; see
    /// [`Snake::with_speed_limits`].
    ///
    /// # Panics
    ///
    /// Panics if either bound is not positive.
    pub fn new(
        head: Position,
        heading: Heading,
        bounds_width: i32,
        bounds_height: i32,
        speed_ms: u64,
    ) -> Self {
        assert!(
            bounds_width > 0 && bounds_height > 0,
            "snake bounds must be positive"
        );

        let head = head.wrapped(bounds_width, bounds_height);
        let neck = head.stepped(heading.opposite(), bounds_width, bounds_height);

        Self {
            segments: vec![head, neck],
            heading,
            speed_ms,
            min_speed_ms: DEFAULT_MIN_SPEED_MS,
            speed_step_ms: DEFAULT_SPEED_STEP_MS,
            bounds_width,
            bounds_height,
        }
    }

    /// Replace the speed floor and the per-meal speed step
    ///
    /// The floor must not exceed the current speed; debug builds assert it.
    pub fn with_speed_limits(mut self, min_speed_ms: u64, speed_step_ms: u64) -> Self {
        debug_assert!(
            min_speed_ms <= self.speed_ms,
            "speed floor above the starting speed"
        );
        self.min_speed_ms = min_speed_ms;
        self.speed_step_ms = speed_step_ms;
        self
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Current tick interval
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn min_speed_ms(&self) -> u64 {
        self.min_speed_ms
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.bounds_width, self.bounds_height)
    }

    /// Request a turn; returns whether it was accepted
    ///
    /// Turns along the current axis are ignored. An accepted turn applies
    /// to the very next move.
    pub fn set_moving(&mut self, heading: Heading) -> bool {
        if self.heading.is_same_axis(heading) {
            return false;
        }
        self.heading = heading;
        true
    }

    /// Request a turn by raw direction code; unknown codes are ignored
    pub fn set_moving_code(&mut self, code: u8) -> bool {
        match Heading::try_from(code) {
            Ok(heading) => self.set_moving(heading),
            Err(_) => false,
        }
    }

    /// Advance one cell in the current heading
    ///
    /// Every segment first takes the position its predecessor held, tail
    /// to neck, and only then does the head step. The head wraps around
    /// the grid edges.
    pub fn move_forward(&mut self) {
        for i in (1..self.segments.len()).rev() {
            let ahead = self.segments[i - 1];
            self.segments[i].copy_from(&ahead);
        }

        let head = &mut self.segments[0];
        *head = head.stepped(self.heading, self.bounds_width, self.bounds_height);
    }

    /// Grow by one segment and speed up
    ///
    /// The new tail duplicates the current tail cell until the next move
    /// pulls the old tail forward.
    pub fn eat(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);

        if self.speed_ms > self.min_speed_ms {
            self.speed_ms = self
                .speed_ms
                .saturating_sub(self.speed_step_ms)
                .max(self.min_speed_ms);
        }
    }

    /// Check whether the head is on `food`
    pub fn check(&self, food: Position) -> bool {
        self.head() == food
    }

    /// Check if position is occupied by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }
}
