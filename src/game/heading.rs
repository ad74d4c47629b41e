use serde::{Deserialize, Serialize};

/// Direction the snake is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// All four headings, in raw-code order
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Returns true for the vertical headings (Up/Down)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Heading::Up | Heading::Down)
    }

    /// Returns true if both headings lie on the same axis
    ///
    /// Same-axis turns are never allowed: the reverse would run the head
    /// into the neck, and the same heading is a no-op.
    pub fn is_same_axis(&self, other: Heading) -> bool {
        self.is_vertical() == other.is_vertical()
    }

    /// Returns the heading pointing the other way
    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// Raw direction code (Up=1, Down=2, Left=3, Right=4)
    pub fn code(&self) -> u8 {
        match self {
            Heading::Up => 1,
            Heading::Down => 2,
            Heading::Left => 3,
            Heading::Right => 4,
        }
    }
}

/// Raw code that does not name one of the four headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownHeading(pub u8);

impl TryFrom<u8> for Heading {
    type Error = UnknownHeading;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Heading::Up),
            2 => Ok(Heading::Down),
            3 => Ok(Heading::Left),
            4 => Ok(Heading::Right),
            other => Err(UnknownHeading(other)),
        }
    }
}
