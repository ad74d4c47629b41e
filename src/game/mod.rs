//! Core simulation for a snake on a wrap-around grid
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Rendering and input adapters only read from it and forward turn requests into it.

pub mod config;
pub mod engine;
pub mod heading;
pub mod state;
pub mod ticker;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use engine::{Game, StepInfo};
pub use heading::{Heading, UnknownHeading};
pub use state::{Position, Snake};
pub use ticker::Ticker;
