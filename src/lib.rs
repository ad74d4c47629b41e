//! Wrap Snake - a snake on a wrap-around grid
//!
//! This library provides:
//! - Core simulation (game module): positions, the snake, the game controller
//!   and the speed-gated ticker
//! - Keyboard mapping (input module)
//! - Terminal and RGBA rendering (render module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
