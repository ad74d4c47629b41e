//! Rendering adapters: a ratatui view for the terminal and an RGBA
//! painter for pixel surfaces. Both only read from [`crate::game::Game`].

pub mod raster;
pub mod renderer;

pub use renderer::{Cell, Renderer};
