use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default tick interval of a fresh snake, in milliseconds
pub const DEFAULT_INITIAL_SPEED_MS: u64 = 150;
/// Tick interval below which eating no longer speeds the snake up
pub const DEFAULT_MIN_SPEED_MS: u64 = 60;
/// How much each meal shortens the tick interval
pub const DEFAULT_SPEED_STEP_MS: u64 = 5;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, in cells
    pub grid_width: usize,
    /// Height of the game grid, in cells
    pub grid_height: usize,
    /// Edge length of one cell in pixels (raster output only)
    pub cell_size: usize,
    /// Tick interval the snake starts with
    pub initial_speed_ms: u64,
    /// Speed floor
    pub min_speed_ms: u64,
    /// Tick interval removed per meal
    pub speed_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 10,
            initial_speed_ms: DEFAULT_INITIAL_SPEED_MS,
            min_speed_ms: DEFAULT_MIN_SPEED_MS,
            speed_step_ms: DEFAULT_SPEED_STEP_MS,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Derive the grid from a pixel canvas, rounding to the nearest cell
    pub fn from_canvas(width_px: usize, height_px: usize, cell_size: usize) -> Self {
        let cells = |px: usize| {
            if cell_size == 0 {
                0
            } else {
                px.saturating_add(cell_size / 2) / cell_size
            }
        };

        Self {
            grid_width: cells(width_px),
            grid_height: cells(height_px),
            cell_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Size in bytes of an RGBA frame covering the grid, if it fits in memory
    pub fn frame_bytes(&self) -> Option<usize> {
        let width_px = self.grid_width.checked_mul(self.cell_size)?;
        let height_px = self.grid_height.checked_mul(self.cell_size)?;
        width_px.checked_mul(height_px)?.checked_mul(4)
    }

    /// Check that the configuration can drive a game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let max = i32::MAX as usize;
        if self.grid_width > max || self.grid_height > max {
            return Err(ConfigError::GridTooLarge {
                max,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.frame_bytes().is_none() {
            return Err(ConfigError::FrameTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                cell_size: self.cell_size,
            });
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroSpeedFloor);
        }

        if self.initial_speed_ms < self.min_speed_ms {
            return Err(ConfigError::InitialSpeedBelowFloor {
                initial: self.initial_speed_ms,
                floor: self.min_speed_ms,
            });
        }

        Ok(())
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid { width: usize, height: usize },
    GridTooLarge { max: usize, width: usize, height: usize },
    ZeroCellSize,
    FrameTooLarge { width: usize, height: usize, cell_size: usize },
    ZeroSpeedFloor,
    InitialSpeedBelowFloor { initial: u64, floor: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid { width, height } => {
                write!(f, "grid must be at least 1x1 (got {width}x{height})")
            }
            ConfigError::GridTooLarge { max, width, height } => {
                write!(f, "grid {width}x{height} exceeds supported maximum ({max})")
            }
            ConfigError::ZeroCellSize => write!(f, "cell_size must be positive"),
            ConfigError::FrameTooLarge {
                width,
                height,
                cell_size,
            } => write!(
                f,
                "a {width}x{height} grid of {cell_size}px cells does not fit in a frame buffer"
            ),
            ConfigError::ZeroSpeedFloor => write!(f, "min_speed_ms must be positive"),
            ConfigError::InitialSpeedBelowFloor { initial, floor } => write!(
                f,
                "initial_speed_ms ({initial}) must not be below min_speed_ms ({floor})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
