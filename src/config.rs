//! Arcade configuration loaded from TOML.

use crate::error::ConfigError;
use cubic_minesweeper::MinesweeperConfig;
use cubic_nonogram::NonogramConfig;
use cubic_snake::SnakeConfig;
use cubic_tetris::TetrisConfig;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Smallest snake face: the starting body is three cells long.
pub const MIN_SNAKE_GRID: usize = 3;

/// Smallest tetris well side: the longest piece spans four cells on any axis.
pub const MIN_WELL_SIDE: usize = 4;

/// Session store settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SessionConfig {
    /// Most snapshots kept for undo; the oldest are dropped first.
    max_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_history: 256 }
    }
}

/// Settings for every game plus the session store.
///
/// Every section is optional in the file; missing keys take their defaults.
///
/// ```toml
/// [snake]
/// grid_size = 8
///
/// [nonogram]
/// strategy = "blob"
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ArcadeConfig {
    /// Snake settings.
    snake: SnakeConfig,
    /// Minesweeper settings.
    minesweeper: MinesweeperConfig,
    /// Tetris settings.
    tetris: TetrisConfig,
    /// Nonogram settings.
    nonogram: NonogramConfig,
    /// Session store settings.
    session: SessionConfig,
}

impl ArcadeConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no game can be built from.
    ///
    /// Grids must be non-empty, a snake needs room for its starting body, and
    /// the tetris well must hold every piece in every orientation.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let at_least = |section: &str, key: &str, value: usize, min: usize| {
            if value < min {
                warn!(section, key, value, min, "Config value out of range");
                Err(ConfigError::new(format!(
                    "[{}] {} must be at least {}, got {}",
                    section, key, min, value
                )))
            } else {
                Ok(())
            }
        };
        at_least("snake", "grid_size", *self.snake.grid_size(), MIN_SNAKE_GRID)?;
        at_least("minesweeper", "grid_size", *self.minesweeper.grid_size(), 1)?;
        at_least("nonogram", "grid_size", *self.nonogram.grid_size(), 1)?;
        at_least("tetris", "width", *self.tetris.width(), MIN_WELL_SIDE)?;
        at_least("tetris", "depth", *self.tetris.depth(), MIN_WELL_SIDE)?;
        at_least("tetris", "height", *self.tetris.height(), MIN_WELL_SIDE)?;
        at_least("session", "max_history", *self.session.max_history(), 1)?;
        debug!("Config validated");
        Ok(())
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Pins every game to the same seed.
    pub fn with_seed(self, seed: u32) -> Self {
        let snake = self.snake.clone().with_seed(seed);
        let minesweeper = self.minesweeper.clone().with_seed(u64::from(seed));
        let tetris = self.tetris.clone().with_seed(seed);
        let nonogram = self.nonogram.clone().with_seed(seed);
        self.with_snake(snake)
            .with_minesweeper(minesweeper)
            .with_tetris(tetris)
            .with_nonogram(nonogram)
    }
}
