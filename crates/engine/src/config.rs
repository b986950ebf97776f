//! Session configuration: board geometry, palette, queue and opening rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tsumo_core::{Board, Cell};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("board width {0} is too narrow, need at least 2 columns")]
    TooNarrow(usize),
    #[error("board width {0} is too wide, at most {max} columns", max = Board::MAX_WIDTH)]
    TooWide(usize),
    #[error("board needs at least one visible row")]
    NoRows,
    #[error("margin {0} is too small, need at least 2 hidden rows")]
    MarginTooSmall(usize),
    #[error("palette size {0} outside 1..={max}", max = Cell::MAX_COLOR)]
    Palette(u8),
    #[error("dead cell ({x}, {y}) is outside the board")]
    DeadCellOutOfRange { x: usize, y: usize },
    #[error("spawn column {column} is outside a {width}-wide board")]
    SpawnColumn { column: usize, width: usize },
    #[error("queue depth must be at least 1")]
    QueueDepth,
    #[error("opening restricts to {colors} colors but the palette has {palette}")]
    OpeningColors { colors: u8, palette: u8 },
}

/// First pairs of a game draw from a reduced color subset so the opening
/// is never unsolvable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningRule {
    pub pairs: u32,
    pub colors: u8,
}

impl Default for OpeningRule {
    fn default() -> Self {
        Self { pairs: 2, colors: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: usize,
    pub visible_height: usize,
    pub margin: usize,
    /// Number of colors, ids 1..=palette.
    pub palette: u8,
    /// Grid coordinates (x, y) whose occupancy ends the game.
    pub dead_cells: Vec<(usize, usize)>,
    /// Pairs held in the queue, the one in play included.
    pub queue_depth: usize,
    pub spawn_column: usize,
    pub seed: u64,
    pub opening: OpeningRule,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: Board::DEFAULT_WIDTH,
            visible_height: Board::DEFAULT_VISIBLE_HEIGHT,
            margin: Board::DEFAULT_MARGIN,
            palette: 4,
            dead_cells: vec![(2, Board::DEFAULT_MARGIN)],
            queue_depth: 3,
            spawn_column: 2,
            seed: 0,
            opening: OpeningRule::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn rows(&self) -> usize {
        self.visible_height + self.margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 {
            return Err(ConfigError::TooNarrow(self.width));
        }
        if self.width > Board::MAX_WIDTH {
            return Err(ConfigError::TooWide(self.width));
        }
        if self.visible_height == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.margin < 2 {
            return Err(ConfigError::MarginTooSmall(self.margin));
        }
        if self.palette == 0 || self.palette > Cell::MAX_COLOR {
            return Err(ConfigError::Palette(self.palette));
        }
        if let Some(&(x, y)) = self
            .dead_cells
            .iter()
            .find(|&&(x, y)| x >= self.width || y >= self.rows())
        {
            return Err(ConfigError::DeadCellOutOfRange { x, y });
        }
        if self.spawn_column >= self.width {
            return Err(ConfigError::SpawnColumn {
                column: self.spawn_column,
                width: self.width,
            });
        }
        if self.queue_depth == 0 {
            return Err(ConfigError::QueueDepth);
        }
        if self.opening.colors == 0 || self.opening.colors > self.palette {
            return Err(ConfigError::OpeningColors {
                colors: self.opening.colors,
                palette: self.palette,
            });
        }
        Ok(())
    }

    pub fn empty_board(&self) -> Board {
        Board::new(self.width, self.visible_height, self.margin)
    }
}
