//! Falling pair types: orientation, color pair and the active piece.

use serde::{Deserialize, Serialize};

use crate::Cell;

/// Where the satellite sits relative to the pivot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    #[inline(always)]
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Satellite offset from the pivot. Rows grow downward, so Up is dy = -1.
    #[inline(always)]
    pub fn satellite_offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// The two colors of one tsumo: pivot cell first, then satellite.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub pivot: Cell,
    pub satellite: Cell,
}

impl ColorPair {
    pub const fn new(pivot: u8, satellite: u8) -> Self {
        Self {
            pivot: Cell::new(pivot),
            satellite: Cell::new(satellite),
        }
    }
}

/// The controllable pair. Position is integral; sub-row interpolation belongs to the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ActivePiece {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
    pub colors: ColorPair,
}

impl ActivePiece {
    pub fn new(x: i32, y: i32, colors: ColorPair) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Up,
            colors,
        }
    }

    #[inline]
    pub fn satellite(&self) -> (i32, i32) {
        let (dx, dy) = self.orientation.satellite_offset();
        (self.x + dx, self.y + dy)
    }

    /// Both cells with their colors, pivot first.
    pub fn cells(&self) -> [(i32, i32, Cell); 2] {
        let (sx, sy) = self.satellite();
        [
            (self.x, self.y, self.colors.pivot),
            (sx, sy, self.colors.satellite),
        ]
    }
}
