//! Placement description produced by move enumeration.

use serde::{Deserialize, Serialize};

use crate::Orientation;

/// A drop target: pivot column plus orientation. Landing row is derived.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub orientation: Orientation,
    pub column: u8,
}

impl Move {
    pub const fn new(orientation: Orientation, column: u8) -> Self {
        Self {
            orientation,
            column,
        }
    }

    /// No rotation, pivot in the center-left column.
    pub fn center(width: usize) -> Self {
        Self::new(Orientation::Up, (width / 2).saturating_sub(1) as u8)
    }

    /// Column taken by the satellite cell.
    pub fn satellite_column(&self) -> i32 {
        self.column as i32 + self.orientation.satellite_offset().0
    }
}
