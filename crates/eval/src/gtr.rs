//! GTR opening shape detector.
//!
//! Cells are addressed as (column, rows above the floor) in the left columns:
//!
//! ```text
//! 2 | T . .      T  trigger cell, keep empty or feed the base color
//! 1 | B C C      B  base group, an L on the floor
//! 0 | B B C      C  cap group, folds over the base
//!   +------
//!     0 1 2
//! ```
//!
//! Clearing the base drops the cap cell at (1, 1) into the rest of the cap.

use serde::{Deserialize, Serialize};
use tsumo_core::{Board, Cell};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GtrWeights {
    /// Per shape cell that matches its group anchor.
    pub pair_match: f32,
    /// Base and cap anchors hold different colors.
    pub color_split: f32,
    pub trigger_open: f32,
    pub trigger_blocked: f32,
}

impl Default for GtrWeights {
    fn default() -> Self {
        Self {
            pair_match: 60.0,
            color_split: 40.0,
            trigger_open: 250.0,
            trigger_blocked: 600.0,
        }
    }
}

const BASE: [(usize, usize); 3] = [(0, 0), (1, 0), (0, 1)];
const CAP: [(usize, usize); 3] = [(2, 0), (1, 1), (2, 1)];
const TRIGGER: (usize, usize) = (0, 2);

/// Pattern score for the left-side shape. Zero on boards too small to hold it.
pub fn gtr_pattern_score(board: &Board, weights: &GtrWeights, reserved_columns: usize) -> f32 {
    if reserved_columns < 3 || board.width() <= reserved_columns || board.visible_height() < 3 {
        return 0.0;
    }
    let at = |(col, up): (usize, usize)| board.cell(col, board.rows() - 1 - up);

    let mut score = 0.0;
    let base = at(BASE[0]);
    let cap = at(CAP[0]);
    score += group_matches(base, &BASE[1..], &at) * weights.pair_match;
    score += group_matches(cap, &CAP[1..], &at) * weights.pair_match;
    if base.is_filled() && cap.is_filled() && base != cap {
        score += weights.color_split;
    }

    let trigger = at(TRIGGER);
    if trigger.is_empty() {
        score += weights.trigger_open;
    } else if trigger != base {
        score -= weights.trigger_blocked;
    }
    score
}

fn group_matches(anchor: Cell, rest: &[(usize, usize)], at: &impl Fn((usize, usize)) -> Cell) -> f32 {
    if anchor.is_empty() {
        return 0.0;
    }
    rest.iter().filter(|&&pos| at(pos) == anchor).count() as f32
}
