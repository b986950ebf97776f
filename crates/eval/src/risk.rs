//! Stack risk: height and buried empties.

use tsumo_core::{Board, ColumnProfile};

use crate::EvalWeights;

/// Penalty to subtract: super-linear in max height past the threshold,
/// a flat hit past the danger height, plus a cost per buried empty cell.
pub fn risk_penalty(board: &Board, weights: &EvalWeights) -> f32 {
    let profile = ColumnProfile::new(board);
    let max_height = profile.max_height();
    let mut penalty = 0.0;
    if max_height > weights.height_threshold {
        penalty += (max_height as f32).powf(weights.height_exponent);
    }
    if max_height > weights.danger_height {
        penalty += weights.danger;
    }
    penalty + profile.buried_cells() as f32 * weights.buried_cell
}
