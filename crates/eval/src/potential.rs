//! Shape potential: color interleaving and chain-ready triples.

use tsumo_core::Board;
use tsumo_engine::chain::flood_fill;

use crate::EvalWeights;

pub fn shape_potential(board: &Board, weights: &EvalWeights) -> f32 {
    shape_potential_from(board, 0, weights)
}

/// Shape potential over columns `first_column..width` of the visible rows.
/// Triples reaching into the skipped columns are not counted.
pub fn shape_potential_from(board: &Board, first_column: usize, weights: &EvalWeights) -> f32 {
    let rows = board.rows();
    let width = board.width();
    let mut visited = vec![false; width * rows];
    let mut score = 0.0;

    for y in board.margin()..rows {
        for x in first_column..width {
            let cell = board.cell(x, y);
            if cell.is_empty() {
                continue;
            }
            if y + 1 < rows {
                let below = board.cell(x, y + 1);
                if below.is_filled() && below != cell {
                    score += weights.interleave;
                }
            }
            if visited[y * width + x] {
                continue;
            }
            let group = flood_fill(board, x, y, &mut visited);
            if group.len() == 3 && group.iter().all(|&(gx, _)| gx >= first_column) {
                let center = group.iter().map(|&(_, gy)| gy as f32).sum::<f32>() / 3.0;
                let lift = rows as f32 - center;
                score += lift * lift * weights.triple;
            }
        }
    }
    score
}
