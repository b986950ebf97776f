//! Writing pairs into a board: live locks and simulated drops.

use tsumo_core::{ActivePiece, Board, ColorPair, Move};

use crate::chain::{resolve_to_fixpoint, ChainResult};
use crate::collision::{is_position_valid, landing_row};

/// Write both cells of the pair into the board.
/// Cells above the grid are discarded; returns how many were written.
pub fn lock_piece(board: &mut Board, piece: &ActivePiece) -> usize {
    let mut written = 0;
    for (x, y, cell) in piece.cells() {
        if board.in_bounds(x, y) {
            board.set(x as usize, y as usize, cell);
            written += 1;
        }
    }
    written
}

/// Pivot row a new pair spawns on: the lowest margin row.
#[inline]
pub fn spawn_row(board: &Board) -> i32 {
    board.margin() as i32 - 1
}

/// Straight drop of `colors` from the spawn row with `mv`.
/// None when the pair does not fit at the spawn row in that column.
pub fn drop_pair(board: &Board, colors: ColorPair, mv: &Move) -> Option<ActivePiece> {
    let x = mv.column as i32;
    let y = spawn_row(board);
    if !is_position_valid(board, x, y, mv.orientation) {
        return None;
    }
    Some(ActivePiece {
        x,
        y: landing_row(board, x, y, mv.orientation),
        orientation: mv.orientation,
        colors,
    })
}

/// Apply a placement to a copy of the board and run chains to fixpoint.
pub fn simulate_placement(
    board: &Board,
    colors: ColorPair,
    mv: &Move,
) -> Option<(Board, ChainResult)> {
    let landed = drop_pair(board, colors, mv)?;
    let mut next = board.clone();
    lock_piece(&mut next, &landed);
    let result = resolve_to_fixpoint(&mut next);
    Some((next, result))
}
