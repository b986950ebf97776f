//! Column compaction.

use tsumo_core::{Board, Cell};

/// Drop every filled cell to the bottom of its column, keeping order.
/// Returns whether anything moved; a settled board is left untouched.
pub fn apply_gravity(board: &mut Board) -> bool {
    let mut moved = false;
    for x in 0..board.width() {
        moved |= compact_column(board, x);
    }
    moved
}

fn compact_column(board: &mut Board, x: usize) -> bool {
    let mut moved = false;
    // next free slot, walking up from the floor
    let mut write = board.rows();
    for y in (0..board.rows()).rev() {
        let cell = board.cell(x, y);
        if cell.is_empty() {
            continue;
        }
        write -= 1;
        if write != y {
            board.set(x, write, cell);
            board.set(x, y, Cell::EMPTY);
            moved = true;
        }
    }
    moved
}
