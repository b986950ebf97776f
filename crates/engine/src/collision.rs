//! collision detection - walls, floor, other cells

use tsumo_core::{ActivePiece, Board, Orientation};

/// Does a single cell at (x, y) collide?
/// Rows above the grid never collide; walls, floor and filled cells do.
#[inline]
pub fn check_collision(board: &Board, x: i32, y: i32) -> bool {
    if x < 0 || x >= board.width() as i32 || y >= board.rows() as i32 {
        return true;
    }
    if y < 0 {
        return false;
    }
    board.cell(x as usize, y as usize).is_filled()
}

/// Both pivot and satellite must be free.
#[inline]
pub fn is_position_valid(board: &Board, x: i32, y: i32, orientation: Orientation) -> bool {
    let (dx, dy) = orientation.satellite_offset();
    !check_collision(board, x, y) && !check_collision(board, x + dx, y + dy)
}

pub fn piece_fits(board: &Board, piece: &ActivePiece) -> bool {
    is_position_valid(board, piece.x, piece.y, piece.orientation)
}

/// Lowest pivot row reachable by falling straight down from `y`.
/// Caller guarantees (x, y) itself is valid.
#[inline]
pub fn landing_row(board: &Board, x: i32, y: i32, orientation: Orientation) -> i32 {
    let mut landing_y = y;
    while is_position_valid(board, x, landing_y + 1, orientation) {
        landing_y += 1;
    }
    landing_y
}
