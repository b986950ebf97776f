//! Legal placement enumeration.

use smallvec::SmallVec;
use tsumo_core::{Board, Move, Orientation};

/// Inline capacity covers 4 orientations on an 8-wide board.
pub type MoveList = SmallVec<[Move; 32]>;

/// Every (orientation, column) whose satellite column is inside the walls.
/// Orientation-major order; search tie-breaks depend on it.
pub fn enumerate_moves(board: &Board) -> MoveList {
    let width = board.width() as i32;
    let mut moves = MoveList::new();
    for orientation in Orientation::ALL {
        for column in 0..board.width() {
            // Board::MAX_WIDTH keeps every column inside u8
            let mv = Move::new(orientation, column as u8);
            let sx = mv.satellite_column();
            if sx >= 0 && sx < width {
                moves.push(mv);
            }
        }
    }
    moves
}
