//! Rotation and movement logic with nudge application.

use crate::collision::{is_position_valid, piece_fits};
use crate::kicks::nudges;
use tsumo_core::{ActivePiece, Board};

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub piece: ActivePiece,
    pub nudge_index: usize,
}

/// Try to rotate the pair, applying nudges if necessary.
/// Returns None if no nudge fits; the caller keeps the old piece.
pub fn try_rotate(board: &Board, piece: &ActivePiece, clockwise: bool) -> Option<RotationResult> {
    let to = if clockwise {
        piece.orientation.cw()
    } else {
        piece.orientation.ccw()
    };

    for (i, (dx, dy)) in nudges(to).iter().enumerate() {
        let nx = piece.x + dx;
        let ny = piece.y + dy;
        if is_position_valid(board, nx, ny, to) {
            return Some(RotationResult {
                piece: ActivePiece {
                    x: nx,
                    y: ny,
                    orientation: to,
                    colors: piece.colors,
                },
                nudge_index: i,
            });
        }
    }

    None
}

/// Try to shift the pair horizontally
pub fn try_move(board: &Board, piece: &ActivePiece, dx: i32) -> Option<ActivePiece> {
    let moved = ActivePiece {
        x: piece.x + dx,
        ..*piece
    };
    piece_fits(board, &moved).then_some(moved)
}

/// Try to advance the pair one row down
pub fn try_fall(board: &Board, piece: &ActivePiece) -> Option<ActivePiece> {
    let moved = ActivePiece {
        y: piece.y + 1,
        ..*piece
    };
    piece_fits(board, &moved).then_some(moved)
}

/// Side-effect free: could the pair fall one more row?
pub fn can_advance(board: &Board, piece: &ActivePiece) -> bool {
    is_position_valid(board, piece.x, piece.y + 1, piece.orientation)
}
