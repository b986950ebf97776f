//! Tsumo core crate - fundamental types for the falling-pair puzzle engine.

mod board;
mod moves;
mod piece;
mod profile;

pub use board::{Board, BoardParseError, Cell};
pub use moves::Move;
pub use piece::{ActivePiece, ColorPair, Orientation};
pub use profile::ColumnProfile;
