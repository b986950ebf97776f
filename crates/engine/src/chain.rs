//! Chain resolution - flood fill groups, clear, settle, repeat.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tsumo_core::{Board, Cell};

use crate::gravity::apply_gravity;

/// Groups of this size or larger are cleared.
pub const CLEAR_THRESHOLD: usize = 4;

/// Connected same-color cells, stack-allocated for the common case.
pub type Group = SmallVec<[(usize, usize); 8]>;

/// Tally of one resolve run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct ChainResult {
    /// Successful clear steps.
    pub chains: u32,
    /// Cells removed across all steps.
    pub cleared: u32,
}

impl ChainResult {
    pub const NONE: Self = Self {
        chains: 0,
        cleared: 0,
    };

    pub fn is_chain(&self) -> bool {
        self.chains > 0
    }

    pub fn record_step(&mut self, cleared: usize) {
        self.chains += 1;
        self.cleared += cleared as u32;
    }
}

/// 4-neighbour flood fill over cells sharing the color at (x, y).
/// Empty start cell gives an empty group.
pub fn find_connected_group(board: &Board, x: usize, y: usize) -> Group {
    let mut visited = vec![false; board.width() * board.rows()];
    flood_fill(board, x, y, &mut visited)
}

/// Flood fill that marks into a caller-owned visited map, so a full-board scan
/// never revisits a group.
pub fn flood_fill(board: &Board, x: usize, y: usize, visited: &mut [bool]) -> Group {
    let mut group = Group::new();
    let target = board.cell(x, y);
    if target.is_empty() {
        return group;
    }

    let width = board.width();
    let rows = board.rows();
    visited[y * width + x] = true;
    group.push((x, y));

    // group doubles as the BFS queue
    let mut head = 0;
    while head < group.len() {
        let (cx, cy) = group[head];
        head += 1;
        let neighbours = [
            (cx as i32, cy as i32 - 1),
            (cx as i32, cy as i32 + 1),
            (cx as i32 - 1, cy as i32),
            (cx as i32 + 1, cy as i32),
        ];
        for (nx, ny) in neighbours {
            if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= rows {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let i = ny * width + nx;
            if visited[i] || board.cell(nx, ny) != target {
                continue;
            }
            visited[i] = true;
            group.push((nx, ny));
        }
    }
    group
}

/// Every cell belonging to a group of at least [`CLEAR_THRESHOLD`], row-major scan.
pub fn find_clearable(board: &Board) -> Vec<(usize, usize)> {
    let mut visited = vec![false; board.width() * board.rows()];
    let mut clear = Vec::new();
    for y in 0..board.rows() {
        for x in 0..board.width() {
            if visited[y * board.width() + x] || board.cell(x, y).is_empty() {
                continue;
            }
            let group = flood_fill(board, x, y, &mut visited);
            if group.len() >= CLEAR_THRESHOLD {
                clear.extend_from_slice(&group);
            }
        }
    }
    clear
}

/// Remove every clearable group. Returns the number of cells removed; 0 means nothing fired.
/// Does not settle the board afterwards.
pub fn resolve_step(board: &mut Board) -> usize {
    let clear = find_clearable(board);
    for &(x, y) in &clear {
        board.set(x, y, Cell::EMPTY);
    }
    clear.len()
}

/// Clear and settle until nothing fires. A board where nothing clears is left as is,
/// floating cells included.
/// Terminates because each step strictly shrinks the occupied cell count.
pub fn resolve_to_fixpoint(board: &mut Board) -> ChainResult {
    let mut result = ChainResult::NONE;
    loop {
        let cleared = resolve_step(board);
        if cleared == 0 {
            break;
        }
        result.record_step(cleared);
        debug!("chain {}: cleared {} cells", result.chains, cleared);
        apply_gravity(board);
    }
    result
}
