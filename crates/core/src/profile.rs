//! Per-column stack profile for evaluation.

use crate::Board;

/// Column heights and buried empties over the visible rows.
/// Computed once per evaluated board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    heights: Vec<usize>,
    buried: usize,
}

impl ColumnProfile {
    pub fn new(board: &Board) -> Self {
        let rows = board.rows();
        let mut heights = vec![0; board.width()];
        let mut buried = 0;
        for (x, height) in heights.iter_mut().enumerate() {
            let Some(top) = (board.margin()..rows).find(|&y| board.cell(x, y).is_filled()) else {
                continue;
            };
            *height = rows - top;
            buried += (top + 1..rows)
                .filter(|&y| board.cell(x, y).is_empty())
                .count();
        }
        Self { heights, buried }
    }

    #[inline(always)]
    pub fn height(&self, x: usize) -> usize {
        self.heights[x]
    }

    pub fn max_height(&self) -> usize {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Empty cells with a filled cell somewhere above them in the same column.
    pub fn buried_cells(&self) -> usize {
        self.buried
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }
}
