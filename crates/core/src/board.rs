//! board representation - flat row-major cells, hidden margin rows on top
//! row 0 is the topmost margin row, rows grow downward to the floor

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One grid cell. Id 0 is empty, 1..=9 are color identifiers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Self = Self(0);
    pub const MAX_COLOR: u8 = 9;

    /// Panics if `id` is above [`Cell::MAX_COLOR`].
    pub const fn new(id: u8) -> Self {
        assert!(id <= Self::MAX_COLOR, "color id out of range");
        Self(id)
    }

    #[inline(always)]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_filled(self) -> bool {
        self.0 != 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("{given} rows given but the board only has {capacity}")]
    TooManyRows { given: usize, capacity: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} column {column}: unexpected character {ch:?}")]
    InvalidCell { row: usize, column: usize, ch: char },
    #[error("cell array holds {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
    #[error("board dimensions must be non-zero")]
    Empty,
    #[error("board width {0} exceeds {max}", max = Board::MAX_WIDTH)]
    TooWide(usize),
}

/// Cell matrix of `visible_height + margin` rows by `width` columns.
/// Cloning is a single flat copy, which is what search relies on.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board {
    width: usize,
    visible_height: usize,
    margin: usize,
    cells: Vec<Cell>,
}

#[derive(Serialize, Deserialize)]
struct RawBoard {
    width: usize,
    visible_height: usize,
    margin: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardParseError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.width == 0 || raw.visible_height == 0 {
            return Err(BoardParseError::Empty);
        }
        if raw.width > Board::MAX_WIDTH {
            return Err(BoardParseError::TooWide(raw.width));
        }
        let expected = raw.width * (raw.visible_height + raw.margin);
        if raw.cells.len() != expected {
            return Err(BoardParseError::CellCount {
                expected,
                found: raw.cells.len(),
            });
        }
        if let Some(i) = raw.cells.iter().position(|c| c.id() > Cell::MAX_COLOR) {
            return Err(BoardParseError::InvalidCell {
                row: i / raw.width,
                column: i % raw.width,
                ch: char::from(b'0'.wrapping_add(raw.cells[i].id())),
            });
        }
        Ok(Self {
            width: raw.width,
            visible_height: raw.visible_height,
            margin: raw.margin,
            cells: raw.cells,
        })
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        Self {
            width: board.width,
            visible_height: board.visible_height,
            margin: board.margin,
            cells: board.cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_VISIBLE_HEIGHT,
            Self::DEFAULT_MARGIN,
        )
    }
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 6;
    pub const DEFAULT_VISIBLE_HEIGHT: usize = 12;
    pub const DEFAULT_MARGIN: usize = 2;
    /// Columns must fit a [`Move`](crate::Move) column id.
    pub const MAX_WIDTH: usize = u8::MAX as usize + 1;

    pub fn new(width: usize, visible_height: usize, margin: usize) -> Self {
        assert!(
            width > 0 && visible_height > 0,
            "board dimensions must be non-zero"
        );
        assert!(
            width <= Self::MAX_WIDTH,
            "board width {width} exceeds {}",
            Self::MAX_WIDTH
        );
        Self {
            width,
            visible_height,
            margin,
            cells: vec![Cell::EMPTY; width * (visible_height + margin)],
        }
    }

    /// Build a board from ASCII rows, bottom-aligned: the last string is the floor row.
    /// `.` marks an empty cell, `1`-`9` a color.
    pub fn from_rows(
        width: usize,
        visible_height: usize,
        margin: usize,
        rows: &[&str],
    ) -> Result<Self, BoardParseError> {
        if width == 0 || visible_height == 0 {
            return Err(BoardParseError::Empty);
        }
        if width > Self::MAX_WIDTH {
            return Err(BoardParseError::TooWide(width));
        }
        let mut board = Self::new(width, visible_height, margin);
        let capacity = board.rows();
        if rows.len() > capacity {
            return Err(BoardParseError::TooManyRows {
                given: rows.len(),
                capacity,
            });
        }
        let top = capacity - rows.len();
        for (i, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(BoardParseError::RowWidth {
                    row: i,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::EMPTY,
                    '1'..='9' => Cell::new(ch as u8 - b'0'),
                    _ => {
                        return Err(BoardParseError::InvalidCell {
                            row: i,
                            column: x,
                            ch,
                        })
                    }
                };
                board.set(x, top + i, cell);
            }
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    #[inline(always)]
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Total row count, margin included.
    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.visible_height + self.margin
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.rows(),
            "cell ({x}, {y}) outside {}x{} board",
            self.width,
            self.rows()
        );
        y * self.width + x
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let i = self.index(x, y);
        self.cells[i] = cell;
    }

    /// Checked lookup with signed coordinates. None outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.rows()
    }

    pub fn is_visible_row(&self, y: usize) -> bool {
        y >= self.margin && y < self.rows()
    }

    /// Stack height of column `x`, counted from the floor up to its topmost cell.
    pub fn column_height(&self, x: usize) -> usize {
        (0..self.rows())
            .find(|&y| self.cell(x, y).is_filled())
            .map_or(0, |y| self.rows() - y)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// True when no filled cell has an empty cell beneath it.
    pub fn is_settled(&self) -> bool {
        (0..self.width).all(|x| {
            let mut seen_filled = false;
            for y in 0..self.rows() {
                let filled = self.cell(x, y).is_filled();
                if seen_filled && !filled {
                    return false;
                }
                seen_filled |= filled;
            }
            true
        })
    }

    /// Raw cells, row-major from the top margin row down.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in self.margin..self.rows() {
            for cell in self.row(y) {
                if cell.is_empty() {
                    write!(f, ".")?;
                } else {
                    write!(f, "{}", cell.id())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
