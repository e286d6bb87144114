//! Board module - the committed playfield
//!
//! The board is a `width x height` grid of filled/empty slots (12x24 by default).
//! Uses a flat row-major vector so snapshots are a single cheap copy.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height (top to bottom).
//! Cells above the top (y < 0) are never stored; a piece may hang there while spawning.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Rows removed by a single lock (never more than a piece is tall)
pub type ClearedRows = ArrayVec<i8, 4>;

/// The committed set of filled cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of slots, row-major order (y * width + x)
    cells: Vec<bool>,
}

/// Result of [`Board::detect_and_clear`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Board + landed piece, untouched
    pub merged: Board,
    /// Full rows emptied, nothing shifted (the flash frame)
    pub flashing: Board,
    /// Full rows removed and everything above shifted down
    pub cleared: Board,
    /// Indices of the full rows, ascending
    pub rows: ClearedRows,
}

impl LineClear {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Board whose rows `from_row..height` are completely filled (screen wipe frames)
    pub fn filled_from_row(width: u8, height: u8, from_row: i8) -> Self {
        let mut board = Self::new(width, height);
        board.fill_rows_from(from_row);
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `cell` is on the board and filled
    pub fn is_filled(&self, cell: Cell) -> bool {
        self.index(cell.x, cell.y)
            .map(|idx| self.cells[idx])
            .unwrap_or(false)
    }

    /// Fill a single slot. Returns false if out of bounds.
    pub fn fill(&mut self, cell: Cell) -> bool {
        match self.index(cell.x, cell.y) {
            Some(idx) => {
                self.cells[idx] = true;
                true
            }
            None => false,
        }
    }

    /// Check whether `piece` may occupy its current position.
    ///
    /// Every cell must be inside the side walls and above the floor, and not
    /// overlap a filled cell. There is no lower bound on y.
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece.cells().all(|c| {
            c.x >= 0
                && c.x < self.width as i8
                && c.y < self.height as i8
                && !self.is_filled(c)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        let Some(start) = self.index(0, y) else {
            return false;
        };
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|&filled| filled)
    }

    /// Indices of all full rows, ascending.
    ///
    /// Panics if more than four rows are full; a single lock can never fill more.
    pub fn full_rows(&self) -> ClearedRows {
        (0..self.height as i8)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Copy of this board with the piece's on-board cells filled in
    pub fn merged_with(&self, piece: &Piece) -> Board {
        let mut out = self.clone();
        for cell in piece.cells() {
            out.fill(cell);
        }
        out
    }

    /// Detect full rows and build the three line-clear views.
    ///
    /// `self` is expected to already contain the landed piece.
    pub fn detect_and_clear(&self) -> LineClear {
        let rows = self.full_rows();

        let mut flashing = self.clone();
        for &y in &rows {
            flashing.clear_row_in_place(y);
        }

        let mut cleared = self.clone();
        cleared.collapse_full_rows();

        LineClear {
            merged: self.clone(),
            flashing,
            cleared,
            rows,
        }
    }

    /// Land `piece` on this board and clear any completed rows.
    ///
    /// Cells hanging above the top are carried down by the number of cleared
    /// rows. Returns `None` (lock-out) if any of them would still sit above row 0.
    pub fn lock(&self, piece: &Piece) -> Option<LineClear> {
        let mut clear = self.merged_with(piece).detect_and_clear();
        let shift = clear.count() as i8;

        for cell in piece.cells().filter(|c| c.y < 0) {
            let landed = cell.offset_by((0, shift));
            if landed.y < 0 {
                return None;
            }
            clear.cleared.fill(landed);
        }
        Some(clear)
    }

    fn clear_row_in_place(&mut self, y: i8) {
        if let Some(start) = self.index(0, y) {
            self.cells[start..start + self.width as usize].fill(false);
        }
    }

    /// Remove every full row and let the rows above fall.
    /// Two-pointer compaction, scanning bottom to top.
    fn collapse_full_rows(&mut self) {
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y as i8) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(false);
    }

    /// Fill rows `from_row..height` completely
    pub fn fill_rows_from(&mut self, from_row: i8) {
        let from = from_row.clamp(0, self.height as i8) as usize;
        let start = from * self.width as usize;
        self.cells[start..].fill(true);
    }

    /// All filled cells, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(idx, _)| Cell::new((idx % width) as i8, (idx / width) as i8))
    }

    /// Row-major slots (`y * width + x`)
    pub fn slots(&self) -> &[bool] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&filled| filled)
    }

    /// Convert to rows of 0/1 for tests and debugging
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|&filled| filled as u8).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(MATRIX_WIDTH, MATRIX_HEIGHT)
    }
}
