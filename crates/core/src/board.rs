//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a [`Block`].
//! Uses a flat array for cache locality; dimensions never change, only cell
//! contents do.
//! Coordinates: (x, y) where x is the column 0..9 (left to right) and y is the
//! row 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Block, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices, at most one per board row
pub type RowList = ArrayVec<usize, HEIGHT>;

/// Result of writing a piece into the board
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Every cell was written
    Placed,
    /// Some cell sits above the visible board; nothing was written
    TopOut,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if (x, y) is on the board and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Write the piece's block into every cell it covers.
    ///
    /// Columns are expected to be in range already. If any covered cell lies
    /// above the board the board is left untouched and `TopOut` is returned.
    pub fn place(&mut self, piece: &Piece) -> Placement {
        if piece.cells().any(|(_, y)| y < 0) {
            return Placement::TopOut;
        }

        let block = Some(Block::Piece(piece.kind));
        for (x, y) in piece.cells() {
            self.set(x, y, block);
        }
        Placement::Placed
    }

    /// Full rows, ordered top to bottom
    pub fn find_full_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows, dropping everything above them and inserting
    /// empty rows at the top. Remaining rows keep their relative order.
    ///
    /// Returns the number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut write_y = HEIGHT;
        let mut removed = 0;

        // Compact from the bottom up (copy_within handles overlap)
        for read_y in (0..HEIGHT).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = None;
        }

        removed
    }

    /// Drop the topmost row, shift everything up one and append a garbage row
    /// at the bottom with a single empty cell at column `gap`.
    pub fn shift_up_insert_garbage_row(&mut self, gap: usize) {
        self.cells.copy_within(WIDTH.., 0);

        let bottom = (HEIGHT - 1) * WIDTH;
        for (x, cell) in self.cells[bottom..].iter_mut().enumerate() {
            *cell = if x == gap { None } else { Some(Block::Garbage) };
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `#` marks a garbage cell and any other non-space, non-`.` character a
    /// piece letter. Handy for setting up positions in tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().enumerate().take(HEIGHT) {
            let y = (offset + i) as i8;
            for (x, ch) in line.chars().enumerate().take(WIDTH) {
                let cell = match ch {
                    '.' | ' ' => None,
                    '#' => Some(Block::Garbage),
                    other => crate::types::PieceKind::from_str(&other.to_string())
                        .map(Block::Piece)
                        .or(Some(Block::Garbage)),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
