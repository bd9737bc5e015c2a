//! Collision queries between a piece and the board.
//!
//! Cells above the board (y < 0) never collide on their own; a piece may hang
//! partially above the visible area and only tops out if it locks there.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if any filled cell of `piece` is outside the side walls, below the
/// floor, or on top of an occupied board cell.
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece.cells().any(|(x, y)| {
        x < 0
            || x >= BOARD_WIDTH as i8
            || y >= BOARD_HEIGHT as i8
            || (y >= 0 && board.is_occupied(x, y))
    })
}

/// True if moving the piece by (dx, dy) would collide
fn blocked(board: &Board, piece: &Piece, dx: i8, dy: i8) -> bool {
    collides(board, &piece.translated(dx, dy))
}

/// True if the piece cannot move one row down
pub fn is_grounded(board: &Board, piece: &Piece) -> bool {
    blocked(board, piece, 0, 1)
}
