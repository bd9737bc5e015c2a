//! Pieces module - tetromino catalog, active piece and rotation
//!
//! Shapes are small boolean matrices copied out of an immutable catalog, so
//! every piece owns its own rotation state by value. Rotation is a plain 90°
//! clockwise matrix turn followed by a fixed kick table shared by all kinds.

use crate::board::Board;
use crate::collision::collides;
use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest side of any tetromino matrix
pub const MAX_SHAPE: usize = 4;

/// Offsets tried in order when a rotation collides at the unchanged origin.
///
/// The same table applies to every piece kind and every orientation.
pub const KICK_OFFSETS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// A rectangular boolean matrix of up to 4x4 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    /// Build a shape from rows of `0`/`1`.
    const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        let mut r = 0;
        while r < H {
            let mut c = 0;
            while c < W {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// True if (col, row) inside the matrix is filled
    pub fn filled(&self, col: usize, row: usize) -> bool {
        col < self.width as usize && row < self.height as usize && self.cells[row][col]
    }

    /// Offsets (col, row) of every filled cell, row-major
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |r| {
            (0..self.width as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Transpose then reverse each row: a 90° clockwise turn.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Catalog entry: identity, spawn shape and fill color (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrominoDef {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: u32,
}

/// The seven tetrominoes, indexed by [`PieceKind::index`]
pub static CATALOG: [TetrominoDef; 7] = [
    TetrominoDef {
        kind: PieceKind::I,
        shape: Shape::from_rows([[1, 1, 1, 1]]),
        color: 0x00f0f0,
    },
    TetrominoDef {
        kind: PieceKind::O,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
        color: 0xf0f000,
    },
    TetrominoDef {
        kind: PieceKind::T,
        shape: Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
        color: 0xa000f0,
    },
    TetrominoDef {
        kind: PieceKind::S,
        shape: Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
        color: 0x00f000,
    },
    TetrominoDef {
        kind: PieceKind::Z,
        shape: Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
        color: 0xf00000,
    },
    TetrominoDef {
        kind: PieceKind::J,
        shape: Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
        color: 0x0000f0,
    },
    TetrominoDef {
        kind: PieceKind::L,
        shape: Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
        color: 0xf0a000,
    },
];

/// Look up the catalog entry for a kind
pub fn definition(kind: PieceKind) -> &'static TetrominoDef {
    &CATALOG[kind.index()]
}

/// An active piece: identity, its own shape copy and board origin.
///
/// The origin may sit outside the board while a move is being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Fresh piece from the catalog, horizontally centered on the top row
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = definition(kind).shape;
        Self {
            kind,
            shape,
            x: (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8,
            y: 0,
        }
    }

    /// Absolute board coordinates (x, y) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .offsets()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// Shifted copy. Coordinates saturate, so far-off pieces stay off the board.
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Same origin, shape turned clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    pub fn color(&self) -> u32 {
        definition(self.kind).color
    }
}

/// Rotate clockwise, trying each kick offset in order.
///
/// Returns the accepted piece (origin shifted by the winning kick) or `None`
/// when every offset collides.
pub fn try_rotate(board: &Board, piece: &Piece) -> Option<Piece> {
    let turned = piece.rotated();
    if !collides(board, &turned) {
        return Some(turned);
    }

    KICK_OFFSETS
        .iter()
        .map(|&(dx, dy)| turned.translated(dx, dy))
        .find(|candidate| !collides(board, candidate))
}

/// Where the piece would come to rest if dropped straight down
pub fn ghost(board: &Board, piece: &Piece) -> Piece {
    let mut ghost = *piece;
    loop {
        let next = ghost.translated(0, 1);
        if collides(board, &next) {
            return ghost;
        }
        ghost = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Block;

    fn rotate_n(shape: Shape, n: usize) -> Shape {
        (0..n).fold(shape, |s, _| s.rotated_cw())
    }

    #[test]
    fn test_catalog_has_four_cells_each() {
        for def in CATALOG.iter() {
            assert_eq!(def.shape.offsets().count(), 4, "{:?}", def.kind);
            assert_eq!(definition(def.kind).kind, def.kind);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = definition(PieceKind::T).shape;
        let east = t.rotated_cw();
        assert_eq!(east, Shape::from_rows([[1, 0], [1, 1], [1, 0]]));
    }

    #[test]
    fn test_rotation_orders() {
        for def in CATALOG.iter() {
            let s = def.shape;
            assert_eq!(rotate_n(s, 4), s, "{:?}", def.kind);
        }

        let o = definition(PieceKind::O).shape;
        assert_eq!(o.rotated_cw(), o);

        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            let s = definition(kind).shape;
            assert_ne!(s.rotated_cw(), s);
            assert_eq!(rotate_n(s, 2), s, "{:?}", kind);
        }

        for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
            let s = definition(kind).shape;
            assert_ne!(rotate_n(s, 2), s, "{:?}", kind);
        }
    }

    #[test]
    fn test_spawn_is_centered_on_top_row() {
        assert_eq!(Piece::spawn(PieceKind::I).x, 3);
        assert_eq!(Piece::spawn(PieceKind::O).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T).x, 4);
        assert!(PieceKind::ALL.iter().all(|&k| Piece::spawn(k).y == 0));
    }

    #[test]
    fn test_wall_kick_off_right_wall() {
        let board = Board::new();
        // Turning flat at column 7 would poke past the wall; one kick left fits.
        let mut piece = Piece::spawn(PieceKind::I).rotated();
        piece.x = 7;
        piece.y = 5;
        assert!(!collides(&board, &piece));

        let rotated = try_rotate(&board, &piece).expect("kick should succeed");
        assert_eq!(rotated.x, 6);
        assert_eq!(rotated.y, 5);
        assert!(!collides(&board, &rotated));
    }

    #[test]
    fn test_rotation_rejected_when_boxed_in() {
        let mut board = Board::new();
        for y in 0..20 {
            for x in 0..10 {
                if x != 4 {
                    board.set(x, y, Some(Block::Garbage));
                }
            }
        }
        let mut piece = Piece::spawn(PieceKind::I).rotated();
        piece.x = 4;
        piece.y = 10;
        assert!(!collides(&board, &piece));
        assert_eq!(try_rotate(&board, &piece), None);
    }

    #[test]
    fn test_ghost_lands_on_floor() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O);
        let g = ghost(&board, &piece);
        assert_eq!(g.y, 18);
        assert_eq!(g.x, piece.x);
    }
}
