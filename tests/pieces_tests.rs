//! Piece tests - catalog, rotation, kicks and ghost

use blockfall::core::{definition, ghost, try_rotate, Board, Piece};
use blockfall::types::{PieceKind, BOARD_WIDTH};

#[test]
fn test_every_kind_has_four_cells() {
    for kind in PieceKind::ALL {
        let def = definition(kind);
        assert_eq!(def.kind, kind);
        assert_eq!(def.shape.offsets().count(), 4, "{kind:?}");
    }
}

#[test]
fn test_spawn_is_centered_on_top_row() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!(piece.y, 0);
        let xs: Vec<i8> = piece.cells().map(|(x, _)| x).collect();
        let (min, max) = (*xs.iter().min().unwrap(), *xs.iter().max().unwrap());
        let left_gap = min;
        let right_gap = BOARD_WIDTH as i8 - 1 - max;
        assert!((left_gap - right_gap).abs() <= 1, "{kind:?} at {min}..={max}");
        assert!(piece.cells().any(|(_, y)| y == 0));
    }
}

#[test]
fn test_rotation_orders() {
    let expected = [
        (PieceKind::O, 1),
        (PieceKind::I, 2),
        (PieceKind::S, 2),
        (PieceKind::Z, 2),
        (PieceKind::T, 4),
        (PieceKind::J, 4),
        (PieceKind::L, 4),
    ];
    for (kind, order) in expected {
        let start = definition(kind).shape;
        let mut shape = start.rotated_cw();
        let mut turns = 1;
        while shape != start {
            shape = shape.rotated_cw();
            turns += 1;
        }
        assert_eq!(turns, order, "{kind:?}");
    }
}

#[test]
fn test_rotation_in_open_space_keeps_origin() {
    let board = Board::new();
    let piece = Piece::spawn(PieceKind::T).translated(0, 5);
    let rotated = try_rotate(&board, &piece).unwrap();
    assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
    assert_ne!(rotated.shape, piece.shape);
}

#[test]
fn test_rotation_kicks_off_right_wall() {
    let board = Board::new();
    // Vertical I against the right wall
    let vertical = Piece::spawn(PieceKind::I).rotated();
    let piece = Piece {
        x: BOARD_WIDTH as i8 - 1,
        y: 5,
        ..vertical
    };

    // Flat again it would stick out three columns, past every kick offset
    assert!(try_rotate(&board, &piece).is_none());

    let near = Piece { x: 7, ..piece };
    let kicked = try_rotate(&board, &near).unwrap();
    assert_eq!(kicked.x, 6);
    assert_eq!(kicked.shape.width(), 4);
}

#[test]
fn test_rotation_blocked_everywhere() {
    // Vertical I in a one-wide shaft cannot turn
    let board = Board::from_rows(&["###.######"; 8]);
    let vertical_i = Piece {
        x: 3,
        y: 16,
        ..Piece::spawn(PieceKind::I).rotated()
    };
    assert!(try_rotate(&board, &vertical_i).is_none());
}

#[test]
fn test_ghost_lands_on_stack() {
    let board = Board::from_rows(&["##########", "##########"]);
    let piece = Piece::spawn(PieceKind::O);
    let g = ghost(&board, &piece);
    assert_eq!(g.x, piece.x);
    assert_eq!(g.y, 16);
}
