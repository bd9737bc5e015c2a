//! Read-only view of a session for rendering.

use crate::mode::ModeConfig;
use crate::pieces::Piece;
use crate::scoring::SessionStats;
use crate::session::SessionState;
use crate::types::{Cell, ModeKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Everything a front-end needs to draw one frame.
///
/// Reuse one value with [`GameSession::snapshot_into`](crate::GameSession::snapshot_into)
/// to avoid allocating per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Row-major, `board[y][x]`, row 0 at the top
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub stats: SessionStats,
    pub mode: ModeConfig,
    /// Lines still needed or milliseconds still left
    pub remaining: Option<u64>,
    pub state: SessionState,
}

impl GameSnapshot {
    /// Whether the session still accepts input
    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost: None,
            next: PieceKind::I,
            held: None,
            can_hold: true,
            stats: SessionStats::new(),
            mode: ModeConfig::new(ModeKind::Endless),
            remaining: None,
            state: SessionState::Running,
        }
    }
}
