//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to run a falling-block session without a terminal,
//! a wall clock or any I/O. Front-ends feed [`GameAction`](types::GameAction)s
//! and elapsed milliseconds in, and read [`GameSnapshot`]s and queued
//! [`GameEvent`](types::GameEvent)s back out.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, placement, row clearing and garbage rows
//! - [`pieces`]: tetromino catalog, clockwise rotation with kicks, ghost
//! - [`collision`]: bounds and overlap checks
//! - [`timer`]: deterministic per-session timers
//! - [`lock`]: lock delay with a bounded reset budget
//! - [`scoring`]: line-clear points, level and gravity interval
//! - [`mode`]: endless, 40/20 lines, rising and time attack rules
//! - [`session`]: the [`GameSession`] that ties it all together
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EventLog, GameSession};
//! use blockfall_core::types::{GameAction, ModeKind};
//!
//! let mut session = GameSession::new(ModeKind::Lines40, 12345);
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::HardDrop);
//! session.tick(16);
//!
//! let mut log = EventLog::default();
//! session.flush_events(&mut log);
//! assert_eq!(log.count("lock"), 1);
//! ```
//!
//! # Timing
//!
//! Time is measured in milliseconds and only moves through
//! [`GameSession::tick`]. Gravity starts at 1000ms per row and drops by 50ms
//! per level down to 100ms. A grounded piece locks after 1000ms, and each
//! grounded move or rotation restarts that delay, at most 15 times per piece.

pub mod board;
pub mod collision;
pub mod events;
pub mod lock;
pub mod mode;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use blockfall_types as types;

pub use board::{Board, Placement};
pub use events::{AudioNotifier, EventLog, Silent};
pub use lock::{LockController, LockDecision, LockPhase};
pub use mode::{EndReason, ModeConfig, ModeController, ModeTarget};
pub use pieces::{definition, ghost, try_rotate, Piece, Shape, TetrominoDef};
pub use rng::SimpleRng;
pub use scoring::{calculate_level, drop_interval_ms, line_clear_score, ScoreResult, SessionStats};
pub use session::{GameSession, SessionState};
pub use snapshot::GameSnapshot;
pub use timer::{TimerKind, TimerWheel};
