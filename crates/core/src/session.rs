//! Game session - ties board, pieces, lock delay, scoring and mode together
//!
//! A session is an explicit value; several can run side by side. Every public
//! operation runs to completion before returning, and time only advances
//! through [`GameSession::tick`], which delivers due timers one at a time in
//! deadline order.

use crate::board::{Board, Placement};
use crate::collision::{collides, is_grounded};
use crate::events::AudioNotifier;
use crate::lock::{LockController, LockDecision, LockPhase};
use crate::mode::{EndReason, ModeConfig, ModeController};
use crate::pieces::{ghost, try_rotate, Piece};
use crate::rng::SimpleRng;
use crate::scoring::{process_lock, SessionStats};
use crate::snapshot::GameSnapshot;
use crate::timer::{Fired, TimerKind, TimerWheel};
use crate::types::{GameAction, GameEvent, ModeKind, PieceKind, BOARD_WIDTH, CLOCK_TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    Over(EndReason),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Option<Piece>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    lock: LockController,
    timers: TimerWheel,
    stats: SessionStats,
    mode: ModeController,
    state: SessionState,
    rng: SimpleRng,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session on an empty board
    pub fn new(mode: ModeKind, seed: u32) -> Self {
        Self::with_board(mode, seed, Board::new())
    }

    /// Start a session on a prepared board.
    ///
    /// If the first piece cannot spawn the session is over immediately.
    pub fn with_board(mode: ModeKind, seed: u32, board: Board) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = rng.next_kind();
        let mut session = Self {
            board,
            current: None,
            next,
            held: None,
            can_hold: true,
            lock: LockController::new(),
            timers: TimerWheel::new(),
            stats: SessionStats::new(),
            mode: ModeController::new(ModeConfig::new(mode)),
            state: SessionState::Running,
            rng,
            events: Vec::new(),
        };

        session
            .timers
            .arm_periodic(TimerKind::Gravity, session.stats.drop_interval_ms);
        session
            .timers
            .arm_periodic(TimerKind::Clock, CLOCK_TICK_MS);
        if let Some(period) = session.mode.garbage_interval_ms() {
            session.timers.arm_periodic(TimerKind::Garbage, period);
        }

        session.spawn_next();
        session
    }

    /// Fresh session in the same mode, seeded from this one's RNG
    pub fn restart(&mut self) {
        *self = Self::new(self.mode.config().kind, self.rng.seed());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions.
    ///
    /// The caller is responsible for keeping the current piece clear of any
    /// cell it fills.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn mode(&self) -> &ModeConfig {
        self.mode.config()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Over(_))
    }

    /// Why the session ended, once it has
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.state {
            SessionState::Over(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn lock_phase(&self) -> LockPhase {
        self.lock.phase()
    }

    pub fn lock_resets(&self) -> u8 {
        self.lock.resets()
    }

    /// Session time in milliseconds (frozen while paused)
    pub fn now_ms(&self) -> u64 {
        self.timers.now()
    }

    /// Where the current piece would land on a hard drop
    pub fn ghost(&self) -> Option<Piece> {
        self.current.map(|piece| ghost(&self.board, &piece))
    }

    /// Lines still needed or milliseconds still left, for modes with a target
    pub fn remaining(&self) -> Option<u64> {
        self.mode.remaining(&self.stats)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (row, cells) in out.board.iter_mut().zip(self.board.cells().chunks(BOARD_WIDTH as usize)) {
            row.copy_from_slice(cells);
        }
        out.current = self.current;
        out.ghost = self.ghost();
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.stats = self.stats;
        out.mode = *self.mode.config();
        out.remaining = self.remaining();
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take queued events in the order they happened
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Deliver queued events to `sink`
    pub fn flush_events(&mut self, sink: &mut impl AudioNotifier) {
        for event in self.events.drain(..) {
            sink.notify(event);
        }
    }

    /// Apply a logical action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::SoftDrop => self.move_piece(0, 1),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate_piece(),
            GameAction::Hold => self.hold_piece(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Translate the current piece. Rejected moves change nothing.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        if !self.shift(dx, dy) {
            return false;
        }
        self.events.push(GameEvent::Move);
        self.settle_after_action();
        true
    }

    /// Rotate clockwise with kicks. Rejected rotations change nothing.
    pub fn rotate_piece(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let Some(rotated) = try_rotate(&self.board, &piece) else {
            return false;
        };

        self.current = Some(rotated);
        self.events.push(GameEvent::Rotate);
        self.settle_after_action();
        true
    }

    /// Drop straight down and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(landed) = self.ghost() else {
            return false;
        };

        self.current = Some(landed);
        self.events.push(GameEvent::HardDrop);
        self.lock_piece();
        true
    }

    /// Swap with the held piece, or stash the current piece and promote the
    /// next one. Only allowed once between locks.
    pub fn hold_piece(&mut self) -> bool {
        if !self.is_running() || !self.can_hold {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let incoming = match self.held.replace(piece.kind) {
            Some(kind) => kind,
            None => self.take_next(),
        };

        self.can_hold = false;
        self.lock.reset(&mut self.timers);
        self.events.push(GameEvent::Hold);

        // Held pieces come back in spawn orientation
        let swapped = Piece::spawn(incoming);
        if collides(&self.board, &swapped) {
            self.current = None;
            self.end(EndReason::TopOut);
            return true;
        }
        self.current = Some(swapped);
        self.lock.refresh(is_grounded(&self.board, &swapped), &mut self.timers);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                true
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                true
            }
            SessionState::Over(_) => false,
        }
    }

    /// Advance session time by `elapsed_ms`, firing every timer that falls
    /// due in order. Does nothing while paused or over.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.is_running() {
            return;
        }

        let until = self.timers.now() + elapsed_ms as u64;
        while self.is_running() {
            let Some(fired) = self.timers.pop_due(until) else {
                break;
            };
            self.on_timer(fired);
        }
    }

    fn on_timer(&mut self, fired: Fired) {
        match fired.token.kind {
            TimerKind::Gravity => self.gravity_step(),
            TimerKind::LockDelay => {
                if self.lock.on_timer(fired) == LockDecision::Lock {
                    self.lock_piece();
                }
            }
            TimerKind::Clock => {
                self.stats.elapsed_ms = fired.at;
                if let Some(reason) = self.mode.check_clock(&self.stats) {
                    self.end(reason);
                }
            }
            TimerKind::Garbage => self.inject_garbage(),
        }
    }

    fn gravity_step(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        if self.lock.is_grounded() {
            return;
        }

        if self.shift(0, 1) {
            self.settle_after_action();
        } else {
            self.lock
                .refresh(is_grounded(&self.board, &piece), &mut self.timers);
        }
    }

    /// Push a garbage row in from below and carry the current piece up with
    /// the stack. The session is lost once the piece collides or has been
    /// pushed entirely above the visible board. Does nothing in modes without
    /// garbage.
    pub fn inject_garbage(&mut self) {
        if !self.is_running() || self.mode.garbage_interval_ms().is_none() {
            return;
        }

        let gap = self.rng.next_gap();
        self.board.shift_up_insert_garbage_row(gap);

        let Some(piece) = self.current else {
            return;
        };
        let lifted = piece.translated(0, -1);
        self.current = Some(lifted);

        if collides(&self.board, &lifted) || lifted.cells().all(|(_, y)| y < 0) {
            self.end(EndReason::TopOut);
            return;
        }
        self.lock
            .refresh(is_grounded(&self.board, &lifted), &mut self.timers);
    }

    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let moved = piece.translated(dx, dy);
        if collides(&self.board, &moved) {
            return false;
        }
        self.current = Some(moved);
        true
    }

    fn settle_after_action(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let grounded = is_grounded(&self.board, &piece);
        if self.lock.after_action(grounded, &mut self.timers) == LockDecision::Lock {
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.lock.reset(&mut self.timers);
        self.events.push(GameEvent::Lock);

        if self.board.place(&piece) == Placement::TopOut {
            self.end(EndReason::TopOut);
            return;
        }

        let result = process_lock(&mut self.board, &mut self.stats);
        if result.lines_cleared > 0 {
            self.events.push(GameEvent::LineClear(result.lines_cleared));
        }
        if let Some(level) = result.level_up {
            self.events.push(GameEvent::LevelUp(level));
            self.timers
                .arm_periodic(TimerKind::Gravity, self.stats.drop_interval_ms);
        }

        if let Some(reason) = self.mode.check_after_lock(&self.stats) {
            self.end(reason);
            return;
        }

        self.spawn_next();
    }

    fn take_next(&mut self) -> PieceKind {
        std::mem::replace(&mut self.next, self.rng.next_kind())
    }

    fn spawn_next(&mut self) {
        let kind = self.take_next();
        let piece = Piece::spawn(kind);

        self.can_hold = true;
        self.lock.reset(&mut self.timers);

        if collides(&self.board, &piece) {
            self.end(EndReason::TopOut);
            return;
        }
        self.current = Some(piece);
        self.lock.refresh(is_grounded(&self.board, &piece), &mut self.timers);
    }

    fn end(&mut self, reason: EndReason) {
        self.timers.cancel_all();
        self.lock.reset(&mut self.timers);
        self.state = SessionState::Over(reason);
        self.events.push(GameEvent::GameOver {
            completed: reason.completed(),
        });
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(ModeKind::Endless, 1)
    }
}
