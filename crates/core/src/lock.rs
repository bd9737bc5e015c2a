//! Lock delay state machine.
//!
//! A piece is either airborne or grounded. Landing arms a one-shot lock timer;
//! every successful move or rotation that keeps the piece grounded re-arms it
//! and spends one reset, until the budget runs out and the next such action
//! locks on the spot. Leaving the ground cancels the timer.

use crate::timer::{Fired, TimerKind, TimerToken, TimerWheel};
use crate::types::{LOCK_DELAY_MS, MAX_LOCK_RESETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    Airborne,
    Grounded,
}

/// What the session must do after consulting the controller
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDecision {
    Continue,
    Lock,
}

#[derive(Debug, Clone)]
pub struct LockController {
    phase: LockPhase,
    resets: u8,
    max_resets: u8,
    delay_ms: u32,
    pending: Option<TimerToken>,
}

impl LockController {
    pub fn new() -> Self {
        Self::with_limits(LOCK_DELAY_MS, MAX_LOCK_RESETS)
    }

    pub fn with_limits(delay_ms: u32, max_resets: u8) -> Self {
        Self {
            phase: LockPhase::Airborne,
            resets: 0,
            max_resets,
            delay_ms,
            pending: None,
        }
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    pub fn is_grounded(&self) -> bool {
        self.phase == LockPhase::Grounded
    }

    pub fn resets(&self) -> u8 {
        self.resets
    }

    /// Forget the current piece: back to airborne with a fresh budget.
    ///
    /// Called on spawn, hold and lock so no timer outlives its piece.
    pub fn reset(&mut self, timers: &mut TimerWheel) {
        self.disarm(timers);
        self.phase = LockPhase::Airborne;
        self.resets = 0;
    }

    /// Update after an accepted move or rotation.
    ///
    /// `grounded` is the result of probing one row down from the new position.
    pub fn after_action(&mut self, grounded: bool, timers: &mut TimerWheel) -> LockDecision {
        match (self.phase, grounded) {
            (LockPhase::Airborne, true) => {
                self.land(timers);
                LockDecision::Continue
            }
            (LockPhase::Grounded, true) => {
                if self.resets >= self.max_resets {
                    self.disarm(timers);
                    return LockDecision::Lock;
                }
                self.resets += 1;
                self.arm(timers);
                LockDecision::Continue
            }
            (_, false) => {
                self.lift(timers);
                LockDecision::Continue
            }
        }
    }

    /// Re-evaluate without counting as a player interaction (spawn, the
    /// board shifting under the piece).
    pub fn refresh(&mut self, grounded: bool, timers: &mut TimerWheel) {
        match (self.phase, grounded) {
            (LockPhase::Airborne, true) => self.land(timers),
            (LockPhase::Grounded, false) => self.lift(timers),
            _ => {}
        }
    }

    /// Handle a fired lock timer. Stale tokens are ignored.
    pub fn on_timer(&mut self, fired: Fired) -> LockDecision {
        if self.phase == LockPhase::Grounded && self.pending == Some(fired.token) {
            self.pending = None;
            LockDecision::Lock
        } else {
            LockDecision::Continue
        }
    }

    fn land(&mut self, timers: &mut TimerWheel) {
        self.phase = LockPhase::Grounded;
        self.resets = 0;
        self.arm(timers);
    }

    fn lift(&mut self, timers: &mut TimerWheel) {
        self.disarm(timers);
        self.phase = LockPhase::Airborne;
        self.resets = 0;
    }

    fn arm(&mut self, timers: &mut TimerWheel) {
        self.pending = Some(timers.arm(TimerKind::LockDelay, self.delay_ms));
    }

    fn disarm(&mut self, timers: &mut TimerWheel) {
        if self.pending.take().is_some() {
            timers.cancel(TimerKind::LockDelay);
        }
    }
}

impl Default for LockController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_lock(timers: &mut TimerWheel, until: u64) -> Option<Fired> {
        std::iter::from_fn(|| timers.pop_due(until)).find(|f| f.token.kind == TimerKind::LockDelay)
    }

    #[test]
    fn landing_arms_timer_and_expiry_locks() {
        let mut timers = TimerWheel::new();
        let mut lock = LockController::new();

        assert_eq!(lock.after_action(true, &mut timers), LockDecision::Continue);
        assert!(lock.is_grounded());
        assert_eq!(timers.remaining(TimerKind::LockDelay), Some(LOCK_DELAY_MS as u64));

        assert!(fire_lock(&mut timers, LOCK_DELAY_MS as u64 - 1).is_none());
        let fired = fire_lock(&mut timers, LOCK_DELAY_MS as u64).expect("lock timer");
        assert_eq!(lock.on_timer(fired), LockDecision::Lock);
    }

    #[test]
    fn grounded_actions_rearm_until_budget_spent() {
        let mut timers = TimerWheel::new();
        let mut lock = LockController::with_limits(100, 3);

        assert_eq!(lock.after_action(true, &mut timers), LockDecision::Continue);
        for expected in 1..=3 {
            assert_eq!(lock.after_action(true, &mut timers), LockDecision::Continue);
            assert_eq!(lock.resets(), expected);
        }
        assert_eq!(lock.after_action(true, &mut timers), LockDecision::Lock);
        assert!(!timers.is_armed(TimerKind::LockDelay));
    }

    #[test]
    fn leaving_ground_cancels_timer() {
        let mut timers = TimerWheel::new();
        let mut lock = LockController::new();

        let _ = lock.after_action(true, &mut timers);
        let _ = lock.after_action(true, &mut timers);
        assert_eq!(lock.resets(), 1);

        let _ = lock.after_action(false, &mut timers);
        assert_eq!(lock.phase(), LockPhase::Airborne);
        assert_eq!(lock.resets(), 0);
        assert!(!timers.is_armed(TimerKind::LockDelay));
        assert!(fire_lock(&mut timers, 10_000).is_none());
    }

    #[test]
    fn stale_token_does_not_lock() {
        let mut timers = TimerWheel::new();
        let mut lock = LockController::new();
        let _ = lock.after_action(true, &mut timers);
        let fired = fire_lock(&mut timers, LOCK_DELAY_MS as u64).unwrap();

        // A new piece spawned in the meantime
        lock.reset(&mut timers);
        let _ = lock.after_action(true, &mut timers);
        assert_eq!(lock.on_timer(fired), LockDecision::Continue);
    }

    #[test]
    fn refresh_does_not_spend_resets() {
        let mut timers = TimerWheel::new();
        let mut lock = LockController::new();
        lock.refresh(true, &mut timers);
        assert!(lock.is_grounded());
        lock.refresh(true, &mut timers);
        assert_eq!(lock.resets(), 0);
        lock.refresh(false, &mut timers);
        assert!(!lock.is_grounded());
    }
}
