//! Deterministic session timers.
//!
//! Each [`TimerKind`] has at most one outstanding deadline. Arming a kind
//! replaces its previous deadline and bumps a generation counter, so a token
//! handed out earlier can never fire once the timer has been re-armed or
//! cancelled. Time only moves when the owner calls [`TimerWheel::pop_due`],
//! which makes ordering reproducible without a wall clock.

/// Timers a session can have in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Periodic one-row drop
    Gravity,
    /// One-shot lock delay while grounded
    LockDelay,
    /// Periodic elapsed-time clock
    Clock,
    /// Periodic garbage injection (rising mode)
    Garbage,
}

const KINDS: usize = 4;

const ORDER: [TimerKind; KINDS] = [
    TimerKind::Gravity,
    TimerKind::LockDelay,
    TimerKind::Clock,
    TimerKind::Garbage,
];

impl TimerKind {
    fn slot(self) -> usize {
        match self {
            TimerKind::Gravity => 0,
            TimerKind::LockDelay => 1,
            TimerKind::Clock => 2,
            TimerKind::Garbage => 3,
        }
    }
}

/// Identifies one arming of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    deadline: u64,
    period: Option<u32>,
    generation: u32,
}

/// A due timer handed back by [`TimerWheel::pop_due`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub token: TimerToken,
    /// Session time at which it fired
    pub at: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TimerWheel {
    now: u64,
    slots: [Option<Entry>; KINDS],
    generation: u32,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arm a one-shot timer `delay_ms` from now
    pub fn arm(&mut self, kind: TimerKind, delay_ms: u32) -> TimerToken {
        self.insert(kind, delay_ms, None)
    }

    /// Arm a periodic timer; it re-arms itself every time it fires
    pub fn arm_periodic(&mut self, kind: TimerKind, period_ms: u32) -> TimerToken {
        self.insert(kind, period_ms, Some(period_ms.max(1)))
    }

    fn insert(&mut self, kind: TimerKind, delay_ms: u32, period: Option<u32>) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.slots[kind.slot()] = Some(Entry {
            deadline: self.now + delay_ms as u64,
            period,
            generation: self.generation,
        });
        TimerToken {
            kind,
            generation: self.generation,
        }
    }

    /// Cancel whatever is armed for `kind`. Returns true if something was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].take().is_some()
    }

    pub fn cancel_all(&mut self) {
        self.slots = [None; KINDS];
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// Milliseconds until `kind` fires, if armed
    pub fn remaining(&self, kind: TimerKind) -> Option<u64> {
        self.slots[kind.slot()].map(|e| e.deadline.saturating_sub(self.now))
    }

    /// Pop the earliest timer due at or before `until`, advancing the clock to
    /// its deadline. Ties resolve in [`TimerKind`] order.
    ///
    /// When nothing is due the clock advances to `until` and `None` is
    /// returned. Callers loop until `None`, handling each timer completely
    /// before asking for the next.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired> {
        let next = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (e.deadline, i)))
            .filter(|&(deadline, _)| deadline <= until)
            .min();

        let Some((deadline, slot)) = next else {
            self.now = self.now.max(until);
            return None;
        };

        self.now = self.now.max(deadline);
        let entry = self.slots[slot]?;
        let kind = ORDER[slot];

        self.slots[slot] = entry.period.map(|period| Entry {
            deadline: entry.deadline + period as u64,
            ..entry
        });

        Some(Fired {
            token: TimerToken {
                kind,
                generation: entry.generation,
            },
            at: deadline,
        })
    }
}
