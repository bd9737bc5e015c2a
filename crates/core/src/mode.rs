//! Game modes - setup, completion checks and end conditions
//!
//! | Mode | Target | Ends when |
//! |------|--------|-----------|
//! | `endless` | - | top-out only |
//! | `lines40` | 40 lines | lines >= 40 after a lock (win) |
//! | `lines20` | 20 lines | lines >= 20 after a lock (win) |
//! | `timeattack` | 60 s | clock reaches the limit |
//! | `rising` | - | top-out, including garbage pushing into the piece |

use crate::scoring::SessionStats;
use crate::types::{ModeKind, GARBAGE_INTERVAL_MS};

/// Numeric goal attached to a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTarget {
    Lines(u32),
    Seconds(u32),
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A lock landed above the board or a new piece spawned into the stack
    TopOut,
    /// Line target reached
    TargetReached,
    /// Time limit reached
    TimeUp,
}

impl EndReason {
    /// Whether the session counts as completed rather than lost
    pub fn completed(&self) -> bool {
        !matches!(self, EndReason::TopOut)
    }
}

/// Immutable mode description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    pub kind: ModeKind,
    pub label: &'static str,
    pub target: Option<ModeTarget>,
}

impl ModeConfig {
    pub fn new(kind: ModeKind) -> Self {
        let (label, target) = match kind {
            ModeKind::Endless => ("Endless", None),
            ModeKind::Lines40 => ("40 Lines", Some(ModeTarget::Lines(40))),
            ModeKind::Lines20 => ("20 Lines", Some(ModeTarget::Lines(20))),
            ModeKind::Rising => ("Rising", None),
            ModeKind::TimeAttack => ("Time Attack", Some(ModeTarget::Seconds(60))),
        };
        Self {
            kind,
            label,
            target,
        }
    }

    /// Parse a mode identifier such as `lines40`
    pub fn from_id(id: &str) -> Option<Self> {
        ModeKind::from_str(id).map(Self::new)
    }
}

/// Applies a mode's rules to the running session
#[derive(Debug, Clone, Copy)]
pub struct ModeController {
    config: ModeConfig,
}

impl ModeController {
    pub fn new(config: ModeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    /// Garbage period for modes that inject rows
    pub fn garbage_interval_ms(&self) -> Option<u32> {
        match self.config.kind {
            ModeKind::Rising => Some(GARBAGE_INTERVAL_MS),
            _ => None,
        }
    }

    /// Line target check, run after every lock
    pub fn check_after_lock(&self, stats: &SessionStats) -> Option<EndReason> {
        match self.config.target {
            Some(ModeTarget::Lines(target)) if stats.lines >= target => {
                Some(EndReason::TargetReached)
            }
            _ => None,
        }
    }

    /// Time limit check, run on every clock tick
    pub fn check_clock(&self, stats: &SessionStats) -> Option<EndReason> {
        match self.config.target {
            Some(ModeTarget::Seconds(limit)) if stats.elapsed_ms >= limit as u64 * 1000 => {
                Some(EndReason::TimeUp)
            }
            _ => None,
        }
    }

    /// Lines still needed, or milliseconds still left, for display
    pub fn remaining(&self, stats: &SessionStats) -> Option<u64> {
        match self.config.target? {
            ModeTarget::Lines(target) => Some(target.saturating_sub(stats.lines) as u64),
            ModeTarget::Seconds(limit) => Some((limit as u64 * 1000).saturating_sub(stats.elapsed_ms)),
        }
    }
}
