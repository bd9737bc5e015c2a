//! Terminal feedback for session events: a bell and a short banner.

use std::time::{Duration, Instant};

use crate::core::AudioNotifier;
use crate::types::GameEvent;

const BANNER_TIME: Duration = Duration::from_millis(1500);

/// [`AudioNotifier`] for the terminal front-end.
///
/// It only records what should happen; the main loop rings the bell and
/// draws the banner.
#[derive(Debug)]
pub struct TerminalFeedback {
    bell_enabled: bool,
    ring: bool,
    banner: Option<(String, Instant)>,
}

impl TerminalFeedback {
    pub fn new(bell_enabled: bool) -> Self {
        Self {
            bell_enabled,
            ring: false,
            banner: None,
        }
    }

    /// Whether a bell was requested since the last call
    pub fn take_ring(&mut self) -> bool {
        std::mem::take(&mut self.ring)
    }

    /// Banner text, while it is still fresh
    pub fn banner(&self, now: Instant) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|(_, shown)| now.duration_since(*shown) < BANNER_TIME)
            .map(|(text, _)| text.as_str())
    }

    pub fn clear(&mut self) {
        self.ring = false;
        self.banner = None;
    }

    fn show(&mut self, text: String, ring: bool) {
        self.banner = Some((text, Instant::now()));
        self.ring |= ring && self.bell_enabled;
    }
}

impl AudioNotifier for TerminalFeedback {
    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::LineClear(n) => {
                let text = match n {
                    1 => "Single",
                    2 => "Double",
                    3 => "Triple",
                    _ => "Quad!",
                };
                self.show(text.to_string(), n >= 4);
            }
            GameEvent::LevelUp(level) => self.show(format!("Level {level}"), true),
            GameEvent::GameOver { completed: true } => self.show("Complete!".to_string(), true),
            GameEvent::GameOver { completed: false } => self.show("Topped out".to_string(), true),
            GameEvent::Move
            | GameEvent::Rotate
            | GameEvent::Lock
            | GameEvent::HardDrop
            | GameEvent::Hold => {}
        }
    }
}
