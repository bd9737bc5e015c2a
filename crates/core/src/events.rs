//! Notification sinks for session events.
//!
//! Sessions queue [`GameEvent`]s as they happen; front-ends drain the queue
//! into whatever [`AudioNotifier`] they use. Sinks cannot influence the game.

use crate::types::GameEvent;

pub trait AudioNotifier {
    fn notify(&mut self, event: GameEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioNotifier for Silent {
    fn notify(&mut self, _event: GameEvent) {}
}

/// Keeps every event, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }
}

impl AudioNotifier for EventLog {
    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

impl<F: FnMut(GameEvent)> AudioNotifier for F {
    fn notify(&mut self, event: GameEvent) {
        self(event)
    }
}
