//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::bindings::KeyBindings;
use crate::types::GameAction;

/// Map a key press to a game action.
///
/// Gameplay actions come from `bindings`. Pause (`p`, `Esc`) and restart
/// (`r`) are fixed so a bad binding file can never lock the player out.
pub fn handle_key_event(bindings: &KeyBindings, key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    if let Some(action) = bindings.action_for(key.code) {
        return Some(action);
    }

    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
