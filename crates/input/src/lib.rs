//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] through a
//! rebindable [`KeyBindings`] table, which is the only state the game persists.

pub mod bindings;
pub mod keys;
pub mod map;

pub use blockfall_types as types;

pub use bindings::KeyBindings;
pub use keys::{key_name, parse_key};
pub use map::{handle_key_event, should_quit};
