//! Terminal renderer.
//!
//! Draws session snapshots into an off-screen [`Canvas`] and flushes it to
//! the terminal with `crossterm`. Nothing here feeds back into the game.

pub mod canvas;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
