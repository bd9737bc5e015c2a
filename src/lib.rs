//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and holds the pieces the
//! terminal binary shares with tests: startup [`config`] and the
//! [`feedback`] notifier.

pub mod config;
pub mod feedback;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
