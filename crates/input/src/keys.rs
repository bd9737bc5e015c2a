//! Textual key identifiers used in binding files.
//!
//! Named keys use their crossterm name (`Left`, `Space`, `F5`, ...); printable
//! keys are a single character and compare case-insensitively.

use anyhow::{bail, Result};
use crossterm::event::KeyCode;

const NAMED: [(&str, KeyCode); 12] = [
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Space", KeyCode::Char(' ')),
    ("Enter", KeyCode::Enter),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
];

/// Parse a key identifier such as `Left`, `space`, `x` or `F2`.
pub fn parse_key(id: &str) -> Result<KeyCode> {
    let id = id.trim();

    if let Some((_, code)) = NAMED.iter().find(|(name, _)| name.eq_ignore_ascii_case(id)) {
        return Ok(*code);
    }

    let mut chars = id.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    if let Some(n) = id.strip_prefix(['F', 'f']).and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    bail!("unknown key identifier {id:?}")
}

/// Inverse of [`parse_key`] for the keys it accepts
pub fn key_name(code: KeyCode) -> Option<String> {
    if let Some((name, _)) = NAMED.iter().find(|(_, c)| *c == code) {
        return Some((*name).to_string());
    }
    match code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase().to_string()),
        KeyCode::F(n) => Some(format!("F{n}")),
        _ => None,
    }
}

/// Fold a pressed key onto the form stored in bindings
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
