//! Configurable key bindings, persisted as JSON.
//!
//! The file is a flat object from action name to key identifier:
//!
//! ```json
//! { "moveLeft": "Left", "rotate": "Up", "hold": "c" }
//! ```
//!
//! Actions missing from the file keep their default key.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::keys::{key_name, normalize, parse_key};
use crate::types::GameAction;

/// On-disk form. Every field is optional so partial files are accepted.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct BindingFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    move_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    soft_drop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hard_drop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hold: Option<String>,
}

/// One key per bindable action, in [`GameAction::BINDABLE`] order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: [KeyCode; 6],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            keys: [
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Down,
                KeyCode::Char(' '),
                KeyCode::Up,
                KeyCode::Char('c'),
            ],
        }
    }
}

/// Fixed quit, pause and restart keys (see [`crate::map`]); never rebindable
const RESERVED: [KeyCode; 4] = [
    KeyCode::Char('q'),
    KeyCode::Char('p'),
    KeyCode::Char('r'),
    KeyCode::Esc,
];

fn slot(action: GameAction) -> Option<usize> {
    GameAction::BINDABLE.iter().position(|a| *a == action)
}

impl KeyBindings {
    /// Key bound to `action`, or `None` for actions that are not rebindable
    pub fn key_for(&self, action: GameAction) -> Option<KeyCode> {
        slot(action).map(|i| self.keys[i])
    }

    /// Bound action for a pressed key
    pub fn action_for(&self, code: KeyCode) -> Option<GameAction> {
        let code = normalize(code);
        self.keys
            .iter()
            .position(|k| *k == code)
            .map(|i| GameAction::BINDABLE[i])
    }

    /// Rebind `action` to `code`.
    ///
    /// Fails if the action is not rebindable, the key is reserved for quit,
    /// pause or restart, or it already belongs to a different action.
    pub fn bind(&mut self, action: GameAction, code: KeyCode) -> Result<()> {
        let Some(i) = slot(action) else {
            bail!("{} cannot be rebound", action.as_str());
        };
        let code = normalize(code);
        if RESERVED.contains(&code) {
            bail!(
                "key {} is reserved and cannot be bound to {}",
                key_name(code).unwrap_or_else(|| format!("{code:?}")),
                action.as_str()
            );
        }
        if let Some(other) = self.action_for(code).filter(|a| *a != action) {
            bail!(
                "key {} is already bound to {}",
                key_name(code).unwrap_or_else(|| format!("{code:?}")),
                other.as_str()
            );
        }
        self.keys[i] = code;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: BindingFile =
            serde_json::from_str(json).context("failed to parse key bindings")?;

        let mut bindings = Self::default();
        let entries = [
            (GameAction::MoveLeft, file.move_left),
            (GameAction::MoveRight, file.move_right),
            (GameAction::SoftDrop, file.soft_drop),
            (GameAction::HardDrop, file.hard_drop),
            (GameAction::Rotate, file.rotate),
            (GameAction::Hold, file.hold),
        ];

        // Apply explicit entries over a blank slate first so a file may swap
        // two default keys without tripping the duplicate check.
        let explicit: Vec<(GameAction, KeyCode)> = entries
            .into_iter()
            .filter_map(|(action, id)| id.map(|id| (action, id)))
            .map(|(action, id)| {
                parse_key(&id)
                    .map(|code| (action, code))
                    .with_context(|| format!("bad key for {}", action.as_str()))
            })
            .collect::<Result<_>>()?;

        for (action, _) in &explicit {
            if let Some(i) = slot(*action) {
                bindings.keys[i] = KeyCode::Null;
            }
        }
        for (action, code) in explicit {
            bindings.bind(action, code)?;
        }
        if bindings.keys.contains(&KeyCode::Null) {
            bail!("key bindings leave an action without a key");
        }
        Ok(bindings)
    }

    pub fn to_json(&self) -> Result<String> {
        let name = |action: GameAction| {
            self.key_for(action)
                .and_then(key_name)
                .with_context(|| format!("{} has no storable key", action.as_str()))
        };
        let file = BindingFile {
            move_left: Some(name(GameAction::MoveLeft)?),
            move_right: Some(name(GameAction::MoveRight)?),
            soft_drop: Some(name(GameAction::SoftDrop)?),
            hard_drop: Some(name(GameAction::HardDrop)?),
            rotate: Some(name(GameAction::Rotate)?),
            hold: Some(name(GameAction::Hold)?),
        };
        serde_json::to_string_pretty(&file).context("failed to serialize key bindings")
    }

    /// Load bindings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}
