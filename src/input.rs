//! Input handling: key identifiers to player intents.

use std::collections::{BTreeMap, HashMap};

use winit::keyboard::Key;

use crate::error::GameError;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// One orthogonal step; screen y grows downward
    Move { dx: i32, dy: i32 },
    ToggleDebug,
}

impl Intent {
    /// Resolve an action tag from the key bindings.
    pub fn from_action_tag(tag: &str) -> Result<Self, GameError> {
        match tag {
            "move-up" => Ok(Intent::Move { dx: 0, dy: -1 }),
            "move-down" => Ok(Intent::Move { dx: 0, dy: 1 }),
            "move-left" => Ok(Intent::Move { dx: -1, dy: 0 }),
            "move-right" => Ok(Intent::Move { dx: 1, dy: 0 }),
            "toggle-debug" => Ok(Intent::ToggleDebug),
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// Key identifier -> intent lookup
#[derive(Debug, Clone)]
pub struct InputMapper {
    bindings: HashMap<String, Intent>,
}

impl InputMapper {
    /// Build from key -> action tag pairs. Any unknown tag is fatal.
    pub fn from_bindings(bindings: &BTreeMap<String, String>) -> Result<Self, GameError> {
        let bindings = bindings
            .iter()
            .map(|(key, tag)| Ok((key.clone(), Intent::from_action_tag(tag)?)))
            .collect::<Result<HashMap<_, _>, GameError>>()?;
        Ok(Self { bindings })
    }

    /// Unrecognized keys map to nothing.
    pub fn map_key(&self, key_id: &str) -> Option<Intent> {
        self.bindings.get(key_id).copied()
    }
}

/// Identifier for a winit logical key: named keys use their variant name
/// ("ArrowUp", "Escape"), character keys the character itself ("o").
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(text) => Some(text.to_string()),
        _ => None,
    }
}
