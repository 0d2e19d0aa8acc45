//! Startup configuration.
//!
//! Defaults come from `constants`; an optional JSON file named by
//! `GLYPH_DUNGEON_CONFIG` overrides any subset of fields.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::GameError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub fov_radius: i32,
    pub max_monsters_per_room: i32,
    pub player_start: (i32, i32),
    /// Fixed seed for reproducible dungeons; entropy when absent
    pub seed: Option<u64>,
    /// Start with the whole explored map revealed
    pub debug_reveal: bool,
    /// Treat a move onto a coordinate with no tile as a fatal error
    pub strict_tile_lookup: bool,
    /// Serve puffin profiling data
    pub profiling: bool,
    /// Key identifier -> action tag
    pub key_bindings: BTreeMap<String, String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DUNGEON_DEFAULT_WIDTH,
            height: DUNGEON_DEFAULT_HEIGHT,
            fov_radius: FOV_RADIUS,
            max_monsters_per_room: MAX_MONSTERS_PER_ROOM,
            player_start: PLAYER_START,
            seed: None,
            debug_reveal: false,
            strict_tile_lookup: false,
            profiling: false,
            key_bindings: default_key_bindings(),
        }
    }
}

pub fn default_key_bindings() -> BTreeMap<String, String> {
    [
        ("ArrowUp", "move-up"),
        ("ArrowDown", "move-down"),
        ("ArrowLeft", "move-left"),
        ("ArrowRight", "move-right"),
        ("o", "toggle-debug"),
    ]
    .into_iter()
    .map(|(key, action)| (key.to_string(), action.to_string()))
    .collect()
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by the config env var, or use defaults.
    pub fn from_env() -> Result<Self, GameError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = Path::new(&path);
                log::info!("loading config from {}", path.display());
                Self::load(path)
            }
            None => {
                log::debug!("{CONFIG_ENV_VAR} not set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < 3 || self.height < 3 {
            return Err(GameError::Config(format!(
                "map must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        let (sx, sy) = self.player_start;
        if sx < 0 || sy < 0 || sx >= self.width as i32 || sy >= self.height as i32 {
            return Err(GameError::Config(format!(
                "player start ({sx}, {sy}) is outside the {}x{} map",
                self.width, self.height
            )));
        }
        if !(1..=MAX_FOV_RADIUS).contains(&self.fov_radius) {
            return Err(GameError::Config(format!(
                "fov radius must be in 1..={MAX_FOV_RADIUS}, got {}",
                self.fov_radius
            )));
        }
        if self.max_monsters_per_room < 0 {
            return Err(GameError::Config(format!(
                "max monsters per room must not be negative, got {}",
                self.max_monsters_per_room
            )));
        }
        Ok(())
    }
}
