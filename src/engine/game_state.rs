//! Core game state - owns the simulation data.

use crate::components::{Fighter, Position};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::fov::{self, LightMap};
use crate::grid::Grid;
use crate::queries;
use crate::rng::RandomSource;

use hecs::{Entity, World};

use super::initialization;

/// Core game state - owns all simulation data.
pub struct GameState {
    /// The ECS world
    pub world: World,

    /// The tile map
    pub grid: Grid,

    /// Player entity handle
    pub player_entity: Entity,

    /// Render every tile as lit, explored or not
    pub debug_reveal: bool,

    /// Visibility from the player's current position
    pub light_map: LightMap,
}

impl GameState {
    /// Generate a dungeon and populate it.
    pub fn new(config: &GameConfig, rng: &mut dyn RandomSource) -> Result<Self, GameError> {
        let (world, grid, player_entity) = initialization::init_world(config, rng)?;
        Ok(Self::from_parts(world, grid, player_entity))
    }

    /// Wrap an existing world and map. The light map starts empty.
    pub fn from_parts(world: World, grid: Grid, player_entity: Entity) -> Self {
        Self {
            world,
            grid,
            player_entity,
            debug_reveal: false,
            light_map: LightMap::default(),
        }
    }

    pub fn player_position(&self) -> Result<(i32, i32), GameError> {
        queries::get_entity_position(&self.world, self.player_entity)
            .ok_or_else(|| GameError::invariant("player has no position"))
    }

    pub fn player_fighter(&self) -> Option<Fighter> {
        self.world.get::<&Fighter>(self.player_entity).ok().map(|f| *f)
    }

    pub fn is_player_dead(&self) -> bool {
        queries::is_entity_dead(&self.world, self.player_entity)
    }

    pub fn move_player(&mut self, x: i32, y: i32) -> Result<(), GameError> {
        let mut pos = self
            .world
            .get::<&mut Position>(self.player_entity)
            .map_err(|_| GameError::invariant("player has no position"))?;
        *pos = Position::new(x, y);
        Ok(())
    }

    /// Recompute visibility around the player, exploring what it reaches.
    pub fn refresh_light_map(&mut self, radius: i32) -> Result<(), GameError> {
        let center = self.player_position()?;
        self.light_map = fov::compute_light_map(center, &mut self.grid, radius);
        Ok(())
    }
}
