//! World initialization - creates the map and spawns the initial entities.

use crate::config::GameConfig;
use crate::constants::*;
use crate::dungeon_gen::Room;
use crate::error::GameError;
use crate::grid::Grid;
use crate::queries;
use crate::rng::RandomSource;
use crate::spawning::{self, monsters};

use hecs::{Entity, World};

/// Build the map, then the player, then each room's monsters.
pub fn init_world(config: &GameConfig, rng: &mut dyn RandomSource) -> Result<(World, Grid, Entity), GameError> {
    puffin::profile_function!();

    config.validate()?;

    let (start_x, start_y) = config.player_start;
    let grid = Grid::generate(config.width, config.height, config.player_start, rng);
    if !grid.is_walkable(start_x, start_y) {
        return Err(GameError::invariant(format!(
            "player start ({start_x}, {start_y}) is not floor"
        )));
    }

    let mut world = World::new();
    let player_entity = spawning::spawn_player(&mut world, start_x, start_y);

    let mut monster_count = 0;
    for room in &grid.rooms {
        monster_count += spawn_room_monsters(&mut world, room, config.max_monsters_per_room, rng);
    }

    log::info!(
        "generated {}x{} dungeon: {} rooms, {} corridors, {} monsters",
        config.width,
        config.height,
        grid.rooms.len(),
        grid.corridors.len(),
        monster_count
    );

    Ok((world, grid, player_entity))
}

/// Roll up to `max_monsters` placements inside `room`, skipping occupied
/// cells. Returns how many monsters were spawned.
pub fn spawn_room_monsters(world: &mut World, room: &Room, max_monsters: i32, rng: &mut dyn RandomSource) -> usize {
    let attempts = rng.uniform_int(0, max_monsters);
    let mut spawned = 0;

    for _ in 0..attempts {
        let x = rng.uniform_int(room.left, room.right);
        let y = rng.uniform_int(room.top, room.bottom);

        if queries::blocking_entity_at(world, x, y).is_some() {
            continue;
        }

        let def = if rng.uniform_int(0, TROLL_ROLL_MAX) == 0 {
            &monsters::TROLL
        } else {
            &monsters::ORC
        };
        def.spawn(world, x, y);
        spawned += 1;
    }

    spawned
}
