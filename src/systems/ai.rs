//! Monster behavior.
//!
//! Monsters only act while standing on a tile lit by the player's field of
//! view, so pursuit starts and stops with mutual line of sight.

use hecs::{Entity, World};

use crate::components::Position;
use crate::error::GameError;
use crate::events::EventQueue;
use crate::fov::LightMap;
use crate::grid::Grid;
use crate::queries;
use crate::rng::RandomSource;
use crate::systems::combat::{self, AttackResult};

/// What one monster did during the pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterAction {
    /// Not visible to the player
    Idle,
    Moved { x: i32, y: i32 },
    Attacked(AttackResult),
    /// Step target was a wall or another monster
    Blocked,
}

/// Pick a single orthogonal step toward the target.
///
/// Draws `r` in `1..=|dx|+|dy|` and steps along x when `r <= |dx|`, so the
/// axis with more remaining distance is proportionally more likely.
pub fn step_toward(dx: i32, dy: i32, rng: &mut dyn RandomSource) -> (i32, i32) {
    let roll = rng.uniform_int(1, dx.abs() + dy.abs());
    if roll <= dx.abs() {
        (dx.signum(), 0)
    } else {
        (0, dy.signum())
    }
}

/// Run every chasing monster once, in insertion order.
///
/// Stops early once the player is dead. Returns each acting monster's outcome.
pub fn run_monster_pass(
    world: &mut World,
    grid: &Grid,
    light_map: &LightMap,
    player_entity: Entity,
    rng: &mut dyn RandomSource,
    events: &mut EventQueue,
) -> Result<Vec<(Entity, MonsterAction)>, GameError> {
    puffin::profile_function!();

    let mut actions = Vec::new();

    for monster in queries::chasing_monsters(world) {
        if queries::is_entity_dead(world, player_entity) {
            break;
        }
        // Killed earlier in this pass
        if queries::is_entity_dead(world, monster) {
            continue;
        }

        let action = take_turn(world, grid, light_map, monster, player_entity, rng, events)?;
        actions.push((monster, action));
    }

    Ok(actions)
}

fn take_turn(
    world: &mut World,
    grid: &Grid,
    light_map: &LightMap,
    monster: Entity,
    player_entity: Entity,
    rng: &mut dyn RandomSource,
    events: &mut EventQueue,
) -> Result<MonsterAction, GameError> {
    let (mx, my) = queries::get_entity_position(world, monster)
        .ok_or_else(|| GameError::invariant(format!("monster {monster:?} has no position")))?;

    if !light_map.is_lit(mx, my) {
        return Ok(MonsterAction::Idle);
    }

    let (px, py) = queries::get_entity_position(world, player_entity)
        .ok_or_else(|| GameError::invariant("player has no position"))?;

    if (mx, my) == (px, py) {
        return Err(GameError::invariant(format!(
            "monster {monster:?} and player both at ({mx}, {my})"
        )));
    }

    let (step_x, step_y) = step_toward(px - mx, py - my, rng);
    let (nx, ny) = (mx + step_x, my + step_y);

    if !grid.is_walkable(nx, ny) {
        return Ok(MonsterAction::Blocked);
    }

    match queries::blocking_entity_at(world, nx, ny) {
        Some(target) if target == player_entity => {
            let result = combat::attack(world, monster, player_entity, events)?;
            Ok(MonsterAction::Attacked(result))
        }
        Some(_) => Ok(MonsterAction::Blocked),
        None => {
            if let Ok(mut pos) = world.get::<&mut Position>(monster) {
                *pos = Position::new(nx, ny);
            }
            Ok(MonsterAction::Moved { x: nx, y: ny })
        }
    }
}
