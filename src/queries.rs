//! Common entity query helpers.
//!
//! Read-only lookups over the world. Game logic iterates entities in
//! insertion order, which for a world that never despawns is ascending
//! `Entity::id()`.

use hecs::{Entity, World};

use crate::components::{Ai, AiBehavior, Dead, Fighter, Kind, Name, Position};

/// First blocking entity (in insertion order) standing at `(x, y)`.
pub fn blocking_entity_at(world: &World, x: i32, y: i32) -> Option<Entity> {
    world
        .query::<(&Position, &Kind)>()
        .iter()
        .filter(|(_, (pos, kind))| kind.0.blocks() && pos.x == x && pos.y == y)
        .map(|(id, _)| id)
        .min_by_key(|id| id.id())
}

/// Living entities with `MoveToPlayer` AI, in insertion order.
pub fn chasing_monsters(world: &World) -> Vec<Entity> {
    let mut monsters: Vec<Entity> = world
        .query::<&Ai>()
        .without::<&Dead>()
        .iter()
        .filter(|(_, ai)| ai.0 == AiBehavior::MoveToPlayer)
        .map(|(id, _)| id)
        .collect();
    monsters.sort_by_key(|id| id.id());
    monsters
}

/// Get an entity's position as a tuple.
pub fn get_entity_position(world: &World, entity: Entity) -> Option<(i32, i32)> {
    world.get::<&Position>(entity).ok().map(|p| (p.x, p.y))
}

/// Entities without `Fighter` count as dead.
pub fn is_entity_dead(world: &World, entity: Entity) -> bool {
    world.get::<&Dead>(entity).is_ok()
        || world
            .get::<&Fighter>(entity)
            .map(|f| f.is_dead())
            .unwrap_or(true)
}

pub fn entity_name(world: &World, entity: Entity) -> String {
    world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| "something".to_string())
}

pub fn entity_tag(world: &World, entity: Entity) -> &'static str {
    world
        .get::<&Kind>(entity)
        .map(|k| k.0.tag())
        .unwrap_or("something")
}

/// Any two blocking entities sharing a coordinate, reported as a pair.
pub fn find_blocking_overlap(world: &World) -> Option<(Entity, Entity)> {
    let mut seen: Vec<(i32, i32, Entity)> = Vec::new();
    let mut blockers: Vec<(Entity, (i32, i32))> = world
        .query::<(&Position, &Kind)>()
        .iter()
        .filter(|(_, (_, kind))| kind.0.blocks())
        .map(|(id, (pos, _))| (id, (pos.x, pos.y)))
        .collect();
    blockers.sort_by_key(|(id, _)| id.id());

    for (id, (x, y)) in blockers {
        if let Some(&(_, _, other)) = seen.iter().find(|(sx, sy, _)| *sx == x && *sy == y) {
            return Some((other, id));
        }
        seen.push((x, y, id));
    }
    None
}
