//! Data-driven entity spawning.
//!
//! Monster types are plain data; adding one means adding a `MonsterDef`.

use crate::components::{Ai, AiBehavior, EntityKind, Fighter, Kind, Name, Player, Position};
use crate::constants::*;
use hecs::{Entity, World};

/// Everything needed to spawn one monster type
#[derive(Clone)]
pub struct MonsterDef {
    pub name: &'static str,
    pub kind: EntityKind,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl MonsterDef {
    pub fn spawn(&self, world: &mut World, x: i32, y: i32) -> Entity {
        world.spawn((
            Position::new(x, y),
            Kind(self.kind),
            Name(self.name.to_string()),
            Fighter::new(self.hp, self.defense, self.power),
            Ai(AiBehavior::MoveToPlayer),
        ))
    }
}

/// Predefined monster types
pub mod monsters {
    use super::*;

    pub const TROLL: MonsterDef = MonsterDef {
        name: "troll",
        kind: EntityKind::Troll,
        hp: TROLL_HP,
        defense: TROLL_DEFENSE,
        power: TROLL_POWER,
    };

    pub const ORC: MonsterDef = MonsterDef {
        name: "orc",
        kind: EntityKind::Orc,
        hp: ORC_HP,
        defense: ORC_DEFENSE,
        power: ORC_POWER,
    };
}

pub fn spawn_player(world: &mut World, x: i32, y: i32) -> Entity {
    world.spawn((
        Position::new(x, y),
        Kind(EntityKind::Player),
        Name("player".to_string()),
        Fighter::new(PLAYER_HP, PLAYER_DEFENSE, PLAYER_POWER),
        Player,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries;

    #[test]
    fn test_monster_defs() {
        let mut world = World::new();
        let troll = monsters::TROLL.spawn(&mut world, 3, 4);
        let orc = monsters::ORC.spawn(&mut world, 5, 4);

        assert_eq!(*world.get::<&Fighter>(troll).unwrap(), Fighter::new(16, 1, 4));
        assert_eq!(*world.get::<&Fighter>(orc).unwrap(), Fighter::new(10, 0, 3));
        assert_eq!(queries::entity_name(&world, orc), "orc");
        assert_eq!(queries::chasing_monsters(&world), vec![troll, orc]);
    }

    #[test]
    fn test_player_stats() {
        let mut world = World::new();
        let player = spawn_player(&mut world, 1, 5);
        assert_eq!(*world.get::<&Fighter>(player).unwrap(), Fighter::new(30, 2, 5));
        assert!(world.get::<&Player>(player).is_ok());
        assert!(world.get::<&Ai>(player).is_err());
        assert_eq!(queries::get_entity_position(&world, player), Some((1, 5)));
    }
}
