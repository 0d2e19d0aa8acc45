//! Combat system functions.

use crate::components::{Ai, Dead, EntityKind, Fighter, Kind, Name};
use crate::error::GameError;
use crate::events::{EventQueue, GameEvent};
use crate::queries;
use hecs::{Entity, World};

/// Outcome of a single melee attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    Hit { damage: i32, killed: bool },
    NoDamage,
}

/// Damage dealt by `power` against `defense`; zero or less means no damage.
pub fn compute_damage(power: i32, defense: i32) -> i32 {
    power - defense
}

/// Resolve a melee attack. Deterministic: damage is power minus defense.
pub fn attack(
    world: &mut World,
    attacker: Entity,
    defender: Entity,
    events: &mut EventQueue,
) -> Result<AttackResult, GameError> {
    if queries::is_entity_dead(world, attacker) {
        return Err(GameError::invariant(format!("dead entity {attacker:?} tried to attack")));
    }
    if queries::is_entity_dead(world, defender) {
        return Err(GameError::invariant(format!("attack against dead entity {defender:?}")));
    }

    let power = fighter(world, attacker)?.power;
    let defense = fighter(world, defender)?.defense;
    let damage = compute_damage(power, defense);

    if damage <= 0 {
        events.push(GameEvent::AttackNoDamage {
            attacker_name: queries::entity_name(world, attacker),
            target_name: queries::entity_name(world, defender),
        });
        return Ok(AttackResult::NoDamage);
    }

    events.push(GameEvent::AttackHit {
        attacker_tag: queries::entity_tag(world, attacker),
        target_tag: queries::entity_tag(world, defender),
        damage,
    });

    let killed = take_damage(world, defender, damage, events)?;
    Ok(AttackResult::Hit { damage, killed })
}

/// Apply damage; returns true if this killed the target.
fn take_damage(world: &mut World, target: Entity, amount: i32, events: &mut EventQueue) -> Result<bool, GameError> {
    let hp = {
        let mut fighter = world
            .get::<&mut Fighter>(target)
            .map_err(|_| GameError::invariant(format!("{target:?} has no combat stats")))?;
        fighter.hp -= amount;
        fighter.hp
    };

    if hp <= 0 {
        kill(world, target, events)?;
        return Ok(true);
    }
    Ok(false)
}

/// Turn an entity into a corpse: stops blocking, loses its AI, keeps its record.
fn kill(world: &mut World, target: Entity, events: &mut EventQueue) -> Result<(), GameError> {
    let tag = queries::entity_tag(world, target);
    let corpse_name = format!("{}'s corpse", queries::entity_name(world, target));

    world
        .insert(target, (Kind(EntityKind::Corpse), Name(corpse_name), Dead))
        .map_err(|_| GameError::invariant(format!("{target:?} vanished while dying")))?;
    let _ = world.remove_one::<Ai>(target);

    events.push(GameEvent::EntityDied { tag });
    Ok(())
}

fn fighter(world: &World, entity: Entity) -> Result<Fighter, GameError> {
    world
        .get::<&Fighter>(entity)
        .map(|f| *f)
        .map_err(|_| GameError::invariant(format!("{entity:?} has no combat stats")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AiBehavior, Position};

    fn spawn(world: &mut World, kind: EntityKind, hp: i32, defense: i32, power: i32) -> Entity {
        world.spawn((
            Position::new(0, 0),
            Kind(kind),
            Name(kind.tag().to_string()),
            Fighter::new(hp, defense, power),
            Ai(AiBehavior::MoveToPlayer),
        ))
    }

    #[test]
    fn test_damage_is_power_minus_defense() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let attacker = spawn(&mut world, EntityKind::Player, 30, 2, 5);
        let defender = spawn(&mut world, EntityKind::Troll, 16, 2, 4);

        for _ in 0..3 {
            let result = attack(&mut world, attacker, defender, &mut events).unwrap();
            assert_eq!(result, AttackResult::Hit { damage: 3, killed: false });
        }
        assert_eq!(world.get::<&Fighter>(defender).unwrap().hp, 7);
    }

    #[test]
    fn test_defense_at_or_above_power_deals_nothing() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let attacker = spawn(&mut world, EntityKind::Orc, 10, 0, 2);
        let defender = spawn(&mut world, EntityKind::Player, 30, 5, 5);

        let result = attack(&mut world, attacker, defender, &mut events).unwrap();
        assert_eq!(result, AttackResult::NoDamage);
        assert_eq!(world.get::<&Fighter>(defender).unwrap().hp, 30);

        let messages: Vec<String> = events.drain().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["orc attacks player but does no damage."]);
    }

    #[test]
    fn test_lethal_hit_makes_corpse_once() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let attacker = spawn(&mut world, EntityKind::Player, 30, 2, 5);
        let defender = spawn(&mut world, EntityKind::Orc, 3, 0, 3);

        let result = attack(&mut world, attacker, defender, &mut events).unwrap();
        assert_eq!(result, AttackResult::Hit { damage: 5, killed: true });

        assert_eq!(world.get::<&Fighter>(defender).unwrap().hp, -2);
        assert_eq!(world.get::<&Kind>(defender).unwrap().0, EntityKind::Corpse);
        assert!(!world.get::<&Kind>(defender).unwrap().0.blocks());
        assert!(world.get::<&Ai>(defender).is_err());
        assert!(world.get::<&Dead>(defender).is_ok());
        assert_eq!(world.get::<&Name>(defender).unwrap().0, "orc's corpse");

        let messages: Vec<String> = events.drain().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["player attacks orc for 5 hit points.", "orc dies!"]);

        // A corpse can't be attacked again
        assert!(matches!(
            attack(&mut world, attacker, defender, &mut events),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(events.drain().count(), 0);
    }

    #[test]
    fn test_dead_attacker_is_rejected() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let attacker = spawn(&mut world, EntityKind::Orc, 0, 0, 3);
        let defender = spawn(&mut world, EntityKind::Player, 30, 2, 5);
        assert!(attack(&mut world, attacker, defender, &mut events).is_err());
    }
}
