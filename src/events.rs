//! Game event system for decoupled communication between systems.
//!
//! Combat pushes events while a turn resolves; the turn engine drains them
//! into the message log once the turn is over.

/// Game events that systems can emit
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An attack that dealt damage
    AttackHit {
        attacker_tag: &'static str,
        target_tag: &'static str,
        damage: i32,
    },
    /// An attack whose power did not exceed the target's defense
    AttackNoDamage {
        attacker_name: String,
        target_name: String,
    },
    /// An entity died and became a corpse
    EntityDied { tag: &'static str },
}

impl GameEvent {
    /// Message log line for this event
    pub fn message(&self) -> String {
        match self {
            GameEvent::AttackHit {
                attacker_tag,
                target_tag,
                damage,
            } => format!("{attacker_tag} attacks {target_tag} for {damage} hit points."),
            GameEvent::AttackNoDamage {
                attacker_name,
                target_name,
            } => format!("{attacker_name} attacks {target_name} but does no damage."),
            GameEvent::EntityDied { tag } => format!("{tag} dies!"),
        }
    }
}

/// Simple event queue - events are pushed during a turn, drained after it
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let hit = GameEvent::AttackHit {
            attacker_tag: "player",
            target_tag: "orc",
            damage: 5,
        };
        assert_eq!(hit.message(), "player attacks orc for 5 hit points.");

        let miss = GameEvent::AttackNoDamage {
            attacker_name: "orc".into(),
            target_name: "player".into(),
        };
        assert_eq!(miss.message(), "orc attacks player but does no damage.");

        let died = GameEvent::EntityDied { tag: "orc" };
        assert_eq!(died.message(), "orc dies!");
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::EntityDied { tag: "troll" });
        queue.push(GameEvent::EntityDied { tag: "orc" });
        let drained: Vec<GameEvent> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message(), "troll dies!");
        assert_eq!(queue.drain().count(), 0);
    }
}
