//! Game engine - owns all game state and provides a clean API to the application shell.
//!
//! The engine handles:
//! - Game state (world, grid, light map)
//! - Input processing
//! - Turn resolution: player action, visibility, monster pass
//! - Turning combat events into log lines
//!
//! The application shell (main.rs) only handles:
//! - Window creation and event loop
//! - Forwarding key identifiers to the engine
//! - Rendering what the engine projects

mod game_state;
pub mod initialization;

pub use game_state::GameState;

use crate::config::GameConfig;
use crate::constants::*;
use crate::error::GameError;
use crate::events::EventQueue;
use crate::input::{InputMapper, Intent};
use crate::message_log::MessageLog;
use crate::queries;
use crate::rng::{RandomSource, StdRandom};
use crate::systems::{self, AttackResult, GlyphGrid};

/// Where the engine is in the turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingInput,
    ResolvingPlayerAction,
    ResolvingMonsterTurn,
    /// Terminal: the player's hp dropped to zero
    PlayerDead,
    /// Terminal: a fatal error stopped the engine
    Halted,
}

/// What a single intent resolved into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved { x: i32, y: i32 },
    Attacked(AttackResult),
    /// Target tile was not walkable; no turn passed
    Blocked,
    DebugToggled(bool),
    /// Refused because the player is dead
    Rejected,
    /// Key with no binding
    Ignored,
}

/// The turn engine - owns all game state and simulation logic.
pub struct TurnEngine<R: RandomSource = StdRandom> {
    pub state: GameState,
    phase: TurnPhase,
    rng: R,
    log: MessageLog,
    events: EventQueue,
    input: InputMapper,
    fov_radius: i32,
    strict_tile_lookup: bool,
    turn_count: u64,
}

impl TurnEngine<StdRandom> {
    /// Create the engine, seeding from the config when a seed is given.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("using dungeon seed {seed}");
                StdRandom::from_seed(seed)
            }
            None => StdRandom::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: RandomSource> TurnEngine<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Self, GameError> {
        let state = GameState::new(config, &mut rng)?;
        Self::with_state(state, config, rng)
    }

    /// Run an existing state under this config's rules.
    pub fn with_state(mut state: GameState, config: &GameConfig, rng: R) -> Result<Self, GameError> {
        let input = InputMapper::from_bindings(&config.key_bindings)?;
        state.debug_reveal = config.debug_reveal;
        state.refresh_light_map(config.fov_radius)?;

        let phase = if state.is_player_dead() {
            TurnPhase::PlayerDead
        } else {
            TurnPhase::AwaitingInput
        };

        Ok(Self {
            state,
            phase,
            rng,
            log: MessageLog::new(MESSAGE_LOG_LINES),
            events: EventQueue::new(),
            input,
            fov_radius: config.fov_radius,
            strict_tile_lookup: config.strict_tile_lookup,
            turn_count: 0,
        })
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn messages(&self) -> &MessageLog {
        &self.log
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    /// Map a key identifier and resolve it. Unbound keys are ignored.
    pub fn handle_key(&mut self, key_id: &str) -> Result<TurnOutcome, GameError> {
        match self.input.map_key(key_id) {
            Some(Intent::Move { dx, dy }) => self.handle_move_intent(dx, dy),
            Some(Intent::ToggleDebug) => self.handle_toggle_debug(),
            None => {
                if self.phase == TurnPhase::Halted {
                    return Err(GameError::Halted);
                }
                log::trace!("ignoring unbound key {key_id:?}");
                Ok(TurnOutcome::Ignored)
            }
        }
    }

    pub fn handle_move_intent(&mut self, dx: i32, dy: i32) -> Result<TurnOutcome, GameError> {
        self.handle_intent(Intent::Move { dx, dy })
    }

    pub fn handle_toggle_debug(&mut self) -> Result<TurnOutcome, GameError> {
        self.handle_intent(Intent::ToggleDebug)
    }

    /// Resolve one intent completely. Any error halts the engine for good.
    pub fn handle_intent(&mut self, intent: Intent) -> Result<TurnOutcome, GameError> {
        puffin::profile_function!();

        match self.phase {
            TurnPhase::Halted => return Err(GameError::Halted),
            TurnPhase::ResolvingPlayerAction | TurnPhase::ResolvingMonsterTurn => {
                let err = GameError::invariant(format!("{intent:?} arrived during {:?}", self.phase));
                return self.halt(err);
            }
            TurnPhase::AwaitingInput | TurnPhase::PlayerDead => {}
        }

        match self.resolve_intent(intent) {
            Ok(outcome) => Ok(outcome),
            Err(err) => self.halt(err),
        }
    }

    /// Project the current state for a viewport of `width` x `height` cells.
    pub fn project(&self, width: usize, height: usize) -> GlyphGrid {
        systems::project(
            &self.state.grid,
            &self.state.world,
            &self.state.light_map,
            self.state.debug_reveal,
            (width, height),
        )
    }

    fn halt<T>(&mut self, err: GameError) -> Result<T, GameError> {
        log::error!("halting after turn {}: {err}", self.turn_count);
        self.phase = TurnPhase::Halted;
        Err(err)
    }

    fn resolve_intent(&mut self, intent: Intent) -> Result<TurnOutcome, GameError> {
        if self.phase == TurnPhase::PlayerDead {
            self.log.print("You are dead");
            return Ok(TurnOutcome::Rejected);
        }

        match intent {
            Intent::ToggleDebug => {
                self.state.debug_reveal = !self.state.debug_reveal;
                log::debug!("debug reveal {}", if self.state.debug_reveal { "on" } else { "off" });
                Ok(TurnOutcome::DebugToggled(self.state.debug_reveal))
            }
            Intent::Move { dx, dy } => self.resolve_move(dx, dy),
        }
    }

    fn resolve_move(&mut self, dx: i32, dy: i32) -> Result<TurnOutcome, GameError> {
        if !is_single_step(dx, dy) {
            return Err(GameError::InvalidIntent { dx, dy });
        }

        self.phase = TurnPhase::ResolvingPlayerAction;
        let player = self.state.player_entity;
        let (px, py) = self.state.player_position()?;
        let (tx, ty) = (px + dx, py + dy);

        if self.strict_tile_lookup && self.state.grid.get(tx, ty).is_none() {
            return Err(GameError::invariant(format!("move to ({tx}, {ty}) which has no tile")));
        }
        if !self.state.grid.is_walkable(tx, ty) {
            self.phase = TurnPhase::AwaitingInput;
            return Ok(TurnOutcome::Blocked);
        }

        let outcome = match queries::blocking_entity_at(&self.state.world, tx, ty) {
            Some(target) => {
                let result = systems::attack(&mut self.state.world, player, target, &mut self.events)?;
                TurnOutcome::Attacked(result)
            }
            None => {
                self.state.move_player(tx, ty)?;
                TurnOutcome::Moved { x: tx, y: ty }
            }
        };
        self.flush_events();

        self.state.refresh_light_map(self.fov_radius)?;

        if !self.state.is_player_dead() {
            self.phase = TurnPhase::ResolvingMonsterTurn;
            let actions = systems::run_monster_pass(
                &mut self.state.world,
                &self.state.grid,
                &self.state.light_map,
                player,
                &mut self.rng,
                &mut self.events,
            )?;
            log::debug!("monster pass: {} monsters acted", actions.len());
            self.flush_events();
        }

        if let Some((a, b)) = queries::find_blocking_overlap(&self.state.world) {
            return Err(GameError::invariant(format!("blocking entities {a:?} and {b:?} share a cell")));
        }

        self.turn_count += 1;
        log::debug!("turn {} resolved: {outcome:?}", self.turn_count);

        self.phase = if self.state.is_player_dead() {
            log::info!("player died on turn {}", self.turn_count);
            TurnPhase::PlayerDead
        } else {
            TurnPhase::AwaitingInput
        };
        Ok(outcome)
    }

    fn flush_events(&mut self) {
        for event in self.events.drain() {
            self.log.print(event.message());
        }
    }
}

fn is_single_step(dx: i32, dy: i32) -> bool {
    matches!((dx.abs(), dy.abs()), (1, 0) | (0, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EntityKind, Fighter, Kind, Name, Position};
    use crate::grid::Grid;
    use crate::rng::ScriptedRandom;
    use crate::spawning::{self, monsters};
    use hecs::{Entity, World};

    fn test_grid() -> Grid {
        // The right-hand room is walled off and never seen
        Grid::from_ascii(&[
            "############",
            "#.....#....#",
            "#.....#....#",
            "#.....#....#",
            "#.....#....#",
            "#.....#....#",
            "#.....#....#",
            "############",
        ])
    }

    /// Player at (1, 5) with an orc at (2, 5).
    fn engine_with_orc(orc_hp: i32) -> (TurnEngine<ScriptedRandom>, Entity) {
        let mut world = World::new();
        let player = spawning::spawn_player(&mut world, 1, 5);
        let orc = monsters::ORC.spawn(&mut world, 2, 5);
        world.get::<&mut Fighter>(orc).unwrap().hp = orc_hp;
        let state = GameState::from_parts(world, test_grid(), player);
        let engine = TurnEngine::with_state(state, &GameConfig::default(), ScriptedRandom::new(&[])).unwrap();
        (engine, orc)
    }

    fn lines(engine: &TurnEngine<ScriptedRandom>) -> Vec<String> {
        engine.messages().lines().map(str::to_string).collect()
    }

    fn player_pos(engine: &TurnEngine<ScriptedRandom>) -> (i32, i32) {
        engine.state.player_position().unwrap()
    }

    #[test]
    fn test_player_attacks_orc_and_orc_strikes_back() {
        let (mut engine, orc) = engine_with_orc(10);

        let outcome = engine.handle_key("ArrowRight").unwrap();
        assert_eq!(outcome, TurnOutcome::Attacked(AttackResult::Hit { damage: 5, killed: false }));
        assert_eq!(engine.state.world.get::<&Fighter>(orc).unwrap().hp, 5);
        assert_eq!(player_pos(&engine), (1, 5));
        assert_eq!(
            lines(&engine),
            vec!["player attacks orc for 5 hit points.", "orc attacks player for 1 hit points."]
        );
        assert_eq!(engine.state.player_fighter().unwrap().hp, 29);
        assert_eq!(engine.phase(), TurnPhase::AwaitingInput);
        assert_eq!(engine.turn_count(), 1);
    }

    #[test]
    fn test_killing_blow_leaves_corpse() {
        let (mut engine, orc) = engine_with_orc(3);

        engine.handle_move_intent(1, 0).unwrap();
        assert_eq!(lines(&engine), vec!["player attacks orc for 5 hit points.", "orc dies!"]);
        {
            let world = &engine.state.world;
            assert_eq!(world.get::<&Fighter>(orc).unwrap().hp, -2);
            assert_eq!(world.get::<&Kind>(orc).unwrap().0, EntityKind::Corpse);
            assert_eq!(world.get::<&Name>(orc).unwrap().0, "orc's corpse");
            assert_eq!(queries::blocking_entity_at(world, 2, 5), None);
        }

        // The corpse does not block the player
        assert_eq!(engine.handle_move_intent(1, 0).unwrap(), TurnOutcome::Moved { x: 2, y: 5 });
        assert_eq!(lines(&engine).len(), 2);
    }

    #[test]
    fn test_wall_move_changes_nothing() {
        let (mut engine, orc) = engine_with_orc(10);

        assert_eq!(engine.handle_move_intent(-1, 0).unwrap(), TurnOutcome::Blocked);
        assert_eq!(player_pos(&engine), (1, 5));
        assert_eq!(queries::get_entity_position(&engine.state.world, orc), Some((2, 5)));
        assert_eq!(engine.state.player_fighter().unwrap().hp, 30);
        assert_eq!(engine.turn_count(), 0);
        assert!(lines(&engine).is_empty());
    }

    #[test]
    fn test_move_updates_visibility() {
        let (mut engine, _) = engine_with_orc(10);
        engine.handle_move_intent(0, -1).unwrap();
        assert_eq!(player_pos(&engine), (1, 4));
        assert_eq!(engine.state.light_map.get(1, 4), 1.0);
        assert!(engine.state.grid.get(1, 4).unwrap().explored);
    }

    #[test]
    fn test_dead_player_rejects_intents() {
        let (mut engine, _) = engine_with_orc(10);
        let player = engine.state.player_entity;
        engine.state.world.get::<&mut Fighter>(player).unwrap().hp = 1;

        engine.handle_move_intent(1, 0).unwrap();
        assert_eq!(engine.phase(), TurnPhase::PlayerDead);
        assert_eq!(lines(&engine).last().map(String::as_str), Some("player dies!"));

        assert_eq!(engine.handle_move_intent(0, -1).unwrap(), TurnOutcome::Rejected);
        assert_eq!(lines(&engine).last().map(String::as_str), Some("You are dead"));
        assert_eq!(player_pos(&engine), (1, 5));

        let debug_before = engine.state.debug_reveal;
        assert_eq!(engine.handle_toggle_debug().unwrap(), TurnOutcome::Rejected);
        assert_eq!(engine.state.debug_reveal, debug_before);
        assert_eq!(engine.phase(), TurnPhase::PlayerDead);
    }

    #[test]
    fn test_debug_toggle_twice_restores_projection() {
        let (mut engine, _) = engine_with_orc(10);
        let before = engine.project(12, 8);

        assert_eq!(engine.handle_key("o").unwrap(), TurnOutcome::DebugToggled(true));
        let revealed = engine.project(12, 8);
        assert_ne!(before, revealed);

        assert_eq!(engine.handle_toggle_debug().unwrap(), TurnOutcome::DebugToggled(false));
        assert_eq!(engine.project(12, 8), before);
        assert_eq!(engine.turn_count(), 0);
    }

    #[test]
    fn test_bound_arrow_key_takes_a_turn() {
        let (mut engine, _) = engine_with_orc(10);
        assert_eq!(engine.handle_key("ArrowUp").unwrap(), TurnOutcome::Moved { x: 1, y: 4 });
        assert_eq!(player_pos(&engine), (1, 4));
        assert_eq!(engine.turn_count(), 1);
        assert_eq!(engine.handle_key("ArrowLeft").unwrap(), TurnOutcome::Blocked);
        assert_eq!(engine.turn_count(), 1);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let (mut engine, _) = engine_with_orc(10);
        assert_eq!(engine.handle_key("q").unwrap(), TurnOutcome::Ignored);
        assert_eq!(engine.phase(), TurnPhase::AwaitingInput);
    }

    #[test]
    fn test_invalid_intent_halts_engine() {
        let (mut engine, _) = engine_with_orc(10);
        assert!(matches!(
            engine.handle_move_intent(1, 1),
            Err(GameError::InvalidIntent { dx: 1, dy: 1 })
        ));
        assert_eq!(engine.phase(), TurnPhase::Halted);
        assert!(matches!(engine.handle_move_intent(0, -1), Err(GameError::Halted)));
        assert!(matches!(engine.handle_key("q"), Err(GameError::Halted)));
    }

    fn engine_on_edge(strict: bool) -> TurnEngine<ScriptedRandom> {
        let grid = Grid::from_ascii(&["....", "....", "...."]);
        let mut world = World::new();
        let player = spawning::spawn_player(&mut world, 0, 1);
        let state = GameState::from_parts(world, grid, player);
        let config = GameConfig {
            strict_tile_lookup: strict,
            ..GameConfig::default()
        };
        TurnEngine::with_state(state, &config, ScriptedRandom::new(&[])).unwrap()
    }

    #[test]
    fn test_missing_tile_is_blocked_by_default() {
        let mut engine = engine_on_edge(false);
        assert_eq!(engine.handle_move_intent(-1, 0).unwrap(), TurnOutcome::Blocked);
        assert_eq!(engine.phase(), TurnPhase::AwaitingInput);
    }

    #[test]
    fn test_missing_tile_is_fatal_when_strict() {
        let mut engine = engine_on_edge(true);
        assert!(matches!(
            engine.handle_move_intent(-1, 0),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(engine.phase(), TurnPhase::Halted);
        assert!(matches!(engine.handle_toggle_debug(), Err(GameError::Halted)));
    }

    #[test]
    fn test_generated_engine_starts_ready() {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        };
        let engine = TurnEngine::from_config(&config).unwrap();
        assert_eq!(engine.phase(), TurnPhase::AwaitingInput);
        assert_eq!(engine.state.player_position().unwrap(), PLAYER_START);
        assert!(engine.state.light_map.is_lit(PLAYER_START.0, PLAYER_START.1));

        let frame = engine.project(config.width, config.height);
        assert_eq!(frame.get(PLAYER_START.0, PLAYER_START.1).map(|c| c.ch), Some('@'));
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let a = TurnEngine::from_config(&config).unwrap();
        let b = TurnEngine::from_config(&config).unwrap();
        assert_eq!(a.project(60, 25), b.project(60, 25));

        let positions = |e: &TurnEngine| {
            let mut v: Vec<(u32, i32, i32)> = e
                .state
                .world
                .query::<&Position>()
                .iter()
                .map(|(id, p)| (id.id(), p.x, p.y))
                .collect();
            v.sort();
            v
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
