//! Game systems organized by domain.
//!
//! - `combat`: damage, death and the corpse transition
//! - `ai`: the monster pass run after each player turn
//! - `rendering`: projection of the world into a glyph grid

pub mod ai;
pub mod combat;
pub mod rendering;

pub use ai::run_monster_pass;
pub use combat::{attack, AttackResult};
pub use rendering::{project, DisplaySink, GlyphGrid};
