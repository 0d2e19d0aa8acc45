//! Game constants organized by domain.
//!
//! These are the compile-time defaults; `config::GameConfig` can override the
//! tunable ones at startup.

mod colors;
mod dungeon;
mod enemies;
mod gameplay;
mod ui;

pub use colors::*;
pub use dungeon::*;
pub use enemies::*;
pub use gameplay::*;
pub use ui::*;
