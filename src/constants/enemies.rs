//! Monster stats.

// TROLL
/// Troll health
pub const TROLL_HP: i32 = 16;
/// Troll defense
pub const TROLL_DEFENSE: i32 = 1;
/// Troll attack power
pub const TROLL_POWER: i32 = 4;
/// A troll is picked when a roll in `0..=TROLL_ROLL_MAX` comes up zero
pub const TROLL_ROLL_MAX: i32 = 2;

// ORC
/// Orc health
pub const ORC_HP: i32 = 10;
/// Orc defense
pub const ORC_DEFENSE: i32 = 0;
/// Orc attack power
pub const ORC_POWER: i32 = 3;
