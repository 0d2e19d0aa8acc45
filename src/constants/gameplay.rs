//! Core gameplay constants (player stats, FOV).

/// Player's fixed starting position
pub const PLAYER_START: (i32, i32) = (1, 5);
/// Player's starting health
pub const PLAYER_HP: i32 = 30;
/// Player's defense
pub const PLAYER_DEFENSE: i32 = 2;
/// Player's attack power
pub const PLAYER_POWER: i32 = 5;

/// Default FOV radius for player
pub const FOV_RADIUS: i32 = 10;
/// Largest accepted sight radius
pub const MAX_FOV_RADIUS: i32 = 256;

/// Number of lines kept in the message log
pub const MESSAGE_LOG_LINES: usize = 5;
