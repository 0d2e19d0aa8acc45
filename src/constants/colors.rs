//! Map and entity colors (0..1 RGB).

use glam::Vec3;

/// Background of an explored floor tile outside the light, rgb(50, 50, 150)
pub const UNLIT_FLOOR: Vec3 = Vec3::new(0.196, 0.196, 0.588);
/// Background of an explored wall tile outside the light, rgb(0, 0, 100)
pub const UNLIT_WALL: Vec3 = Vec3::new(0.0, 0.0, 0.392);
/// Background of a lit floor tile, rgb(200, 180, 50)
pub const LIT_FLOOR: Vec3 = Vec3::new(0.784, 0.706, 0.196);
/// Background of a lit wall tile, rgb(130, 110, 50)
pub const LIT_WALL: Vec3 = Vec3::new(0.510, 0.431, 0.196);

/// Foreground when no entity occupies the cell
pub const DEFAULT_FG: Vec3 = Vec3::ZERO;

/// hsl(60, 100%, 70%)
pub const PLAYER_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.4);
/// hsl(120, 60%, 30%)
pub const TROLL_COLOR: Vec3 = Vec3::new(0.12, 0.48, 0.12);
/// hsl(100, 30%, 40%)
pub const ORC_COLOR: Vec3 = Vec3::new(0.36, 0.52, 0.28);
/// darkred
pub const CORPSE_COLOR: Vec3 = Vec3::new(0.545, 0.0, 0.0);
