//! Dungeon generation constants.

/// Minimum size of a BSP leaf node
pub const DUNGEON_MIN_LEAF_SIZE: i32 = 8;
/// Minimum room size within a leaf
pub const DUNGEON_MIN_ROOM_SIZE: i32 = 3;
/// Margin around rooms within their leaf
pub const DUNGEON_ROOM_MARGIN: i32 = 1;
/// Default dungeon width
pub const DUNGEON_DEFAULT_WIDTH: usize = 60;
/// Default dungeon height
pub const DUNGEON_DEFAULT_HEIGHT: usize = 25;
/// Upper bound (inclusive) on monsters rolled per room
pub const MAX_MONSTERS_PER_ROOM: i32 = 3;
