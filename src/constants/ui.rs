//! UI and window constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1080;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 640;

/// Size of one glyph cell in points
pub const CELL_SIZE: f32 = 16.0;
/// Height reserved for the message log panel
pub const MESSAGE_PANEL_HEIGHT: f32 = 110.0;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "GLYPH_DUNGEON_CONFIG";
