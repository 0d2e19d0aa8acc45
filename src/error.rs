//! Error types for world creation and turn resolution.

use thiserror::Error;

/// Everything that can stop the game.
///
/// Turn resolution either fully succeeds or fails with one of these; the
/// engine halts after the first failure and refuses further intents.
#[derive(Debug, Error)]
pub enum GameError {
    /// Game state that should be impossible, e.g. a monster standing on the player.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An action tag that maps to no intent.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A move that is not a single orthogonal step.
    #[error("invalid move intent ({dx}, {dy})")]
    InvalidIntent { dx: i32, dy: i32 },

    /// The engine already failed and no longer accepts input.
    #[error("turn engine halted after a fatal error")]
    Halted,

    /// Rejected configuration values.
    #[error("invalid config: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    pub fn invariant(message: impl Into<String>) -> Self {
        GameError::InvariantViolation(message.into())
    }
}
