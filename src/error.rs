//! Error types for the session surface.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error returned by session and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No game has been loaded into the session.
    #[display("No game loaded")]
    NoGameLoaded,

    /// No game is registered under this id.
    #[display("Unknown game: {}", _0)]
    UnknownGame(String),

    /// The loaded game rejected the action; history is unchanged.
    #[display("Invalid {} action: {}", game, action)]
    InvalidAction {
        /// Id of the loaded game.
        game: String,
        /// The rejected action.
        action: String,
    },

    /// The action belongs to a different game than the one loaded.
    #[display("Action for {} sent to {}", action_game, game)]
    GameMismatch {
        /// Id of the loaded game.
        game: String,
        /// Id of the game the action belongs to.
        action_game: String,
    },
}

impl std::error::Error for SessionError {}

/// Configuration error with caller location.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
