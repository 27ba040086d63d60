//! The contract every cube game implements.

use crate::piece::Piece;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// Static facts about a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Registry key.
    id: String,
    /// Human-readable name.
    name: String,
    /// Cells per face edge (or the footprint width for volume games).
    grid_size: usize,
    /// Number of players.
    player_count: usize,
    /// How many cube faces take part in play.
    active_faces: usize,
}

/// Current status of the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won,
    /// Game ended in a loss.
    Lost,
}

impl GameStatus {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// A turn-based game over immutable state snapshots.
///
/// `apply_action` never mutates its input: it returns a whole new state,
/// and the same `(state, action)` pair always yields an equal result.
/// Randomness is drawn only from seeds carried inside the state.
pub trait Game {
    /// Complete game state.
    type State: Clone + Debug + PartialEq;
    /// Closed set of actions the game accepts.
    type Action: Clone + Debug + PartialEq;

    /// Static metadata.
    fn metadata(&self) -> &GameMetadata;

    /// Creates the starting state.
    fn init(&self) -> Self::State;

    /// Whether `action` may be applied to `state`.
    fn is_valid_action(&self, state: &Self::State, action: &Self::Action) -> bool;

    /// Applies `action`, returning the next state.
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Reports whether the game has ended and how.
    fn check_game_over(&self, state: &Self::State) -> GameStatus;

    /// Every action currently valid.
    fn valid_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// What to draw for `state`.
    fn pieces(&self, state: &Self::State) -> Vec<Piece>;

    /// Action fired by the external timer for continuously ticking games.
    fn tick_action(&self) -> Option<Self::Action> {
        None
    }

    /// Interval until the next timer tick, derived from `state`.
    ///
    /// `None` means the timer should not be armed (turn-based games, paused
    /// or finished games).
    fn tick_interval(&self, _state: &Self::State) -> Option<Duration> {
        None
    }
}
