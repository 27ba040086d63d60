//! Session store: the loaded game, its state and undo/redo history.

use crate::error::SessionError;
use crate::registry::{AnyAction, AnyGame, AnyState};
use cubic_game::{Game, GameStatus, Piece};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default bound on stored snapshots.
pub const DEFAULT_MAX_HISTORY: usize = 256;

/// Owns one game and the history of its states.
///
/// States are immutable snapshots: every dispatch appends a new one and
/// moves the cursor onto it. Undo and redo only move the cursor; a dispatch
/// after an undo discards the snapshots ahead of the cursor first.
#[derive(Debug, Clone)]
pub struct GameSession {
    game: Option<AnyGame>,
    history: Vec<AnyState>,
    cursor: usize,
    max_history: usize,
}

impl GameSession {
    /// Creates an empty session keeping at most `max_history` snapshots.
    #[instrument]
    pub fn new(max_history: usize) -> Self {
        Self {
            game: None,
            history: Vec::new(),
            cursor: 0,
            max_history: max_history.max(1),
        }
    }

    /// Replaces the current game and starts from its initial state.
    #[instrument(skip(self, game), fields(game = game.id()))]
    pub fn load_game(&mut self, game: AnyGame) {
        let initial = game.init();
        info!("Game loaded");
        self.game = Some(game);
        self.history = vec![initial];
        self.cursor = 0;
    }

    /// The loaded game.
    pub fn game(&self) -> Option<&AnyGame> {
        self.game.as_ref()
    }

    /// The state under the cursor.
    pub fn state(&self) -> Option<&AnyState> {
        self.history.get(self.cursor)
    }

    fn loaded(&self) -> Result<(&AnyGame, &AnyState), SessionError> {
        match (&self.game, self.history.get(self.cursor)) {
            (Some(game), Some(state)) => Ok((game, state)),
            _ => Err(SessionError::NoGameLoaded),
        }
    }

    /// Validates and applies `action`, recording the new state.
    ///
    /// Rejected actions leave the history untouched.
    #[instrument(skip(self), fields(%action))]
    pub fn dispatch(&mut self, action: AnyAction) -> Result<GameStatus, SessionError> {
        let (game, state) = self.loaded()?;

        if action.kind() != game.kind() {
            warn!(game = %game.kind(), "Action for another game");
            return Err(SessionError::GameMismatch {
                game: game.id().to_string(),
                action_game: action.kind().to_string(),
            });
        }
        if !game.is_valid_action(state, &action) {
            warn!(game = %game.kind(), "Rejected invalid action");
            return Err(SessionError::InvalidAction {
                game: game.id().to_string(),
                action: action.to_string(),
            });
        }

        let next = game.apply_action(state, &action);
        let status = game.check_game_over(&next);

        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
            debug!(dropped = excess, "History trimmed");
        }
        self.cursor = self.history.len() - 1;

        if status.is_over() {
            info!(%status, "Game over");
        }
        Ok(status)
    }

    /// Applies each action in order, skipping rejected ones.
    ///
    /// Returns how many were applied. Only errors other than a rejected
    /// action stop the replay.
    #[instrument(skip(self, actions))]
    pub fn replay(
        &mut self,
        actions: impl IntoIterator<Item = AnyAction>,
    ) -> Result<usize, SessionError> {
        let mut applied = 0;
        for action in actions {
            match self.dispatch(action) {
                Ok(_) => applied += 1,
                Err(SessionError::InvalidAction { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        info!(applied, "Replay finished");
        Ok(applied)
    }

    /// Fires the game's timer action if the timer is armed.
    ///
    /// Returns the interval until the next tick, `None` when the timer
    /// should stay off (turn-based, paused or finished games).
    pub fn tick(&mut self) -> Result<Option<Duration>, SessionError> {
        let (game, state) = self.loaded()?;
        let action = match (game.tick_interval(state), game.tick_action()) {
            (Some(_), Some(action)) => action,
            _ => return Ok(None),
        };
        self.dispatch(action)?;
        Ok(self.tick_interval())
    }

    /// Interval until the next tick for the current state.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.loaded()
            .ok()
            .and_then(|(game, state)| game.tick_interval(state))
    }

    /// Steps back one snapshot; returns whether the cursor moved.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            debug!(cursor = self.cursor, "Undo");
            true
        } else {
            false
        }
    }

    /// Steps forward one snapshot; returns whether the cursor moved.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            debug!(cursor = self.cursor, "Redo");
            true
        } else {
            false
        }
    }

    /// Whether there is a snapshot behind the cursor.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether there is a snapshot ahead of the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Restarts the loaded game from a fresh initial state, clearing history.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let game = self.game.as_ref().ok_or(SessionError::NoGameLoaded)?;
        self.history = vec![game.init()];
        self.cursor = 0;
        info!(game = game.id(), "Session reset");
        Ok(())
    }

    /// Unloads the game and drops all history.
    pub fn unload(&mut self) {
        self.game = None;
        self.history.clear();
        self.cursor = 0;
    }

    /// Status of the current state.
    pub fn status(&self) -> Result<GameStatus, SessionError> {
        let (game, state) = self.loaded()?;
        Ok(game.check_game_over(state))
    }

    /// Render description of the current state.
    pub fn pieces(&self) -> Result<Vec<Piece>, SessionError> {
        let (game, state) = self.loaded()?;
        Ok(game.pieces(state))
    }

    /// Actions valid in the current state.
    pub fn valid_actions(&self) -> Result<Vec<AnyAction>, SessionError> {
        let (game, state) = self.loaded()?;
        Ok(game.valid_actions(state))
    }

    /// Stored snapshots, including those ahead of the cursor.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
