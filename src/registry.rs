//! The closed set of games and lookup by id.

use crate::config::ArcadeConfig;
use crate::error::SessionError;
use cubic_game::{Game, GameMetadata, GameStatus, Piece};
use cubic_minesweeper::{MinesweeperAction, MinesweeperGame, MinesweeperState};
use cubic_nonogram::{NonogramAction, NonogramGame, NonogramState};
use cubic_snake::{SnakeAction, SnakeGame, SnakeState};
use cubic_tetris::{TetrisAction, TetrisGame, TetrisState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Every game the arcade knows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameKind {
    /// Snake wrapping around the cube.
    Snake,
    /// Minesweeper on all six faces.
    Minesweeper,
    /// Falling tetracubes in a box.
    Tetris,
    /// Nonograms across the faces.
    Nonogram,
}

/// One of the concrete games.
#[derive(Debug, Clone, derive_more::From)]
pub enum AnyGame {
    /// Snake.
    Snake(SnakeGame),
    /// Minesweeper.
    Minesweeper(MinesweeperGame),
    /// Tetris.
    Tetris(TetrisGame),
    /// Nonogram.
    Nonogram(NonogramGame),
}

/// State of one of the concrete games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "game", content = "state", rename_all = "lowercase")]
pub enum AnyState {
    /// Snake state.
    Snake(SnakeState),
    /// Minesweeper state.
    Minesweeper(MinesweeperState),
    /// Tetris state.
    Tetris(TetrisState),
    /// Nonogram state.
    Nonogram(NonogramState),
}

/// Action for one of the concrete games.
///
/// Serializes to the wrapped game's own wire shape. Parsing needs to know
/// the game, since several games share action names; see [`AnyAction::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From, derive_more::Display)]
#[serde(untagged)]
pub enum AnyAction {
    /// Snake action.
    #[display("{}", _0)]
    Snake(SnakeAction),
    /// Minesweeper action.
    #[display("{}", _0)]
    Minesweeper(MinesweeperAction),
    /// Tetris action.
    #[display("{}", _0)]
    Tetris(TetrisAction),
    /// Nonogram action.
    #[display("{}", _0)]
    Nonogram(NonogramAction),
}

impl AnyGame {
    /// Builds the game of `kind` from its config section.
    #[instrument(skip(config))]
    pub fn from_config(kind: GameKind, config: &ArcadeConfig) -> Self {
        match kind {
            GameKind::Snake => SnakeGame::new(config.snake().clone()).into(),
            GameKind::Minesweeper => MinesweeperGame::new(config.minesweeper().clone()).into(),
            GameKind::Tetris => TetrisGame::new(config.tetris().clone()).into(),
            GameKind::Nonogram => NonogramGame::new(config.nonogram().clone()).into(),
        }
    }

    /// Which game this is.
    pub fn kind(&self) -> GameKind {
        match self {
            AnyGame::Snake(_) => GameKind::Snake,
            AnyGame::Minesweeper(_) => GameKind::Minesweeper,
            AnyGame::Tetris(_) => GameKind::Tetris,
            AnyGame::Nonogram(_) => GameKind::Nonogram,
        }
    }

    /// Registry id.
    pub fn id(&self) -> &str {
        self.metadata().id()
    }
}

impl AnyState {
    /// Which game this state belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            AnyState::Snake(_) => GameKind::Snake,
            AnyState::Minesweeper(_) => GameKind::Minesweeper,
            AnyState::Tetris(_) => GameKind::Tetris,
            AnyState::Nonogram(_) => GameKind::Nonogram,
        }
    }
}

impl AnyAction {
    /// Which game this action belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            AnyAction::Snake(_) => GameKind::Snake,
            AnyAction::Minesweeper(_) => GameKind::Minesweeper,
            AnyAction::Tetris(_) => GameKind::Tetris,
            AnyAction::Nonogram(_) => GameKind::Nonogram,
        }
    }

    /// Parses a `{"type": ..., "payload": ...}` value as an action of `kind`.
    pub fn parse(kind: GameKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            GameKind::Snake => AnyAction::Snake(serde_json::from_value(value)?),
            GameKind::Minesweeper => AnyAction::Minesweeper(serde_json::from_value(value)?),
            GameKind::Tetris => AnyAction::Tetris(serde_json::from_value(value)?),
            GameKind::Nonogram => AnyAction::Nonogram(serde_json::from_value(value)?),
        })
    }
}

/// Mismatched game, state and action combinations are rejected as invalid
/// and leave the state unchanged.
impl Game for AnyGame {
    type State = AnyState;
    type Action = AnyAction;

    fn metadata(&self) -> &GameMetadata {
        match self {
            AnyGame::Snake(game) => game.metadata(),
            AnyGame::Minesweeper(game) => game.metadata(),
            AnyGame::Tetris(game) => game.metadata(),
            AnyGame::Nonogram(game) => game.metadata(),
        }
    }

    fn init(&self) -> AnyState {
        match self {
            AnyGame::Snake(game) => game.init().into(),
            AnyGame::Minesweeper(game) => game.init().into(),
            AnyGame::Tetris(game) => game.init().into(),
            AnyGame::Nonogram(game) => game.init().into(),
        }
    }

    fn is_valid_action(&self, state: &AnyState, action: &AnyAction) -> bool {
        match (self, state, action) {
            (AnyGame::Snake(g), AnyState::Snake(s), AnyAction::Snake(a)) => g.is_valid_action(s, a),
            (AnyGame::Minesweeper(g), AnyState::Minesweeper(s), AnyAction::Minesweeper(a)) => {
                g.is_valid_action(s, a)
            }
            (AnyGame::Tetris(g), AnyState::Tetris(s), AnyAction::Tetris(a)) => g.is_valid_action(s, a),
            (AnyGame::Nonogram(g), AnyState::Nonogram(s), AnyAction::Nonogram(a)) => {
                g.is_valid_action(s, a)
            }
            _ => false,
        }
    }

    fn apply_action(&self, state: &AnyState, action: &AnyAction) -> AnyState {
        match (self, state, action) {
            (AnyGame::Snake(g), AnyState::Snake(s), AnyAction::Snake(a)) => g.apply_action(s, a).into(),
            (AnyGame::Minesweeper(g), AnyState::Minesweeper(s), AnyAction::Minesweeper(a)) => {
                g.apply_action(s, a).into()
            }
            (AnyGame::Tetris(g), AnyState::Tetris(s), AnyAction::Tetris(a)) => g.apply_action(s, a).into(),
            (AnyGame::Nonogram(g), AnyState::Nonogram(s), AnyAction::Nonogram(a)) => {
                g.apply_action(s, a).into()
            }
            _ => {
                debug!(game = %self.kind(), state = %state.kind(), action = %action.kind(), "Mismatched dispatch");
                state.clone()
            }
        }
    }

    fn check_game_over(&self, state: &AnyState) -> GameStatus {
        match (self, state) {
            (AnyGame::Snake(g), AnyState::Snake(s)) => g.check_game_over(s),
            (AnyGame::Minesweeper(g), AnyState::Minesweeper(s)) => g.check_game_over(s),
            (AnyGame::Tetris(g), AnyState::Tetris(s)) => g.check_game_over(s),
            (AnyGame::Nonogram(g), AnyState::Nonogram(s)) => g.check_game_over(s),
            _ => GameStatus::InProgress,
        }
    }

    fn valid_actions(&self, state: &AnyState) -> Vec<AnyAction> {
        match (self, state) {
            (AnyGame::Snake(g), AnyState::Snake(s)) => {
                g.valid_actions(s).into_iter().map(Into::into).collect()
            }
            (AnyGame::Minesweeper(g), AnyState::Minesweeper(s)) => {
                g.valid_actions(s).into_iter().map(Into::into).collect()
            }
            (AnyGame::Tetris(g), AnyState::Tetris(s)) => {
                g.valid_actions(s).into_iter().map(Into::into).collect()
            }
            (AnyGame::Nonogram(g), AnyState::Nonogram(s)) => {
                g.valid_actions(s).into_iter().map(Into::into).collect()
            }
            _ => Vec::new(),
        }
    }

    fn pieces(&self, state: &AnyState) -> Vec<Piece> {
        match (self, state) {
            (AnyGame::Snake(g), AnyState::Snake(s)) => g.pieces(s),
            (AnyGame::Minesweeper(g), AnyState::Minesweeper(s)) => g.pieces(s),
            (AnyGame::Tetris(g), AnyState::Tetris(s)) => g.pieces(s),
            (AnyGame::Nonogram(g), AnyState::Nonogram(s)) => g.pieces(s),
            _ => Vec::new(),
        }
    }

    fn tick_action(&self) -> Option<AnyAction> {
        match self {
            AnyGame::Snake(g) => g.tick_action().map(Into::into),
            AnyGame::Minesweeper(g) => g.tick_action().map(Into::into),
            AnyGame::Tetris(g) => g.tick_action().map(Into::into),
            AnyGame::Nonogram(g) => g.tick_action().map(Into::into),
        }
    }

    fn tick_interval(&self, state: &AnyState) -> Option<Duration> {
        match (self, state) {
            (AnyGame::Snake(g), AnyState::Snake(s)) => g.tick_interval(s),
            (AnyGame::Minesweeper(g), AnyState::Minesweeper(s)) => g.tick_interval(s),
            (AnyGame::Tetris(g), AnyState::Tetris(s)) => g.tick_interval(s),
            (AnyGame::Nonogram(g), AnyState::Nonogram(s)) => g.tick_interval(s),
            _ => None,
        }
    }
}

/// Games keyed by their string id.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    games: BTreeMap<String, AnyGame>,
}

impl GameRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every [`GameKind`], built from `config`.
    #[instrument(skip(config))]
    pub fn from_config(config: &ArcadeConfig) -> Self {
        let mut registry = Self::new();
        for kind in GameKind::iter() {
            registry.register(AnyGame::from_config(kind, config));
        }
        info!(count = registry.games.len(), "Registry populated");
        registry
    }

    /// Adds or replaces a game under its metadata id.
    pub fn register(&mut self, game: AnyGame) {
        debug!(id = game.id(), "Registering game");
        self.games.insert(game.id().to_string(), game);
    }

    /// Looks up a game by id.
    pub fn get(&self, id: &str) -> Result<&AnyGame, SessionError> {
        self.games
            .get(id)
            .ok_or_else(|| SessionError::UnknownGame(id.to_string()))
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    /// Metadata of every registered game, sorted by id.
    pub fn metadata(&self) -> impl Iterator<Item = &GameMetadata> {
        self.games.values().map(Game::metadata)
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
