//! Cubic Arcade - puzzle games on the surface of a cube.
//!
//! Snake, Minesweeper, Tetris and Nonogram share one contract, the
//! [`Game`](cubic_game::Game) trait, and the cube-surface topology of
//! `cubic_topology`. This crate ties them together.
//!
//! # Architecture
//!
//! - **Registry**: the closed set of games ([`AnyGame`]) and lookup by id
//! - **Session**: the loaded game, its state, and undo/redo history
//! - **Config**: per-game settings loaded from TOML
//!
//! # Example
//!
//! ```
//! use cubic_arcade::{AnyGame, ArcadeConfig, GameKind, GameSession};
//! use cubic_snake::SnakeAction;
//!
//! let config = ArcadeConfig::default().with_seed(7);
//! let mut session = GameSession::default();
//! session.load_game(AnyGame::from_config(GameKind::Snake, &config));
//! session.dispatch(SnakeAction::Move.into())?;
//! assert!(session.undo());
//! # Ok::<(), cubic_arcade::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod registry;
mod session;

pub use config::{ArcadeConfig, MIN_SNAKE_GRID, MIN_WELL_SIDE, SessionConfig};
pub use error::{ConfigError, SessionError};
pub use registry::{AnyAction, AnyGame, AnyState, GameKind, GameRegistry};
pub use session::{DEFAULT_MAX_HISTORY, GameSession};
