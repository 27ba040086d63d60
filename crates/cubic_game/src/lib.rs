//! Shared contract for games played on the cube.
//!
//! Every concrete game is a standalone struct implementing [`Game`]: it
//! creates an initial state, validates and applies actions, reports game
//! over, lists valid actions and describes what to draw as [`Piece`]s.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod piece;
mod rng;

pub use game::{Game, GameMetadata, GameStatus};
pub use piece::Piece;
pub use rng::Mulberry32;

/// Draws a fresh seed from the thread-local generator.
pub fn random_seed() -> u32 {
    rand::random()
}
