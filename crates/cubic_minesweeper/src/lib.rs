//! Minesweeper on all six faces of a cube.
//!
//! Adjacency is cube-aware: a cell on a face edge counts mines on the
//! neighboring face, and corner cells have seven neighbors instead of
//! eight. Mines are placed lazily on the first reveal so that the clicked
//! cell and its neighbors are always safe.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod rules;
mod types;

pub use action::MinesweeperAction;
pub use rules::{MinesweeperGame, flood_reveal, place_mines};
pub use types::{MineCell, MinesweeperConfig, MinesweeperState};
