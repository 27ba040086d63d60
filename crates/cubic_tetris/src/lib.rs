//! Tetris with four-voxel pieces falling through a rectangular volume.
//!
//! The volume is `width × depth × height` with `y` pointing up. Pieces
//! shift in the four horizontal directions, turn about any axis with wall
//! kicks, and lock when they can fall no further. A horizontal layer that
//! is completely filled disappears and everything above it drops by one.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod rules;
mod types;

pub use action::{Shift, TetrisAction};
pub use rules::{
    HARD_DROP_POINTS, LAYER_SCORES, LAYERS_PER_LEVEL, SOFT_DROP_POINTS, TetrisGame, WALL_KICKS,
    clear_layers, ghost_cells, ghost_piece, spawn_piece, speed_for_level,
};
pub use types::{Axis, FallingPiece, TetracubeKind, TetrisConfig, TetrisState, Voxel};
