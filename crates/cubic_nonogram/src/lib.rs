//! Nonograms painted across the six faces of a cube.
//!
//! Each face carries its own row and column clues, but the hidden picture is
//! generated so that cells touching across a cube edge always agree, which
//! makes the picture read continuously around the cube. A seed plus a
//! [`GenerationStrategy`] reproduces a puzzle exactly.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod clues;
mod generator;
mod rules;
mod types;

pub use action::NonogramAction;
pub use clues::{calculate_line_clue, cube_clues, face_clues};
pub use generator::{
    MAX_TOTAL_FILL, MIN_FACE_FILL, MIN_TOTAL_FILL, SMOOTHING_PASSES, edge_groups,
    enforce_edge_connections, ensure_minimum_complexity, generate_face, generate_solution,
};
pub use rules::NonogramGame;
pub use types::{CellState, FaceClues, GenerationStrategy, NonogramConfig, NonogramState};
