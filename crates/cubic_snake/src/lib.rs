//! Snake on the surface of a cube.
//!
//! The snake moves one cell per timer tick and wraps across face edges.
//! When the head crosses onto a new face the heading is remapped so the
//! snake keeps moving the same way on screen, and the tracked camera up
//! vector turns with it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod rules;
mod types;

pub use action::SnakeAction;
pub use rules::{FOOD_POINTS, FOOD_SPAWN_ATTEMPTS, POINTS_PER_SPEEDUP, SnakeGame};
pub use types::{SnakeConfig, SnakeState};
