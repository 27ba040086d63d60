//! Cube-surface topology.
//!
//! Treats the six square grids on the faces of a cube as one seamless
//! surface: cells convert to and from world space, movement wraps across
//! face edges through a fixed transition table, neighbor queries see cells
//! on adjacent faces, and movement directions are remapped so that an agent
//! crossing an edge keeps heading the same way on screen.
//!
//! # Conventions
//!
//! - Each face has an outward normal, a canonical up vector and
//!   `right = up × normal`.
//! - Local `x` grows toward right, local `y` toward up.
//! - The `top` edge is `y == grid_size - 1`, `bottom` is `y == 0`,
//!   `left` is `x == 0`, `right` is `x == grid_size - 1`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod face;
mod movement;
mod orientation;
mod position;
mod transition;

pub use face::{CubeFace, Delta, Direction, Edge};
pub use movement::{
    all_neighbors, diagonal_neighbor, diagonal_paths, edge_at_position, edges_at_position,
    move_position, step,
};
pub use orientation::{
    DirectionTransform, face_transition_rotation, rotate_up_across_edge, transform_across_edge,
    transform_direction_across_edge, visual_rotation,
};
pub use position::{CubeConfig, CubePosition, cube_to_world, world_to_cube};
pub use transition::{EDGE_TRANSITIONS, EdgeTransition, edge_transition, unique_edges};

/// Re-exported so callers can name world-space types without a direct dependency.
pub use cgmath::{Point3, Vector3};
