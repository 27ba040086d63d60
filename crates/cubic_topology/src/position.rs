//! Grid cells on the cube surface and their world-space placement.

use crate::face::{CubeFace, Edge};
use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single cell on one face.
///
/// Always satisfies `x < grid_size` and `y < grid_size`; crossing logic
/// re-derives coordinates on the destination face instead of producing
/// out-of-range values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{face}({x}, {y})")]
pub struct CubePosition {
    /// Face the cell lies on.
    pub face: CubeFace,
    /// Column, growing toward the face's right vector.
    pub x: usize,
    /// Row, growing toward the face's up vector.
    pub y: usize,
}

impl CubePosition {
    /// Creates a position.
    pub const fn new(face: CubeFace, x: usize, y: usize) -> Self {
        Self { face, x, y }
    }

    /// The cell `along` cells from the start of `edge` on `face`.
    ///
    /// Horizontal edges count along `x`, vertical edges along `y`.
    pub fn on_edge(face: CubeFace, edge: Edge, along: usize, grid_size: usize) -> Self {
        let last = grid_size - 1;
        match edge {
            Edge::Top => Self::new(face, along, last),
            Edge::Bottom => Self::new(face, along, 0),
            Edge::Left => Self::new(face, 0, along),
            Edge::Right => Self::new(face, last, along),
        }
    }

    /// Whether both coordinates lie inside `[0, grid_size)`.
    pub fn is_valid(&self, grid_size: usize) -> bool {
        self.x < grid_size && self.y < grid_size
    }

    /// Packed index `face * n² + y * n + x` for dense per-cell storage.
    pub fn index(&self, grid_size: usize) -> usize {
        self.face.index() * grid_size * grid_size + self.y * grid_size + self.x
    }

    /// Inverse of [`CubePosition::index`].
    pub fn from_index(index: usize, grid_size: usize) -> Option<Self> {
        let per_face = grid_size * grid_size;
        let face = CubeFace::from_index(index / per_face)?;
        let local = index % per_face;
        Some(Self::new(face, local % grid_size, local / grid_size))
    }

    /// Every cell on the cube, in packed-index order.
    pub fn all(grid_size: usize) -> impl Iterator<Item = CubePosition> {
        CubeFace::ALL.into_iter().flat_map(move |face| {
            (0..grid_size).flat_map(move |y| (0..grid_size).map(move |x| Self::new(face, x, y)))
        })
    }

    /// Total cell count over all six faces.
    pub fn cell_count(grid_size: usize) -> usize {
        6 * grid_size * grid_size
    }
}

/// Physical dimensions used to place grid cells in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    /// Edge length of the cube in world units.
    pub size: f32,
    /// Cells per face edge.
    pub grid_size: usize,
}

impl CubeConfig {
    /// Creates a config.
    pub const fn new(size: f32, grid_size: usize) -> Self {
        Self { size, grid_size }
    }

    /// World length of one cell.
    pub fn cell_size(&self) -> f32 {
        self.size / self.grid_size as f32
    }

    fn half(&self) -> f32 {
        self.size / 2.0
    }
}

/// World-space center of a cell, on the surface of a cube centered at the origin.
#[instrument(level = "trace")]
pub fn cube_to_world(position: CubePosition, config: &CubeConfig) -> Point3<f32> {
    let face = position.face;
    let half = config.half();
    let cell = config.cell_size();
    let u = (position.x as f32 + 0.5) * cell - half;
    let v = (position.y as f32 + 0.5) * cell - half;
    Point3::from_vec(face.normal() * half + face.right() * u + face.up() * v)
}

/// Snaps a world point to the nearest cell.
///
/// The point must lie within half a cell of some face plane; otherwise
/// `None`. Coordinates are clamped into the grid.
#[instrument(level = "trace")]
pub fn world_to_cube(point: Point3<f32>, config: &CubeConfig) -> Option<CubePosition> {
    let half = config.half();
    let cell = config.cell_size();
    let tolerance = cell / 2.0;
    let p: Vector3<f32> = point.to_vec();

    let face = CubeFace::ALL
        .into_iter()
        .map(|face| (face, (p.dot(face.normal()) - half).abs()))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(face, _)| face)?;

    let snap = |along: f32| -> usize {
        let cell_index = ((along + half) / cell).floor();
        cell_index.clamp(0.0, (config.grid_size - 1) as f32) as usize
    };
    Some(CubePosition::new(
        face,
        snap(p.dot(face.right())),
        snap(p.dot(face.up())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::Direction;
    use crate::{edge_transition, move_position};

    const CONFIG: CubeConfig = CubeConfig::new(10.0, 5);

    #[test]
    fn world_round_trips_every_cell() {
        for pos in CubePosition::all(5) {
            let world = cube_to_world(pos, &CONFIG);
            assert_eq!(world_to_cube(world, &CONFIG), Some(pos));
        }
    }

    #[test]
    fn center_of_cube_is_not_on_a_face() {
        assert_eq!(world_to_cube(Point3::new(0.0, 0.0, 0.0), &CONFIG), None);
    }

    #[test]
    fn packed_index_round_trips() {
        for (i, pos) in CubePosition::all(4).enumerate() {
            assert_eq!(pos.index(4), i);
            assert_eq!(CubePosition::from_index(i, 4), Some(pos));
        }
        assert_eq!(CubePosition::from_index(6 * 16, 4), None);
    }

    #[test]
    fn neighboring_boundary_cells_share_their_edge() {
        // The midpoint of the shared cell side must coincide in world space.
        let half_cell = CONFIG.cell_size() / 2.0;
        for pos in CubePosition::all(5) {
            for direction in Direction::ALL {
                let next = move_position(pos, direction.delta(), 5);
                if next.face == pos.face {
                    continue;
                }
                let exit = pos.face.edge_vector(direction.edge());
                let transition = edge_transition(pos.face, direction.edge());
                let entry = next.face.edge_vector(transition.to_edge);
                let a = cube_to_world(pos, &CONFIG) + exit * half_cell;
                let b = cube_to_world(next, &CONFIG) + entry * half_cell;
                assert!((a - b).magnitude() < 1e-4, "{pos} -> {next}");
            }
        }
    }
}
