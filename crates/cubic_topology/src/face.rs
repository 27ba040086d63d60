//! Faces, face edges and in-plane movement directions.
//!
//! Every face carries a fixed orthonormal frame: the outward `normal`, a
//! canonical `up`, and `right = up × normal`. Local grid coordinates run
//! along that frame: `x` grows toward `right`, `y` grows toward `up`.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// One of the six faces of the cube.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CubeFace {
    /// +Y face.
    Top,
    /// -Y face.
    Bottom,
    /// +Z face (faces the default camera).
    Front,
    /// -Z face.
    Back,
    /// -X face.
    Left,
    /// +X face.
    Right,
}

impl CubeFace {
    /// All six faces, in packing order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
    ];

    /// Position of this face in [`CubeFace::ALL`].
    pub fn index(self) -> usize {
        match self {
            CubeFace::Top => 0,
            CubeFace::Bottom => 1,
            CubeFace::Front => 2,
            CubeFace::Back => 3,
            CubeFace::Left => 4,
            CubeFace::Right => 5,
        }
    }

    /// Inverse of [`CubeFace::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vector3<f32> {
        match self {
            CubeFace::Top => Vector3::new(0.0, 1.0, 0.0),
            CubeFace::Bottom => Vector3::new(0.0, -1.0, 0.0),
            CubeFace::Front => Vector3::new(0.0, 0.0, 1.0),
            CubeFace::Back => Vector3::new(0.0, 0.0, -1.0),
            CubeFace::Left => Vector3::new(-1.0, 0.0, 0.0),
            CubeFace::Right => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// Canonical up vector; local `y` grows along it.
    pub fn up(self) -> Vector3<f32> {
        match self {
            CubeFace::Top => Vector3::new(0.0, 0.0, -1.0),
            CubeFace::Bottom => Vector3::new(0.0, 0.0, 1.0),
            CubeFace::Front | CubeFace::Back | CubeFace::Left | CubeFace::Right => {
                Vector3::new(0.0, 1.0, 0.0)
            }
        }
    }

    /// Right vector, `up × normal`; local `x` grows along it.
    pub fn right(self) -> Vector3<f32> {
        self.up().cross(self.normal())
    }

    /// World-space vector pointing out of this face across `edge`.
    pub fn edge_vector(self, edge: Edge) -> Vector3<f32> {
        match edge {
            Edge::Top => self.up(),
            Edge::Bottom => -self.up(),
            Edge::Right => self.right(),
            Edge::Left => -self.right(),
        }
    }

    /// Euler angles (XYZ, radians) that turn a +Z-facing quad onto this face.
    pub fn euler_rotation(self) -> [f32; 3] {
        match self {
            CubeFace::Front => [0.0, 0.0, 0.0],
            CubeFace::Back => [0.0, PI, 0.0],
            CubeFace::Right => [0.0, FRAC_PI_2, 0.0],
            CubeFace::Left => [0.0, -FRAC_PI_2, 0.0],
            CubeFace::Top => [-FRAC_PI_2, 0.0, 0.0],
            CubeFace::Bottom => [FRAC_PI_2, 0.0, 0.0],
        }
    }
}

/// One side of a face's square grid.
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
#[strum(serialize_all = "lowercase")]
pub enum Edge {
    /// `y == grid_size - 1`.
    Top,
    /// `y == 0`.
    Bottom,
    /// `x == 0`.
    Left,
    /// `x == grid_size - 1`.
    Right,
}

impl Edge {
    /// All four edges, in table order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Position of this edge in [`Edge::ALL`].
    pub fn index(self) -> usize {
        match self {
            Edge::Top => 0,
            Edge::Bottom => 1,
            Edge::Left => 2,
            Edge::Right => 3,
        }
    }

    /// Top and bottom edges run along `x`.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    /// Direction that leads away from this edge into the face.
    pub fn inward(self) -> Direction {
        match self {
            Edge::Top => Direction::Down,
            Edge::Bottom => Direction::Up,
            Edge::Left => Direction::Right,
            Edge::Right => Direction::Left,
        }
    }
}

/// A movement direction in a face's local frame.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Toward +y.
    Up,
    /// Toward -y.
    Down,
    /// Toward -x.
    Left,
    /// Toward +x.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit grid delta.
    pub fn delta(self) -> Delta {
        match self {
            Direction::Up => Delta::new(0, 1),
            Direction::Down => Delta::new(0, -1),
            Direction::Left => Delta::new(-1, 0),
            Direction::Right => Delta::new(1, 0),
        }
    }

    /// The reverse direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The edge this direction exits through.
    pub fn edge(self) -> Edge {
        match self {
            Direction::Up => Edge::Top,
            Direction::Down => Edge::Bottom,
            Direction::Left => Edge::Left,
            Direction::Right => Edge::Right,
        }
    }

    /// Rotates counter-clockwise (seen from outside the cube) by quarter turns.
    pub fn rotated_ccw(self, quarter_turns: u8) -> Self {
        const CCW: [Direction; 4] = [
            Direction::Right,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ];
        let start = match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        };
        CCW[(start + quarter_turns as usize) % 4]
    }
}

/// A signed step on a face grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    /// Step along local `x`.
    pub dx: i32,
    /// Step along local `y`.
    pub dy: i32,
}

impl Delta {
    /// Creates a delta.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// The four diagonal unit deltas.
    pub const DIAGONALS: [Delta; 4] = [
        Delta::new(-1, -1),
        Delta::new(1, -1),
        Delta::new(-1, 1),
        Delta::new(1, 1),
    ];
}
