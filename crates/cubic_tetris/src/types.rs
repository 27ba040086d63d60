//! Core domain types for the falling-tetracube game.

use cubic_game::Mulberry32;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Tunables for a tetris game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct TetrisConfig {
    /// Cells along x.
    width: usize,
    /// Cells along z.
    depth: usize,
    /// Cells along y (up).
    height: usize,
    /// Piece queue seed; random when absent.
    #[setters(strip_option)]
    seed: Option<u32>,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 6,
            depth: 6,
            height: 14,
            seed: None,
        }
    }
}

/// Integer voxel coordinate; `y` points up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[display("({x}, {y}, {z})")]
pub struct Voxel {
    /// Along the width.
    pub x: i32,
    /// Height above the floor.
    pub y: i32,
    /// Along the depth.
    pub z: i32,
}

impl Voxel {
    /// Creates a coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise sum.
    pub fn offset(self, by: Voxel) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.z + by.z)
    }

    /// One quarter turn about `axis`.
    pub fn rotated(self, axis: Axis) -> Self {
        let Voxel { x, y, z } = self;
        match axis {
            Axis::X => Self::new(x, -z, y),
            Axis::Y => Self::new(z, y, -x),
            Axis::Z => Self::new(-y, x, z),
        }
    }
}

/// Rotation axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// Left-right axis.
    X,
    /// Vertical axis.
    Y,
    /// Front-back axis.
    Z,
}

/// The nine four-voxel polycubes.
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
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TetracubeKind {
    /// Four in a row.
    I,
    /// Flat square.
    O,
    /// Three in a row with a center bump.
    T,
    /// Three in a row with a right hook.
    L,
    /// Three in a row with a left hook.
    J,
    /// Offset pair of dominoes.
    S,
    /// Mirror of `S`.
    Z,
    /// Three arms meeting at a corner.
    Tripod,
    /// Chiral twist.
    Screw,
}

impl TetracubeKind {
    /// Number of kinds.
    pub const COUNT: usize = 9;

    /// Voxel offsets from the pivot, unrotated.
    pub fn offsets(self) -> [Voxel; 4] {
        let v = Voxel::new;
        match self {
            TetracubeKind::I => [v(-1, 0, 0), v(0, 0, 0), v(1, 0, 0), v(2, 0, 0)],
            TetracubeKind::O => [v(0, 0, 0), v(1, 0, 0), v(0, 0, 1), v(1, 0, 1)],
            TetracubeKind::T => [v(-1, 0, 0), v(0, 0, 0), v(1, 0, 0), v(0, 0, 1)],
            TetracubeKind::L => [v(-1, 0, 0), v(0, 0, 0), v(1, 0, 0), v(1, 0, 1)],
            TetracubeKind::J => [v(-1, 0, 0), v(0, 0, 0), v(1, 0, 0), v(-1, 0, 1)],
            TetracubeKind::S => [v(-1, 0, 0), v(0, 0, 0), v(0, 0, 1), v(1, 0, 1)],
            TetracubeKind::Z => [v(-1, 0, 1), v(0, 0, 1), v(0, 0, 0), v(1, 0, 0)],
            TetracubeKind::Tripod => [v(0, 0, 0), v(1, 0, 0), v(0, 0, 1), v(0, 1, 0)],
            TetracubeKind::Screw => [v(0, 0, 0), v(1, 0, 0), v(0, 0, 1), v(1, 1, 0)],
        }
    }

    /// Display color.
    pub fn color(self) -> &'static str {
        match self {
            TetracubeKind::I => "#06b6d4",
            TetracubeKind::O => "#eab308",
            TetracubeKind::T => "#a855f7",
            TetracubeKind::L => "#f97316",
            TetracubeKind::J => "#3b82f6",
            TetracubeKind::S => "#22c55e",
            TetracubeKind::Z => "#ef4444",
            TetracubeKind::Tripod => "#ec4899",
            TetracubeKind::Screw => "#14b8a6",
        }
    }

    /// Draws a kind uniformly.
    pub fn random(rng: &mut Mulberry32) -> Self {
        Self::iter()
            .nth(rng.below(Self::COUNT))
            .unwrap_or(TetracubeKind::I)
    }
}

/// The piece under player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallingPiece {
    /// Shape.
    kind: TetracubeKind,
    /// Pivot position in the volume.
    position: Voxel,
    /// Rotation about x in degrees (0, 90, 180 or 270).
    rotation_x: u16,
    /// Rotation about y in degrees.
    rotation_y: u16,
    /// Rotation about z in degrees.
    rotation_z: u16,
}

impl FallingPiece {
    /// An unrotated piece at `position`.
    pub fn new(kind: TetracubeKind, position: Voxel) -> Self {
        Self {
            kind,
            position,
            rotation_x: 0,
            rotation_y: 0,
            rotation_z: 0,
        }
    }

    /// Occupied voxels: offsets rotated about x, then y, then z, then translated.
    pub fn cells(&self) -> [Voxel; 4] {
        self.kind.offsets().map(|offset| {
            let turns = [
                (Axis::X, self.rotation_x),
                (Axis::Y, self.rotation_y),
                (Axis::Z, self.rotation_z),
            ];
            turns
                .into_iter()
                .fold(offset, |voxel, (axis, degrees)| {
                    (0..degrees / 90).fold(voxel, |v, _| v.rotated(axis))
                })
                .offset(self.position)
        })
    }

    /// The same piece shifted by `by`.
    pub fn translated(&self, by: Voxel) -> Self {
        Self {
            position: self.position.offset(by),
            ..*self
        }
    }

    /// The same piece turned a further 90 degrees about `axis`.
    pub fn rotated(&self, axis: Axis) -> Self {
        let turn = |degrees: u16| (degrees + 90) % 360;
        let mut next = *self;
        match axis {
            Axis::X => next.rotation_x = turn(self.rotation_x),
            Axis::Y => next.rotation_y = turn(self.rotation_y),
            Axis::Z => next.rotation_z = turn(self.rotation_z),
        }
        next
    }
}

/// Complete tetris state.
///
/// The volume is stored densely, layer by layer: index
/// `(y * depth + z) * width + x`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TetrisState {
    /// Cells along x.
    pub(crate) width: usize,
    /// Cells along z.
    pub(crate) depth: usize,
    /// Cells along y.
    pub(crate) height: usize,
    /// Locked voxels, `None` when empty.
    pub(crate) grid: Vec<Option<TetracubeKind>>,
    /// Piece under control.
    pub(crate) current: FallingPiece,
    /// Upcoming piece.
    pub(crate) next: TetracubeKind,
    /// Piece set aside by a hold.
    pub(crate) held: Option<TetracubeKind>,
    /// A hold is allowed for the current piece.
    pub(crate) can_hold: bool,
    /// Points earned.
    pub(crate) score: u32,
    /// Current level, from 1.
    pub(crate) level: u32,
    /// Layers cleared so far.
    pub(crate) layers_cleared: u32,
    /// Gravity interval in milliseconds.
    pub(crate) speed: u64,
    /// Gravity is suspended.
    pub(crate) is_paused: bool,
    /// A new piece had no room.
    pub(crate) is_game_over: bool,
    /// Piece queue generator.
    pub(crate) rng: Mulberry32,
}

impl TetrisState {
    fn index(&self, voxel: Voxel) -> Option<usize> {
        let in_range = |value: i32, bound: usize| value >= 0 && (value as usize) < bound;
        (in_range(voxel.x, self.width) && in_range(voxel.y, self.height) && in_range(voxel.z, self.depth))
            .then(|| (voxel.y as usize * self.depth + voxel.z as usize) * self.width + voxel.x as usize)
    }

    /// Whether `voxel` lies inside the volume.
    pub fn in_bounds(&self, voxel: Voxel) -> bool {
        self.index(voxel).is_some()
    }

    /// Locked content at `voxel`; `None` when empty or out of bounds.
    pub fn voxel(&self, voxel: Voxel) -> Option<TetracubeKind> {
        self.index(voxel).and_then(|index| self.grid[index])
    }

    pub(crate) fn set_voxel(&mut self, voxel: Voxel, kind: TetracubeKind) {
        if let Some(index) = self.index(voxel) {
            self.grid[index] = Some(kind);
        }
    }

    /// Whether every cell of `piece` is inside the volume and unoccupied.
    pub fn fits(&self, piece: &FallingPiece) -> bool {
        piece
            .cells()
            .iter()
            .all(|cell| self.index(*cell).is_some_and(|index| self.grid[index].is_none()))
    }

    /// Voxels per horizontal layer.
    pub fn layer_len(&self) -> usize {
        self.width * self.depth
    }

    /// Whether layer `y` is completely filled.
    pub fn is_layer_full(&self, y: usize) -> bool {
        let start = y * self.layer_len();
        self.grid[start..start + self.layer_len()]
            .iter()
            .all(Option::is_some)
    }

    /// Filled voxels with their kinds.
    pub fn filled_voxels(&self) -> impl Iterator<Item = (Voxel, TetracubeKind)> + '_ {
        let (w, d) = (self.width, self.depth);
        self.grid.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|kind| {
                let x = index % w;
                let z = (index / w) % d;
                let y = index / (w * d);
                (Voxel::new(x as i32, y as i32, z as i32), kind)
            })
        })
    }
}
