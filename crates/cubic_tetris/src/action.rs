//! Tetris actions.

use crate::types::{Axis, Voxel};
use serde::{Deserialize, Serialize};

/// Horizontal shift of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Shift {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
    /// Toward negative z.
    Forward,
    /// Toward positive z.
    Back,
}

impl Shift {
    /// All four shifts.
    pub const ALL: [Shift; 4] = [Shift::Left, Shift::Right, Shift::Forward, Shift::Back];

    /// Translation applied to the pivot.
    pub fn delta(self) -> Voxel {
        match self {
            Shift::Left => Voxel::new(-1, 0, 0),
            Shift::Right => Voxel::new(1, 0, 0),
            Shift::Forward => Voxel::new(0, 0, -1),
            Shift::Back => Voxel::new(0, 0, 1),
        }
    }
}

/// An input to the tetris state machine.
///
/// Serialized as `{"type": "rotate", "payload": "y"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TetrisAction {
    /// Slide one cell horizontally.
    #[display("move({_0})")]
    Move(Shift),
    /// Quarter turn about an axis, with wall kicks.
    #[display("rotate({_0})")]
    Rotate(Axis),
    /// Gravity step (timer tick).
    #[display("tick")]
    Tick,
    /// Player-driven gravity step.
    #[display("softDrop")]
    SoftDrop,
    /// Drop to the floor and lock.
    #[display("hardDrop")]
    HardDrop,
    /// Swap with the held piece.
    #[display("hold")]
    Hold,
    /// Suspend gravity.
    #[display("pause")]
    Pause,
    /// Resume gravity.
    #[display("resume")]
    Resume,
}
