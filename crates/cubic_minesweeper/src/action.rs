//! Minesweeper actions.

use cubic_topology::CubePosition;
use serde::{Deserialize, Serialize};

/// A player action on one cell.
///
/// Serialized as `{"type": "reveal", "payload": {"face": "FRONT", "x": 1, "y": 2}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum MinesweeperAction {
    /// Uncover a cell.
    #[display("reveal {_0}")]
    Reveal(CubePosition),
    /// Toggle a flag on a covered cell.
    #[display("flag {_0}")]
    Flag(CubePosition),
    /// Uncover the unflagged neighbors of a satisfied number.
    #[display("chord {_0}")]
    Chord(CubePosition),
}

impl MinesweeperAction {
    /// The targeted cell.
    pub fn position(&self) -> CubePosition {
        match self {
            MinesweeperAction::Reveal(pos)
            | MinesweeperAction::Flag(pos)
            | MinesweeperAction::Chord(pos) => *pos,
        }
    }
}
