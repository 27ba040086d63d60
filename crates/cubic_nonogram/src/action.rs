//! Nonogram actions.

use cubic_topology::CubePosition;
use serde::{Deserialize, Serialize};

/// A player action on one cell.
///
/// Serialized as `{"type": "markEmpty", "payload": {"face": "TOP", "x": 0, "y": 3}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum NonogramAction {
    /// Claim the cell is part of the picture.
    #[display("fill {_0}")]
    Fill(CubePosition),
    /// Claim the cell is blank.
    #[display("markEmpty {_0}")]
    MarkEmpty(CubePosition),
    /// Remove a mark.
    #[display("clear {_0}")]
    Clear(CubePosition),
    /// Reveal the true state of the cell.
    #[display("hint {_0}")]
    Hint(CubePosition),
}

impl NonogramAction {
    /// The targeted cell.
    pub fn position(&self) -> CubePosition {
        match self {
            NonogramAction::Fill(pos)
            | NonogramAction::MarkEmpty(pos)
            | NonogramAction::Clear(pos)
            | NonogramAction::Hint(pos) => *pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubic_topology::CubeFace;

    #[test]
    fn parses_tagged_json() {
        let json = r#"{"type":"markEmpty","payload":{"face":"TOP","x":0,"y":3}}"#;
        let action: NonogramAction = serde_json::from_str(json).unwrap();
        assert_eq!(action, NonogramAction::MarkEmpty(CubePosition::new(CubeFace::Top, 0, 3)));
    }
}
