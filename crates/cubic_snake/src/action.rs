//! Snake actions.

use cubic_topology::Direction;
use serde::{Deserialize, Serialize};

/// An input to the snake state machine.
///
/// Serialized as `{"type": "changeDirection", "payload": "up"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SnakeAction {
    /// Advance one cell (timer tick).
    #[display("move")]
    Move,
    /// Queue a turn for the next move.
    #[display("changeDirection({_0})")]
    ChangeDirection(Direction),
    /// Suspend ticking.
    #[display("pause")]
    Pause,
    /// Resume ticking.
    #[display("resume")]
    Resume,
}
