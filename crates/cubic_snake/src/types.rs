//! Core domain types for cube snake.

use cubic_game::Mulberry32;
use cubic_topology::{CubeFace, CubePosition, Direction, Vector3, visual_rotation};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Tunables for a snake game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SnakeConfig {
    /// Cells per face edge.
    grid_size: usize,
    /// Tick interval at score zero.
    initial_speed_ms: u64,
    /// Fastest allowed tick interval.
    min_speed_ms: u64,
    /// Interval reduction per 50 points.
    speed_step_ms: u64,
    /// Food placement seed; random when absent.
    #[setters(strip_option)]
    seed: Option<u32>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            initial_speed_ms: 200,
            min_speed_ms: 80,
            speed_step_ms: 20,
            seed: None,
        }
    }
}

/// Complete snake state.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeState {
    /// Body segments, head first.
    pub(crate) snake: Vec<CubePosition>,
    /// Direction of the last completed move.
    pub(crate) direction: Direction,
    /// Direction the next move will take.
    pub(crate) next_direction: Direction,
    /// Current food cell.
    pub(crate) food: CubePosition,
    /// Points earned.
    pub(crate) score: u32,
    /// Current tick interval in milliseconds.
    pub(crate) speed: u64,
    /// The snake has collided with itself.
    pub(crate) is_game_over: bool,
    /// Ticks are suspended.
    pub(crate) is_paused: bool,
    /// Camera up vector, carried across face transitions.
    pub(crate) camera_up: Vector3<f32>,
    /// Food placement generator.
    pub(crate) rng: Mulberry32,
}

impl SnakeState {
    /// The head segment.
    pub fn head(&self) -> CubePosition {
        self.snake[0]
    }

    /// Face the head is on.
    pub fn head_face(&self) -> CubeFace {
        self.head().face
    }

    /// Converts a direction pressed on screen into the head face's local frame.
    pub fn local_direction(&self, screen: Direction) -> Direction {
        screen.rotated_ccw(visual_rotation(self.head_face(), self.camera_up))
    }

    /// Replaces the body and heading, keeping everything else.
    ///
    /// Used to set up scenarios; `body` must be non-empty, head first.
    pub fn with_body(mut self, body: Vec<CubePosition>, direction: Direction) -> Self {
        self.snake = body;
        self.direction = direction;
        self.next_direction = direction;
        self
    }

    /// Moves the food to `food`.
    pub fn with_food(mut self, food: CubePosition) -> Self {
        self.food = food;
        self
    }
}
