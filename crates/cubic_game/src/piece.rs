//! Flat render descriptions produced by games.

use cubic_topology::{CubeConfig, CubePosition, Point3, cube_to_world};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One thing to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identifier within one state.
    pub id: String,
    /// What the piece represents (`"snakeHead"`, `"mine"`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// World-space center.
    pub position: [f32; 3],
    /// Euler rotation in radians.
    pub rotation: [f32; 3],
    /// CSS-style hex color.
    pub color: String,
    /// Game-specific extras.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Piece {
    /// Creates an unrotated piece at a world position.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        position: Point3<f32>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position: position.into(),
            rotation: [0.0; 3],
            color: color.into(),
            metadata: Map::new(),
        }
    }

    /// Creates a piece lying flat on a cube cell.
    pub fn on_cell(
        kind: impl Into<String>,
        cell: CubePosition,
        cube: &CubeConfig,
        color: impl Into<String>,
    ) -> Self {
        let kind = kind.into();
        let id = format!("{kind}-{}-{}-{}", cell.face, cell.x, cell.y);
        let mut piece = Self::new(id, kind, cube_to_world(cell, cube), color);
        piece.rotation = cell.face.euler_rotation();
        piece
    }

    /// Replaces the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Adds one metadata entry.
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}
