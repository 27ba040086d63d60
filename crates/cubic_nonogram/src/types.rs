//! Core domain types for cube nonograms.

use cubic_topology::{CubeFace, CubePosition};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// How face patterns are produced.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GenerationStrategy {
    /// Random fill smoothed by a cellular automaton.
    Noise,
    /// One random quadrant mirrored onto the other three.
    Symmetric,
    /// Organic shapes grown from a few seeds.
    Blob,
    /// Stripes, diagonals and crosses.
    Lines,
    /// A different strategy per face.
    #[default]
    Mixed,
}

/// Tunables for a nonogram game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct NonogramConfig {
    /// Cells per face edge.
    grid_size: usize,
    /// Pattern generator.
    strategy: GenerationStrategy,
    /// Wrong fills allowed before the game is lost.
    max_mistakes: u32,
    /// Puzzle seed; random when absent.
    #[setters(strip_option)]
    seed: Option<u32>,
}

impl Default for NonogramConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            strategy: GenerationStrategy::Mixed,
            max_mistakes: 3,
            seed: None,
        }
    }
}

/// What the player has marked on a cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CellState {
    /// Not yet decided.
    #[default]
    Unknown,
    /// Marked as part of the picture.
    Filled,
    /// Marked as blank.
    Empty,
}

/// Row and column clues of one face.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceClues {
    /// Clue for row `y`, read along increasing `x`.
    pub rows: Vec<Vec<usize>>,
    /// Clue for column `x`, read along increasing `y`.
    pub columns: Vec<Vec<usize>>,
}

/// Complete nonogram state.
///
/// Solution and player marks are stored densely, indexed by
/// [`CubePosition::index`]; clues are indexed by [`CubeFace::index`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonogramState {
    /// Cells per face edge.
    pub(crate) grid_size: usize,
    /// The hidden picture.
    pub(crate) solution: Vec<bool>,
    /// Player marks.
    pub(crate) cells: Vec<CellState>,
    /// Clues per face.
    pub(crate) clues: Vec<FaceClues>,
    /// Wrong fills so far.
    pub(crate) mistakes: u32,
    /// Wrong fills that end the game.
    pub(crate) max_mistakes: u32,
    /// Every picture cell is filled.
    pub(crate) is_won: bool,
    /// Play has ended.
    pub(crate) is_game_over: bool,
    /// Seed that generated the picture.
    pub(crate) seed: u32,
    /// Strategy that generated the picture.
    pub(crate) strategy: GenerationStrategy,
}

impl NonogramState {
    /// Player mark at `position`.
    pub fn cell(&self, position: CubePosition) -> CellState {
        self.cells[position.index(self.grid_size)]
    }

    /// Whether `position` is part of the picture.
    pub fn is_solution(&self, position: CubePosition) -> bool {
        self.solution[position.index(self.grid_size)]
    }

    /// Clues for `face`.
    pub fn face_clues(&self, face: CubeFace) -> &FaceClues {
        &self.clues[face.index()]
    }

    /// Picture cells still to be filled.
    pub fn remaining(&self) -> usize {
        self.solution
            .iter()
            .zip(&self.cells)
            .filter(|(solution, cell)| **solution && **cell != CellState::Filled)
            .count()
    }
}
