//! Core domain types for cube minesweeper.

use cubic_topology::{CubePosition, all_neighbors};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Tunables for a minesweeper game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct MinesweeperConfig {
    /// Cells per face edge.
    grid_size: usize,
    /// Mines across all six faces.
    mine_count: usize,
    /// Mine placement seed; random when absent.
    #[setters(strip_option)]
    seed: Option<u64>,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            grid_size: 6,
            mine_count: 30,
            seed: None,
        }
    }
}

/// One cell of the minefield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineCell {
    /// Holds a mine.
    pub is_mine: bool,
    /// Has been uncovered.
    pub is_revealed: bool,
    /// Carries a flag.
    pub is_flagged: bool,
    /// Mines among the cube-aware neighbors.
    pub adjacent_mines: u8,
}

/// Complete minesweeper state.
///
/// Cells are stored densely, indexed by [`CubePosition::index`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinesweeperState {
    /// Cells per face edge.
    pub(crate) grid_size: usize,
    /// Every cell on the cube.
    pub(crate) cells: Vec<MineCell>,
    /// Mines on the board (the requested count until mines are placed).
    pub(crate) total_mines: usize,
    /// Flags currently placed.
    pub(crate) flags_placed: usize,
    /// Non-mine cells uncovered.
    pub(crate) revealed_count: usize,
    /// Mines are not placed until the first reveal.
    pub(crate) first_click: bool,
    /// Play has ended.
    pub(crate) is_game_over: bool,
    /// Every safe cell is uncovered.
    pub(crate) is_won: bool,
    /// The mine that ended the game.
    pub(crate) exploded: Option<CubePosition>,
    /// Seed for mine placement.
    pub(crate) seed: u64,
}

impl MinesweeperState {
    /// An empty, unplaced board.
    ///
    /// The mine count is capped so at least one cell stays safe.
    pub fn new(grid_size: usize, total_mines: usize, seed: u64) -> Self {
        let cell_count = CubePosition::cell_count(grid_size);
        Self {
            grid_size,
            cells: vec![MineCell::default(); cell_count],
            total_mines: total_mines.min(cell_count.saturating_sub(1)),
            flags_placed: 0,
            revealed_count: 0,
            first_click: true,
            is_game_over: false,
            is_won: false,
            exploded: None,
            seed,
        }
    }

    /// A board with mines at exactly `mines`, ready for play.
    pub fn with_mines(grid_size: usize, mines: &[CubePosition]) -> Self {
        let mut state = Self::new(grid_size, 0, 0);
        for mine in mines {
            let index = mine.index(grid_size);
            if !state.cells[index].is_mine {
                state.cells[index].is_mine = true;
                state.total_mines += 1;
            }
        }
        state.first_click = false;
        state.count_adjacent_mines();
        state
    }

    /// The cell at `position`.
    pub fn cell(&self, position: CubePosition) -> &MineCell {
        &self.cells[position.index(self.grid_size)]
    }

    pub(crate) fn cell_mut(&mut self, position: CubePosition) -> &mut MineCell {
        let index = position.index(self.grid_size);
        &mut self.cells[index]
    }

    /// Non-mine cells that must be uncovered to win.
    pub fn safe_cell_count(&self) -> usize {
        self.cells.len().saturating_sub(self.total_mines)
    }

    /// Mines not yet accounted for by flags (may go negative).
    pub fn mines_remaining(&self) -> i64 {
        self.total_mines as i64 - self.flags_placed as i64
    }

    /// Positions of every mine.
    pub fn mine_positions(&self) -> impl Iterator<Item = CubePosition> + '_ {
        CubePosition::all(self.grid_size).filter(|pos| self.cell(*pos).is_mine)
    }

    pub(crate) fn count_adjacent_mines(&mut self) {
        let n = self.grid_size;
        for pos in CubePosition::all(n) {
            let count = all_neighbors(pos, n)
                .into_iter()
                .filter(|neighbor| self.cell(*neighbor).is_mine)
                .count();
            self.cell_mut(pos).adjacent_mines = count as u8;
        }
    }
}
