//! Game logic and rules for cube nonograms.

use crate::action::NonogramAction;
use crate::clues::cube_clues;
use crate::generator::generate_solution;
use crate::types::{CellState, NonogramConfig, NonogramState};
use cubic_game::{Game, GameMetadata, GameStatus, Piece, random_seed};
use cubic_topology::{CubeConfig, CubeFace, CubePosition, Point3};
use tracing::{debug, info, instrument};

const UNKNOWN_COLOR: &str = "#cbd5e1";
const FILLED_COLOR: &str = "#0f172a";
const EMPTY_COLOR: &str = "#f8fafc";
const CLUE_COLOR: &str = "#334155";

/// Nonogram engine.
#[derive(Debug, Clone)]
pub struct NonogramGame {
    config: NonogramConfig,
    seed: u32,
    metadata: GameMetadata,
}

impl NonogramGame {
    /// Creates a game; a missing seed is drawn at random.
    #[instrument]
    pub fn new(config: NonogramConfig) -> Self {
        let seed = (*config.seed()).unwrap_or_else(random_seed);
        let metadata = GameMetadata::new(
            "nonogram".to_string(),
            "Nonogram".to_string(),
            *config.grid_size(),
            1,
            6,
        );
        Self {
            config,
            seed,
            metadata,
        }
    }

    /// Seed that reproduces this puzzle.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for NonogramGame {
    fn default() -> Self {
        Self::new(NonogramConfig::default())
    }
}

fn settle(state: &mut NonogramState) {
    if state.remaining() == 0 {
        info!(mistakes = state.mistakes, "Nonogram solved");
        state.is_won = true;
        state.is_game_over = true;
    } else if state.max_mistakes > 0 && state.mistakes >= state.max_mistakes {
        info!(mistakes = state.mistakes, "Out of mistakes");
        state.is_game_over = true;
    }
}

impl Game for NonogramGame {
    type State = NonogramState;
    type Action = NonogramAction;

    fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }

    #[instrument(skip(self), fields(seed = self.seed, strategy = %self.config.strategy()))]
    fn init(&self) -> NonogramState {
        let n = *self.config.grid_size();
        let strategy = *self.config.strategy();
        let solution = generate_solution(n, strategy, self.seed);
        let clues = cube_clues(&solution, n);
        info!(
            filled = solution.iter().filter(|cell| **cell).count(),
            "Puzzle generated"
        );
        NonogramState {
            grid_size: n,
            cells: vec![CellState::Unknown; solution.len()],
            solution,
            clues,
            mistakes: 0,
            max_mistakes: *self.config.max_mistakes(),
            is_won: false,
            is_game_over: false,
            seed: self.seed,
            strategy,
        }
    }

    fn is_valid_action(&self, state: &NonogramState, action: &NonogramAction) -> bool {
        let pos = action.position();
        if state.is_game_over || !pos.is_valid(state.grid_size) {
            return false;
        }
        let cell = state.cell(pos);
        match action {
            NonogramAction::Fill(_) | NonogramAction::MarkEmpty(_) | NonogramAction::Hint(_) => {
                cell == CellState::Unknown
            }
            NonogramAction::Clear(_) => cell != CellState::Unknown,
        }
    }

    #[instrument(skip(self, state), fields(%action))]
    fn apply_action(&self, state: &NonogramState, action: &NonogramAction) -> NonogramState {
        let mut next = state.clone();
        if !self.is_valid_action(state, action) {
            debug!("Ignoring invalid nonogram action");
            return next;
        }

        let pos = action.position();
        let index = pos.index(next.grid_size);
        let truth = next.solution[index];
        next.cells[index] = match action {
            NonogramAction::Fill(_) if truth => CellState::Filled,
            NonogramAction::Fill(_) => {
                next.mistakes += 1;
                debug!(mistakes = next.mistakes, "Wrong fill");
                CellState::Empty
            }
            NonogramAction::MarkEmpty(_) => CellState::Empty,
            NonogramAction::Clear(_) => CellState::Unknown,
            NonogramAction::Hint(_) if truth => CellState::Filled,
            NonogramAction::Hint(_) => CellState::Empty,
        };

        settle(&mut next);
        next
    }

    fn check_game_over(&self, state: &NonogramState) -> GameStatus {
        match (state.is_game_over, state.is_won) {
            (false, _) => GameStatus::InProgress,
            (true, true) => GameStatus::Won,
            (true, false) => GameStatus::Lost,
        }
    }

    fn valid_actions(&self, state: &NonogramState) -> Vec<NonogramAction> {
        CubePosition::all(state.grid_size)
            .flat_map(|pos| {
                [
                    NonogramAction::Fill(pos),
                    NonogramAction::MarkEmpty(pos),
                    NonogramAction::Clear(pos),
                    NonogramAction::Hint(pos),
                ]
            })
            .filter(|action| self.is_valid_action(state, action))
            .collect()
    }

    fn pieces(&self, state: &NonogramState) -> Vec<Piece> {
        let n = state.grid_size;
        let cube = CubeConfig::new(n as f32, n);
        let mut pieces: Vec<Piece> = CubePosition::all(n)
            .map(|pos| match state.cell(pos) {
                CellState::Unknown => Piece::on_cell("unknown", pos, &cube, UNKNOWN_COLOR),
                CellState::Filled => Piece::on_cell("filled", pos, &cube, FILLED_COLOR),
                CellState::Empty => Piece::on_cell("empty", pos, &cube, EMPTY_COLOR),
            })
            .collect();

        for face in CubeFace::ALL {
            let clues = state.face_clues(face);
            let center = face.normal() * (cube.size / 2.0);
            pieces.push(
                Piece::new(
                    format!("clues-{face}"),
                    "clues",
                    Point3::new(center.x, center.y, center.z),
                    CLUE_COLOR,
                )
                .with_meta("face", face.to_string())
                .with_meta("rows", clues.rows.clone())
                .with_meta("columns", clues.columns.clone()),
            );
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clues::calculate_line_clue;
    use crate::types::GenerationStrategy;
    use strum::IntoEnumIterator;

    fn game(seed: u32) -> NonogramGame {
        NonogramGame::new(NonogramConfig::default().with_seed(seed))
    }

    fn picture(state: &NonogramState) -> Vec<CubePosition> {
        CubePosition::all(*state.grid_size())
            .filter(|pos| state.is_solution(*pos))
            .collect()
    }

    #[test]
    fn clues_match_the_picture() {
        for strategy in GenerationStrategy::iter() {
            let game = NonogramGame::new(
                NonogramConfig::default()
                    .with_grid_size(6)
                    .with_strategy(strategy)
                    .with_seed(17),
            );
            let state = game.init();
            let n = 6;
            for face in CubeFace::ALL {
                let clues = state.face_clues(face);
                for y in 0..n {
                    let row: Vec<bool> = (0..n)
                        .map(|x| state.is_solution(CubePosition::new(face, x, y)))
                        .collect();
                    assert_eq!(clues.rows[y], calculate_line_clue(&row), "{strategy} {face} row {y}");
                }
                for x in 0..n {
                    let column: Vec<bool> = (0..n)
                        .map(|y| state.is_solution(CubePosition::new(face, x, y)))
                        .collect();
                    assert_eq!(clues.columns[x], calculate_line_clue(&column));
                }
            }
        }
    }

    #[test]
    fn filling_the_picture_wins() {
        let game = game(2024);
        let start = game.init();
        let cells = picture(&start);
        let solved = cells.iter().fold(start, |state, pos| {
            game.apply_action(&state, &NonogramAction::Fill(*pos))
        });
        assert_eq!(game.check_game_over(&solved), GameStatus::Won);
        assert_eq!(solved.mistakes(), &0);
        assert!(game.valid_actions(&solved).is_empty());
    }

    #[test]
    fn wrong_fills_count_and_lose() {
        let game = game(7);
        let mut state = game.init();
        let blanks: Vec<CubePosition> = CubePosition::all(5)
            .filter(|pos| !state.is_solution(*pos))
            .take(3)
            .collect();
        for (i, pos) in blanks.iter().enumerate() {
            state = game.apply_action(&state, &NonogramAction::Fill(*pos));
            assert_eq!(state.cell(*pos), CellState::Empty);
            assert_eq!(state.mistakes(), &(i as u32 + 1));
        }
        assert_eq!(game.check_game_over(&state), GameStatus::Lost);
    }

    #[test]
    fn marks_clear_and_hints_reveal() {
        let game = game(11);
        let state = game.init();
        let filled = picture(&state)[0];
        let marked = game.apply_action(&state, &NonogramAction::MarkEmpty(filled));
        assert_eq!(marked.cell(filled), CellState::Empty);
        assert_eq!(marked.mistakes(), &0);
        assert!(!game.is_valid_action(&marked, &NonogramAction::Fill(filled)));

        let cleared = game.apply_action(&marked, &NonogramAction::Clear(filled));
        assert_eq!(cleared.cell(filled), CellState::Unknown);

        let hinted = game.apply_action(&cleared, &NonogramAction::Hint(filled));
        assert_eq!(hinted.cell(filled), CellState::Filled);
        assert_eq!(hinted.mistakes(), &0);
    }

    #[test]
    fn same_seed_same_puzzle() {
        assert_eq!(game(31).init(), game(31).init());
    }
}
