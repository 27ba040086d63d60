//! Game logic and rules for cube minesweeper.

use crate::action::MinesweeperAction;
use crate::types::{MinesweeperConfig, MinesweeperState};
use cubic_game::{Game, GameMetadata, GameStatus, Piece, random_seed};
use cubic_topology::{CubeConfig, CubePosition, all_neighbors};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

const HIDDEN_COLOR: &str = "#64748b";
const REVEALED_COLOR: &str = "#e2e8f0";
const FLAG_COLOR: &str = "#f59e0b";
const MINE_COLOR: &str = "#1e293b";
const EXPLODED_COLOR: &str = "#dc2626";

/// Minesweeper engine.
#[derive(Debug, Clone)]
pub struct MinesweeperGame {
    config: MinesweeperConfig,
    seed: u64,
    metadata: GameMetadata,
}

impl MinesweeperGame {
    /// Creates a game; a missing seed is drawn at random.
    #[instrument]
    pub fn new(config: MinesweeperConfig) -> Self {
        let seed = (*config.seed()).unwrap_or_else(|| u64::from(random_seed()));
        let metadata = GameMetadata::new(
            "minesweeper".to_string(),
            "Minesweeper".to_string(),
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

    /// Seed used for mine placement.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for MinesweeperGame {
    fn default() -> Self {
        Self::new(MinesweeperConfig::default())
    }
}

/// Places mines anywhere except `safe` and its neighbors, then numbers the board.
///
/// Candidates are shuffled with a Fisher-Yates pass driven by the state's
/// seed, so placement depends only on the state and the first click.
#[instrument(skip(state), fields(seed = state.seed))]
pub fn place_mines(state: &mut MinesweeperState, safe: CubePosition) {
    let n = state.grid_size;
    let mut excluded = all_neighbors(safe, n);
    excluded.push(safe);

    let mut candidates: Vec<CubePosition> = CubePosition::all(n)
        .filter(|pos| !excluded.contains(pos))
        .collect();
    let mut rng = ChaCha8Rng::seed_from_u64(state.seed);
    candidates.shuffle(&mut rng);

    let count = state.total_mines.min(candidates.len());
    for mine in &candidates[..count] {
        state.cell_mut(*mine).is_mine = true;
    }
    state.total_mines = count;
    state.count_adjacent_mines();
    state.first_click = false;
    debug!(mines = count, %safe, "Mines placed");
}

/// Uncovers `start` and, through zero cells, everything reachable from it.
///
/// Iterative: cells with no adjacent mines push their neighbors. Flagged,
/// already revealed and mined cells stop the spread.
pub fn flood_reveal(state: &mut MinesweeperState, start: CubePosition) {
    let n = state.grid_size;
    let mut visited = vec![false; state.cells.len()];
    let mut stack = vec![start];

    while let Some(pos) = stack.pop() {
        let index = pos.index(n);
        if visited[index] {
            continue;
        }
        visited[index] = true;

        let cell = state.cells[index];
        if cell.is_flagged || cell.is_revealed || cell.is_mine {
            continue;
        }
        state.cells[index].is_revealed = true;
        state.revealed_count += 1;

        if cell.adjacent_mines == 0 {
            stack.extend(
                all_neighbors(pos, n)
                    .into_iter()
                    .filter(|neighbor| !visited[neighbor.index(n)]),
            );
        }
    }
}

fn explode(state: &mut MinesweeperState, mine: CubePosition) {
    info!(%mine, "Mine exploded");
    state.is_game_over = true;
    state.exploded = Some(mine);
    for cell in state.cells.iter_mut().filter(|cell| cell.is_mine) {
        cell.is_revealed = true;
    }
}

fn check_win(state: &mut MinesweeperState) {
    if !state.first_click && !state.is_game_over && state.revealed_count == state.safe_cell_count() {
        info!(revealed = state.revealed_count, "Minefield cleared");
        state.is_won = true;
        state.is_game_over = true;
    }
}

impl Game for MinesweeperGame {
    type State = MinesweeperState;
    type Action = MinesweeperAction;

    fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }

    #[instrument(skip(self), fields(seed = self.seed))]
    fn init(&self) -> MinesweeperState {
        MinesweeperState::new(*self.config.grid_size(), *self.config.mine_count(), self.seed)
    }

    fn is_valid_action(&self, state: &MinesweeperState, action: &MinesweeperAction) -> bool {
        let pos = action.position();
        if state.is_game_over || !pos.is_valid(state.grid_size) {
            return false;
        }
        let cell = state.cell(pos);
        match action {
            MinesweeperAction::Reveal(_) => !cell.is_revealed && !cell.is_flagged,
            MinesweeperAction::Flag(_) => !cell.is_revealed,
            MinesweeperAction::Chord(_) => {
                !state.first_click && cell.is_revealed && cell.adjacent_mines > 0
            }
        }
    }

    #[instrument(skip(self, state), fields(%action))]
    fn apply_action(&self, state: &MinesweeperState, action: &MinesweeperAction) -> MinesweeperState {
        let mut next = state.clone();
        if !self.is_valid_action(state, action) {
            debug!("Ignoring invalid minesweeper action");
            return next;
        }

        match *action {
            MinesweeperAction::Reveal(pos) => {
                if next.first_click {
                    place_mines(&mut next, pos);
                }
                if next.cell(pos).is_mine {
                    explode(&mut next, pos);
                } else {
                    flood_reveal(&mut next, pos);
                }
            }
            MinesweeperAction::Flag(pos) => {
                let cell = next.cell_mut(pos);
                cell.is_flagged = !cell.is_flagged;
                if cell.is_flagged {
                    next.flags_placed += 1;
                } else {
                    next.flags_placed -= 1;
                }
            }
            MinesweeperAction::Chord(pos) => {
                let n = next.grid_size;
                let neighbors = all_neighbors(pos, n);
                let flagged = neighbors
                    .iter()
                    .filter(|neighbor| next.cell(**neighbor).is_flagged)
                    .count();
                if flagged != usize::from(next.cell(pos).adjacent_mines) {
                    debug!(flagged, "Chord not satisfied");
                    return next;
                }
                for neighbor in neighbors {
                    let cell = *next.cell(neighbor);
                    if cell.is_flagged || cell.is_revealed {
                        continue;
                    }
                    if cell.is_mine {
                        explode(&mut next, neighbor);
                        break;
                    }
                    flood_reveal(&mut next, neighbor);
                }
            }
        }

        check_win(&mut next);
        next
    }

    fn check_game_over(&self, state: &MinesweeperState) -> GameStatus {
        match (state.is_game_over, state.is_won) {
            (false, _) => GameStatus::InProgress,
            (true, true) => GameStatus::Won,
            (true, false) => GameStatus::Lost,
        }
    }

    fn valid_actions(&self, state: &MinesweeperState) -> Vec<MinesweeperAction> {
        CubePosition::all(state.grid_size)
            .flat_map(|pos| {
                [
                    MinesweeperAction::Reveal(pos),
                    MinesweeperAction::Flag(pos),
                    MinesweeperAction::Chord(pos),
                ]
            })
            .filter(|action| self.is_valid_action(state, action))
            .collect()
    }

    fn pieces(&self, state: &MinesweeperState) -> Vec<Piece> {
        let n = state.grid_size;
        let cube = CubeConfig::new(n as f32, n);
        CubePosition::all(n)
            .map(|pos| {
                let cell = state.cell(pos);
                if cell.is_revealed && cell.is_mine {
                    let exploded = state.exploded == Some(pos);
                    let color = if exploded { EXPLODED_COLOR } else { MINE_COLOR };
                    Piece::on_cell("mine", pos, &cube, color).with_meta("exploded", exploded)
                } else if cell.is_revealed {
                    Piece::on_cell("revealed", pos, &cube, REVEALED_COLOR)
                        .with_meta("adjacentMines", cell.adjacent_mines)
                } else if cell.is_flagged {
                    Piece::on_cell("flag", pos, &cube, FLAG_COLOR)
                } else {
                    Piece::on_cell("hidden", pos, &cube, HIDDEN_COLOR)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubic_topology::CubeFace;

    fn game() -> MinesweeperGame {
        MinesweeperGame::new(
            MinesweeperConfig::default()
                .with_grid_size(4)
                .with_mine_count(12)
                .with_seed(7),
        )
    }

    #[test]
    fn first_reveal_is_always_safe() {
        let game = game();
        for start in [
            CubePosition::new(CubeFace::Front, 0, 0),
            CubePosition::new(CubeFace::Top, 2, 3),
            CubePosition::new(CubeFace::Back, 1, 1),
        ] {
            let state = game.apply_action(&game.init(), &MinesweeperAction::Reveal(start));
            assert!(!state.cell(start).is_mine);
            for neighbor in all_neighbors(start, 4) {
                assert!(!state.cell(neighbor).is_mine, "{neighbor} next to {start}");
            }
            assert_eq!(state.mine_positions().count(), 12);
            assert_eq!(game.check_game_over(&state), GameStatus::InProgress);
        }
    }

    #[test]
    fn flagging_an_unplaced_crowded_board_keeps_playing() {
        let flag = MinesweeperAction::Flag(CubePosition::new(CubeFace::Front, 0, 0));
        for mine_count in [24, 30] {
            let game = MinesweeperGame::new(
                MinesweeperConfig::default()
                    .with_grid_size(2)
                    .with_mine_count(mine_count)
                    .with_seed(3),
            );
            let start = game.init();
            assert_eq!(start.total_mines(), &23);
            let flagged = game.apply_action(&start, &flag);
            assert_eq!(game.check_game_over(&flagged), GameStatus::InProgress);
            assert_eq!(flagged.mines_remaining(), 22);
        }
    }

    #[test]
    fn placement_is_reproducible() {
        let game = game();
        let start = MinesweeperAction::Reveal(CubePosition::new(CubeFace::Left, 1, 2));
        assert_eq!(
            game.apply_action(&game.init(), &start),
            game.apply_action(&game.init(), &start)
        );
    }

    #[test]
    fn flag_toggles_and_counts() {
        let game = game();
        let pos = CubePosition::new(CubeFace::Front, 1, 1);
        let flagged = game.apply_action(&game.init(), &MinesweeperAction::Flag(pos));
        assert!(flagged.cell(pos).is_flagged);
        assert_eq!(flagged.flags_placed(), &1);
        assert!(!game.is_valid_action(&flagged, &MinesweeperAction::Reveal(pos)));
        let cleared = game.apply_action(&flagged, &MinesweeperAction::Flag(pos));
        assert!(!cleared.cell(pos).is_flagged);
        assert_eq!(cleared.flags_placed(), &0);
    }

    #[test]
    fn revealing_a_mine_loses() {
        let game = game();
        let mine = CubePosition::new(CubeFace::Front, 3, 3);
        let state = MinesweeperState::with_mines(4, &[mine]);
        let lost = game.apply_action(&state, &MinesweeperAction::Reveal(mine));
        assert_eq!(game.check_game_over(&lost), GameStatus::Lost);
        assert_eq!(lost.exploded(), &Some(mine));
        assert!(lost.cell(mine).is_revealed);
    }

    #[test]
    fn single_mine_board_clears_in_one_click() {
        let game = game();
        let mine = CubePosition::new(CubeFace::Front, 3, 3);
        let state = MinesweeperState::with_mines(4, &[mine]);
        let far = CubePosition::new(CubeFace::Back, 1, 1);
        let after = game.apply_action(&state, &MinesweeperAction::Reveal(far));
        assert_eq!(after.revealed_count(), &after.safe_cell_count());
        assert_eq!(game.check_game_over(&after), GameStatus::Won);
        assert!(!after.cell(mine).is_revealed);
    }

    #[test]
    fn chord_requires_matching_flags() {
        let game = game();
        let mine = CubePosition::new(CubeFace::Front, 0, 0);
        let numbered = CubePosition::new(CubeFace::Front, 1, 1);
        let state = MinesweeperState::with_mines(4, &[mine, CubePosition::new(CubeFace::Back, 2, 2)]);
        let state = game.apply_action(&state, &MinesweeperAction::Reveal(numbered));
        assert_eq!(state.cell(numbered).adjacent_mines, 1);
        assert_eq!(state.revealed_count(), &1);

        // Without a flag the chord changes nothing.
        let unchanged = game.apply_action(&state, &MinesweeperAction::Chord(numbered));
        assert_eq!(unchanged, state);

        let flagged = game.apply_action(&state, &MinesweeperAction::Flag(mine));
        let chorded = game.apply_action(&flagged, &MinesweeperAction::Chord(numbered));
        assert_ne!(game.check_game_over(&chorded), GameStatus::Lost);
        for neighbor in all_neighbors(numbered, 4) {
            if neighbor != mine {
                assert!(chorded.cell(neighbor).is_revealed, "{neighbor}");
            }
        }
    }

    #[test]
    fn wrong_flag_chord_detonates_the_hidden_mine() {
        let game = game();
        let mine = CubePosition::new(CubeFace::Front, 0, 0);
        let numbered = CubePosition::new(CubeFace::Front, 1, 1);
        let wrong = CubePosition::new(CubeFace::Front, 2, 2);
        let state = MinesweeperState::with_mines(4, &[mine]);
        let state = game.apply_action(&state, &MinesweeperAction::Reveal(numbered));
        let state = game.apply_action(&state, &MinesweeperAction::Flag(wrong));
        let state = game.apply_action(&state, &MinesweeperAction::Chord(numbered));
        assert_eq!(game.check_game_over(&state), GameStatus::Lost);
        assert_eq!(state.exploded(), &Some(mine));
    }
}
