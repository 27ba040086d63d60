//! Whole-game properties that hold across the topology and every game crate.

use cubic_game::{Game, GameStatus};
use cubic_minesweeper::{MinesweeperAction, MinesweeperConfig, MinesweeperGame, MinesweeperState};
use cubic_nonogram::{NonogramAction, NonogramConfig, NonogramGame, calculate_line_clue};
use cubic_snake::{SnakeAction, SnakeConfig, SnakeGame};
use cubic_topology::{CubeFace, CubePosition, Direction, all_neighbors, edges_at_position};
use proptest::prelude::*;
use std::collections::HashSet;

fn position_strategy(n: usize) -> impl Strategy<Value = CubePosition> {
    (0..6usize, 0..n, 0..n).prop_map(|(face, x, y)| CubePosition::new(CubeFace::ALL[face], x, y))
}

#[test]
fn test_neighbor_counts_by_cell_kind() {
    let n = 5;
    for position in CubePosition::all(n) {
        let neighbors = all_neighbors(position, n);
        let distinct: HashSet<CubePosition> = neighbors.iter().copied().collect();
        assert_eq!(distinct.len(), neighbors.len(), "{position}");
        assert!(!distinct.contains(&position));
        let expected = if edges_at_position(position, n).len() == 2 { 7 } else { 8 };
        assert_eq!(neighbors.len(), expected, "{position}");
    }
}

#[test]
fn test_snake_running_into_itself_ends_game() {
    let game = SnakeGame::new(SnakeConfig::default().with_grid_size(5).with_seed(1));
    let body = vec![
        CubePosition::new(CubeFace::Front, 2, 2),
        CubePosition::new(CubeFace::Front, 1, 2),
        CubePosition::new(CubeFace::Front, 1, 3),
        CubePosition::new(CubeFace::Front, 2, 3),
        CubePosition::new(CubeFace::Front, 3, 3),
    ];
    let state = game.init().with_body(body.clone(), Direction::Up);
    let after = game.apply_action(&state, &SnakeAction::Move);
    assert_eq!(game.check_game_over(&after), GameStatus::Lost);
    assert_eq!(after.snake(), &body);
    assert!(game.valid_actions(&after).is_empty());
}

#[test]
fn test_snake_crosses_onto_top_face() {
    let game = SnakeGame::new(SnakeConfig::default().with_grid_size(5).with_seed(1));
    let state = game
        .init()
        .with_body(vec![CubePosition::new(CubeFace::Front, 2, 4)], Direction::Up)
        .with_food(CubePosition::new(CubeFace::Back, 0, 0));
    let after = game.apply_action(&state, &SnakeAction::Move);
    assert_eq!(after.head_face(), CubeFace::Top);
    assert_eq!(after.snake().len(), 1);
    assert_eq!(game.check_game_over(&after), GameStatus::InProgress);
}

fn assert_flood_closed(state: &MinesweeperState) {
    let n = *state.grid_size();
    for position in CubePosition::all(n) {
        let cell = state.cell(position);
        if !cell.is_revealed {
            continue;
        }
        assert!(!cell.is_mine, "revealed mine at {position}");
        if cell.adjacent_mines == 0 {
            for neighbor in all_neighbors(position, n) {
                let next = state.cell(neighbor);
                assert!(next.is_revealed || next.is_flagged, "{neighbor} left covered");
            }
        }
    }
}

#[test]
fn test_nonogram_solving_by_clues_wins() {
    let game = NonogramGame::new(NonogramConfig::default().with_grid_size(4).with_seed(5));
    let mut state = game.init();
    for position in CubePosition::all(4) {
        let action = if state.is_solution(position) {
            NonogramAction::Fill(position)
        } else {
            NonogramAction::MarkEmpty(position)
        };
        state = game.apply_action(&state, &action);
    }
    assert_eq!(game.check_game_over(&state), GameStatus::Won);
    assert_eq!(state.mistakes(), &0);
}

proptest! {
    #[test]
    fn first_reveal_is_safe_and_floods(seed in any::<u64>(), start in position_strategy(6)) {
        let game = MinesweeperGame::new(MinesweeperConfig::default().with_seed(seed));
        let state = game.apply_action(&game.init(), &MinesweeperAction::Reveal(start));
        prop_assert!(state.cell(start).is_revealed);
        prop_assert!(!state.cell(start).is_mine);
        prop_assert_eq!(state.cell(start).adjacent_mines, 0);
        prop_assert_ne!(game.check_game_over(&state), GameStatus::Lost);
        prop_assert_eq!(state.mine_positions().count(), 30);
        assert_flood_closed(&state);
    }

    #[test]
    fn nonogram_clues_describe_the_picture(seed in any::<u32>(), n in 2usize..7) {
        let game = NonogramGame::new(NonogramConfig::default().with_grid_size(n).with_seed(seed));
        let state = game.init();
        prop_assert_eq!(&state, &game.init());
        for face in CubeFace::ALL {
            let clues = state.face_clues(face);
            for y in 0..n {
                let row: Vec<bool> = (0..n)
                    .map(|x| state.is_solution(CubePosition::new(face, x, y)))
                    .collect();
                prop_assert_eq!(&clues.rows[y], &calculate_line_clue(&row));
            }
            for x in 0..n {
                let column: Vec<bool> = (0..n)
                    .map(|y| state.is_solution(CubePosition::new(face, x, y)))
                    .collect();
                prop_assert_eq!(&clues.columns[x], &calculate_line_clue(&column));
            }
        }
    }
}
