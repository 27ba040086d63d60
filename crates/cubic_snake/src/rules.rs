//! Game logic and rules for cube snake.

use crate::action::SnakeAction;
use crate::types::{SnakeConfig, SnakeState};
use cubic_game::{Game, GameMetadata, GameStatus, Mulberry32, Piece, random_seed};
use cubic_topology::{CubeConfig, CubeFace, CubePosition, Direction, step, transform_across_edge};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Points per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Score interval between speed-ups.
pub const POINTS_PER_SPEEDUP: u32 = 50;

/// Food placement gives up random sampling after this many tries.
pub const FOOD_SPAWN_ATTEMPTS: usize = 1000;

const HEAD_COLOR: &str = "#4ade80";
const BODY_COLOR: &str = "#22c55e";
const FOOD_COLOR: &str = "#ef4444";

/// Snake engine.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    config: SnakeConfig,
    seed: u32,
    metadata: GameMetadata,
}

impl SnakeGame {
    /// Creates a game; a missing seed is drawn at random.
    #[instrument]
    pub fn new(config: SnakeConfig) -> Self {
        let seed = (*config.seed()).unwrap_or_else(random_seed);
        let metadata = GameMetadata::new(
            "snake".to_string(),
            "Snake".to_string(),
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

    /// Seed used for food placement.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn grid_size(&self) -> usize {
        *self.config.grid_size()
    }

    fn cube(&self) -> CubeConfig {
        CubeConfig::new(self.grid_size() as f32, self.grid_size())
    }

    /// Tick interval for a score.
    pub fn speed_for_score(&self, score: u32) -> u64 {
        let steps = u64::from(score / POINTS_PER_SPEEDUP);
        self.config
            .initial_speed_ms()
            .saturating_sub(steps * self.config.speed_step_ms())
            .max(*self.config.min_speed_ms())
    }

    /// Picks a free cell for food.
    ///
    /// Samples uniformly over all six faces; after [`FOOD_SPAWN_ATTEMPTS`]
    /// misses it falls back to the first free cell in packed order. A board
    /// with no free cell leaves the last sample in place.
    fn spawn_food(&self, snake: &[CubePosition], rng: &mut Mulberry32) -> CubePosition {
        let n = self.grid_size();
        let mut candidate = CubePosition::new(CubeFace::Front, 0, 0);
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let face = CubeFace::ALL[rng.below(6)];
            candidate = CubePosition::new(face, rng.below(n), rng.below(n));
            if !snake.contains(&candidate) {
                return candidate;
            }
        }
        CubePosition::all(n)
            .find(|cell| !snake.contains(cell))
            .unwrap_or(candidate)
    }

    fn advance(&self, state: &SnakeState) -> SnakeState {
        let mut next = state.clone();
        let head = state.head();
        let heading = state.next_direction;
        let new_head = step(head, heading, self.grid_size());

        if state.snake.contains(&new_head) {
            info!(%new_head, score = state.score, "Snake collided with itself");
            next.is_game_over = true;
            return next;
        }

        if new_head.face == head.face {
            next.direction = heading;
        } else {
            let carried = transform_across_edge(head.face, heading, state.camera_up);
            debug!(from = %head.face, to = %carried.face, %heading, remapped = %carried.direction, "Crossed face edge");
            next.direction = carried.direction;
            next.next_direction = carried.direction;
            next.camera_up = carried.camera_up;
        }

        next.snake.insert(0, new_head);
        if new_head == state.food {
            next.score += FOOD_POINTS;
            next.speed = self.speed_for_score(next.score);
            let mut rng = state.rng;
            next.food = self.spawn_food(&next.snake, &mut rng);
            next.rng = rng;
            debug!(score = next.score, food = %next.food, "Food eaten");
        } else {
            next.snake.pop();
        }
        next
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new(SnakeConfig::default())
    }
}

impl Game for SnakeGame {
    type State = SnakeState;
    type Action = SnakeAction;

    fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }

    #[instrument(skip(self), fields(seed = self.seed))]
    fn init(&self) -> SnakeState {
        let n = self.grid_size();
        let center = n / 2;
        let mut snake: Vec<CubePosition> = (0..3)
            .map(|i| CubePosition::new(CubeFace::Front, center, center.saturating_sub(i)))
            .collect();
        snake.dedup();

        let mut rng = Mulberry32::new(self.seed);
        let food = self.spawn_food(&snake, &mut rng);
        SnakeState {
            snake,
            direction: Direction::Up,
            next_direction: Direction::Up,
            food,
            score: 0,
            speed: *self.config.initial_speed_ms(),
            is_game_over: false,
            is_paused: false,
            camera_up: CubeFace::Front.up(),
            rng,
        }
    }

    fn is_valid_action(&self, state: &SnakeState, action: &SnakeAction) -> bool {
        if state.is_game_over {
            return false;
        }
        match action {
            SnakeAction::Move => !state.is_paused,
            SnakeAction::ChangeDirection(direction) => *direction != state.direction.opposite(),
            SnakeAction::Pause => !state.is_paused,
            SnakeAction::Resume => state.is_paused,
        }
    }

    #[instrument(skip(self, state), fields(head = %state.head()))]
    fn apply_action(&self, state: &SnakeState, action: &SnakeAction) -> SnakeState {
        if !self.is_valid_action(state, action) {
            debug!(%action, "Ignoring invalid snake action");
            return state.clone();
        }
        match action {
            SnakeAction::Move => self.advance(state),
            SnakeAction::ChangeDirection(direction) => {
                let mut next = state.clone();
                next.next_direction = *direction;
                next
            }
            SnakeAction::Pause => {
                let mut next = state.clone();
                next.is_paused = true;
                next
            }
            SnakeAction::Resume => {
                let mut next = state.clone();
                next.is_paused = false;
                next
            }
        }
    }

    fn check_game_over(&self, state: &SnakeState) -> GameStatus {
        if state.is_game_over {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    fn valid_actions(&self, state: &SnakeState) -> Vec<SnakeAction> {
        [SnakeAction::Move, SnakeAction::Pause, SnakeAction::Resume]
            .into_iter()
            .chain(Direction::ALL.into_iter().map(SnakeAction::ChangeDirection))
            .filter(|action| self.is_valid_action(state, action))
            .collect()
    }

    fn pieces(&self, state: &SnakeState) -> Vec<Piece> {
        let cube = self.cube();
        let mut pieces: Vec<Piece> = state
            .snake
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    Piece::on_cell("snakeHead", *cell, &cube, HEAD_COLOR)
                        .with_id("snake-head")
                        .with_meta("direction", state.direction.to_string())
                } else {
                    Piece::on_cell("snakeBody", *cell, &cube, BODY_COLOR)
                        .with_id(format!("snake-{i}"))
                        .with_meta("index", i)
                }
            })
            .collect();
        pieces.push(Piece::on_cell("food", state.food, &cube, FOOD_COLOR).with_id("food"));
        pieces
    }

    fn tick_action(&self) -> Option<SnakeAction> {
        Some(SnakeAction::Move)
    }

    fn tick_interval(&self, state: &SnakeState) -> Option<Duration> {
        (!state.is_game_over && !state.is_paused).then(|| Duration::from_millis(state.speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> SnakeGame {
        SnakeGame::new(SnakeConfig::default().with_grid_size(5).with_seed(42))
    }

    #[test]
    fn starts_on_front_heading_up() {
        let game = game();
        let state = game.init();
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.head(), CubePosition::new(CubeFace::Front, 2, 2));
        assert_eq!(state.direction(), &Direction::Up);
        assert!(!state.snake().contains(state.food()));
    }

    #[test]
    fn reversing_is_rejected() {
        let game = game();
        let state = game.init();
        assert!(!game.is_valid_action(&state, &SnakeAction::ChangeDirection(Direction::Down)));
        assert!(game.is_valid_action(&state, &SnakeAction::ChangeDirection(Direction::Left)));
        let after = game.apply_action(&state, &SnakeAction::ChangeDirection(Direction::Down));
        assert_eq!(after, state);
    }

    #[test]
    fn moving_shifts_every_segment() {
        let game = game();
        let state = game.init().with_food(CubePosition::new(CubeFace::Back, 0, 0));
        let next = game.apply_action(&state, &SnakeAction::Move);
        assert_eq!(next.head(), CubePosition::new(CubeFace::Front, 2, 3));
        assert_eq!(next.snake().len(), 3);
        assert_eq!(next.snake()[1], state.snake()[0]);
    }

    #[test]
    fn eating_grows_and_scores() {
        let game = game();
        let state = game.init().with_food(CubePosition::new(CubeFace::Front, 2, 3));
        let next = game.apply_action(&state, &SnakeAction::Move);
        assert_eq!(next.snake().len(), 4);
        assert_eq!(next.score(), &FOOD_POINTS);
        assert!(!next.snake().contains(next.food()));
    }

    #[test]
    fn speed_has_a_floor() {
        let game = game();
        assert_eq!(game.speed_for_score(0), 200);
        assert_eq!(game.speed_for_score(50), 180);
        assert_eq!(game.speed_for_score(120), 160);
        assert_eq!(game.speed_for_score(5000), 80);
    }

    #[test]
    fn crossing_an_edge_remaps_heading() {
        let game = game();
        let mut state = game
            .init()
            .with_body(
                vec![
                    CubePosition::new(CubeFace::Top, 4, 2),
                    CubePosition::new(CubeFace::Top, 3, 2),
                ],
                Direction::Right,
            )
            .with_food(CubePosition::new(CubeFace::Back, 0, 0));
        state.camera_up = CubeFace::Top.up();
        let next = game.apply_action(&state, &SnakeAction::Move);
        assert_eq!(next.head(), CubePosition::new(CubeFace::Right, 2, 4));
        assert_eq!(next.direction(), &Direction::Down);
        assert_eq!(next.next_direction(), &Direction::Down);
        let after = game.apply_action(&next, &SnakeAction::Move);
        assert_eq!(after.head(), CubePosition::new(CubeFace::Right, 2, 3));
    }

    #[test]
    fn paused_snake_does_not_move() {
        let game = game();
        let state = game.apply_action(&game.init(), &SnakeAction::Pause);
        assert_eq!(game.tick_interval(&state), None);
        assert_eq!(game.apply_action(&state, &SnakeAction::Move), state);
        let resumed = game.apply_action(&state, &SnakeAction::Resume);
        assert_eq!(game.tick_interval(&resumed), Some(Duration::from_millis(200)));
    }

    #[test]
    fn same_seed_same_food() {
        assert_eq!(game().init(), game().init());
    }
}
