//! Game logic and rules for falling tetracubes.

use crate::action::{Shift, TetrisAction};
use crate::types::{Axis, FallingPiece, TetracubeKind, TetrisConfig, TetrisState, Voxel};
use cubic_game::{Game, GameMetadata, GameStatus, Mulberry32, Piece, random_seed};
use cubic_topology::Point3;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Base points for clearing 0..=4 layers at once, multiplied by the level.
pub const LAYER_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell of soft drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell of hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// Layers needed per level.
pub const LAYERS_PER_LEVEL: u32 = 5;

/// Offsets tried, in order, when a rotation collides.
pub const WALL_KICKS: [Voxel; 10] = [
    Voxel::new(1, 0, 0),
    Voxel::new(-1, 0, 0),
    Voxel::new(0, 0, 1),
    Voxel::new(0, 0, -1),
    Voxel::new(2, 0, 0),
    Voxel::new(-2, 0, 0),
    Voxel::new(0, 0, 2),
    Voxel::new(0, 0, -2),
    Voxel::new(0, 1, 0),
    Voxel::new(0, -1, 0),
];

const DOWN: Voxel = Voxel::new(0, -1, 0);
const GHOST_COLOR: &str = "#ffffff";

/// Gravity interval for a level.
pub fn speed_for_level(level: u32) -> u64 {
    1000u64
        .saturating_sub(u64::from(level.saturating_sub(1)) * 100)
        .max(200)
}

/// Tetris engine.
#[derive(Debug, Clone)]
pub struct TetrisGame {
    config: TetrisConfig,
    seed: u32,
    metadata: GameMetadata,
}

impl TetrisGame {
    /// Creates a game; a missing seed is drawn at random.
    #[instrument]
    pub fn new(config: TetrisConfig) -> Self {
        let seed = (*config.seed()).unwrap_or_else(random_seed);
        let metadata = GameMetadata::new(
            "tetris".to_string(),
            "Tetris 3D".to_string(),
            *config.width(),
            1,
            5,
        );
        Self {
            config,
            seed,
            metadata,
        }
    }

    /// Seed used for the piece queue.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for TetrisGame {
    fn default() -> Self {
        Self::new(TetrisConfig::default())
    }
}

/// A fresh piece centered on the footprint with its top voxel in the top layer.
pub fn spawn_piece(state: &TetrisState, kind: TetracubeKind) -> FallingPiece {
    let offsets = kind.offsets();
    let centered = |axis: fn(&Voxel) -> i32, extent: usize| {
        let min = offsets.iter().map(axis).min().unwrap_or(0);
        let max = offsets.iter().map(axis).max().unwrap_or(0);
        (extent as i32 - (max - min + 1)) / 2 - min
    };
    let top = offsets.iter().map(|o| o.y).max().unwrap_or(0);
    let position = Voxel::new(
        centered(|o| o.x, state.width),
        state.height as i32 - 1 - top,
        centered(|o| o.z, state.depth),
    );
    FallingPiece::new(kind, position)
}

/// Where the current piece would land if dropped now.
pub fn ghost_piece(state: &TetrisState) -> FallingPiece {
    let mut ghost = state.current;
    while state.fits(&ghost.translated(DOWN)) {
        ghost = ghost.translated(DOWN);
    }
    ghost
}

/// Voxels of the ghost preview.
pub fn ghost_cells(state: &TetrisState) -> [Voxel; 4] {
    ghost_piece(state).cells()
}

/// Removes full layers, highest first, and returns how many went.
///
/// Layers above each removed one fall by one; empty layers refill the top.
pub fn clear_layers(state: &mut TetrisState) -> u32 {
    let layer = state.layer_len();
    let mut cleared = 0;
    for y in (0..state.height).rev() {
        if state.is_layer_full(y) {
            let start = y * layer;
            state.grid.drain(start..start + layer);
            state.grid.extend(std::iter::repeat_n(None, layer));
            cleared += 1;
        }
    }
    cleared
}

/// Picks the next upcoming kind from the state's generator.
fn draw(rng: &mut Mulberry32) -> TetracubeKind {
    TetracubeKind::random(rng)
}

/// Brings `kind` into play; no room for it ends the game.
fn enter(state: &mut TetrisState, kind: TetracubeKind) {
    state.current = spawn_piece(state, kind);
    if !state.fits(&state.current) {
        info!(score = state.score, level = state.level, "No room to spawn");
        state.is_game_over = true;
    }
}

/// Brings the queued piece into play and refills the queue.
fn spawn_next(state: &mut TetrisState) {
    let kind = state.next;
    state.next = draw(&mut state.rng);
    enter(state, kind);
}

/// Stamps the current piece, clears layers, scores and spawns the next.
fn lock(state: &mut TetrisState) {
    let kind = *state.current.kind();
    for cell in state.current.cells() {
        state.set_voxel(cell, kind);
    }

    let cleared = clear_layers(state);
    if cleared > 0 {
        let points = LAYER_SCORES[(cleared as usize).min(4)] * state.level;
        state.score += points;
        state.layers_cleared += cleared;
        state.level = state.layers_cleared / LAYERS_PER_LEVEL + 1;
        state.speed = speed_for_level(state.level);
        debug!(cleared, points, level = state.level, "Layers cleared");
    }

    state.can_hold = true;
    spawn_next(state);
}

/// Moves down one cell or locks; returns whether the piece moved.
fn fall(state: &mut TetrisState) -> bool {
    let lowered = state.current.translated(DOWN);
    if state.fits(&lowered) {
        state.current = lowered;
        true
    } else {
        lock(state);
        false
    }
}

/// The rotated piece, kicked into the first free offset.
fn rotate_with_kicks(state: &TetrisState, axis: Axis) -> Option<FallingPiece> {
    let rotated = state.current.rotated(axis);
    std::iter::once(Voxel::default())
        .chain(WALL_KICKS)
        .map(|kick| rotated.translated(kick))
        .find(|candidate| state.fits(candidate))
}

fn hold(state: &mut TetrisState) {
    let current = *state.current.kind();
    match state.held.replace(current) {
        Some(held) => enter(state, held),
        None => spawn_next(state),
    }
    state.can_hold = false;
}

/// World-space center of a voxel with the volume centered on the origin.
fn voxel_center(state: &TetrisState, voxel: Voxel) -> Point3<f32> {
    Point3::new(
        voxel.x as f32 + 0.5 - state.width as f32 / 2.0,
        voxel.y as f32 + 0.5 - state.height as f32 / 2.0,
        voxel.z as f32 + 0.5 - state.depth as f32 / 2.0,
    )
}

impl Game for TetrisGame {
    type State = TetrisState;
    type Action = TetrisAction;

    fn metadata(&self) -> &GameMetadata {
        &self.metadata
    }

    #[instrument(skip(self), fields(seed = self.seed))]
    fn init(&self) -> TetrisState {
        let (width, depth, height) = (
            *self.config.width(),
            *self.config.depth(),
            *self.config.height(),
        );
        let mut rng = Mulberry32::new(self.seed);
        let first = draw(&mut rng);
        let next = draw(&mut rng);
        let mut state = TetrisState {
            width,
            depth,
            height,
            grid: vec![None; width * depth * height],
            current: FallingPiece::new(first, Voxel::default()),
            next,
            held: None,
            can_hold: true,
            score: 0,
            level: 1,
            layers_cleared: 0,
            speed: speed_for_level(1),
            is_paused: false,
            is_game_over: false,
            rng,
        };
        enter(&mut state, first);
        state
    }

    fn is_valid_action(&self, state: &TetrisState, action: &TetrisAction) -> bool {
        if state.is_game_over {
            return false;
        }
        if state.is_paused {
            return matches!(action, TetrisAction::Resume);
        }
        match action {
            TetrisAction::Move(shift) => state.fits(&state.current.translated(shift.delta())),
            TetrisAction::Rotate(axis) => rotate_with_kicks(state, *axis).is_some(),
            TetrisAction::Hold => state.can_hold,
            TetrisAction::Resume => false,
            TetrisAction::Tick
            | TetrisAction::SoftDrop
            | TetrisAction::HardDrop
            | TetrisAction::Pause => true,
        }
    }

    #[instrument(skip(self, state), fields(%action, piece = %state.current.kind()))]
    fn apply_action(&self, state: &TetrisState, action: &TetrisAction) -> TetrisState {
        let mut next = state.clone();
        if !self.is_valid_action(state, action) {
            debug!("Ignoring invalid tetris action");
            return next;
        }

        match action {
            TetrisAction::Move(shift) => next.current = next.current.translated(shift.delta()),
            TetrisAction::Rotate(axis) => {
                if let Some(rotated) = rotate_with_kicks(state, *axis) {
                    next.current = rotated;
                }
            }
            TetrisAction::Tick => {
                fall(&mut next);
            }
            TetrisAction::SoftDrop => {
                if fall(&mut next) {
                    next.score += SOFT_DROP_POINTS;
                }
            }
            TetrisAction::HardDrop => {
                let landed = ghost_piece(&next);
                let distance = (next.current.position().y - landed.position().y) as u32;
                next.current = landed;
                next.score += HARD_DROP_POINTS * distance;
                lock(&mut next);
            }
            TetrisAction::Hold => hold(&mut next),
            TetrisAction::Pause => next.is_paused = true,
            TetrisAction::Resume => next.is_paused = false,
        }
        next
    }

    fn check_game_over(&self, state: &TetrisState) -> GameStatus {
        if state.is_game_over {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    fn valid_actions(&self, state: &TetrisState) -> Vec<TetrisAction> {
        Shift::ALL
            .into_iter()
            .map(TetrisAction::Move)
            .chain([Axis::X, Axis::Y, Axis::Z].map(TetrisAction::Rotate))
            .chain([
                TetrisAction::Tick,
                TetrisAction::SoftDrop,
                TetrisAction::HardDrop,
                TetrisAction::Hold,
                TetrisAction::Pause,
                TetrisAction::Resume,
            ])
            .filter(|action| self.is_valid_action(state, action))
            .collect()
    }

    fn pieces(&self, state: &TetrisState) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = state
            .filled_voxels()
            .map(|(voxel, kind)| {
                Piece::new(
                    format!("block-{}-{}-{}", voxel.x, voxel.y, voxel.z),
                    "block",
                    voxel_center(state, voxel),
                    kind.color(),
                )
                .with_meta("kind", kind.to_string())
            })
            .collect();

        if state.is_game_over {
            return pieces;
        }

        let kind = *state.current.kind();
        let active = state.current.cells();
        for (i, voxel) in ghost_cells(state).into_iter().enumerate() {
            if !active.contains(&voxel) {
                pieces.push(
                    Piece::new(format!("ghost-{i}"), "ghost", voxel_center(state, voxel), GHOST_COLOR)
                        .with_meta("opacity", 0.25),
                );
            }
        }
        for (i, voxel) in active.into_iter().enumerate() {
            pieces.push(
                Piece::new(format!("active-{i}"), "active", voxel_center(state, voxel), kind.color())
                    .with_meta("kind", kind.to_string()),
            );
        }
        pieces
    }

    fn tick_action(&self) -> Option<TetrisAction> {
        Some(TetrisAction::Tick)
    }

    fn tick_interval(&self, state: &TetrisState) -> Option<Duration> {
        (!state.is_game_over && !state.is_paused).then(|| Duration::from_millis(state.speed))
    }
}
