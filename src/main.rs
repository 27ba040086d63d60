//! Cubic Arcade - command-line front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use cubic_arcade::{AnyAction, AnyGame, ArcadeConfig, GameKind, GameRegistry, GameSession};
use cubic_game::Game;
use cubic_nonogram::{GenerationStrategy, NonogramConfig, NonogramGame};
use cubic_topology::{CubeFace, CubePosition, all_neighbors};
use serde_json::json;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ArcadeConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::List => list_games(&config),
        Command::Play {
            game,
            actions,
            seed,
        } => play(&config, game, actions.as_deref(), seed),
        Command::Nonogram {
            seed,
            strategy,
            grid_size,
        } => print_nonogram(seed, strategy, grid_size),
        Command::Neighbors {
            face,
            x,
            y,
            grid_size,
        } => print_neighbors(face, x, y, grid_size),
    }
}

/// Prints every registered game.
#[instrument(skip(config))]
fn list_games(config: &ArcadeConfig) -> Result<()> {
    let registry = GameRegistry::from_config(config);
    for metadata in registry.metadata() {
        println!(
            "{:<12} {:<12} grid {:>2}  faces {}",
            metadata.id(),
            metadata.name(),
            metadata.grid_size(),
            metadata.active_faces()
        );
    }
    Ok(())
}

/// Replays actions from a file and prints the final state.
#[instrument(skip(config))]
fn play(config: &ArcadeConfig, kind: GameKind, actions: Option<&Path>, seed: Option<u32>) -> Result<()> {
    let config = match seed {
        Some(seed) => config.clone().with_seed(seed),
        None => config.clone(),
    };

    let actions: Vec<AnyAction> = match actions {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read actions from {}", path.display()))?;
            let values: Vec<serde_json::Value> =
                serde_json::from_str(&content).context("Actions file must hold a JSON array")?;
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| {
                    AnyAction::parse(kind, value).with_context(|| format!("Action #{i} is not a {kind} action"))
                })
                .collect::<Result<_>>()?
        }
        None => Vec::new(),
    };

    let mut session = GameSession::new(*config.session().max_history());
    session.load_game(AnyGame::from_config(kind, &config));
    let total = actions.len();
    let applied = session.replay(actions)?;
    info!(applied, rejected = total - applied, "Actions replayed");

    let report = json!({
        "game": kind,
        "applied": applied,
        "rejected": total - applied,
        "status": session.status()?,
        "state": session.state(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Generates a nonogram and prints each face's clues.
#[instrument]
fn print_nonogram(seed: Option<u32>, strategy: GenerationStrategy, grid_size: usize) -> Result<()> {
    if grid_size == 0 {
        bail!("grid size must be at least 1");
    }
    let mut config = NonogramConfig::default()
        .with_grid_size(grid_size)
        .with_strategy(strategy);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let game = NonogramGame::new(config);
    let state = game.init();

    println!("seed {} strategy {}", game.seed(), strategy);
    for face in CubeFace::ALL {
        let clues = state.face_clues(face);
        println!("{face}");
        println!("  rows:    {:?}", clues.rows);
        println!("  columns: {:?}", clues.columns);
    }
    Ok(())
}

/// Prints the neighbors of one cell.
#[instrument]
fn print_neighbors(face: CubeFace, x: usize, y: usize, grid_size: usize) -> Result<()> {
    let position = CubePosition::new(face, x, y);
    if !position.is_valid(grid_size) {
        bail!("{position} is outside a {grid_size}x{grid_size} face");
    }
    let neighbors = all_neighbors(position, grid_size);
    println!("{position}: {} neighbors", neighbors.len());
    for neighbor in neighbors {
        println!("  {neighbor}");
    }
    Ok(())
}
