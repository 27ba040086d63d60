//! Command-line interface for cubic_arcade.

use clap::{Parser, Subcommand};
use cubic_arcade::GameKind;
use cubic_nonogram::GenerationStrategy;
use cubic_topology::CubeFace;
use std::path::PathBuf;

/// Cubic Arcade - puzzle games on the surface of a cube
#[derive(Parser, Debug)]
#[command(name = "cubic_arcade")]
#[command(about = "Puzzle games played across the six faces of a cube", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config (defaults apply when missing)
    #[arg(short, long, default_value = "cubic_arcade.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered games
    List,

    /// Replay a JSON list of actions through a session and print the result
    Play {
        /// Game id (snake, minesweeper, tetris, nonogram)
        game: GameKind,

        /// JSON file holding an array of actions
        #[arg(short, long)]
        actions: Option<PathBuf>,

        /// Seed overriding the config
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Generate a nonogram and print its clues
    Nonogram {
        /// Puzzle seed (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Generation strategy
        #[arg(long, default_value = "mixed")]
        strategy: GenerationStrategy,

        /// Cells per face edge
        #[arg(long, default_value_t = 5)]
        grid_size: usize,
    },

    /// Print the cube-aware neighbors of a cell
    Neighbors {
        /// Face name (top, bottom, front, back, left, right)
        face: CubeFace,

        /// Column on the face
        x: usize,

        /// Row on the face
        y: usize,

        /// Cells per face edge
        #[arg(long, default_value_t = 5)]
        grid_size: usize,
    },
}
