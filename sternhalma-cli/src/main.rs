//! Sternhalma CLI - Command-line interface
//!
//! Commands:
//! - play: Run computer-only games and report the winners
//! - board: Print a starting board
//! - moves: List the legal destinations from one cell

mod board_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use board_cmd::{BoardArgs, MovesArgs};
use play_cmd::PlayArgs;

#[derive(Parser)]
#[command(name = "sternhalma")]
#[command(about = "Chinese Checkers engine with a greedy AI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play computer-only games
    Play(PlayArgs),
    /// Print the starting board
    Board(BoardArgs),
    /// List legal moves from a cell of the starting board
    Moves(MovesArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr so --json output stays clean (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Board(args) => board_cmd::run_board(args),
        Commands::Moves(args) => board_cmd::run_moves(args),
    }
}
