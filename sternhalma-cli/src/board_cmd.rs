//! Board and moves commands - inspect a starting board

use anyhow::{Context, Result};
use clap::Args;

use sternhalma_core::{Board, Color, Cube, PlayerId, STANDARD_RADIUS};

#[derive(Args)]
pub struct BoardArgs {
    /// Board radius
    #[arg(long, default_value_t = STANDARD_RADIUS)]
    pub radius: i32,

    /// Number of players (2, 4 or 6)
    #[arg(long, default_value = "2")]
    pub players: usize,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Cell to move from, as x,y,z
    #[arg(long, allow_hyphen_values = true)]
    pub cell: Cube,

    #[command(flatten)]
    pub board: BoardArgs,
}

/// Print the starting board and its size
pub fn run_board(args: BoardArgs) -> Result<()> {
    let board = build_board(&args)?;

    print!("{}", board);
    println!("{} cells, {} pieces", board.size(), board.piece_count());
    for (i, color) in board.players().iter().enumerate() {
        let player = PlayerId(i as u8);
        println!(
            "  {} = {} {} ({} win cells)",
            color.symbol(),
            player,
            color.name(),
            board.win_cells_for(player).len()
        );
    }
    Ok(())
}

/// Print every legal destination from one cell
pub fn run_moves(args: MovesArgs) -> Result<()> {
    let board = build_board(&args.board)?;
    let moves = legal_destinations(&board, args.cell)?;

    if moves.is_empty() {
        println!("No legal moves from {}", args.cell);
    } else {
        println!("{} legal move(s) from {}:", moves.len(), args.cell);
        for to in moves {
            let kind = if board.distance(args.cell, to) == 1 { "step" } else { "jump" };
            println!("  {} ({})", to, kind);
        }
    }
    Ok(())
}

fn build_board(args: &BoardArgs) -> Result<Board> {
    if args.players > Color::ALL.len() {
        anyhow::bail!("At most {} players are supported", Color::ALL.len());
    }
    Board::new(args.radius, &Color::palette(args.players)).with_context(|| {
        format!(
            "Cannot build a radius {} board for {} players",
            args.radius, args.players
        )
    })
}

fn legal_destinations(board: &Board, from: Cube) -> Result<Vec<Cube>> {
    let cell = match board.cell(from) {
        Some(cell) => cell,
        None => anyhow::bail!("{} is not on the board", from),
    };
    if cell.is_empty() {
        anyhow::bail!("{} holds no piece", from);
    }
    Ok(board
        .valid_moves(from)
        .into_iter()
        .filter(|&to| board.is_valid_move(from, to))
        .collect())
}
