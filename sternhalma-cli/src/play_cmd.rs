//! Play command - run computer-only games and report the results
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: seat strategies, formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sternhalma_core::{
    Board, Color, Game, GameConfig, GameResult, GreedyAI, Move, PlayerId, RandomAI, Strategy,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game config JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board radius
    #[arg(long)]
    pub radius: Option<i32>,

    /// Number of players (2, 4 or 6)
    #[arg(long)]
    pub players: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Maximum turns per game
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Seats played by the random baseline instead of the greedy AI
    #[arg(long, value_delimiter = ',')]
    pub random_seats: Vec<u8>,

    /// Seed for random seats
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the final board of each game
    #[arg(long)]
    pub show: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    turns: u32,
    moves: Vec<Move>,
    final_board: String,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct PlayResults {
    games: Vec<GameRecord>,
    wins: Vec<usize>,
    unfinished: usize,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the game config (file, then flag overrides)
/// 2. Play the games
/// 3. Report results
pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;

    tracing::info!(
        "Starting {} game(s): radius={}, players={}, max_turns={}",
        args.games,
        config.radius,
        config.player_count(),
        config.max_turns
    );

    let results = play_games(&config, &args)?;

    report_results(&results, &config, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the config file if given and apply flag overrides
fn build_config(args: &PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(radius) = args.radius {
        config = config.with_radius(radius);
    }
    if let Some(players) = args.players {
        if players > Color::ALL.len() {
            anyhow::bail!("At most {} players are supported", Color::ALL.len());
        }
        config = config.with_player_count(players);
    }
    if let Some(max_turns) = args.max_turns {
        config = config.with_max_turns(max_turns);
    }
    if let Some(seed) = args.seed {
        config.ai = config.ai.with_seed(seed);
    }

    // Every seat is a computer here
    config = config.all_computers();

    for &seat in &args.random_seats {
        if seat as usize >= config.player_count() {
            anyhow::bail!(
                "Random seat {} out of range for {} players",
                seat,
                config.player_count()
            );
        }
    }

    Ok(config)
}

/// Play all games
fn play_games(config: &GameConfig, args: &PlayArgs) -> Result<PlayResults> {
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(config, &args.random_seats, game_num + 1)?;

        match record.result {
            GameResult::Won(winner) => tracing::info!(
                "Game {}: {} wins in {} turns",
                record.game_number,
                winner,
                record.turns
            ),
            GameResult::Ongoing => tracing::info!(
                "Game {}: no winner after {} turns",
                record.game_number,
                record.turns
            ),
        }

        games.push(record);
    }

    Ok(compute_statistics(games, config.player_count()))
}

/// Report results
fn report_results(results: &PlayResults, config: &GameConfig, args: &PlayArgs) {
    if args.json {
        print_json_results(results, config);
    } else {
        print_text_results(results, config, args.show);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to a win or the turn cap
fn play_single_game(
    config: &GameConfig,
    random_seats: &[u8],
    game_number: usize,
) -> Result<GameRecord> {
    let mut game = Game::new(config)
        .with_context(|| format!("Failed to set up game {}", game_number))?;

    // Distinct seed per game so repeated games differ but stay reproducible
    let seed = config.ai.seed.unwrap_or(42).wrapping_add(game_number as u64);
    let mut seats = SeatStrategies::new(config, random_seats, seed);

    let moves = game.run_computer_turns(&mut seats, config.max_turns);

    Ok(GameRecord {
        game_number,
        result: game.result(),
        turns: game.turn(),
        moves,
        final_board: game.board().to_string(),
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>, player_count: usize) -> PlayResults {
    let mut wins = vec![0; player_count];
    let mut unfinished = 0;
    for game in &games {
        match game.result {
            GameResult::Won(winner) => wins[winner.index()] += 1,
            GameResult::Ongoing => unfinished += 1,
        }
    }

    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    PlayResults {
        games,
        wins,
        unfinished,
        avg_turns,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Per-seat strategies: random on the listed seats, greedy elsewhere
struct SeatStrategies {
    seats: Vec<Box<dyn Strategy>>,
}

impl SeatStrategies {
    fn new(config: &GameConfig, random_seats: &[u8], seed: u64) -> Self {
        let seats = (0..config.player_count())
            .map(|seat| -> Box<dyn Strategy> {
                if random_seats.contains(&(seat as u8)) {
                    Box::new(RandomAI::with_seed(seed.wrapping_add(seat as u64)))
                } else {
                    Box::new(GreedyAI::from_config(&config.ai))
                }
            })
            .collect();
        Self { seats }
    }
}

impl Strategy for SeatStrategies {
    fn choose_move(&mut self, board: &Board, player: PlayerId) -> Option<Move> {
        self.seats.get_mut(player.index())?.choose_move(board, player)
    }

    fn name(&self) -> &'static str {
        "seats"
    }
}

fn player_label(config: &GameConfig, player: PlayerId) -> String {
    match config.players.get(player.index()) {
        Some(color) => format!("{} ({})", player, color.name()),
        None => player.to_string(),
    }
}

/// Print results as JSON
fn print_json_results(results: &PlayResults, config: &GameConfig) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<u8>,
        winner_color: Option<String>,
        turns: u32,
        moves: Vec<Move>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        radius: i32,
        players: usize,
        wins: Vec<usize>,
        unfinished: usize,
        avg_turns: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        radius: config.radius,
        players: config.player_count(),
        wins: results.wins.clone(),
        unfinished: results.unfinished,
        avg_turns: results.avg_turns,
        games: results
            .games
            .iter()
            .map(|g| {
                let winner = match g.result {
                    GameResult::Won(p) => Some(p),
                    GameResult::Ongoing => None,
                };
                JsonGame {
                    game_number: g.game_number,
                    winner: winner.map(|p| p.0),
                    winner_color: winner
                        .and_then(|p| config.players.get(p.index()))
                        .map(|c| c.name().to_string()),
                    turns: g.turns,
                    moves: g.moves.clone(),
                }
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &PlayResults, config: &GameConfig, show: bool) {
    let total = results.games.len();

    println!("\n=== Results ===");
    println!("Total games: {}", total);
    for (i, &wins) in results.wins.iter().enumerate() {
        println!(
            "{:<14} {} wins",
            player_label(config, PlayerId(i as u8)),
            wins
        );
    }
    println!("Unfinished:    {}", results.unfinished);
    println!("Avg turns:     {:.1}", results.avg_turns);

    println!("\nGame details:");
    for game in &results.games {
        match game.result {
            GameResult::Won(winner) => println!(
                "  Game {}: {} won in {} turns ({} moves)",
                game.game_number,
                player_label(config, winner),
                game.turns,
                game.moves.len()
            ),
            GameResult::Ongoing => println!(
                "  Game {}: unfinished after {} turns ({} moves)",
                game.game_number,
                game.turns,
                game.moves.len()
            ),
        }
        if show {
            println!("{}", game.final_board);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
