//! Turn orchestration: seats, turn rotation and results

use crate::ai::Strategy;
use crate::board::{Board, Move};
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::hex::Cube;
use crate::pieces::PlayerId;
use serde::{Deserialize, Serialize};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(PlayerId),
}

/// A game in progress: board, whose turn it is, and which seats are human
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: PlayerId,
    human_players: usize,
    turn: u32,
    result: GameResult,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Start a new game. Player 0 moves first.
    pub fn new(config: &GameConfig) -> Result<Self, BoardError> {
        let board = Board::new(config.radius, &config.players)?;
        Ok(Self::from_board(board, config.human_players))
    }

    pub fn from_board(board: Board, human_players: usize) -> Self {
        let result = board.won().map_or(GameResult::Ongoing, GameResult::Won);
        Self {
            board,
            current: PlayerId(0),
            human_players,
            turn: 0,
            result,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Turns taken so far, passes included
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    pub fn is_computer_turn(&self) -> bool {
        self.current.index() >= self.human_players
    }

    // ========================================================================
    // TURNS
    // ========================================================================

    /// Play a human move. Rejected (false) if it is not a human turn, the
    /// piece on `from` is not the current player's, or the move is illegal.
    pub fn play_human(&mut self, from: Cube, to: Cube) -> bool {
        if self.is_over() || self.is_computer_turn() {
            return false;
        }
        let owns_piece = self
            .board
            .cell(from)
            .and_then(|c| c.occupant())
            .is_some_and(|p| p.owner == self.current);
        if !owns_piece || !self.board.move_piece(from, to) {
            return false;
        }

        self.finish_turn();
        true
    }

    /// Let `strategy` play the current computer seat. The turn advances
    /// even when the strategy passes.
    pub fn play_computer(&mut self, strategy: &mut dyn Strategy) -> Option<Move> {
        if self.is_over() || !self.is_computer_turn() {
            return None;
        }

        let player = self.current;
        let played = match strategy.choose_move(&self.board, player) {
            Some(mv) if self.board.apply(mv) => Some(mv),
            _ => None,
        };
        match played {
            Some(mv) => tracing::debug!(
                "Turn {}: {} ({}) {} -> {}",
                self.turn, player, strategy.name(), mv.from, mv.to
            ),
            None => tracing::warn!("Turn {}: {} ({}) passes", self.turn, player, strategy.name()),
        }

        self.finish_turn();
        played
    }

    /// Play computer seats until a human must move, someone wins, or
    /// `max_turns` turns have been taken in total. Returns the moves played.
    pub fn run_computer_turns(&mut self, strategy: &mut dyn Strategy, max_turns: u32) -> Vec<Move> {
        let mut moves = Vec::new();
        while !self.is_over() && self.is_computer_turn() && self.turn < max_turns {
            if let Some(mv) = self.play_computer(strategy) {
                moves.push(mv);
            }
        }
        if !self.is_over() && self.is_computer_turn() && self.turn >= max_turns {
            tracing::warn!("Turn cap of {} reached without a winner", max_turns);
        }
        moves
    }

    fn finish_turn(&mut self) {
        if let Some(winner) = self.board.won() {
            tracing::info!("{} wins after {} turns", winner, self.turn + 1);
            self.result = GameResult::Won(winner);
        }
        self.turn += 1;
        self.next_player();
    }

    fn next_player(&mut self) {
        let count = self.board.player_count() as u8;
        self.current = PlayerId((self.current.0 + 1) % count);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{GreedyAI, RandomAI};
    use crate::board::Home;

    fn two_player(humans: usize) -> Game {
        let config = GameConfig::default()
            .with_player_count(2)
            .with_human_players(humans);
        Game::new(&config).unwrap()
    }

    /// A strategy that never moves
    struct Passer;

    impl Strategy for Passer {
        fn choose_move(&mut self, _board: &Board, _player: PlayerId) -> Option<Move> {
            None
        }

        fn name(&self) -> &'static str {
            "passer"
        }
    }

    #[test]
    fn test_new_game() {
        let game = two_player(1);
        assert_eq!(game.current_player(), PlayerId(0));
        assert_eq!(game.turn(), 0);
        assert_eq!(game.result(), GameResult::Ongoing);
        assert!(!game.is_computer_turn());
    }

    #[test]
    fn test_invalid_config() {
        let config = GameConfig::default().with_player_count(3);
        assert!(matches!(
            Game::new(&config),
            Err(BoardError::InvalidPlayerCount { count: 3 })
        ));
    }

    #[test]
    fn test_human_move_rotates_turn() {
        let mut game = two_player(2);
        let mv = game.board().legal_moves(PlayerId(0))[0];
        assert!(game.play_human(mv.from, mv.to));
        assert_eq!(game.current_player(), PlayerId(1));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_human_cannot_move_other_players_piece() {
        let mut game = two_player(2);
        let theirs = game.board().legal_moves(PlayerId(1))[0];
        assert!(!game.play_human(theirs.from, theirs.to));
        assert_eq!(game.current_player(), PlayerId(0));
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn test_illegal_human_move_rejected() {
        let mut game = two_player(2);
        let home = Home::NegZ.cells(5);
        assert!(!game.play_human(home[0], home[1]));
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn test_human_rejected_on_computer_turn() {
        let mut game = two_player(0);
        let mv = game.board().legal_moves(PlayerId(0))[0];
        assert!(!game.play_human(mv.from, mv.to));
    }

    #[test]
    fn test_pass_still_advances_turn() {
        let mut game = two_player(0);
        assert_eq!(game.play_computer(&mut Passer), None);
        assert_eq!(game.current_player(), PlayerId(1));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_runner_stops_at_human_seat() {
        let mut game = two_player(1);
        let mv = game.board().legal_moves(PlayerId(0))[0];
        assert!(game.play_human(mv.from, mv.to));

        let moves = game.run_computer_turns(&mut GreedyAI::new(), 100);
        assert_eq!(moves.len(), 1);
        assert_eq!(game.current_player(), PlayerId(0));
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_runner_respects_turn_cap() {
        let mut game = two_player(0);
        game.run_computer_turns(&mut RandomAI::with_seed(3), 20);
        assert_eq!(game.turn(), 20);
        assert_eq!(game.board().piece_count(), 20);
    }
}
