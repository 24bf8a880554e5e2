//! Computer players: single-ply greedy AI and a seeded random baseline

use crate::board::{Board, Move};
use crate::config::AiConfig;
use crate::hex::Cube;
use crate::pieces::PlayerId;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// STRATEGY
// ============================================================================

/// Something that can pick a move for a computer seat
pub trait Strategy {
    /// Choose a move for `player`, or `None` to pass
    fn choose_move(&mut self, board: &Board, player: PlayerId) -> Option<Move>;

    fn name(&self) -> &'static str;
}

// ============================================================================
// GREEDY AI
// ============================================================================

/// Single-ply greedy player.
///
/// Aims every piece at the empty cell nearest the far corner of the player's
/// win triangle and takes the move that most reduces the root of the summed
/// squared distances to it. A move is only taken if it scores below the
/// improvement threshold, `(radius - 1)^4` unless configured otherwise.
#[derive(Clone, Debug, Default)]
pub struct GreedyAI {
    pub threshold: Option<f64>,
}

impl GreedyAI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            threshold: config.improvement_threshold,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }

    /// Score a move has to beat to be played
    pub fn threshold_for(&self, board: &Board) -> f64 {
        self.threshold
            .unwrap_or_else(|| ((board.radius() - 1) as f64).powi(4))
    }

    /// Empty cell nearest to the player's corner win cell
    pub fn target_cell(&self, board: &Board, player: PlayerId) -> Option<Cube> {
        let corner = board.corner_cell(player)?;
        board.nearest_empty_cell_to(corner)
    }

    /// `sqrt(sum of squared distances to target)` after playing `mv`
    pub fn score_move(&self, board: &Board, player: PlayerId, mv: Move, target: Cube) -> f64 {
        let total: i64 = board
            .cells_owned_by(player)
            .map(|cell| {
                let at = if cell.coord() == mv.from { mv.to } else { cell.coord() };
                let d = board.distance(at, target) as i64;
                d * d
            })
            .sum();
        (total as f64).sqrt()
    }

    /// Best move for a player, if any beats the threshold
    pub fn best_move(&self, board: &Board, player: PlayerId) -> Option<Move> {
        let target = self.target_cell(board, player)?;

        let mut best_move = None;
        let mut best_score = self.threshold_for(board);
        for mv in board.legal_moves(player) {
            let score = self.score_move(board, player, mv, target);
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }
        best_move
    }

    /// Choose and apply a move. Returns the move played.
    pub fn play_turn(&self, board: &mut Board, player: PlayerId) -> Option<Move> {
        let mv = self.best_move(board, player)?;
        board.apply(mv).then_some(mv)
    }
}

impl Strategy for GreedyAI {
    fn choose_move(&mut self, board: &Board, player: PlayerId) -> Option<Move> {
        self.best_move(board, player)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

// ============================================================================
// RANDOM AI
// ============================================================================

/// Uniformly random legal moves, reproducible from a seed
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomAI {
    fn choose_move(&mut self, board: &Board, player: PlayerId) -> Option<Move> {
        board.legal_moves(player).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Color;

    fn two_player() -> Board {
        Board::new(5, &Color::palette(2)).unwrap()
    }

    #[test]
    fn test_target_is_nearest_hole_to_corner() {
        let board = two_player();
        let ai = GreedyAI::new();
        assert_eq!(ai.target_cell(&board, PlayerId(0)), Some(Cube::new(-4, 0, 4)));
    }

    #[test]
    fn test_default_threshold() {
        let board = two_player();
        assert_eq!(GreedyAI::new().threshold_for(&board), 256.0);
        assert_eq!(GreedyAI::with_threshold(3.0).threshold_for(&board), 3.0);
    }

    #[test]
    fn test_score_does_not_mutate() {
        let board = two_player();
        let ai = GreedyAI::new();
        let target = ai.target_cell(&board, PlayerId(0)).unwrap();
        let before = board.to_string();
        for mv in board.legal_moves(PlayerId(0)) {
            ai.score_move(&board, PlayerId(0), mv, target);
        }
        assert_eq!(board.to_string(), before);
    }

    #[test]
    fn test_best_move_minimizes_score() {
        let board = two_player();
        let ai = GreedyAI::new();
        let target = ai.target_cell(&board, PlayerId(0)).unwrap();
        let best = ai.best_move(&board, PlayerId(0)).unwrap();
        let best_score = ai.score_move(&board, PlayerId(0), best, target);
        for mv in board.legal_moves(PlayerId(0)) {
            assert!(ai.score_move(&board, PlayerId(0), mv, target) >= best_score);
        }
        assert!(board.is_valid_move(best.from, best.to));
    }

    #[test]
    fn test_best_move_advances_toward_target() {
        let board = two_player();
        let ai = GreedyAI::new();
        let target = ai.target_cell(&board, PlayerId(0)).unwrap();
        let mv = ai.best_move(&board, PlayerId(0)).unwrap();
        assert!(board.distance(mv.to, target) < board.distance(mv.from, target));
    }

    #[test]
    fn test_passes_when_nothing_beats_threshold() {
        let board = two_player();
        let ai = GreedyAI::with_threshold(0.0);
        assert_eq!(ai.best_move(&board, PlayerId(0)), None);
    }

    #[test]
    fn test_play_turn_applies_move() {
        let mut board = two_player();
        let ai = GreedyAI::new();
        let mv = ai.play_turn(&mut board, PlayerId(1)).unwrap();
        assert!(board.cell(mv.from).unwrap().is_empty());
        assert_eq!(board.cell(mv.to).unwrap().occupant().unwrap().owner, PlayerId(1));
    }

    #[test]
    fn test_random_is_deterministic_and_legal() {
        let board = two_player();
        let mut a = RandomAI::with_seed(7);
        let mut b = RandomAI::with_seed(7);
        for _ in 0..5 {
            let mv = a.choose_move(&board, PlayerId(0));
            assert_eq!(mv, b.choose_move(&board, PlayerId(0)));
            let mv = mv.unwrap();
            assert!(board.is_valid_move(mv.from, mv.to));
        }
    }
}
