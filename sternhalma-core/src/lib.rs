//! Sternhalma Core - Chinese Checkers engine and AI
//!
//! This crate provides the core game logic for Sternhalma:
//! - Hex geometry (cube coordinates and the six directions)
//! - The hex lattice graph with neighbor wiring
//! - Star board construction, move and jump-chain legality, win detection
//! - A single-ply greedy AI and a seeded random baseline
//! - Turn orchestration and game configuration

pub mod hex;
pub mod pieces;
pub mod error;
pub mod lattice;
pub mod board;
pub mod ai;
pub mod game;
pub mod config;

// Re-exports for convenient access
pub use hex::{Cube, Dimension, Direction};
pub use pieces::{Color, Piece, PlayerId};
pub use error::BoardError;
pub use lattice::{Cell, HexLattice};
pub use board::{Board, Home, Move, MAX_RADIUS, MIN_RADIUS, STANDARD_RADIUS};
pub use ai::{GreedyAI, RandomAI, Strategy};
pub use game::{Game, GameResult};
pub use config::{AiConfig, GameConfig};
