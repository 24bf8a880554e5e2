//! Error types for board construction

use crate::hex::Cube;

/// Errors raised while building a board or its lattice
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Invalid board radius: {radius} (must be between 2 and 64)")]
    InvalidRadius { radius: i32 },

    #[error("Invalid player count: {count} (must be 2, 4 or 6)")]
    InvalidPlayerCount { count: usize },

    #[error("Duplicate cell at {0}")]
    DuplicateCell(Cube),
}
