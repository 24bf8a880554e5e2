//! Players, colors and pieces

use serde::{Deserialize, Serialize};

/// Player index, `0..N-1` in seating order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The player starting in the opposite triangle (0-1, 2-3, 4-5)
    pub fn rival(self) -> Self {
        PlayerId(self.0 ^ 1)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Player color. Presentation only; ownership is always a `PlayerId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Gray,
}

impl Color {
    /// Default seating palette
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Pink,
        Color::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Pink => "Pink",
            Color::Gray => "Gray",
        }
    }

    /// Single-character board symbol
    pub fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Pink => 'P',
            Color::Gray => 'K',
        }
    }

    /// First `count` colors of the palette
    pub fn palette(count: usize) -> Vec<Color> {
        Self::ALL.iter().copied().take(count).collect()
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub owner: PlayerId,
}

impl Piece {
    pub fn new(owner: PlayerId) -> Self {
        Self { owner }
    }
}
