//! Hex geometry with cube coordinates

use serde::{Deserialize, Serialize};

/// Cube hex coordinates. Every valid cube satisfies `x + y + z == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCube")]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub const ORIGIN: Cube = Cube { x: 0, y: 0, z: 0 };

    /// Create a cube, panicking if the coordinates leave the `x + y + z == 0` plane
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        assert!(
            x + y + z == 0,
            "cube coordinates must sum to zero: ({}, {}, {})",
            x, y, z
        );
        Self { x, y, z }
    }

    /// Distance between two cubes (number of single steps)
    pub fn distance_to(&self, other: Cube) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        (dx + dy + dz) / 2
    }

    /// Largest coordinate magnitude, i.e. distance from the origin
    pub fn magnitude(&self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Adjacent cube in a direction
    pub fn step(&self, direction: Direction) -> Cube {
        let (dx, dy, dz) = direction.offset();
        Cube::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The cube on the far side of `over`, so that `over` is the midpoint
    pub fn reflect_through(&self, over: Cube) -> Cube {
        Cube::new(
            over.x + (over.x - self.x),
            over.y + (over.y - self.y),
            over.z + (over.z - self.z),
        )
    }
}

/// Unchecked wire form, validated on the way in
#[derive(Deserialize)]
struct RawCube {
    x: i32,
    y: i32,
    z: i32,
}

impl TryFrom<RawCube> for Cube {
    type Error = String;

    fn try_from(raw: RawCube) -> Result<Self, Self::Error> {
        if raw.x + raw.y + raw.z != 0 {
            return Err(format!(
                "cube coordinates must sum to zero: ({}, {}, {})",
                raw.x, raw.y, raw.z
            ));
        }
        Ok(Cube { x: raw.x, y: raw.y, z: raw.z })
    }
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

impl std::str::FromStr for Cube {
    type Err = String;

    /// Parse `x,y,z` (parentheses optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected x,y,z but got '{}'", s));
        }

        let mut coords = [0i32; 3];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| format!("invalid coordinate '{}' in '{}'", part, s))?;
        }

        let [x, y, z] = coords;
        if x + y + z != 0 {
            return Err(format!("coordinates of '{}' do not sum to zero", s));
        }
        Ok(Cube { x, y, z })
    }
}

/// One of the three cube axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    X,
    Y,
    Z,
}

/// A neighbor direction, named by the dimension that increases and the one that decreases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    XY = 0,
    XZ = 1,
    YX = 2,
    YZ = 3,
    ZX = 4,
    ZY = 5,
}

impl Direction {
    /// Canonical iteration order
    pub const ALL: [Direction; 6] = [
        Direction::XY,
        Direction::XZ,
        Direction::YX,
        Direction::YZ,
        Direction::ZX,
        Direction::ZY,
    ];

    /// Direction from an (increasing, decreasing) dimension pair.
    /// `None` when both are the same dimension.
    pub fn new(increasing: Dimension, decreasing: Dimension) -> Option<Self> {
        use Dimension::*;
        match (increasing, decreasing) {
            (X, Y) => Some(Direction::XY),
            (X, Z) => Some(Direction::XZ),
            (Y, X) => Some(Direction::YX),
            (Y, Z) => Some(Direction::YZ),
            (Z, X) => Some(Direction::ZX),
            (Z, Y) => Some(Direction::ZY),
            _ => None,
        }
    }

    pub fn increasing(self) -> Dimension {
        match self {
            Direction::XY | Direction::XZ => Dimension::X,
            Direction::YX | Direction::YZ => Dimension::Y,
            Direction::ZX | Direction::ZY => Dimension::Z,
        }
    }

    pub fn decreasing(self) -> Dimension {
        match self {
            Direction::YX | Direction::ZX => Dimension::X,
            Direction::XY | Direction::ZY => Dimension::Y,
            Direction::XZ | Direction::YZ => Dimension::Z,
        }
    }

    /// Unit offset `(dx, dy, dz)`
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::XY => (1, -1, 0),
            Direction::XZ => (1, 0, -1),
            Direction::YX => (-1, 1, 0),
            Direction::YZ => (0, 1, -1),
            Direction::ZX => (-1, 0, 1),
            Direction::ZY => (0, -1, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::XY => Direction::YX,
            Direction::XZ => Direction::ZX,
            Direction::YX => Direction::XY,
            Direction::YZ => Direction::ZY,
            Direction::ZX => Direction::XZ,
            Direction::ZY => Direction::YZ,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
