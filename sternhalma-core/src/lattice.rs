//! Hex lattice: cells keyed by cube coordinate, wired to their neighbors

use crate::error::BoardError;
use crate::hex::{Cube, Direction};
use crate::pieces::Piece;
use rustc_hash::FxHashMap;

// ============================================================================
// CELL
// ============================================================================

/// A lattice cell: a coordinate, an optional occupant and up to six neighbor links
#[derive(Clone, Debug)]
pub struct Cell {
    coord: Cube,
    occupant: Option<Piece>,
    neighbors: [Option<Cube>; 6],
}

impl Cell {
    pub fn new(coord: Cube, occupant: Option<Piece>) -> Self {
        Self {
            coord,
            occupant,
            neighbors: [None; 6],
        }
    }

    pub fn empty(coord: Cube) -> Self {
        Self::new(coord, None)
    }

    pub fn coord(&self) -> Cube {
        self.coord
    }

    pub fn occupant(&self) -> Option<&Piece> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Neighbor in a direction, if wired
    pub fn neighbor(&self, direction: Direction) -> Option<Cube> {
        self.neighbors[direction.index()]
    }

    /// Wired neighbors in canonical direction order
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Cube)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbors[d.index()].map(|c| (d, c)))
    }

    pub fn is_neighbor(&self, other: Cube) -> bool {
        self.neighbors.iter().any(|n| *n == Some(other))
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

// ============================================================================
// LATTICE
// ============================================================================

/// The graph of all cells. Iteration follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct HexLattice {
    cells: Vec<Cell>,
    index: FxHashMap<Cube, usize>,
}

impl HexLattice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell and wire it to every adjacent cell already present
    pub fn insert(&mut self, mut cell: Cell) -> Result<(), BoardError> {
        let coord = cell.coord;
        if self.index.contains_key(&coord) {
            return Err(BoardError::DuplicateCell(coord));
        }

        let slot = self.cells.len();
        for direction in Direction::ALL {
            if let Some(&other) = self.index.get(&coord.step(direction)) {
                let neighbor = &mut self.cells[other];
                cell.neighbors[direction.index()] = Some(neighbor.coord);
                neighbor.neighbors[direction.opposite().index()] = Some(coord);
            }
        }

        self.cells.push(cell);
        self.index.insert(coord, slot);
        Ok(())
    }

    pub fn get(&self, coord: Cube) -> Option<&Cell> {
        self.index.get(&coord).map(|&i| &self.cells[i])
    }

    pub fn contains(&self, coord: Cube) -> bool {
        self.index.contains_key(&coord)
    }

    /// Occupant at a coordinate (None for empty or off-lattice)
    pub fn occupant(&self, coord: Cube) -> Option<&Piece> {
        self.get(coord).and_then(Cell::occupant)
    }

    /// True when the coordinate is on the lattice and holds no piece
    pub fn is_vacant(&self, coord: Cube) -> bool {
        self.get(coord).is_some_and(Cell::is_empty)
    }

    pub fn distance(&self, a: Cube, b: Cube) -> i32 {
        a.distance_to(b)
    }

    /// Swap the occupants of two cells. Returns false if either is off-lattice.
    pub fn flip(&mut self, a: Cube, b: Cube) -> bool {
        let (i, j) = match (self.index.get(&a), self.index.get(&b)) {
            (Some(&i), Some(&j)) => (i, j),
            _ => return false,
        };
        if i != j {
            let first = self.cells[i].occupant.take();
            self.cells[i].occupant = self.cells[j].occupant.take();
            self.cells[j].occupant = first;
        }
        true
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
