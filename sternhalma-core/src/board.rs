//! Star board: construction, move legality, jump chains and win detection

use crate::error::BoardError;
use crate::hex::{Cube, Direction};
use crate::lattice::{Cell, HexLattice};
use crate::pieces::{Color, Piece, PlayerId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest radius that still leaves room for a home triangle
pub const MIN_RADIUS: i32 = 2;

/// Largest accepted radius (a 24,193-cell board)
pub const MAX_RADIUS: i32 = 64;

/// Radius of the standard 121-hole board
pub const STANDARD_RADIUS: i32 = 5;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A move of one piece, possibly through a chain of jumps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Cube,
    pub to: Cube,
}

impl Move {
    pub fn new(from: Cube, to: Cube) -> Self {
        Self { from, to }
    }
}

/// The six triangular home regions, named by the axis they extend along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Home {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Home {
    /// Construction order
    pub const ALL: [Home; 6] = [
        Home::PosX,
        Home::NegX,
        Home::PosY,
        Home::NegY,
        Home::PosZ,
        Home::NegZ,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Home::PosX => Home::NegX,
            Home::NegX => Home::PosX,
            Home::PosY => Home::NegY,
            Home::NegY => Home::PosY,
            Home::PosZ => Home::NegZ,
            Home::NegZ => Home::PosZ,
        }
    }

    /// Player whose pieces start here, for a given player count
    pub fn starting_player(self, player_count: usize) -> Option<PlayerId> {
        match self {
            Home::NegZ => Some(PlayerId(0)),
            Home::PosZ => Some(PlayerId(1)),
            Home::NegY if player_count >= 4 => Some(PlayerId(2)),
            Home::PosY if player_count >= 4 => Some(PlayerId(3)),
            Home::NegX if player_count == 6 => Some(PlayerId(4)),
            Home::PosX if player_count == 6 => Some(PlayerId(5)),
            _ => None,
        }
    }

    /// Cells of this triangle, row by row from the center outwards.
    ///
    /// Rows run along the primary axis from `radius` to `2 * (radius - 1)`;
    /// each row is one cell shorter than the last, so the triangle has side
    /// `radius - 1`.
    pub fn cells(self, radius: i32) -> Vec<Cube> {
        let sign = match self {
            Home::PosX | Home::PosY | Home::PosZ => 1,
            Home::NegX | Home::NegY | Home::NegZ => -1,
        };

        let mut cells = Vec::with_capacity(triangle_size(radius));
        for step in 0..radius - 1 {
            let primary = sign * (radius + step);
            for k in 0..radius - 1 - step {
                let secondary = sign * (k - (radius - 1));
                let third = -(primary + secondary);
                let cube = match self {
                    Home::PosX | Home::NegX => Cube::new(primary, third, secondary),
                    Home::PosY | Home::NegY => Cube::new(secondary, primary, third),
                    Home::PosZ | Home::NegZ => Cube::new(third, secondary, primary),
                };
                cells.push(cube);
            }
        }
        cells
    }
}

/// Number of cells in one home triangle
pub fn triangle_size(radius: i32) -> usize {
    let side = (radius - 1).max(0) as usize;
    side * (side + 1) / 2
}

/// Number of cells in the central hexagon
pub fn center_size(radius: i32) -> usize {
    let r = radius.max(1) as usize;
    3 * r * (r - 1) + 1
}

/// Total cells on a star board
pub fn board_size(radius: i32) -> usize {
    center_size(radius) + 6 * triangle_size(radius)
}

// ============================================================================
// BOARD
// ============================================================================

/// Chinese Checkers board (clone to branch)
#[derive(Clone, Debug)]
pub struct Board {
    radius: i32,
    players: Vec<Color>,
    lattice: HexLattice,
    /// Per player: the cells they must fill to win
    win_cells: Vec<Vec<Cube>>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a star board for 2, 4 or 6 players
    pub fn new(radius: i32, players: &[Color]) -> Result<Self, BoardError> {
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
            return Err(BoardError::InvalidRadius { radius });
        }
        if !matches!(players.len(), 2 | 4 | 6) {
            return Err(BoardError::InvalidPlayerCount {
                count: players.len(),
            });
        }

        let mut board = Self {
            radius,
            players: players.to_vec(),
            lattice: HexLattice::new(),
            win_cells: vec![Vec::new(); players.len()],
        };
        board.build_center()?;
        board.build_homes()?;
        Ok(board)
    }

    fn build_center(&mut self) -> Result<(), BoardError> {
        let edge = self.radius - 1;
        for x in -edge..=edge {
            for y in -edge..=edge {
                let z = -(x + y);
                if z.abs() <= edge {
                    self.lattice.insert(Cell::empty(Cube::new(x, y, z)))?;
                }
            }
        }
        Ok(())
    }

    fn build_homes(&mut self) -> Result<(), BoardError> {
        let player_count = self.players.len();
        for home in Home::ALL {
            let owner = home.starting_player(player_count);
            for coord in home.cells(self.radius) {
                self.lattice.insert(Cell::new(coord, owner.map(Piece::new)))?;
                if let Some(player) = owner {
                    self.win_cells[player.rival().index()].push(coord);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Color] {
        &self.players
    }

    pub fn color_of(&self, player: PlayerId) -> Option<Color> {
        self.players.get(player.index()).copied()
    }

    pub fn lattice(&self) -> &HexLattice {
        &self.lattice
    }

    pub fn cell(&self, coord: Cube) -> Option<&Cell> {
        self.lattice.get(coord)
    }

    /// All cells in lattice order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.lattice.cells().iter()
    }

    /// Cells holding one player's pieces, in lattice order
    pub fn cells_owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Cell> + '_ {
        self.cells()
            .filter(move |c| c.occupant().is_some_and(|p| p.owner == player))
    }

    /// Cells a player must fill to win (empty for unknown players)
    pub fn win_cells_for(&self, player: PlayerId) -> &[Cube] {
        self.win_cells
            .get(player.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn size(&self) -> usize {
        self.lattice.len()
    }

    pub fn piece_count(&self) -> usize {
        self.cells().filter(|c| !c.is_empty()).count()
    }

    pub fn distance(&self, a: Cube, b: Cube) -> i32 {
        self.lattice.distance(a, b)
    }

    /// Nearest empty cell to `coord`; ties go to the first in lattice order
    pub fn nearest_empty_cell_to(&self, coord: Cube) -> Option<Cube> {
        let mut best: Option<(i32, Cube)> = None;
        for cell in self.cells().filter(|c| c.is_empty()) {
            let dist = self.distance(cell.coord(), coord);
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, cell.coord()));
            }
        }
        best.map(|(_, c)| c)
    }

    /// The win cell farthest from the center; ties keep the last one listed
    pub fn corner_cell(&self, player: PlayerId) -> Option<Cube> {
        let mut corner: Option<Cube> = None;
        for &coord in self.win_cells_for(player) {
            if corner.map_or(true, |c| coord.magnitude() >= c.magnitude()) {
                corner = Some(coord);
            }
        }
        corner
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Check if moving the piece on `src` to `dst` is legal
    pub fn is_valid_move(&self, src: Cube, dst: Cube) -> bool {
        let occupied = self.lattice.occupant(src).is_some();
        if !occupied || !self.lattice.is_vacant(dst) {
            return false;
        }
        self.valid_moves(src).contains(&dst)
    }

    /// Every destination reachable from `src`: empty neighbors, then jump landings
    pub fn valid_moves(&self, src: Cube) -> Vec<Cube> {
        let cell = match self.lattice.get(src) {
            Some(cell) => cell,
            None => return Vec::new(),
        };

        let mut moves: Vec<Cube> = cell
            .neighbors()
            .map(|(_, coord)| coord)
            .filter(|&coord| self.lattice.is_vacant(coord))
            .collect();
        moves.extend(self.jump_destinations(src));
        moves
    }

    /// Landings of all jump chains starting at `src`, depth first.
    ///
    /// The visited set is local to the call, so successive searches never
    /// see each other's state.
    pub fn jump_destinations(&self, src: Cube) -> Vec<Cube> {
        let mut landings = Vec::new();
        if !self.lattice.contains(src) {
            return landings;
        }

        let mut visited = FxHashSet::default();
        visited.insert(src);

        // (cell, next direction to try)
        let mut stack: Vec<(Cube, usize)> = vec![(src, 0)];
        while let Some((at, next)) = stack.pop() {
            let Some(&direction) = Direction::ALL.get(next) else {
                continue;
            };
            stack.push((at, next + 1));

            if let Some(landing) = self.jump_landing(at, direction) {
                if visited.insert(landing) {
                    landings.push(landing);
                    stack.push((landing, 0));
                }
            }
        }
        landings
    }

    /// Landing cell for a jump from `from` over its neighbor in `direction`
    fn jump_landing(&self, from: Cube, direction: Direction) -> Option<Cube> {
        let over = self.lattice.get(from)?.neighbor(direction)?;
        self.lattice.occupant(over)?;

        let landing = from.reflect_through(over);
        self.lattice.is_vacant(landing).then_some(landing)
    }

    /// All legal moves for a player, pieces in lattice order
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        self.cells_owned_by(player)
            .flat_map(|cell| {
                let from = cell.coord();
                self.valid_moves(from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// Move a piece if the move is legal. Illegal moves change nothing.
    pub fn move_piece(&mut self, src: Cube, dst: Cube) -> bool {
        if !self.is_valid_move(src, dst) {
            return false;
        }
        self.lattice.flip(src, dst)
    }

    pub fn apply(&mut self, mv: Move) -> bool {
        self.move_piece(mv.from, mv.to)
    }

    // ========================================================================
    // WIN DETECTION
    // ========================================================================

    /// First player (by index) who has won, if any
    pub fn won(&self) -> Option<PlayerId> {
        (0..self.players.len())
            .map(|i| PlayerId(i as u8))
            .find(|&p| self.has_won(p))
    }

    /// A player wins when every win cell is occupied and they hold more than half
    pub fn has_won(&self, player: PlayerId) -> bool {
        let targets = self.win_cells_for(player);
        if targets.is_empty() {
            return false;
        }

        let mut owned = 0;
        for &coord in targets {
            match self.lattice.occupant(coord) {
                None => return false,
                Some(piece) if piece.owner == player => owned += 1,
                Some(_) => {}
            }
        }
        owned * 2 > targets.len()
    }
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

impl std::fmt::Display for Board {
    /// One row per z, cells at column `y - x`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reach = 2 * (self.radius - 1);
        // |y - x| never exceeds 3 * (radius - 1) on the star
        let span = 3 * (self.radius - 1);
        let width = (2 * span + 1) as usize;

        for z in -reach..=reach {
            let mut row = vec![' '; width];
            for cell in self.cells().filter(|c| c.coord().z == z) {
                let c = cell.coord();
                let column = (c.y - c.x + span) as usize;
                row[column] = match cell.occupant() {
                    Some(piece) => self
                        .color_of(piece.owner)
                        .map_or('?', Color::symbol),
                    None => '.',
                };
            }
            let line: String = row.into_iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Board with every piece removed, for building positions by hand
    fn cleared(radius: i32) -> Board {
        let mut board = Board::new(radius, &Color::palette(2)).unwrap();
        let mut lattice = HexLattice::new();
        for cell in board.lattice.cells() {
            lattice.insert(Cell::empty(cell.coord())).unwrap();
        }
        board.lattice = lattice;
        board
    }

    fn place(board: &mut Board, coord: Cube, player: u8) {
        let mut lattice = HexLattice::new();
        for cell in board.lattice.cells() {
            let occupant = if cell.coord() == coord {
                Some(Piece::new(PlayerId(player)))
            } else {
                cell.occupant().copied()
            };
            lattice.insert(Cell::new(cell.coord(), occupant)).unwrap();
        }
        board.lattice = lattice;
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Board::new(1, &Color::palette(2)).unwrap_err(),
            BoardError::InvalidRadius { radius: 1 }
        );
        assert_eq!(
            Board::new(MAX_RADIUS + 1, &Color::palette(2)).unwrap_err(),
            BoardError::InvalidRadius { radius: MAX_RADIUS + 1 }
        );
        assert_eq!(
            Board::new(i32::MAX, &Color::palette(2)).unwrap_err(),
            BoardError::InvalidRadius { radius: i32::MAX }
        );
        for count in [0, 1, 3, 5, 7] {
            assert_eq!(
                Board::new(5, &vec![Color::Red; count]).unwrap_err(),
                BoardError::InvalidPlayerCount { count }
            );
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!(triangle_size(5), 10);
        assert_eq!(center_size(5), 61);
        assert_eq!(board_size(5), 121);
        assert_eq!(board_size(2), 13);
    }

    #[test]
    fn test_cell_counts_and_invariant() {
        for radius in 2..=6 {
            for count in [2, 4, 6] {
                let board = Board::new(radius, &Color::palette(count)).unwrap();
                assert_eq!(board.size(), board_size(radius));
                for cell in board.cells() {
                    let c = cell.coord();
                    assert_eq!(c.x + c.y + c.z, 0);
                }
                assert_eq!(board.piece_count(), count * triangle_size(radius));
            }
        }
    }

    #[test]
    fn test_home_triangles_are_outside_center() {
        for home in Home::ALL {
            let cells = home.cells(5);
            assert_eq!(cells.len(), 10);
            assert!(cells.iter().all(|c| c.magnitude() >= 5 && c.magnitude() <= 8));
            let opposite = home.opposite().cells(5);
            for c in &cells {
                assert!(opposite.contains(&Cube::new(-c.x, -c.y, -c.z)));
            }
        }
    }

    #[test]
    fn test_win_cells_are_opposite_home() {
        let board = Board::new(4, &Color::palette(6)).unwrap();
        for home in Home::ALL {
            let player = home.starting_player(6).unwrap();
            let mut expected = home.opposite().cells(4);
            let mut actual = board.win_cells_for(player).to_vec();
            expected.sort_by_key(|c| (c.x, c.y));
            actual.sort_by_key(|c| (c.x, c.y));
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_four_players_leave_x_homes_empty() {
        let board = Board::new(5, &Color::palette(4)).unwrap();
        for coord in Home::PosX.cells(5).into_iter().chain(Home::NegX.cells(5)) {
            assert!(board.cell(coord).unwrap().is_empty());
        }
        for p in 0..4 {
            assert_eq!(board.win_cells_for(PlayerId(p)).len(), 10);
        }
        assert!(board.win_cells_for(PlayerId(4)).is_empty());
    }

    #[test]
    fn test_distance_one_iff_neighbors() {
        let board = Board::new(3, &Color::palette(2)).unwrap();
        for a in board.cells() {
            assert_eq!(board.distance(a.coord(), a.coord()), 0);
            for b in board.cells() {
                let d = board.distance(a.coord(), b.coord());
                assert_eq!(d, board.distance(b.coord(), a.coord()));
                assert_eq!(d == 1, a.is_neighbor(b.coord()));
            }
        }
    }

    #[test]
    fn test_single_step_moves() {
        let mut board = cleared(5);
        let origin = Cube::ORIGIN;
        place(&mut board, origin, 0);

        let moves = board.valid_moves(origin);
        assert_eq!(moves.len(), 6);
        assert!(board.is_valid_move(origin, Cube::new(1, -1, 0)));
        assert!(!board.is_valid_move(origin, Cube::new(2, -2, 0)));
        assert!(!board.is_valid_move(Cube::new(1, -1, 0), origin));
    }

    #[test]
    fn test_single_jump() {
        let mut board = cleared(5);
        place(&mut board, Cube::ORIGIN, 0);
        place(&mut board, Cube::new(1, -1, 0), 1);

        assert!(board.is_valid_move(Cube::ORIGIN, Cube::new(2, -2, 0)));
        assert!(!board.is_valid_move(Cube::ORIGIN, Cube::new(3, -3, 0)));
        assert_eq!(board.jump_destinations(Cube::ORIGIN), vec![Cube::new(2, -2, 0)]);
    }

    #[test]
    fn test_jump_chains() {
        // Straight line of pieces every other cell along +x/-y
        let mut board = cleared(5);
        place(&mut board, Cube::new(-4, 4, 0), 0);
        place(&mut board, Cube::new(-3, 3, 0), 1);
        place(&mut board, Cube::new(-1, 1, 0), 1);
        place(&mut board, Cube::new(1, -1, 0), 1);

        let src = Cube::new(-4, 4, 0);
        assert!(board.is_valid_move(src, Cube::new(-2, 2, 0)));
        assert!(board.is_valid_move(src, Cube::new(0, 0, 0)));
        assert!(board.is_valid_move(src, Cube::new(2, -2, 0)));
        assert!(!board.is_valid_move(src, Cube::new(3, -3, 0)));
        assert!(!board.is_valid_move(src, Cube::new(4, -4, 0)));
    }

    #[test]
    fn test_jump_chain_turns_corner() {
        let mut board = cleared(5);
        place(&mut board, Cube::ORIGIN, 0);
        place(&mut board, Cube::new(1, -1, 0), 1);
        // after landing on (2,-2,0), jump over (2,-1,-1) to (2,0,-2)
        place(&mut board, Cube::new(2, -1, -1), 1);

        assert!(board.is_valid_move(Cube::ORIGIN, Cube::new(2, 0, -2)));
        assert!(!board.is_valid_move(Cube::ORIGIN, Cube::new(2, -1, -1)));
    }

    #[test]
    fn test_jump_needs_empty_landing() {
        let mut board = cleared(5);
        place(&mut board, Cube::ORIGIN, 0);
        place(&mut board, Cube::new(1, -1, 0), 1);
        place(&mut board, Cube::new(2, -2, 0), 1);
        assert!(!board.is_valid_move(Cube::ORIGIN, Cube::new(2, -2, 0)));
        assert!(board.jump_destinations(Cube::ORIGIN).is_empty());
    }

    #[test]
    fn test_jump_cycle_terminates_without_landing_on_source() {
        // Ring of six pieces around (0,0,0) with a mover outside
        let mut board = cleared(5);
        for d in Direction::ALL {
            place(&mut board, Cube::ORIGIN.step(d), 1);
        }
        let src = Cube::new(2, -2, 0);
        place(&mut board, src, 0);
        let landings = board.jump_destinations(src);
        let unique: FxHashSet<Cube> = landings.iter().copied().collect();
        assert_eq!(unique.len(), landings.len());
        assert!(!landings.contains(&src));
        assert!(landings.contains(&Cube::ORIGIN));
    }

    #[test]
    fn test_move_rejects_occupied_destination() {
        let mut board = Board::new(5, &Color::palette(2)).unwrap();
        let before: Vec<_> = board.cells().map(|c| c.occupant().copied()).collect();
        let home = Home::NegZ.cells(5);
        assert!(!board.move_piece(home[0], home[1]));
        let after: Vec<_> = board.cells().map(|c| c.occupant().copied()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_move_conserves_pieces() {
        let mut board = Board::new(5, &Color::palette(2)).unwrap();
        let before = board.piece_count();
        let mv = board.legal_moves(PlayerId(0))[0];
        assert!(board.apply(mv));
        assert_eq!(board.piece_count(), before);
        assert!(board.cell(mv.from).unwrap().is_empty());
        assert_eq!(board.cell(mv.to).unwrap().occupant().unwrap().owner, PlayerId(0));
    }

    #[test]
    fn test_sequential_queries_are_independent() {
        let mut board = cleared(5);
        place(&mut board, Cube::ORIGIN, 0);
        place(&mut board, Cube::new(1, -1, 0), 1);

        let jump = Cube::new(2, -2, 0);
        assert!(board.is_valid_move(Cube::ORIGIN, jump));
        assert!(board.is_valid_move(Cube::ORIGIN, jump));
        assert_eq!(board.valid_moves(Cube::ORIGIN), board.valid_moves(Cube::ORIGIN));
    }

    #[test]
    fn test_win_thresholds() {
        let base = cleared(5);
        let targets = Board::new(5, &Color::palette(2))
            .unwrap()
            .win_cells_for(PlayerId(0))
            .to_vec();
        assert_eq!(targets.len(), 10);

        let fill = |own: usize, filled: usize| {
            let mut board = base.clone();
            board.win_cells = vec![targets.clone(), Vec::new()];
            for (i, &coord) in targets.iter().take(filled).enumerate() {
                place(&mut board, coord, if i < own { 0 } else { 1 });
            }
            board
        };

        assert!(fill(6, 10).has_won(PlayerId(0)));
        assert_eq!(fill(6, 10).won(), Some(PlayerId(0)));
        assert!(!fill(5, 10).has_won(PlayerId(0)));
        assert!(!fill(9, 9).has_won(PlayerId(0)));
        assert_eq!(fill(9, 9).won(), None);
    }

    #[test]
    fn test_no_winner_at_start() {
        for count in [2, 4, 6] {
            let board = Board::new(5, &Color::palette(count)).unwrap();
            assert_eq!(board.won(), None);
        }
    }

    #[test]
    fn test_nearest_empty_cell() {
        let board = Board::new(5, &Color::palette(2)).unwrap();
        let corner = board.corner_cell(PlayerId(0)).unwrap();
        assert_eq!(corner, Cube::new(-4, -4, 8));
        // Whole +z triangle is full, so the nearest hole is on the center's edge
        let nearest = board.nearest_empty_cell_to(corner).unwrap();
        assert!(board.cell(nearest).unwrap().is_empty());
        assert_eq!(board.distance(nearest, corner), 4);
        // first cell of the center at that distance
        assert_eq!(nearest, Cube::new(-4, 0, 4));
        assert_eq!(board.nearest_empty_cell_to(Cube::ORIGIN), Some(Cube::ORIGIN));
    }

    #[test]
    fn test_display_shape() {
        let board = Board::new(5, &Color::palette(2)).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0].trim(), "R");
        assert_eq!(lines[16].trim(), "B");
        let holes = text.chars().filter(|c| matches!(c, '.' | 'R' | 'B')).count();
        assert_eq!(holes, 121);
    }
}
