//! The generated maze handed to callers.

use std::fmt;

use crate::{
    direction::{Direction, Directions},
    grid::{Grid, Position},
    tile::{TileCatalog, TileId, TileKind},
};

/// The content of one settled cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// The block placeholder: no exits, impassable.
    Void,
    /// A catalog tile.
    Tile {
        /// The placed tile type.
        id: TileId,
        /// The exits the cell actually offers.
        ///
        /// These are the tile's out-directions, except after the fill strategy's repair pass
        /// which closes exits that have no reciprocal connection.
        exits: Directions,
    },
}

impl Cell {
    /// Exits offered by the cell, empty for [`Cell::Void`].
    #[must_use]
    pub const fn exits(&self) -> Directions {
        match self {
            Self::Void => Directions::NONE,
            Self::Tile { exits, .. } => *exits,
        }
    }

    /// The placed tile type, if any.
    #[must_use]
    pub const fn tile_id(&self) -> Option<TileId> {
        match self {
            Self::Void => None,
            Self::Tile { id, .. } => Some(*id),
        }
    }

    /// Checks whether this is the void placeholder.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

/// A fully settled maze: every cell holds a tile or the void placeholder.
///
/// The maze keeps the catalog it was generated from so callers can resolve tile ids, and the
/// seed so the same maze can be generated again.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    /// Settled cells.
    cells: Grid<Cell>,
    /// Catalog the tile ids refer to.
    catalog: TileCatalog,
    /// Seed of the random number generator used.
    seed: u64,
    /// Cell the propagation started from, if any.
    start: Option<Position>,
}

impl Maze {
    /// Assembles a maze from settled cells.
    pub(crate) const fn new(
        cells: Grid<Cell>,
        catalog: TileCatalog,
        seed: u64,
        start: Option<Position>,
    ) -> Self {
        Self {
            cells,
            catalog,
            seed,
            start,
        }
    }

    /// Side length of the maze.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.cells.size()
    }

    /// The settled cells.
    #[must_use]
    pub const fn grid(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// The catalog tile ids refer to.
    #[must_use]
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Seed that reproduces this maze.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Cell the propagation started from. The fill strategy has none.
    #[must_use]
    pub const fn start(&self) -> Option<Position> {
        self.start
    }

    /// Returns the cell at `position`.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Returns the tile type placed at `position`, `None` for void or off-grid positions.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&TileKind> {
        self.cell(position)
            .and_then(Cell::tile_id)
            .and_then(|id| self.catalog.tile(id))
    }

    /// Exits offered at `position`, empty for void or off-grid positions.
    #[must_use]
    pub fn exits(&self, position: Position) -> Directions {
        self.cell(position).map_or(Directions::NONE, Cell::exits)
    }

    /// Checks whether the cell at `position` holds a tunnel tile.
    #[must_use]
    pub fn is_tunnel(&self, position: Position) -> bool {
        self.tile(position)
            .is_some_and(|tile| tile.category.is_tunnel())
    }

    /// Iterates over every position and its cell, bottom row first.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter()
    }

    /// Number of void cells.
    #[must_use]
    pub fn void_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.is_void()).count()
    }

    /// Lists every exit that breaks the adjacency rules, as `(position, direction)` pairs.
    ///
    /// An exit is broken when it points off the grid, or when it points at a non-void cell that
    /// does not expose the opposite direction back. Exits pointing at void cells are tolerated.
    #[must_use]
    pub fn broken_exits(&self) -> Vec<(Position, Direction)> {
        self.cells()
            .flat_map(|(position, cell)| {
                cell.exits()
                    .directions()
                    .filter(move |direction| !self.exit_holds(position, *direction))
                    .map(move |direction| (position, direction))
            })
            .collect()
    }

    /// Checks adjacency consistency and border legality for the whole maze.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.broken_exits().is_empty()
    }

    /// Checks a single exit against the adjacency rules.
    fn exit_holds(&self, position: Position, direction: Direction) -> bool {
        let Some(neighbour) = self.cells.neighbour(position, direction) else {
            return false;
        };
        match self.cell(neighbour) {
            Some(Cell::Void) => true,
            Some(cell) => cell.exits().opens(direction.opposite()),
            None => false,
        }
    }

    /// Glyph drawn for the cell at `position` in the text rendering.
    fn glyph(&self, position: Position) -> char {
        match self.cell(position) {
            None | Some(Cell::Void) => '\u{2588}',
            Some(cell) if self.is_tunnel(position) && cell.exits() == Directions::ALL => '\u{256c}',
            Some(cell) => exits_glyph(cell.exits()),
        }
    }
}

/// Maps an exit set to the box-drawing character showing it.
fn exits_glyph(exits: Directions) -> char {
    use Direction::{Down, Left, Right, Up};

    let has = |direction| exits.opens(direction);
    match (has(Up), has(Down), has(Left), has(Right)) {
        (false, false, false, false) => '\u{b7}',
        (true, false, false, false) => '\u{2575}',
        (false, true, false, false) => '\u{2577}',
        (false, false, true, false) => '\u{2574}',
        (false, false, false, true) => '\u{2576}',
        (true, true, false, false) => '\u{2502}',
        (false, false, true, true) => '\u{2500}',
        (true, false, false, true) => '\u{2514}',
        (true, false, true, false) => '\u{2518}',
        (false, true, false, true) => '\u{250c}',
        (false, true, true, false) => '\u{2510}',
        (true, true, false, true) => '\u{251c}',
        (true, true, true, false) => '\u{2524}',
        (true, false, true, true) => '\u{2534}',
        (false, true, true, true) => '\u{252c}',
        (true, true, true, true) => '\u{253c}',
    }
}

impl fmt::Display for Maze {
    /// Renders one character per cell, top row first.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size()).rev() {
            for x in 0..self.size() {
                write!(formatter, "{}", self.glyph(Position::new(x, y)))?;
            }
            writeln!(formatter)?;
        }
        Ok(())
    }
}
