//! Square grid storage and coordinate helpers.

use std::fmt;

use crate::direction::{Direction, Directions};

/// A cell coordinate on the grid.
///
/// `x` is the column counted from the left edge and `y` is the row counted from the bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, `0` being the left edge.
    pub x: usize,
    /// Row, `0` being the bottom edge.
    pub y: usize,
}

impl Position {
    /// Builds a position from its column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position one step towards `direction`, or `None` when the step would leave the
    /// non-negative quadrant. Upper bounds are checked by [`Grid::neighbour`].
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        match (self.x.checked_add_signed(dx), self.y.checked_add_signed(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// A `size` by `size` grid of values stored in row-major order, bottom row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    /// Side length of the grid.
    size: usize,
    /// Cell values, indexed by `y * size + x`.
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Builds a grid with every cell set to a clone of `value`.
    #[must_use]
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> Grid<T> {
    /// Builds a grid by calling `init` for every position, in row-major order.
    #[must_use]
    pub fn from_fn(size: usize, mut init: impl FnMut(Position) -> T) -> Self {
        let cells = positions(size).map(&mut init).collect();
        Self { size, cells }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Checks whether `position` lies on the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Returns the value stored at `position`, if it lies on the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Returns a mutable reference to the value stored at `position`, if it lies on the grid.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.index(position)
            .and_then(move |index| self.cells.get_mut(index))
    }

    /// Overwrites the value at `position`, returning the previous one. Off-grid writes are
    /// ignored and return `None`.
    pub fn replace(&mut self, position: Position, value: T) -> Option<T> {
        self.get_mut(position)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Returns the on-grid neighbour of `position` towards `direction`.
    #[must_use]
    pub fn neighbour(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|neighbour| self.contains(*neighbour))
    }

    /// Returns the directions that point off the grid from `position`.
    ///
    /// Interior cells get the empty set, corners get two directions.
    #[must_use]
    pub fn off_grid_directions(&self, position: Position) -> Directions {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.neighbour(position, *direction).is_none())
            .fold(Directions::NONE, Directions::with)
    }

    /// Iterates over every position in row-major order, bottom row first.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        positions(self.size)
    }

    /// Iterates over every position together with its value.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        positions(self.size).zip(self.cells.iter())
    }

    /// Builds a new grid by mapping every value.
    #[must_use]
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.cells.into_iter().map(transform).collect(),
        }
    }

    /// Converts `position` into an index into the backing vector.
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y * self.size + position.x)
        } else {
            None
        }
    }
}

/// Iterates over the positions of a `size` by `size` grid in row-major order.
fn positions(size: usize) -> impl Iterator<Item = Position> {
    (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
}
