//! Compass directions and compact direction sets.
//!
//! The maze uses a single axis convention everywhere: `x` grows to the right and `y` grows
//! upwards, so [`Direction::Up`] moves to `y + 1` and [`Direction::Down`] moves to `y - 1`.

use std::fmt;

use bitflags::bitflags;

/// A compass direction on the maze grid.
///
/// The [`Direction::None`] variant stands for "no direction" and is what [`Direction::opposite`]
/// maps to itself. It never appears inside a [`Directions`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards `y + 1`.
    Up,
    /// Towards `y - 1`.
    Down,
    /// Towards `x - 1`.
    Left,
    /// Towards `x + 1`.
    Right,
    /// The absence of a direction.
    None,
}

impl Direction {
    /// The four real compass directions, in the order propagation visits them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    ///
    /// This is an involution: applying it twice yields the original direction, and
    /// [`Direction::None`] is its own opposite.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Returns the `(dx, dy)` step taken when moving one cell in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    /// Returns the single-letter code used by catalog files.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
            Self::None => '-',
        }
    }

    /// Parses a single-letter direction code, case-insensitively.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// The single-member set holding this direction; empty for [`Direction::None`].
    #[must_use]
    pub const fn flag(self) -> Directions {
        match self {
            Self::Up => Directions::UP,
            Self::Down => Directions::DOWN,
            Self::Left => Directions::LEFT,
            Self::Right => Directions::RIGHT,
            Self::None => Directions::empty(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        };
        formatter.write_str(name)
    }
}

bitflags! {
    /// A set of real compass directions.
    ///
    /// Tiles describe their out-directions with this set. Adding [`Direction::None`] is a no-op.
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// Towards `y + 1`.
        const UP = 0b0001;
        /// Towards `y - 1`.
        const DOWN = 0b0010;
        /// Towards `x - 1`.
        const LEFT = 0b0100;
        /// Towards `x + 1`.
        const RIGHT = 0b1000;
    }
}

impl Default for Directions {
    fn default() -> Self {
        Self::NONE
    }
}

impl Directions {
    /// The empty set.
    pub const NONE: Self = Self::empty();
    /// All four directions.
    pub const ALL: Self = Self::all();

    /// Builds a set from a slice of directions.
    #[must_use]
    pub fn from_slice(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Self::NONE, |set, direction| set.with(*direction))
    }

    /// Returns a copy of this set with `direction` added.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        self.union(direction.flag())
    }

    /// Checks whether the set opens towards `direction`. [`Direction::None`] is never open.
    #[must_use]
    pub const fn opens(self, direction: Direction) -> bool {
        let flag = direction.flag();
        !flag.is_empty() && self.contains(flag)
    }

    /// Number of directions in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.bits().count_ones()
    }

    /// Iterates over the contained directions in [`Direction::ALL`] order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.opens(*direction))
    }

    /// Parses a set from catalog notation: any combination of `UDLR`, or `-` for the empty set.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        if code == "-" {
            return Some(Self::NONE);
        }
        if code.is_empty() {
            return None;
        }
        code.chars().try_fold(Self::NONE, |set, letter| {
            Direction::from_letter(letter).map(|direction| set.with(direction))
        })
    }
}

impl fmt::Debug for Directions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.directions()).finish()
    }
}

impl fmt::Display for Directions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return formatter.write_str("-");
        }
        for direction in self.directions() {
            write!(formatter, "{}", direction.letter())?;
        }
        Ok(())
    }
}
