//! Tile types, their categories and the weighted tile catalog.

use std::fmt;

use crate::{
    direction::{Direction, Directions},
    error::{Error, Result},
};

/// Index of a tile type inside its [`TileCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// A pair of directions through which a tunnel tile can be traversed, in either order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crossing(pub Direction, pub Direction);

impl Crossing {
    /// Returns the other end of the crossing when entering from `enter`.
    #[must_use]
    pub fn other_end(self, enter: Direction) -> Option<Direction> {
        if self.0 == enter {
            Some(self.1)
        } else if self.1 == enter {
            Some(self.0)
        } else {
            None
        }
    }

    /// Parses the two-letter notation used by catalog files, such as `UL`.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let mut letters = code.chars();
        let first = Direction::from_letter(letters.next()?)?;
        let second = Direction::from_letter(letters.next()?)?;
        if letters.next().is_some() || first == second {
            return None;
        }
        Some(Self(first, second))
    }
}

impl fmt::Display for Crossing {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.0.letter(), self.1.letter())
    }
}

/// The shape family of a tile type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileCategory {
    /// No out-direction at all; renders as a solid block.
    Block,
    /// A single out-direction.
    DeadEnd,
    /// Two opposite out-directions, the "I" tile.
    Straight,
    /// Two perpendicular out-directions, the "L" tile.
    Corner,
    /// Three out-directions, the "T" tile.
    Tee,
    /// All four out-directions, the "X" tile.
    Cross,
    /// A tile whose passages cross each other without joining, such as the double-L tile.
    ///
    /// Travellers entering from one direction of a crossing leave through its other direction.
    Tunnel(Vec<Crossing>),
}

impl TileCategory {
    /// Derives the category of a plain tile from its out-directions.
    #[must_use]
    pub fn from_exits(exits: Directions) -> Self {
        match exits.len() {
            0 => Self::Block,
            1 => Self::DeadEnd,
            2 if exits == Directions::from_slice(&[Direction::Up, Direction::Down])
                || exits == Directions::from_slice(&[Direction::Left, Direction::Right]) =>
            {
                Self::Straight
            }
            2 => Self::Corner,
            3 => Self::Tee,
            _ => Self::Cross,
        }
    }

    /// Checks whether this is the tunnel category.
    #[must_use]
    pub const fn is_tunnel(&self) -> bool {
        matches!(self, Self::Tunnel(_))
    }
}

/// A tile type: a named shape with the directions it allows passage through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileKind {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Shape family, carrying the crossings for tunnels.
    pub category: TileCategory,
    /// Directions in which the tile permits passage out of its cell.
    pub exits: Directions,
}

impl TileKind {
    /// Builds a plain tile, deriving its category from `exits`.
    #[must_use]
    pub fn new(name: impl Into<String>, exits: Directions) -> Self {
        Self {
            name: name.into(),
            category: TileCategory::from_exits(exits),
            exits,
        }
    }

    /// Builds a tunnel tile. Its out-directions are the union of the crossing ends.
    #[must_use]
    pub fn tunnel(name: impl Into<String>, crossings: Vec<Crossing>) -> Self {
        let exits = crossings.iter().fold(Directions::NONE, |exits, crossing| {
            exits.with(crossing.0).with(crossing.1)
        });
        Self {
            name: name.into(),
            category: TileCategory::Tunnel(crossings),
            exits,
        }
    }

    /// Checks whether the tile exposes an exit towards `direction`.
    #[must_use]
    pub const fn exposes(&self, direction: Direction) -> bool {
        self.exits.opens(direction)
    }
}

/// A catalog entry: a tile type and its relative selection weight.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    /// The tile type.
    pub tile: TileKind,
    /// Relative weight, zero meaning the tile is never picked.
    pub weight: f64,
}

/// The tile types available for random selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileCatalog {
    /// Entries in selection order.
    entries: Vec<CatalogEntry>,
}

impl TileCatalog {
    /// Builds a catalog from its entries. Use [`TileCatalog::validate`] before generating.
    #[must_use]
    pub const fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Appends a tile with the given weight.
    #[must_use]
    pub fn with(mut self, tile: TileKind, weight: f64) -> Self {
        self.entries.push(CatalogEntry { tile, weight });
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `id`.
    #[must_use]
    pub fn entry(&self, id: TileId) -> Option<&CatalogEntry> {
        self.entries.get(id.0)
    }

    /// Returns the tile type for `id`.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&TileKind> {
        self.entry(id).map(|entry| &entry.tile)
    }

    /// Returns the weight of `id`, zero for unknown ids.
    #[must_use]
    pub fn weight(&self, id: TileId) -> f64 {
        self.entry(id).map_or(0.0, |entry| entry.weight)
    }

    /// Checks whether `id` names a tile exposing `direction`.
    #[must_use]
    pub fn exposes(&self, id: TileId, direction: Direction) -> bool {
        self.tile(id).is_some_and(|tile| tile.exposes(direction))
    }

    /// Iterates over every id with its entry, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (TileId(index), entry))
    }

    /// Looks a tile up by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.iter()
            .find(|(_, entry)| entry.tile.name == name)
            .map(|(id, _)| id)
    }

    /// Checks that the catalog can drive a generation.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCatalog`] when there are no entries
    /// - [`Error::InvalidWeight`] for a negative, infinite or NaN weight
    /// - [`Error::ZeroWeightCatalog`] when every weight is zero
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| !entry.weight.is_finite() || entry.weight < 0.0)
        {
            return Err(Error::InvalidWeight {
                tile: entry.tile.name.clone(),
                weight: entry.weight,
            });
        }
        if self.entries.iter().all(|entry| entry.weight <= 0.0) {
            return Err(Error::ZeroWeightCatalog);
        }

        Ok(())
    }

    /// The standard tile set: an X, four T, two I, four L and two double-L tunnels.
    #[must_use]
    pub fn standard() -> Self {
        use Direction::{Down, Left, Right, Up};

        let tile = |name: &str, exits: &[Direction]| TileKind::new(name, Directions::from_slice(exits));

        Self::default()
            .with(tile("X", &[Up, Down, Left, Right]), 1.0)
            .with(tile("T-up", &[Up, Left, Right]), 1.0)
            .with(tile("T-down", &[Down, Left, Right]), 1.0)
            .with(tile("T-left", &[Up, Down, Left]), 1.0)
            .with(tile("T-right", &[Up, Down, Right]), 1.0)
            .with(tile("I-vertical", &[Up, Down]), 1.0)
            .with(tile("I-horizontal", &[Left, Right]), 1.0)
            .with(tile("L-up-right", &[Up, Right]), 1.0)
            .with(tile("L-right-down", &[Right, Down]), 1.0)
            .with(tile("L-down-left", &[Down, Left]), 1.0)
            .with(tile("L-left-up", &[Left, Up]), 1.0)
            .with(
                TileKind::tunnel(
                    "double-L-up-left",
                    vec![Crossing(Up, Left), Crossing(Down, Right)],
                ),
                0.5,
            )
            .with(
                TileKind::tunnel(
                    "double-L-up-right",
                    vec![Crossing(Up, Right), Crossing(Down, Left)],
                ),
                0.5,
            )
    }

    /// Long corridors: straights and corners dominate, crossings are rare.
    #[must_use]
    pub fn corridors() -> Self {
        Self::standard()
            .entries
            .into_iter()
            .fold(Self::default(), |catalog, entry| {
                let weight = match entry.tile.category {
                    TileCategory::Straight => 4.0,
                    TileCategory::Corner => 2.0,
                    TileCategory::Tee => 0.5,
                    _ => 0.25,
                };
                catalog.with(entry.tile, weight)
            })
    }

    /// A vertical straight tile and a never-picked block.
    #[must_use]
    pub fn straight() -> Self {
        Self::default()
            .with(
                TileKind::new(
                    "I-vertical",
                    Directions::from_slice(&[Direction::Up, Direction::Down]),
                ),
                1.0,
            )
            .with(TileKind::new("block", Directions::NONE), 0.0)
    }

    /// The four-way tile alone.
    #[must_use]
    pub fn cross() -> Self {
        Self::default().with(TileKind::new("X", Directions::ALL), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_exits() {
        use Direction::{Down, Left, Right, Up};

        let category = |exits: &[Direction]| TileCategory::from_exits(Directions::from_slice(exits));

        assert_eq!(category(&[]), TileCategory::Block);
        assert_eq!(category(&[Up]), TileCategory::DeadEnd);
        assert_eq!(category(&[Up, Down]), TileCategory::Straight);
        assert_eq!(category(&[Left, Right]), TileCategory::Straight);
        assert_eq!(category(&[Up, Right]), TileCategory::Corner);
        assert_eq!(category(&[Up, Left, Right]), TileCategory::Tee);
        assert_eq!(category(&[Up, Down, Left, Right]), TileCategory::Cross);
    }

    #[test]
    fn test_tunnel_exits_and_crossings() {
        let tunnel = TileKind::tunnel(
            "double-L",
            vec![
                Crossing(Direction::Up, Direction::Left),
                Crossing(Direction::Down, Direction::Right),
            ],
        );

        assert_eq!(tunnel.exits, Directions::ALL);
        assert!(tunnel.category.is_tunnel());

        let crossing = Crossing(Direction::Up, Direction::Left);
        assert_eq!(crossing.other_end(Direction::Left), Some(Direction::Up));
        assert_eq!(crossing.other_end(Direction::Down), None);
    }

    #[test]
    fn test_crossing_parse() {
        assert_eq!(
            Crossing::parse("UL"),
            Some(Crossing(Direction::Up, Direction::Left))
        );
        assert_eq!(Crossing::parse("UU"), None);
        assert_eq!(Crossing::parse("ULD"), None);
        assert_eq!(Crossing::parse("U"), None);
    }

    #[test]
    fn test_validate_rejects_bad_catalogs() {
        assert!(matches!(
            TileCatalog::default().validate(),
            Err(Error::EmptyCatalog)
        ));

        let zero = TileCatalog::default().with(TileKind::new("X", Directions::ALL), 0.0);
        assert!(matches!(zero.validate(), Err(Error::ZeroWeightCatalog)));

        let negative = TileCatalog::default().with(TileKind::new("X", Directions::ALL), -1.0);
        assert!(matches!(
            negative.validate(),
            Err(Error::InvalidWeight { .. })
        ));

        let nan = TileCatalog::default().with(TileKind::new("X", Directions::ALL), f64::NAN);
        assert!(matches!(nan.validate(), Err(Error::InvalidWeight { .. })));

    }

    #[test]
    fn test_large_catalog_is_accepted() {
        let large = (0..65).fold(TileCatalog::default(), |catalog, index| {
            catalog.with(TileKind::new(format!("tile-{index}"), Directions::ALL), 1.0)
        });

        assert!(large.validate().is_ok(), "catalog size is unbounded");
        assert_eq!(large.len(), 65);
    }

    #[test]
    fn test_presets_are_valid() {
        for catalog in [
            TileCatalog::standard(),
            TileCatalog::corridors(),
            TileCatalog::straight(),
            TileCatalog::cross(),
        ] {
            assert!(catalog.validate().is_ok(), "preset should validate");
        }
        assert_eq!(TileCatalog::standard().len(), 13);
        assert_eq!(TileCatalog::straight().find("block"), Some(TileId(1)));
    }
}
