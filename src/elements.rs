//! Map elements scattered over a generated maze.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::{
    error::{Error, Result},
    grid::{Grid, Position},
    maze::Maze,
};

/// Number of random probes made for one element before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Something placed on a tile after generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapElement {
    /// A monster waiting on its tile.
    Monster,
    /// A teleport moving whoever steps on it.
    Teleport,
    /// A well to fall into.
    Well,
}

impl MapElement {
    /// Glyph drawn for the element in the terminal front end.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Monster => 'M',
            Self::Teleport => 'T',
            Self::Well => 'W',
        }
    }
}

impl fmt::Display for MapElement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Monster => "monster",
            Self::Teleport => "teleport",
            Self::Well => "well",
        };
        formatter.write_str(name)
    }
}

/// How many of each element to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementCounts {
    /// Number of monsters.
    pub monsters: usize,
    /// Number of teleports.
    pub teleports: usize,
    /// Number of wells.
    pub wells: usize,
}

impl Default for ElementCounts {
    fn default() -> Self {
        Self {
            monsters: 1,
            teleports: 2,
            wells: 2,
        }
    }
}

impl ElementCounts {
    /// No elements at all.
    pub const NONE: Self = Self {
        monsters: 0,
        teleports: 0,
        wells: 0,
    };

    /// Total number of elements.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.monsters + self.teleports + self.wells
    }

    /// The elements to place, monsters first, then teleports, then wells.
    fn sequence(&self) -> impl Iterator<Item = MapElement> {
        std::iter::repeat(MapElement::Monster)
            .take(self.monsters)
            .chain(std::iter::repeat(MapElement::Teleport).take(self.teleports))
            .chain(std::iter::repeat(MapElement::Well).take(self.wells))
    }
}

/// Places the requested elements on random empty tiles of `maze`.
///
/// A tile is empty when it is neither void nor a tunnel and holds no element yet. Each element
/// probes uniformly random positions and fails with [`Error::NoEmptyTiles`] after
/// [`MAX_PLACEMENT_ATTEMPTS`] misses.
///
/// # Errors
///
/// Returns [`Error::NoEmptyTiles`] when an element finds no empty tile in time.
pub fn place_elements<R: Rng + ?Sized>(
    maze: &Maze,
    counts: &ElementCounts,
    rng: &mut R,
) -> Result<Vec<(Position, MapElement)>> {
    let size = maze.size();
    let mut occupied = Grid::filled(size, false);
    let mut placed = Vec::with_capacity(counts.total());

    for element in counts.sequence() {
        let position = (0..MAX_PLACEMENT_ATTEMPTS)
            .map(|_| Position::new(rng.gen_range(0..size), rng.gen_range(0..size)))
            .find(|position| {
                occupied.get(*position) == Some(&false)
                    && maze.cell(*position).is_some_and(|cell| !cell.is_void())
                    && !maze.is_tunnel(*position)
            })
            .ok_or(Error::NoEmptyTiles(element))?;

        let _ = occupied.replace(position, true);
        debug!("placed a {element} at {position}");
        placed.push((position, element));
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{
        direction::{Direction, Directions},
        maze::Cell,
        tile::{Crossing, TileCatalog, TileId, TileKind},
    };

    /// A 3x3 maze with void on the left column and a tunnel in the middle.
    fn maze() -> Maze {
        let catalog = TileCatalog::default()
            .with(TileKind::new("X", Directions::ALL), 1.0)
            .with(
                TileKind::tunnel(
                    "bridge",
                    vec![
                        Crossing(Direction::Up, Direction::Down),
                        Crossing(Direction::Left, Direction::Right),
                    ],
                ),
                1.0,
            );
        let cells = Grid::from_fn(3, |position| match (position.x, position.y) {
            (0, _) => Cell::Void,
            (1, 1) => Cell::Tile {
                id: TileId(1),
                exits: Directions::ALL,
            },
            _ => Cell::Tile {
                id: TileId(0),
                exits: Directions::ALL,
            },
        });
        Maze::new(cells, catalog, 0, None)
    }

    #[test]
    fn test_elements_land_on_distinct_empty_tiles() {
        let maze = maze();
        let counts = ElementCounts {
            monsters: 1,
            teleports: 2,
            wells: 2,
        };
        let mut rng = StdRng::seed_from_u64(5);

        let placed = place_elements(&maze, &counts, &mut rng).expect("five empty tiles");

        assert_eq!(placed.len(), 5);
        assert_eq!(
            placed.iter().map(|(_, element)| *element).collect::<Vec<_>>(),
            vec![
                MapElement::Monster,
                MapElement::Teleport,
                MapElement::Teleport,
                MapElement::Well,
                MapElement::Well,
            ]
        );
        for (position, _) in &placed {
            assert_ne!(position.x, 0, "void column");
            assert_ne!(*position, Position::new(1, 1), "tunnel");
        }
        let mut positions = placed.iter().map(|(position, _)| *position).collect::<Vec<_>>();
        positions.sort_by_key(|position| (position.x, position.y));
        positions.dedup();
        assert_eq!(positions.len(), 5);
    }

    #[test]
    fn test_running_out_of_empty_tiles() {
        let maze = maze();
        let counts = ElementCounts {
            monsters: 0,
            teleports: 0,
            wells: 6,
        };
        let mut rng = StdRng::seed_from_u64(5);

        let result = place_elements(&maze, &counts, &mut rng);

        assert!(matches!(result, Err(Error::NoEmptyTiles(MapElement::Well))));
    }

    #[test]
    fn test_no_elements_requested() {
        let mut rng = StdRng::seed_from_u64(1);

        let placed = place_elements(&maze(), &ElementCounts::NONE, &mut rng).expect("nothing to do");

        assert!(placed.is_empty());
    }
}
