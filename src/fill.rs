//! Unconstrained weighted fill followed by a reciprocity repair.
//!
//! Every cell gets an independent weighted pick from the whole catalog, in row-major order.
//! Afterwards [`repair`] closes every exit that is not matched by an exit back from the
//! neighbour, including exits leading off the grid. The result is locally consistent but makes no
//! promise about reachability.

use rand::Rng;

use crate::{
    direction::Directions,
    domain::Domain,
    grid::Grid,
    maze::Cell,
    selection::pick_weighted,
    tile::TileCatalog,
};

/// Fills a `size` by `size` grid with independent weighted picks and repairs it.
pub fn fill<R: Rng + ?Sized>(catalog: &TileCatalog, size: usize, rng: &mut R) -> Grid<Cell> {
    let full = Domain::full(catalog);
    let raw = Grid::from_fn(size, |_| {
        pick_weighted(catalog, &full, rng).map_or(Cell::Void, |id| Cell::Tile {
            id,
            exits: catalog.tile(id).map(|tile| tile.exits).unwrap_or_default(),
        })
    });

    repair(&raw)
}

/// Keeps only the exits that the neighbouring cell answers with an exit back.
///
/// Reciprocity is symmetric, so one pass over the original exits settles every edge.
#[must_use]
pub fn repair(cells: &Grid<Cell>) -> Grid<Cell> {
    Grid::from_fn(cells.size(), |position| match cells.get(position) {
        Some(Cell::Tile { id, exits }) => {
            let kept = exits
                .directions()
                .filter(|direction| {
                    cells
                        .neighbour(position, *direction)
                        .and_then(|neighbour| cells.get(neighbour))
                        .is_some_and(|neighbour| neighbour.exits().opens(direction.opposite()))
                })
                .fold(Directions::NONE, Directions::with);
            Cell::Tile {
                id: *id,
                exits: kept,
            }
        }
        _ => Cell::Void,
    })
}
