//! Library error types.

use thiserror::Error;

use crate::elements::MapElement;

/// Errors that can occur while validating inputs, generating a maze or decorating it.
///
/// Every error is local to the call that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested grid size is zero.
    #[error("invalid grid size {0}: the grid needs at least one cell")]
    InvalidSize(usize),

    /// The tile catalog holds no entry.
    #[error("the tile catalog is empty")]
    EmptyCatalog,

    /// Every catalog weight is zero, so no tile can ever be picked.
    #[error("every tile in the catalog has a zero weight")]
    ZeroWeightCatalog,

    /// A catalog weight is negative or not a finite number.
    #[error("tile {tile:?} has invalid weight {weight}")]
    InvalidWeight {
        /// Name of the offending tile.
        tile: String,
        /// The rejected weight.
        weight: f64,
    },

    /// Backtracking ran out of earlier decisions to revisit.
    #[error("the catalog cannot tile a {size}x{size} grid")]
    Unsatisfiable {
        /// Side length of the grid that could not be tiled.
        size: usize,
    },

    /// No empty tile was found to hold a map element.
    #[error("no empty tile left to place a {0}")]
    NoEmptyTiles(MapElement),

    /// A catalog file could not be parsed.
    #[error("line {line} of the catalog: {reason}")]
    CatalogParse {
        /// One-based line number of the offending line.
        line: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
