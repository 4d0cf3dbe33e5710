//! Procedural maze generation by constraint propagation over weighted tiles.
//!
//! A maze is a square grid of tiles, each allowing passage out of its cell in some of the four
//! directions. [`generate`] fills the grid so that every exit is answered by an exit back from
//! the neighbouring cell, picking tiles at random in proportion to their catalog weights. Cells
//! the propagation cannot reach, or cannot fill, hold a void placeholder.
//!
//! [`Generation`] exposes the same run as a lazy sequence of placements for callers that want
//! to watch the maze grow, which is what the bundled terminal front end does.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod animation;
mod app;
pub mod catalog_loader;
pub mod config;
pub mod direction;
pub mod domain;
pub mod elements;
pub mod error;
mod events;
pub mod fill;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod maze;
mod preset;
pub mod selection;
pub mod tile;
pub mod tunnel;
mod types;
mod ui;

pub use app::App;
pub use config::Cli;
pub use error::{Error, Result};
pub use generator::{generate, Generation, GeneratorConfig, Placement, Strategy};
pub use maze::{Cell, Maze};
pub use tile::{TileCatalog, TileId, TileKind};
