//! Generation animation and coordinate transformation module.
//!
//! This module drives a lazy [`Generation`] one placement per frame, keeps the partially settled
//! grid for display, and turns it into canvas coordinates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use log::warn;
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    direction::Direction,
    elements::{place_elements, ElementCounts, MapElement},
    generator::{GeneratorConfig, Generation, Placement},
    grid::{Grid, Position},
    maze::{Cell, Maze},
    tunnel::TunnelNetwork,
};

/// Side length, in canvas points, of the square drawn for one maze cell.
pub(crate) const CELL_SCALE: usize = 3;

/// A finished maze together with what was derived from it.
#[derive(Debug)]
pub(crate) struct Outcome {
    /// The generated maze.
    pub(crate) maze: Maze,
    /// Elements placed on it.
    pub(crate) elements: Vec<(Position, MapElement)>,
    /// Links between its tunnel cells.
    pub(crate) tunnels: TunnelNetwork,
}

/// Animation state manager for maze generation.
///
/// This structure manages the animation state including timing, the generation run being played
/// back, and the grid of cells settled so far.
pub(crate) struct AnimationManager {
    /// Generation run being played back, `None` once it has finished.
    pub(crate) generation: Option<Generation>,
    /// Cells settled so far; `None` for cells not reached yet.
    pub(crate) view: Grid<Option<Cell>>,
    /// Cell touched by the most recent placement.
    pub(crate) last_placed: Option<Position>,
    /// The finished maze, once generation is over.
    pub(crate) outcome: Option<Outcome>,
    /// Message describing why the last run failed.
    pub(crate) error: Option<String>,
    /// Seed of the current run.
    pub(crate) seed: Option<u64>,
    /// Elements to place once the maze is finished.
    pub(crate) elements: ElementCounts,
    /// Timestamp of the last animation frame update.
    ///
    /// This field stores the time when the animation was last updated, used to control the timing
    /// between animation frames.
    pub(crate) last_update_time: Instant,
    /// Time between two placements.
    pub(crate) frame_delay: Duration,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_FRAME_DELAY_MS))
    }
}

impl AnimationManager {
    /// Creates an idle animation manager.
    pub(crate) fn new(frame_delay: Duration) -> Self {
        Self {
            generation: None,
            view: Grid::filled(0, None),
            last_placed: None,
            outcome: None,
            error: None,
            seed: None,
            elements: ElementCounts::NONE,
            last_update_time: Instant::now(),
            frame_delay,
        }
    }

    /// Starts a new generation run, dropping whatever was shown before.
    ///
    /// Without animation the run is completed on the spot.
    ///
    /// # Errors
    ///
    /// This function may return errors if the configuration is rejected.
    pub(crate) fn start(
        &mut self,
        config: &GeneratorConfig,
        elements: ElementCounts,
        animate: bool,
    ) -> Result<()> {
        self.clear();
        let generation = Generation::new(config)?;

        self.view = Grid::filled(generation.size(), None);
        self.seed = Some(generation.seed());
        self.elements = elements;

        if animate {
            self.generation = Some(generation);
        } else {
            self.complete(generation);
        }

        Ok(())
    }

    /// Clears all animation data and resets state.
    pub(crate) fn clear(&mut self) {
        self.generation = None;
        self.view = Grid::filled(0, None);
        self.last_placed = None;
        self.outcome = None;
        self.error = None;
        self.seed = None;
        self.last_update_time = Instant::now();
    }

    /// Checks whether a run is still being played back.
    pub(crate) const fn is_running(&self) -> bool {
        self.generation.is_some()
    }

    /// Number of void cells settled so far.
    pub(crate) fn void_count(&self) -> usize {
        self.view
            .iter()
            .filter(|(_, cell)| matches!(cell, Some(Cell::Void)))
            .count()
    }

    /// Updates the animation state based on timing and current progress.
    ///
    /// This method applies the next placement of the run when enough time has passed since the
    /// previous one.
    pub(crate) fn update(&mut self) {
        if self.is_running() && self.last_update_time.elapsed() >= self.frame_delay {
            self.last_update_time = Instant::now();
            self.step();
        }
    }

    /// Applies the next placement, or completes the run when there is none left.
    pub(crate) fn step(&mut self) {
        let Some(generation) = self.generation.as_mut() else {
            return;
        };

        match generation.next() {
            Some(Placement::Placed { position, cell }) => {
                let _ = self.view.replace(position, Some(cell));
                self.last_placed = Some(position);
            }
            Some(Placement::Retracted { position }) => {
                let _ = self.view.replace(position, None);
                self.last_placed = Some(position);
            }
            None => {
                if let Some(generation) = self.generation.take() {
                    self.complete(generation);
                }
            }
        }
    }

    /// Finishes `generation` and derives elements and tunnel links from the maze.
    fn complete(&mut self, generation: Generation) {
        self.generation = None;
        self.last_placed = None;

        let maze = match generation.finish() {
            Ok(maze) => maze,
            Err(err) => {
                warn!("generation failed: {err}");
                self.error = Some(err.to_string());
                return;
            }
        };

        let mut rng = StdRng::seed_from_u64(maze.seed());
        let elements = place_elements(&maze, &self.elements, &mut rng).unwrap_or_else(|err| {
            warn!("leaving the maze bare: {err}");
            self.error = Some(err.to_string());
            Vec::new()
        });

        self.view = maze.grid().clone().map(Some);
        self.outcome = Some(Outcome {
            tunnels: TunnelNetwork::link(&maze),
            maze,
            elements,
        });
    }
}

/// Top-left canvas point of the square drawn for `position`, as `(column, row)` from the top.
pub(crate) const fn cell_origin(position: Position, size: usize) -> (usize, usize) {
    (
        position.x * CELL_SCALE,
        (size - 1 - position.y) * CELL_SCALE,
    )
}

/// Centre canvas point of the square drawn for `position`.
pub(crate) const fn cell_center(position: Position, size: usize) -> (usize, usize) {
    let (col, row) = cell_origin(position, size);
    (col + 1, row + 1)
}

/// Lists the canvas points drawn as walls for the settled cells of `view`.
///
/// Every settled cell becomes a three by three square with solid corners. Void cells are solid
/// all over, tiles leave their centre open along with the middle of each side they exit through.
/// Cells not settled yet are left blank.
pub(crate) fn wall_coords(view: &Grid<Option<Cell>>) -> Vec<(usize, usize)> {
    let size = view.size();
    let mut coords = Vec::new();

    for (position, cell) in view.iter() {
        let Some(cell) = cell else {
            continue;
        };
        let (col, row) = cell_origin(position, size);
        let exits = cell.exits();
        for d_row in 0..CELL_SCALE {
            for d_col in 0..CELL_SCALE {
                let open = !cell.is_void()
                    && match (d_col, d_row) {
                        (1, 1) => true,
                        (1, 0) => exits.opens(Direction::Up),
                        (1, 2) => exits.opens(Direction::Down),
                        (0, 1) => exits.opens(Direction::Left),
                        (2, 1) => exits.opens(Direction::Right),
                        _ => false,
                    };
                if !open {
                    coords.push((col + d_col, row + d_row));
                }
            }
        }
    }

    coords
}

/// Transforms canvas points to screen coordinates for canvas rendering.
///
/// This function converts points (col, row) of an `extent` by `extent` drawing to screen
/// coordinates (x, y) using the standard transformation formulas: coordinate[i] = (n - 1) / 2 - i
/// for rows (ascending order) and coordinate[i] = i - (n - 1) / 2 for columns (descending order).
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_maze_to_screen_coords(
    maze_coords: &[(usize, usize)],
    extent: usize,
) -> Result<Vec<(f64, f64)>> {
    let extent = f64::from(u16::try_from(extent)?);

    maze_coords
        .iter()
        .map(|&(col, row)| {
            let screen_y = (extent - 1.) / 2. - f64::from(u16::try_from(row)?);
            let screen_x = f64::from(u16::try_from(col)?) - (extent - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}
