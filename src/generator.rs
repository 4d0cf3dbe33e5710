//! Constraint-propagating maze generation.
//!
//! Generation fills a square grid with weighted-random tiles so that every exit a tile exposes
//! towards a neighbour is matched by an exit back. Each cell starts with the full catalog as its
//! domain; cells on the border lose the tiles that would lead off the grid. From a random start
//! cell a breadth-first frontier places one tile at a time and narrows the domains of the unset
//! neighbours:
//!
//! - a neighbour the new tile opens towards keeps only tiles opening back,
//! - a neighbour the new tile is closed towards loses every tile opening back.
//!
//! Only neighbours the tile opens towards join the frontier, so cells that cannot be reached from
//! the start are filled with void once the frontier drains. When a cell's domain runs dry the
//! [`Strategy`] decides what happens: [`Strategy::Propagate`] settles it as void and moves on,
//! [`Strategy::Backtrack`] rolls back to the last choice that had alternatives.

use std::collections::VecDeque;

use clap::ValueEnum;
use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

use crate::{
    direction::Direction,
    domain::Domain,
    error::{Error, Result},
    fill,
    grid::{Grid, Position},
    maze::{Cell, Maze},
    selection::pick_weighted,
    tile::{TileCatalog, TileId},
};

/// Upper bound on rollbacks before the backtracking strategy gives up.
pub const BACKTRACK_LIMIT: usize = 100_000;

/// How the grid gets filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Frontier-driven propagation; a cell with no admissible tile becomes void.
    #[default]
    Propagate,
    /// Frontier-driven propagation that rolls back to earlier choices instead of placing void.
    ///
    /// Every choice that had alternatives keeps a full copy of the grid, the domains and the
    /// frontier until the run ends, so memory grows with the number of cells decided. A 50x50
    /// grid can hold on to a few hundred megabytes before it finishes.
    Backtrack,
    /// Independent weighted picks for every cell followed by a repair pass.
    Fill,
}

/// Everything a generation run depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Side length of the square grid.
    pub size: usize,
    /// Tile types to pick from.
    pub catalog: TileCatalog,
    /// Seed for the random number generator; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Filling strategy.
    pub strategy: Strategy,
}

impl GeneratorConfig {
    /// Builds a configuration with a random seed and the default strategy.
    #[must_use]
    pub fn new(size: usize, catalog: TileCatalog) -> Self {
        Self {
            size,
            catalog,
            seed: None,
            strategy: Strategy::default(),
        }
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks size and catalog before any work is done.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSize`] for a zero size
    /// - any catalog error from [`TileCatalog::validate`]
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidSize(self.size));
        }
        self.catalog.validate()
    }
}

/// Generates a complete maze.
///
/// # Errors
///
/// - validation errors from [`GeneratorConfig::validate`]
/// - [`Error::Unsatisfiable`] when the backtracking strategy runs out of choices
pub fn generate(config: &GeneratorConfig) -> Result<Maze> {
    Generation::new(config)?.finish()
}

/// One event of a generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// A cell was settled.
    Placed {
        /// Where.
        position: Position,
        /// With what.
        cell: Cell,
    },
    /// A cell settled earlier was cleared again by a rollback.
    Retracted {
        /// Which cell.
        position: Position,
    },
}

impl Placement {
    /// The cell the event is about.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Placed { position, .. } | Self::Retracted { position } => *position,
        }
    }
}

/// A generation run as a lazy, finite sequence of [`Placement`] events.
///
/// Callers that want to animate the maze pull one event at a time; [`Generation::finish`] runs
/// the rest and returns the maze. Dropping the sequence early abandons the run without exposing
/// the partial grid. Building a new sequence from the same config restarts it identically.
pub struct Generation {
    /// Strategy-specific state.
    mode: Mode,
}

/// State behind a [`Generation`].
enum Mode {
    /// Propagation with or without rollbacks.
    Solve(Box<Solver>),
    /// A maze built up front, replayed one cell at a time.
    Replay {
        /// The finished maze.
        maze: Maze,
        /// Row-major index of the next cell to replay.
        next: usize,
    },
}

impl Generation {
    /// Validates `config` and prepares a run.
    ///
    /// # Errors
    ///
    /// Validation errors from [`GeneratorConfig::validate`].
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!(
            "generating a {size}x{size} maze with {strategy:?}, seed {seed}",
            size = config.size,
            strategy = config.strategy,
        );

        let mode = match config.strategy {
            Strategy::Propagate => Mode::Solve(Box::new(Solver::new(config, seed, false))),
            Strategy::Backtrack => Mode::Solve(Box::new(Solver::new(config, seed, true))),
            Strategy::Fill => {
                let mut rng = StdRng::seed_from_u64(seed);
                let cells = fill::fill(&config.catalog, config.size, &mut rng);
                Mode::Replay {
                    maze: Maze::new(cells, config.catalog.clone(), seed, None),
                    next: 0,
                }
            }
        };

        Ok(Self { mode })
    }

    /// Seed driving this run.
    #[must_use]
    pub fn seed(&self) -> u64 {
        match &self.mode {
            Mode::Solve(solver) => solver.seed,
            Mode::Replay { maze, .. } => maze.seed(),
        }
    }

    /// Side length of the grid being generated.
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.mode {
            Mode::Solve(solver) => solver.grid.size(),
            Mode::Replay { maze, .. } => maze.size(),
        }
    }

    /// Runs the remaining events and returns the completed maze.
    ///
    /// # Errors
    ///
    /// [`Error::Unsatisfiable`] when the backtracking strategy runs out of choices.
    pub fn finish(mut self) -> Result<Maze> {
        self.by_ref().for_each(drop);

        let maze = match self.mode {
            Mode::Solve(solver) => solver.into_maze()?,
            Mode::Replay { maze, .. } => maze,
        };
        info!(
            "generated a {size}x{size} maze with {voids} void cells (seed {seed})",
            size = maze.size(),
            voids = maze.void_count(),
            seed = maze.seed(),
        );

        Ok(maze)
    }
}

impl Iterator for Generation {
    type Item = Placement;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.mode {
            Mode::Solve(solver) => solver.next_event(),
            Mode::Replay { maze, next } => {
                let size = maze.size();
                if *next >= size * size {
                    return None;
                }
                let position = Position::new(*next % size, *next / size);
                *next += 1;
                maze.cell(position)
                    .map(|cell| Placement::Placed {
                        position,
                        cell: *cell,
                    })
            }
        }
    }
}

/// Where a [`Solver`] is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Draining the frontier.
    Propagating,
    /// Settling unreached cells as void, holding the row-major index of the next cell to check.
    Filling(usize),
    /// Nothing left to do.
    Done,
}

/// Snapshot taken before a choice that had alternatives.
struct DecisionPoint {
    /// Grid before the choice.
    grid: Grid<Option<Cell>>,
    /// Domains before the choice.
    domains: Grid<Domain>,
    /// Frontier membership before the choice.
    queued: Grid<bool>,
    /// Frontier before the choice.
    queue: VecDeque<Position>,
    /// Cell the choice was made for.
    position: Position,
    /// Tile that was chosen.
    chosen: TileId,
}

/// Propagation state for one run.
struct Solver {
    /// Tile types to pick from.
    catalog: TileCatalog,
    /// Whether an exhausted domain rolls back instead of settling as void.
    backtracking: bool,
    /// Seed of `rng`.
    seed: u64,
    /// Random number generator for the run.
    rng: StdRng,
    /// Cell the frontier was seeded from.
    start: Option<Position>,
    /// Settled cells; `None` while unset.
    grid: Grid<Option<Cell>>,
    /// Admissible tiles per cell.
    domains: Grid<Domain>,
    /// Whether a cell has already joined the frontier.
    queued: Grid<bool>,
    /// The frontier.
    queue: VecDeque<Position>,
    /// Cell to decide again after a rollback, ahead of the frontier.
    retry: Option<Position>,
    /// Snapshots to roll back to.
    history: Vec<DecisionPoint>,
    /// Rollbacks performed so far.
    rollbacks: usize,
    /// Events produced but not yet handed out.
    events: VecDeque<Placement>,
    /// Progress through the run.
    phase: Phase,
    /// Set when backtracking gave up.
    failure: Option<Error>,
}

impl Solver {
    /// Prepares domains, prunes the border and seeds the frontier.
    fn new(config: &GeneratorConfig, seed: u64, backtracking: bool) -> Self {
        let size = config.size;
        let catalog = config.catalog.clone();
        let mut rng = StdRng::seed_from_u64(seed);

        let full = Domain::full(&catalog);
        let shape = Grid::filled(size, ());
        let domains = Grid::from_fn(size, |position| {
            let mut domain = full.clone();
            for direction in shape.off_grid_directions(position).directions() {
                domain.remove_exposing(&catalog, direction);
            }
            domain
        });

        let candidates: Vec<Position> = domains
            .iter()
            .filter(|(_, domain)| domain.is_selectable(&catalog))
            .map(|(position, _)| position)
            .collect();
        let start = if candidates.is_empty() {
            None
        } else {
            candidates.get(rng.gen_range(0..candidates.len())).copied()
        };

        let mut queued = Grid::filled(size, false);
        let mut queue = VecDeque::new();
        if let Some(position) = start {
            let _ = queued.replace(position, true);
            queue.push_back(position);
        }

        let mut solver = Self {
            catalog,
            backtracking,
            seed,
            rng,
            start,
            grid: Grid::filled(size, None),
            domains,
            queued,
            queue,
            retry: None,
            history: Vec::new(),
            rollbacks: 0,
            events: VecDeque::new(),
            phase: Phase::Propagating,
            failure: None,
        };
        if start.is_none() {
            warn!("no cell of the {size}x{size} grid admits a tile");
            if backtracking {
                solver.fail();
            }
        }

        solver
    }

    /// Produces the next event, advancing the run as far as needed.
    fn next_event(&mut self) -> Option<Placement> {
        loop {
            if let Some(event) = self.events.pop_front() {
                return Some(event);
            }
            match self.phase {
                Phase::Propagating => self.advance(),
                Phase::Filling(index) => self.fill_void(index),
                Phase::Done => return None,
            }
        }
    }

    /// Takes one cell off the frontier and settles it.
    fn advance(&mut self) {
        let Some(position) = self.retry.take().or_else(|| self.queue.pop_front()) else {
            self.phase = Phase::Filling(0);
            return;
        };
        if self.grid.get(position).is_some_and(Option::is_some) {
            return;
        }

        let domain = self.domains.get(position).cloned().unwrap_or_default();
        match pick_weighted(&self.catalog, &domain, &mut self.rng) {
            Some(id) => {
                if self.backtracking && has_alternatives(&self.catalog, &domain) {
                    self.history.push(DecisionPoint {
                        grid: self.grid.clone(),
                        domains: self.domains.clone(),
                        queued: self.queued.clone(),
                        queue: self.queue.clone(),
                        position,
                        chosen: id,
                    });
                }
                self.place(position, id);
            }
            None if self.backtracking => self.roll_back(),
            None => {
                warn!("no admissible tile at {position}, leaving it void");
                self.settle(position, Cell::Void);
            }
        }
    }

    /// Places tile `id` at `position` and narrows the domains of its unset neighbours.
    ///
    /// While backtracking, a frontier cell left without a selectable tile rolls the placement
    /// back at once instead of waiting for the cell to be dequeued.
    fn place(&mut self, position: Position, id: TileId) {
        let exits = self
            .catalog
            .tile(id)
            .map(|tile| tile.exits)
            .unwrap_or_default();
        let mut dead_end = false;

        for direction in Direction::ALL {
            let Some(neighbour) = self.grid.neighbour(position, direction) else {
                continue;
            };
            if self.grid.get(neighbour).is_some_and(Option::is_some) {
                continue;
            }

            let opens = exits.opens(direction);
            if let Some(domain) = self.domains.get_mut(neighbour) {
                if opens {
                    domain.remove_not_exposing(&self.catalog, direction.opposite());
                } else {
                    domain.remove_exposing(&self.catalog, direction.opposite());
                }
            }
            if opens && self.queued.replace(neighbour, true) == Some(false) {
                self.queue.push_back(neighbour);
            }
            if self.backtracking
                && self.queued.get(neighbour) == Some(&true)
                && !self
                    .domains
                    .get(neighbour)
                    .is_some_and(|domain| domain.is_selectable(&self.catalog))
            {
                dead_end = true;
            }
        }

        if dead_end {
            trace!("placing tile {id:?} at {position} strands a frontier cell");
            self.roll_back();
            return;
        }
        self.settle(position, Cell::Tile { id, exits });
    }

    /// Records `cell` at `position` and emits the matching event.
    fn settle(&mut self, position: Position, cell: Cell) {
        trace!("settled {position} with {cell:?}");
        let _ = self.grid.replace(position, Some(cell));
        self.events
            .push_back(Placement::Placed { position, cell });
    }

    /// Restores the most recent decision point and rules its choice out.
    fn roll_back(&mut self) {
        self.rollbacks += 1;
        if self.rollbacks > BACKTRACK_LIMIT {
            warn!("giving up after {BACKTRACK_LIMIT} rollbacks");
            self.fail();
            return;
        }
        let Some(point) = self.history.pop() else {
            self.fail();
            return;
        };

        for (position, cell) in self.grid.iter() {
            if cell.is_some() && point.grid.get(position).is_some_and(Option::is_none) {
                self.events.push_back(Placement::Retracted { position });
            }
        }

        self.grid = point.grid;
        self.domains = point.domains;
        self.queued = point.queued;
        self.queue = point.queue;
        if let Some(domain) = self.domains.get_mut(point.position) {
            domain.remove(point.chosen);
        }
        self.retry = Some(point.position);
    }

    /// Ends the run as unsatisfiable.
    fn fail(&mut self) {
        self.failure = Some(Error::Unsatisfiable {
            size: self.grid.size(),
        });
        self.phase = Phase::Done;
    }

    /// Settles the cell at row-major `index` as void if it was never reached.
    fn fill_void(&mut self, index: usize) {
        let size = self.grid.size();
        if index >= size * size {
            self.phase = Phase::Done;
            return;
        }
        self.phase = Phase::Filling(index + 1);

        let position = Position::new(index % size, index / size);
        if self.grid.get(position).is_some_and(Option::is_none) {
            self.settle(position, Cell::Void);
        }
    }

    /// Converts the settled grid into a maze.
    fn into_maze(self) -> Result<Maze> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        let cells = self.grid.map(|cell| cell.unwrap_or(Cell::Void));
        Ok(Maze::new(cells, self.catalog, self.seed, self.start))
    }
}

/// Checks whether more than one member of `domain` could be picked.
fn has_alternatives(catalog: &TileCatalog, domain: &Domain) -> bool {
    domain.iter().filter(|id| catalog.weight(*id) > 0.0).count() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Directions;

    fn straight_id(maze: &Maze) -> Option<TileId> {
        maze.catalog().find("I-vertical")
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let zero_size = GeneratorConfig::new(0, TileCatalog::standard());
        assert!(matches!(generate(&zero_size), Err(Error::InvalidSize(0))));

        let empty = GeneratorConfig::new(5, TileCatalog::default());
        assert!(matches!(generate(&empty), Err(Error::EmptyCatalog)));

        let zero_weights = GeneratorConfig::new(
            5,
            TileCatalog::default().with(
                crate::tile::TileKind::new("X", Directions::ALL),
                0.0,
            ),
        );
        assert!(matches!(
            generate(&zero_weights),
            Err(Error::ZeroWeightCatalog)
        ));
    }

    #[test]
    fn test_adjacency_and_border_hold_for_many_seeds() {
        for strategy in [Strategy::Propagate, Strategy::Backtrack, Strategy::Fill] {
            for seed in 0..40 {
                let config = GeneratorConfig::new(12, TileCatalog::standard())
                    .with_seed(seed)
                    .with_strategy(strategy);
                let maze = generate(&config).expect("standard catalog always generates");

                assert!(
                    maze.is_consistent(),
                    "{strategy:?} seed {seed} broke adjacency: {:?}",
                    maze.broken_exits()
                );
            }
        }
    }

    #[test]
    fn test_border_cells_never_open_off_grid() {
        let config = GeneratorConfig::new(8, TileCatalog::standard()).with_seed(11);
        let maze = generate(&config).expect("generation succeeds");
        let last = maze.size() - 1;

        for (position, cell) in maze.cells() {
            let exits = cell.exits();
            if position.y == 0 {
                assert!(!exits.opens(Direction::Down), "{position} opens down");
            }
            if position.y == last {
                assert!(!exits.opens(Direction::Up), "{position} opens up");
            }
            if position.x == 0 {
                assert!(!exits.opens(Direction::Left), "{position} opens left");
            }
            if position.x == last {
                assert!(!exits.opens(Direction::Right), "{position} opens right");
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        for strategy in [Strategy::Propagate, Strategy::Backtrack, Strategy::Fill] {
            let config = GeneratorConfig::new(15, TileCatalog::standard())
                .with_seed(1234)
                .with_strategy(strategy);

            let first = generate(&config).expect("first run");
            let second = generate(&config).expect("second run");
            assert_eq!(first, second, "{strategy:?} is not deterministic");
        }
    }

    #[test]
    fn test_every_cell_is_settled() {
        let config = GeneratorConfig::new(10, TileCatalog::corridors()).with_seed(5);
        let events: Vec<Placement> = Generation::new(&config)
            .expect("valid config")
            .collect();

        let mut settled = Grid::filled(10, false);
        for event in &events {
            if let Placement::Placed { position, .. } = event {
                let _ = settled.replace(*position, true);
            }
        }
        assert!(settled.iter().all(|(_, done)| *done));
        assert_eq!(generate(&config).expect("maze").cells().count(), 100);
    }

    #[test]
    fn test_events_replay_into_finished_maze() {
        let config = GeneratorConfig::new(9, TileCatalog::standard())
            .with_seed(77)
            .with_strategy(Strategy::Backtrack);
        let maze = generate(&config).expect("maze");

        let mut view = Grid::filled(9, None);
        for event in Generation::new(&config).expect("valid config") {
            match event {
                Placement::Placed { position, cell } => {
                    let _ = view.replace(position, Some(cell));
                }
                Placement::Retracted { position } => {
                    let _ = view.replace(position, None);
                }
            }
        }
        for (position, cell) in maze.cells() {
            assert_eq!(view.get(position), Some(&Some(*cell)));
        }
    }

    #[test]
    fn test_straight_catalog_fills_start_column() {
        for seed in [0, 1, 2, 3, 99] {
            let config = GeneratorConfig::new(5, TileCatalog::straight()).with_seed(seed);
            let maze = generate(&config).expect("maze");
            let start = maze.start().expect("interior cells admit the straight tile");
            let straight = straight_id(&maze);

            assert!((1..=3).contains(&start.y), "start {start} sits on a pruned row");
            for (position, cell) in maze.cells() {
                let expected_straight =
                    position.x == start.x && (1..=3).contains(&position.y);
                if expected_straight {
                    assert_eq!(cell.tile_id(), straight, "{position} should be straight");
                } else {
                    assert!(cell.is_void(), "{position} should be void");
                }
            }
            assert_eq!(maze.void_count(), 22);
            assert!(maze.is_consistent());
        }
    }

    /// Expands a sketch where `#` is void, `|` a vertical straight and `+` a cross.
    fn sketch(rows: &[&str]) -> String {
        rows.iter()
            .map(|row| {
                row.replace('#', "\u{2588}")
                    .replace('|', "\u{2502}")
                    .replace('+', "\u{253c}")
                    + "\n"
            })
            .collect()
    }

    #[test]
    fn test_straight_catalog_renders_literally() {
        let config = GeneratorConfig::new(5, TileCatalog::straight()).with_seed(2024);
        let maze = generate(&config).expect("maze");

        assert_eq!(maze.start(), Some(Position::new(2, 3)));
        assert_eq!(
            maze.to_string(),
            sketch(&["#####", "##|##", "##|##", "##|##", "#####"])
        );
    }

    #[test]
    fn test_cross_catalog_renders_literally() {
        let config = GeneratorConfig::new(4, TileCatalog::cross()).with_seed(8);
        let maze = generate(&config).expect("maze");

        assert_eq!(maze.start(), Some(Position::new(2, 1)));
        assert_eq!(maze.to_string(), sketch(&["####", "#++#", "#++#", "####"]));
    }

    #[test]
    fn test_cross_catalog_voids_the_perimeter() {
        for size in [3, 4, 7] {
            let config = GeneratorConfig::new(size, TileCatalog::cross()).with_seed(8);
            let maze = generate(&config).expect("maze");
            let last = size - 1;

            for (position, cell) in maze.cells() {
                let on_border =
                    position.x == 0 || position.y == 0 || position.x == last || position.y == last;
                if on_border {
                    assert!(cell.is_void(), "{position} is on the border");
                } else {
                    assert_eq!(cell.exits(), Directions::ALL, "{position} is interior");
                }
            }
            assert!(maze.is_consistent());
        }
    }

    #[test]
    fn test_backtracking_reports_unsatisfiable_catalog() {
        let config = GeneratorConfig::new(4, TileCatalog::cross())
            .with_seed(3)
            .with_strategy(Strategy::Backtrack);

        assert!(matches!(
            generate(&config),
            Err(Error::Unsatisfiable { size: 4 })
        ));
    }

    #[test]
    fn test_backtracking_avoids_void_in_reached_cells() {
        for seed in 0..20 {
            let config = GeneratorConfig::new(10, TileCatalog::standard())
                .with_seed(seed)
                .with_strategy(Strategy::Backtrack);
            let maze = generate(&config).expect("standard catalog is satisfiable");

            for (position, cell) in maze.cells() {
                if cell.is_void() {
                    continue;
                }
                for direction in cell.exits().directions() {
                    let neighbour = maze.grid().neighbour(position, direction).expect("on grid");
                    assert!(
                        !maze.cell(neighbour).is_some_and(Cell::is_void),
                        "seed {seed}: {position} opens into a void cell"
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let config = GeneratorConfig::new(1, TileCatalog::straight()).with_seed(0);
        let maze = generate(&config).expect("maze");

        assert_eq!(maze.start(), None);
        assert_eq!(maze.void_count(), 1);
    }

    #[test]
    fn test_abandoning_a_run_is_harmless() {
        let config = GeneratorConfig::new(6, TileCatalog::standard()).with_seed(4);
        let mut generation = Generation::new(&config).expect("valid config");

        assert_eq!(generation.seed(), 4);
        assert_eq!(generation.size(), 6);
        assert!(generation.next().is_some());
        drop(generation);

        assert!(generate(&config).is_ok());
    }
}
